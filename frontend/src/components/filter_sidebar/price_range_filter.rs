//! Price block: a two-handle slider with number inputs, the configured
//! bucket shortcuts, and an Apply button that commits the range.

use common::{
    facet_summary::{FacetSummary, PriceRangeFacet},
    filter_state::{FIELD_FILTERS_PARAM, FilterEdit},
    sidebar_layout::{PendingPriceRange, annotate_label, slider_bounds},
};
use dioxus::prelude::*;

use crate::data_definitions::catalog_query::CatalogPageState;


#[component]
pub fn PriceRangeFilter(summary: ReadSignal<FacetSummary>) -> Element {
    let page = use_context::<CatalogPageState>();
    let bounds = use_memo(move || summary.read().price_min_max.as_ref().and_then(slider_bounds));
    let buckets = use_memo(move || summary.read().price_ranges.clone().unwrap_or_default());
    let mut pending = use_signal(move || {
        bounds().map(|b| PendingPriceRange::new(b, page.query.peek().filter_state(FIELD_FILTERS_PARAM).price_range()))
    });

    let apply = move |_: Event<MouseData>| {
        let Some(range) = *pending.peek() else {
            return;
        };
        let (from, to) = range.committed();
        page.commit_edit(FIELD_FILTERS_PARAM, &FilterEdit::PriceRange { from, to });
    };

    rsx! {
        div {
            class: "x-filter-block",
            h3 { "Price" }

            if let Some(range) = pending() {
                div {
                    class: "x-price-slider",
                    input {
                        r#type: "range",
                        min: "{range.bounds.0}",
                        max: "{range.bounds.1}",
                        value: "{range.low}",
                        oninput: move |e: Event<FormData>| {
                            if let Ok(v) = e.value().parse::<f64>() {
                                pending.with_mut(|p| if let Some(p) = p { p.set_low(v) });
                            }
                        },
                    }
                    input {
                        r#type: "range",
                        min: "{range.bounds.0}",
                        max: "{range.bounds.1}",
                        value: "{range.high}",
                        oninput: move |e: Event<FormData>| {
                            if let Ok(v) = e.value().parse::<f64>() {
                                pending.with_mut(|p| if let Some(p) = p { p.set_high(v) });
                            }
                        },
                    }
                }
                div {
                    style: "display: flex; flex-direction: row; gap: 8px; align-items: center; margin: 8px 0;",
                    input {
                        r#type: "number",
                        style: "width: 100%; min-width: 0; padding: 4px;",
                        value: "{range.low}",
                        onchange: move |e: Event<FormData>| {
                            if let Ok(v) = e.value().parse::<f64>() {
                                pending.with_mut(|p| if let Some(p) = p { p.set_low(v) });
                            }
                        },
                    }
                    "-"
                    input {
                        r#type: "number",
                        style: "width: 100%; min-width: 0; padding: 4px;",
                        value: "{range.high}",
                        onchange: move |e: Event<FormData>| {
                            if let Ok(v) = e.value().parse::<f64>() {
                                pending.with_mut(|p| if let Some(p) = p { p.set_high(v) });
                            }
                        },
                    }
                }
            }

            ul {
                for bucket in buckets() {
                    li {
                        key: "{bucket.name}",
                        PriceBucketShortcut { bucket: bucket.clone(), pending }
                    }
                }
            }

            button {
                style: "
                    cursor: pointer;
                    margin-top: 8px;
                    padding: 6px 16px;
                    border: 1px solid rgb(28, 33, 45);
                    border-radius: 1000px;
                    background-color: white;
                    font-size: 14px;
                ",
                onclick: apply,
                "Apply"
            }
        }
    }
}

/// Clicking a bucket only moves the pending range; Apply still commits.
#[component]
fn PriceBucketShortcut(bucket: ReadSignal<PriceRangeFacet>, pending: Signal<Option<PendingPriceRange>>) -> Element {
    let bucket = bucket.read().clone();
    let label = annotate_label(&bucket.label, bucket.count);
    rsx! {
        div {
            class: "x-facet-list-item",
            style: "cursor: pointer; padding: 4px; font-size: 15px;",
            onclick: move |_| {
                pending.with_mut(|p| {
                    if let Some(p) = p {
                        *p = PendingPriceRange::new(p.bounds, (bucket.from_amount, bucket.to_amount));
                    }
                });
            },
            "{label}"
        }
    }
}
