//! Catalog filter sidebar.
//!
//! Waits for the listing to publish its own filter blocks, then renders them
//! with the price, offers and badges blocks placed among them. Native field
//! labels get the facet counts appended.

pub mod checkbox_filter;
pub mod price_range_filter;

use std::{rc::Rc, time::Duration};

use common::{
    debounce::{DebounceGate, InitGuard},
    facet_summary::{FacetSummary, NamedCount},
    filter_state::{BADGES_FILTER, BRAND_FILTER, FIELD_FILTERS_PARAM, ITEM_GROUP_FILTER, ITEM_GROUP_PARAM, OFFERS_FILTER},
    retry_policy::RetryPolicy,
    sidebar_layout::{FilterBlockKind, PlacedBlock, SidebarBlock, annotate_native_label, arrange_blocks, has_price_filter},
};
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use crate::{
    api::catalog_api::load_filter_facets,
    components::filter_sidebar::{checkbox_filter::{CheckboxFilter, CheckboxOption}, price_range_filter::PriceRangeFilter},
    data_definitions::{catalog_query::CatalogPageState, host_region::{HostFilterBlock, HostFilterRegion}},
};


/// How long the sidebar waits for the listing's filter region to appear.
const HOST_REGION_RETRY: RetryPolicy = RetryPolicy::new(20, Duration::from_millis(250));

#[derive(Debug, Clone, PartialEq)]
enum HostBlocks {
    Waiting,
    Ready(Vec<HostFilterBlock>),
    Missing,
}

async fn sleep(delay: Duration) {
    TimeoutFuture::new(delay.as_millis() as u32).await;
}

#[component]
pub fn FilterSidebar() -> Element {
    let page = use_context::<CatalogPageState>();
    let region = use_context::<HostFilterRegion>();
    let init_guard = use_hook(|| Rc::new(InitGuard::default()));
    let rescan_gate = use_hook(|| Rc::new(DebounceGate::default()));
    let mut host_blocks = use_signal(|| HostBlocks::Waiting);

    use_effect(move || {
        if !init_guard.begin() {
            return;
        }
        spawn(async move {
            let found = HOST_REGION_RETRY.run(|| region.blocks.peek().clone(), sleep).await;
            match found {
                Some(blocks) => host_blocks.set(HostBlocks::Ready(blocks)),
                None => {
                    dioxus::logger::tracing::warn!("listing filter region never appeared, catalog filters not shown");
                    host_blocks.set(HostBlocks::Missing);
                }
            }
        });
    });

    // later changes to the listing's blocks are coalesced before re-arranging
    use_effect(move || {
        let Some(latest) = region.blocks.read().clone() else {
            return;
        };
        let ticket = rescan_gate.arm();
        let gate = rescan_gate.clone();
        spawn(async move {
            sleep(DebounceGate::DEFAULT_DELAY).await;
            if gate.is_current(ticket) && matches!(*host_blocks.peek(), HostBlocks::Ready(_)) {
                host_blocks.set(HostBlocks::Ready(latest));
            }
        });
    });

    let facets = use_resource(move || {
        let scope = page.query.read().get(ITEM_GROUP_PARAM).map(str::to_string);
        load_filter_facets(scope)
    });

    let blocks = match host_blocks() {
        HostBlocks::Ready(blocks) => blocks,
        HostBlocks::Waiting | HostBlocks::Missing => return rsx! {},
    };
    // until the facets arrive, and when they come back empty, only the native blocks show
    let summary = facets.read().clone().unwrap_or_default();
    let placed = arrange_blocks(blocks.into_iter().map(|b| (b.kind, b)).collect());

    rsx! {
        div {
            id: "x-filter-sidebar",
            style: "
                display: flex;
                flex-direction: column;
                width: 100%;
            ",
            {placed.into_iter().map(|block| match block {
                PlacedBlock::Host(host) => rsx! {
                    CheckboxFilter {
                        key: "{host.param}-{host.name}",
                        title: host.title.clone(),
                        param: host.param.to_string(),
                        filter_name: host.name.clone(),
                        options: host_options(&host, &summary),
                    }
                },
                PlacedBlock::Sidebar(SidebarBlock::Price) => rsx! {
                    if has_price_filter(&summary) {
                        PriceRangeFilter { key: "{\"price\"}", summary: summary.clone() }
                    }
                },
                PlacedBlock::Sidebar(SidebarBlock::Offers) => rsx! {
                    if !summary.offers().is_empty() {
                        CheckboxFilter {
                            key: "{\"offers\"}",
                            title: "Offers".to_string(),
                            param: FIELD_FILTERS_PARAM.to_string(),
                            filter_name: OFFERS_FILTER.to_string(),
                            options: summary.offers().iter().map(CheckboxOption::from).collect::<Vec<_>>(),
                        }
                    }
                },
                PlacedBlock::Sidebar(SidebarBlock::Badges) => rsx! {
                    if !summary.badges().is_empty() {
                        CheckboxFilter {
                            key: "{\"badges\"}",
                            title: "Badges".to_string(),
                            param: FIELD_FILTERS_PARAM.to_string(),
                            filter_name: BADGES_FILTER.to_string(),
                            options: summary.badges().iter().map(CheckboxOption::from).collect::<Vec<_>>(),
                        }
                    }
                },
            })}
        }
    }
}

/// Options of a native block; brand and item group labels carry counts.
fn host_options(block: &HostFilterBlock, summary: &FacetSummary) -> Vec<CheckboxOption> {
    let counts: &[NamedCount] = match (block.kind, block.name.as_str()) {
        (FilterBlockKind::Field, BRAND_FILTER) => summary.brands(),
        (FilterBlockKind::Field, ITEM_GROUP_FILTER) => summary.item_groups(),
        _ => &[],
    };
    block.values.iter()
        .map(|value| CheckboxOption {
            value: value.clone(),
            label: annotate_native_label(value, counts),
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brand_labels_carry_counts() {
        let block = HostFilterBlock {
            kind: FilterBlockKind::Field,
            param: FIELD_FILTERS_PARAM,
            name: BRAND_FILTER.to_string(),
            title: "Brand".to_string(),
            values: vec!["Acme".to_string(), "Zed".to_string()],
        };
        let summary = FacetSummary {
            brands: Some(vec![NamedCount { name: "Acme".into(), count: 4 }]),
            ..Default::default()
        };
        let labels = host_options(&block, &summary).into_iter().map(|o| o.label).collect::<Vec<_>>();
        assert_eq!(labels, vec!["Acme (4)", "Zed"]);
    }

    #[test]
    fn attribute_labels_stay_bare() {
        let block = HostFilterBlock {
            kind: FilterBlockKind::Attribute,
            param: common::filter_state::ATTRIBUTE_FILTERS_PARAM,
            name: "brand".to_string(),
            title: "Brand".to_string(),
            values: vec!["Acme".to_string()],
        };
        let summary = FacetSummary {
            brands: Some(vec![NamedCount { name: "Acme".into(), count: 4 }]),
            ..Default::default()
        };
        assert_eq!(host_options(&block, &summary)[0].label, "Acme");
    }
}
