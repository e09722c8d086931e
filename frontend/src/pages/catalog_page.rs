use std::rc::Rc;

use common::{debounce::DebounceGate, filter_state::ITEM_GROUP_PARAM, url_query::QueryParams};
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_content_icons::MdFilterList, md_navigation_icons::MdClose}};
use gloo_timers::future::TimeoutFuture;

use crate::{
    components::{filter_sidebar::FilterSidebar, listing_panel::ListingPanel, suspend_boundary::SuspendWrapper},
    data_definitions::{catalog_query::{CatalogPageState, CatalogQuery}, host_region::HostFilterRegion},
};


/// Below this width the sidebar moves into an off-canvas panel.
pub const MOBILE_BREAKPOINT_PX: f64 = 992.0;

#[component]
pub fn CatalogPage(query: CatalogQuery) -> Element {
    let heading = query.0.get(ITEM_GROUP_PARAM).unwrap_or("All Products").to_string();
    rsx! {
        Title { "Catalog: {heading}" }
        CatalogPageRoot { query: query.0.clone(), heading }
    }
}

#[component]
fn CatalogPageRoot(query: ReadSignal<QueryParams>, heading: ReadSignal<String>) -> Element {
    use_context_provider(move || CatalogPageState { query });
    let blocks = use_signal(|| None);
    use_context_provider(move || HostFilterRegion { blocks });

    let mut page_width = use_signal(|| None::<f64>);
    let resize_gate = use_hook(|| Rc::new(DebounceGate::default()));
    let is_narrow = use_memo(move || page_width().is_some_and(|w| w < MOBILE_BREAKPOINT_PX));
    let mut panel_open = use_signal(|| false);
    let panel_offset = use_memo(move || if panel_open() { "0" } else { "-105%" });

    rsx! {
        div {
            id: "x-catalog-page",
            style: "
                width: 100%;
                min-height: 100%;
                display: flex;
                flex-direction: column;
            ",
            onresize: move |e: Event<ResizeData>| {
                let Ok(size) = e.get_border_box_size() else {
                    return;
                };
                let ticket = resize_gate.arm();
                let gate = resize_gate.clone();
                spawn(async move {
                    TimeoutFuture::new(DebounceGate::DEFAULT_DELAY.as_millis() as u32).await;
                    if gate.is_current(ticket) {
                        page_width.set(Some(size.width));
                    }
                });
            },

            div {
                style: "
                    display: flex;
                    flex-direction: row;
                    align-items: center;
                    gap: 12px;
                    padding: 12px 20px;
                    border-bottom: 1px solid rgba(0,0,0,0.1);
                ",
                if is_narrow() {
                    button {
                        style: "
                            cursor: pointer;
                            display: flex;
                            align-items: center;
                            gap: 6px;
                            border: 1px solid rgba(0,0,0,0.5);
                            border-radius: 1000px;
                            background-color: white;
                            padding: 6px 12px;
                            font-size: 15px;
                        ",
                        onclick: move |_| panel_open.set(true),
                        Icon { icon: MdFilterList, style: "width: 20px; height: 20px;" }
                        "Filters"
                    }
                }
                h1 {
                    style: "font-size: 24px; font-weight: 500; margin: 0;",
                    "{heading}"
                }
            }

            div {
                style: "
                    display: flex;
                    flex-direction: row;
                    flex: 1 1 auto;
                    min-height: 0;
                ",
                // the sidebar is rendered in exactly one place for the current width
                if is_narrow() {
                    if panel_open() {
                        div {
                            style: "
                                position: fixed;
                                inset: 0;
                                z-index: 999;
                                background-color: rgba(0,0,0,0.3);
                            ",
                            onclick: move |_| panel_open.set(false),
                        }
                    }
                    div {
                        id: "x-filter-offcanvas",
                        style: "
                            position: fixed;
                            top: 0;
                            bottom: 0;
                            left: 0;
                            width: min(340px, 90vw);
                            z-index: 1000;
                            overflow-y: auto;
                            background-color: white;
                            box-shadow: 0 0 10px 0 rgba(0, 0, 0, 0.1);
                            padding: 10px;
                            transform: translateX({panel_offset()});
                            transition: transform 0.2s;
                        ",
                        button {
                            style: "cursor: pointer; border: none; background: none; float: right;",
                            onclick: move |_| panel_open.set(false),
                            Icon { icon: MdClose, style: "width: 24px; height: 24px;" }
                        }
                        FilterSidebar {}
                    }
                } else {
                    aside {
                        style: "
                            width: 300px;
                            flex-shrink: 0;
                            padding: 10px 20px;
                            border-right: 1px solid rgba(0,0,0,0.1);
                            overflow-y: auto;
                        ",
                        FilterSidebar {}
                    }
                }

                main {
                    style: "flex: 1 1 auto; min-width: 0; padding: 10px 20px;",
                    SuspendWrapper {
                        ListingPanel {}
                    }
                }
            }
        }
    }
}
