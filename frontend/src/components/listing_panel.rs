//! The product listing and its native filter blocks.

use common::{
    catalog_item::CatalogItem,
    filter_state::{FROM_FILTERS_PARAM, ITEM_GROUP_PARAM, START_PARAM},
    listing::{ListingQuery, card_badge_codes},
};
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_navigation_icons::{MdChevronLeft, MdChevronRight}};

use crate::{
    api::catalog_api::{get_product_listing, load_item_badges},
    components::error_boundary::ComponentErrorDisplay,
    data_definitions::{catalog_query::{CatalogPageState, reload_catalog}, host_region::{HostFilterRegion, host_blocks_from_listing}},
};


#[component]
pub fn ListingPanel() -> Element {
    let page = use_context::<CatalogPageState>();
    let mut host_blocks = use_context::<HostFilterRegion>().blocks;

    let listing = use_resource(move || {
        let q = ListingQuery::from_query_params(&page.query.read());
        get_product_listing(q)
    });
    // publish the filters this listing offers; the sidebar arranges itself around them
    use_effect(move || {
        if let Some(Ok(loaded)) = &*listing.read() {
            host_blocks.set(Some(host_blocks_from_listing(loaded)));
        }
    });

    // the listing's own badge rows are not filtered by validity window
    let card_badges = use_resource(move || {
        let item_codes = match &*listing.read() {
            Some(Ok(loaded)) => loaded.items.iter().map(|i| i.item_code.clone()).collect(),
            _ => vec![],
        };
        load_item_badges(item_codes)
    });

    let listing = match listing.suspend()?.cloned() {
        Err(e) => return rsx! {ComponentErrorDisplay { error_txt: format!("{:#?}", e) }},
        Ok(l) => l,
    };

    let go_to_start = move |start: u64| {
        let mut next = page.query.peek().clone();
        if start == 0 {
            next.remove(START_PARAM);
        } else {
            next.set(START_PARAM, start.to_string());
        }
        // a plain page turn must keep its offset
        next.remove(FROM_FILTERS_PARAM);
        reload_catalog(next);
    };
    let previous_start = listing.start.saturating_sub(listing.page_length);
    let next_start = listing.start.saturating_add(listing.page_length);
    let first_shown = if listing.items.is_empty() { 0 } else { listing.start.saturating_add(1) };
    let last_shown = listing.start.saturating_add(listing.items.len() as u64);

    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: row;
                align-items: center;
                gap: 10px;
                padding: 10px 0;
                font-size: 15px;
                color: rgba(28, 33, 45, 0.7);
            ",
            "{first_shown} - {last_shown} of {listing.items_count} products"
            div { style: "flex: 1 1 auto;", }
            if listing.has_previous() {
                button {
                    style: "cursor: pointer; border: none; background: none;",
                    onclick: move |_| go_to_start(previous_start),
                    Icon { icon: MdChevronLeft, style: "width: 24px; height: 24px;" }
                }
            }
            if listing.has_next() {
                button {
                    style: "cursor: pointer; border: none; background: none;",
                    onclick: move |_| go_to_start(next_start),
                    Icon { icon: MdChevronRight, style: "width: 24px; height: 24px;" }
                }
            }
        }

        if listing.items.is_empty() {
            div {
                style: "padding: 40px; text-align: center; font-size: 18px; color: rgba(28, 33, 45, 0.7);",
                "No products match the selected filters."
            }
        }

        div {
            style: "
                display: grid;
                grid-template-columns: repeat(auto-fill, minmax(220px, 1fr));
                gap: 16px;
            ",
            for item in listing.items {
                ProductCard {
                    key: "{item.item_code}",
                    badges: card_badges.read().as_ref().map(|map| card_badge_codes(map, &item.item_code)).unwrap_or_default(),
                    item: item.clone(),
                }
            }
        }
    }
}

#[component]
fn ProductCard(item: ReadSignal<CatalogItem>, badges: ReadSignal<Vec<String>>) -> Element {
    let page = use_context::<CatalogPageState>();
    let item = item.read().clone();
    let badges = badges.read().clone();
    let price = item.price.map(|p| format!("{p:.2}")).unwrap_or_else(|| "-".to_string());
    let item_group = item.item_group.trim().to_string();
    let scope_to_group = {
        let group = item_group.clone();
        move |_| page.commit_param(ITEM_GROUP_PARAM, Some(&group))
    };
    let offer = item.offer_titles().into_iter().next().map(str::to_string);

    rsx! {
        div {
            style: "
                border: 1px solid rgba(0,0,0,0.1);
                border-radius: 10px;
                background-color: white;
                box-shadow: 0 0 10px 0 rgba(0, 0, 0, 0.05);
                padding: 12px;
                display: flex;
                flex-direction: column;
                gap: 6px;
            ",
            div {
                style: "display: flex; flex-wrap: wrap; gap: 4px; min-height: 20px;",
                for badge in badges {
                    span {
                        key: "{badge}",
                        style: "font-size: 11px; text-transform: uppercase; padding: 2px 6px; border-radius: 4px; background-color: rgb(28, 33, 45); color: white;",
                        "{badge}"
                    }
                }
            }
            div {
                style: "font-size: 17px; font-weight: 500; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                title: "{item.item_name}",
                "{item.item_name}"
            }
            if !item_group.is_empty() {
                div {
                    style: "font-size: 12px; color: rgba(28, 33, 45, 0.6); cursor: pointer; text-decoration: underline;",
                    onclick: scope_to_group,
                    "{item_group}"
                }
            }
            if let Some(brand) = item.brand_name() {
                div { style: "font-size: 13px; color: rgba(28, 33, 45, 0.7);", "{brand}" }
            }
            div { style: "font-size: 16px;", "{price}" }
            if let Some(offer) = offer {
                div { style: "font-size: 13px; color: darkgreen;", "{offer}" }
            }
        }
    }
}
