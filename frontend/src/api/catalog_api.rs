//! Client API calls for catalog endpoints.

use common::{facet_summary::FacetSummary, listing::{ItemBadgeMap, ListingPage, ListingQuery}};
use dioxus::prelude::*;


#[server]
pub async fn get_filter_facets(item_group: Option<String>) -> Result<FacetSummary, ServerFnError> {
    // never fails on the server side: errors already come back as an empty summary
    let x = backend::api::catalog::default_backend().get_filter_facets(item_group.as_deref()).await;
    Ok(x)
}

#[server]
pub async fn get_product_listing(query: ListingQuery) -> Result<ListingPage, ServerFnError> {
    let x = backend::api::catalog::default_backend().get_product_listing(query).await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}

#[server]
pub async fn get_item_badges(item_codes: Vec<String>) -> Result<ItemBadgeMap, ServerFnError> {
    let x = backend::api::catalog::default_backend().get_item_badges(item_codes).await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}

/// Active badges for the cards on screen. Cards go without badges when the
/// lookup fails.
pub async fn load_item_badges(item_codes: Vec<String>) -> ItemBadgeMap {
    if item_codes.is_empty() {
        return ItemBadgeMap::new();
    }
    match get_item_badges(item_codes).await {
        Ok(badges) => badges,
        Err(err) => {
            dioxus::logger::tracing::warn!("item badges unavailable: {}", err);
            ItemBadgeMap::new()
        }
    }
}

/// Facets for the sidebar. A transport failure means no catalog filters,
/// the same as an empty summary.
pub async fn load_filter_facets(item_group: Option<String>) -> FacetSummary {
    match get_filter_facets(item_group.clone()).await {
        Ok(summary) => summary,
        Err(err) => {
            dioxus::logger::tracing::warn!("filter facets for {:?} unavailable: {}", item_group, err);
            FacetSummary::default()
        }
    }
}
