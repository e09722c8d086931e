use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use common::{facet_summary::FacetSummary, listing::ListingQuery, url_query::QueryParams};
use serde::Deserialize;

use crate::{api::{catalog::CatalogBackend, facets::FacetService}, catalog_store::CatalogStore};


pub const FILTER_FACETS_PATH: &str = "/api/catalog/filter_facets";
pub const PRODUCTS_PATH: &str = "/api/catalog/products";
pub const ITEM_BADGES_PATH: &str = "/api/catalog/item_badges";
pub const ITEM_BRANDS_PATH: &str = "/api/catalog/item_brands";
pub const ITEM_OFFERS_PATH: &str = "/api/catalog/item_offers";
pub const RECOMPUTE_BADGES_PATH: &str = "/api/catalog/recompute_item_badges";


#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FacetScopeParams {
    pub item_group: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ItemCodesParams {
    /// Comma separated, or a JSON array.
    pub item_codes: String,
}


pub fn catalog_router<S: CatalogStore + 'static>(backend: Arc<CatalogBackend<S>>) -> Router {
    Router::new()
        .route(FILTER_FACETS_PATH, get(filter_facets::<CatalogBackend<S>>))
        .route(PRODUCTS_PATH, get(products::<S>))
        .route(ITEM_BADGES_PATH, get(item_badges::<S>))
        .route(ITEM_BRANDS_PATH, get(item_brands::<S>))
        .route(ITEM_OFFERS_PATH, get(item_offers::<S>))
        .route(RECOMPUTE_BADGES_PATH, post(recompute_badges::<S>))
        .with_state(backend)
}

/// Never fails: a broken backend answers with an empty summary.
pub async fn filter_facets<F: FacetService + 'static>(State(service): State<Arc<F>>, Query(params): Query<FacetScopeParams>) -> Json<FacetSummary> {
    Json(service.filter_facets(params.item_group.as_deref()).await)
}

async fn products<S: CatalogStore + 'static>(State(backend): State<Arc<CatalogBackend<S>>>, axum::extract::RawQuery(raw): axum::extract::RawQuery) -> Response {
    let query = ListingQuery::from_query_params(&QueryParams::parse(raw.as_deref().unwrap_or_default()));
    json_or_500("products", backend.get_product_listing(query).await)
}

fn item_codes(params: ItemCodesParams) -> Vec<String> {
    common::filter_state::normalize_filter_values(&serde_json::Value::String(params.item_codes))
        .into_iter()
        .flat_map(|codes| codes.split(',').map(str::trim).filter(|c| !c.is_empty()).map(str::to_string).collect::<Vec<_>>())
        .collect()
}

fn json_or_500<T: serde::Serialize>(what: &str, result: anyhow::Result<T>) -> Response {
    match result {
        Ok(value) => Json(value).into_response(),
        Err(e) => {
            tracing::error!("{what}: request failed: {:#?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Body::from(e.to_string())).into_response()
        }
    }
}

async fn item_badges<S: CatalogStore + 'static>(State(backend): State<Arc<CatalogBackend<S>>>, Query(params): Query<ItemCodesParams>) -> Response {
    json_or_500("item_badges", backend.get_item_badges(item_codes(params)).await)
}

async fn item_brands<S: CatalogStore + 'static>(State(backend): State<Arc<CatalogBackend<S>>>, Query(params): Query<ItemCodesParams>) -> Response {
    json_or_500("item_brands", backend.get_item_brands(item_codes(params)).await)
}

async fn item_offers<S: CatalogStore + 'static>(State(backend): State<Arc<CatalogBackend<S>>>, Query(params): Query<ItemCodesParams>) -> Response {
    json_or_500("item_offers", backend.get_item_offers(item_codes(params)).await)
}

async fn recompute_badges<S: CatalogStore + 'static>(State(backend): State<Arc<CatalogBackend<S>>>) -> Response {
    json_or_500("recompute_item_badges", backend.recompute_item_badges().await)
}
