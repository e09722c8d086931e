//! Catalog backend bundling a store with the site configuration.

use std::collections::BTreeMap;

use common::{facet_summary::FacetSummary, listing::{ItemBadgeMap, ListingPage, ListingQuery}};

use crate::{
    api::{
        badges::{BadgeRecomputeReport, get_item_badges, recompute_item_badges},
        facets::{FacetService, get_filter_facets},
        item_details::{get_item_brands, get_item_offers},
        listing::get_product_listing,
    },
    catalog_store::{CatalogStore, ClickhouseCatalogStore},
    config::{CatalogConfig, ClickhouseConfig},
};


pub struct CatalogBackend<S> {
    pub store: S,
    pub config: CatalogConfig,
}

impl<S: CatalogStore> CatalogBackend<S> {
    pub fn new(store: S, config: CatalogConfig) -> Self {
        Self { store, config }
    }

    pub async fn get_filter_facets(&self, scope: Option<&str>) -> FacetSummary {
        get_filter_facets(&self.store, &self.config, scope).await
    }

    pub async fn get_product_listing(&self, query: ListingQuery) -> anyhow::Result<ListingPage> {
        get_product_listing(&self.store, &self.config, query).await
    }

    pub async fn get_item_badges(&self, item_codes: Vec<String>) -> anyhow::Result<ItemBadgeMap> {
        get_item_badges(&self.store, item_codes, chrono::Local::now().date_naive()).await
    }

    pub async fn get_item_brands(&self, item_codes: Vec<String>) -> anyhow::Result<BTreeMap<String, Option<String>>> {
        get_item_brands(&self.store, item_codes).await
    }

    pub async fn get_item_offers(&self, item_codes: Vec<String>) -> anyhow::Result<BTreeMap<String, Vec<String>>> {
        get_item_offers(&self.store, item_codes).await
    }

    pub async fn recompute_item_badges(&self) -> anyhow::Result<BadgeRecomputeReport> {
        recompute_item_badges(&self.store, &self.config.badge_rules, chrono::Local::now().date_naive()).await
    }
}

impl<S: CatalogStore> FacetService for CatalogBackend<S> {
    async fn filter_facets(&self, scope: Option<&str>) -> FacetSummary {
        self.get_filter_facets(scope).await
    }
}


/// Backend wired to ClickHouse with settings from the environment.
pub fn default_backend() -> CatalogBackend<ClickhouseCatalogStore> {
    let config = CatalogConfig::from_env();
    let store = ClickhouseCatalogStore::new(&ClickhouseConfig::from_env(), config.price_list.clone());
    CatalogBackend::new(store, config)
}
