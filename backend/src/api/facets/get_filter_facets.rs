//! Filter facets endpoint and failure shaping.

use std::future::Future;

use common::{facet_summary::FacetSummary, price_bucket::{PriceBucket, prepare_buckets}};

use crate::{
    api::facets::{FacetOptions, aggregate_facets},
    catalog_store::CatalogStore,
    config::CatalogConfig,
    eligibility::EligibilityPredicate,
};


/// Request/response view of the facet query: send a scope, get a summary.
/// Failures are absorbed, an empty summary means "nothing to render".
pub trait FacetService: Send + Sync {
    fn filter_facets(&self, scope: Option<&str>) -> impl Future<Output = FacetSummary> + Send;
}


pub async fn get_filter_facets<S: CatalogStore>(store: &S, config: &CatalogConfig, scope: Option<&str>) -> FacetSummary {
    match _get_filter_facets(store, config, scope).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("get_filter_facets: request failed for scope {:?}: {:#}", scope, e);
            FacetSummary::default()
        }
    }
}

async fn _get_filter_facets<S: CatalogStore>(store: &S, config: &CatalogConfig, scope: Option<&str>) -> anyhow::Result<FacetSummary> {
    let predicate = EligibilityPredicate::resolve(store, config, scope).await?;
    let (items, buckets) = futures::join!(predicate.eligible_items(store), load_price_buckets(store));
    let items = items?;

    // the price group degrades on its own, the rest of the summary still goes out
    let buckets = match buckets {
        Ok(buckets) => Some(buckets),
        Err(e) => {
            tracing::warn!("get_filter_facets: price ranges unavailable: {:#}", e);
            None
        }
    };

    let summary = aggregate_facets(&items, buckets.as_deref(), FacetOptions::from(config));
    tracing::debug!("get_filter_facets: scope {:?}, {} eligible items", scope, items.len());
    Ok(summary)
}

async fn load_price_buckets<S: CatalogStore>(store: &S) -> anyhow::Result<Vec<PriceBucket>> {
    let mut configured = store.price_buckets().await?;
    configured.retain(|bucket| bucket.enabled);
    let buckets = if configured.is_empty() { PriceBucket::default_buckets() } else { configured };
    Ok(prepare_buckets(buckets)?)
}
