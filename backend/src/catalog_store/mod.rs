//! Access to the catalog: items, category tree, price ranges and badges.

use std::{collections::{BTreeMap, BTreeSet}, future::Future};

use chrono::NaiveDate;
use common::{catalog_item::CatalogItem, price_bucket::PriceBucket};

mod clickhouse_store;
pub use clickhouse_store::ClickhouseCatalogStore;

mod memory_store;
pub use memory_store::InMemoryCatalogStore;


pub trait CatalogStore: Send + Sync {
    /// Published items, optionally restricted to the given item groups.
    fn published_items(&self, item_groups: Option<&BTreeSet<String>>) -> impl Future<Output = anyhow::Result<Vec<CatalogItem>>> + Send;

    /// Item group name to parent group name (`None` for roots).
    fn item_group_parents(&self) -> impl Future<Output = anyhow::Result<BTreeMap<String, Option<String>>>> + Send;

    /// Configured price ranges, enabled or not, in no particular order. Empty when none are configured.
    fn price_buckets(&self) -> impl Future<Output = anyhow::Result<Vec<PriceBucket>>> + Send;

    /// Items by code regardless of publication, for badge lookups.
    fn items_by_code(&self, item_codes: &[String]) -> impl Future<Output = anyhow::Result<Vec<CatalogItem>>> + Send;

    /// Inputs of the automatic badge rules for every published item, with
    /// sales counted from `sales_since` on.
    fn badge_signals(&self, sales_since: NaiveDate) -> impl Future<Output = anyhow::Result<Vec<ItemBadgeSignals>>> + Send;

    /// Replaces the item's automatic badges with one of each given type.
    /// Manual badges are never touched.
    fn replace_auto_badges(&self, item_code: &str, badge_types: &[String]) -> impl Future<Output = anyhow::Result<()>> + Send;
}


#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemBadgeSignals {
    pub item_code: String,
    pub created_on: Option<NaiveDate>,
    /// Quantity sold on submitted invoices inside the sales window.
    pub sold_qty: f64,
    pub consumer_discount: Option<f64>,
    pub is_stock_item: bool,
    /// Summed over all warehouses.
    pub stock_qty: f64,
}


/// The group itself plus every group below it. A group missing from the
/// tree still scopes to itself.
pub fn group_with_descendants(parents: &BTreeMap<String, Option<String>>, group: &str) -> BTreeSet<String> {
    let mut children: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (name, parent) in parents {
        if let Some(parent) = parent {
            children.entry(parent.as_str()).or_default().push(name.as_str());
        }
    }

    let mut found = BTreeSet::from([group.to_string()]);
    let mut pending = vec![group];
    while let Some(current) = pending.pop() {
        for &child in children.get(current).into_iter().flatten() {
            if found.insert(child.to_string()) {
                pending.push(child);
            }
        }
    }
    found
}
