//! Catalog held in memory, for tests and local demos.

use std::{collections::{BTreeMap, BTreeSet}, sync::{Arc, Mutex}};

use chrono::NaiveDate;
use common::{catalog_item::{BadgeSource, CatalogItem, ItemBadge}, price_bucket::PriceBucket};

use super::{CatalogStore, ItemBadgeSignals};


#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogStore {
    pub items: Vec<CatalogItem>,
    pub item_groups: BTreeMap<String, Option<String>>,
    pub price_buckets: Vec<PriceBucket>,
    /// Keyed by item code. Published items without an entry read as all zeroes.
    pub badge_signals: BTreeMap<String, ItemBadgeSignals>,
    /// Automatic badges written since construction; they replace the item's own.
    written_auto_badges: Arc<Mutex<BTreeMap<String, Vec<String>>>>,
}

impl InMemoryCatalogStore {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items, ..Default::default() }
    }

    pub fn with_price_buckets(mut self, price_buckets: Vec<PriceBucket>) -> Self {
        self.price_buckets = price_buckets;
        self
    }

    pub fn with_item_group(mut self, name: &str, parent: Option<&str>) -> Self {
        self.item_groups.insert(name.to_string(), parent.map(str::to_string));
        self
    }

    pub fn with_badge_signals(mut self, signals: ItemBadgeSignals) -> Self {
        self.badge_signals.insert(signals.item_code.clone(), signals);
        self
    }

    fn current(&self, item: &CatalogItem) -> anyhow::Result<CatalogItem> {
        let written = self.written_auto_badges.lock().map_err(|_| anyhow::anyhow!("badge writes lock poisoned"))?;
        let mut item = item.clone();
        if let Some(auto) = written.get(&item.item_code) {
            item.badges.retain(|b| b.source != BadgeSource::Auto);
            item.badges.extend(auto.iter().map(|t| ItemBadge { source: BadgeSource::Auto, ..ItemBadge::new(t.as_str()) }));
        }
        Ok(item)
    }
}

impl CatalogStore for InMemoryCatalogStore {
    async fn published_items(&self, item_groups: Option<&BTreeSet<String>>) -> anyhow::Result<Vec<CatalogItem>> {
        self.items.iter()
            .filter(|item| item.published)
            .filter(|item| item_groups.is_none_or(|groups| groups.contains(&item.item_group)))
            .map(|item| self.current(item))
            .collect()
    }

    async fn item_group_parents(&self) -> anyhow::Result<BTreeMap<String, Option<String>>> {
        Ok(self.item_groups.clone())
    }

    async fn price_buckets(&self) -> anyhow::Result<Vec<PriceBucket>> {
        Ok(self.price_buckets.clone())
    }

    async fn items_by_code(&self, item_codes: &[String]) -> anyhow::Result<Vec<CatalogItem>> {
        self.items.iter()
            .filter(|item| item_codes.contains(&item.item_code))
            .map(|item| self.current(item))
            .collect()
    }

    async fn badge_signals(&self, _sales_since: NaiveDate) -> anyhow::Result<Vec<ItemBadgeSignals>> {
        Ok(self.items.iter()
            .filter(|item| item.published)
            .map(|item| self.badge_signals.get(&item.item_code).cloned()
                .unwrap_or_else(|| ItemBadgeSignals { item_code: item.item_code.clone(), ..Default::default() }))
            .collect())
    }

    async fn replace_auto_badges(&self, item_code: &str, badge_types: &[String]) -> anyhow::Result<()> {
        let mut written = self.written_auto_badges.lock().map_err(|_| anyhow::anyhow!("badge writes lock poisoned"))?;
        written.insert(item_code.to_string(), badge_types.to_vec());
        Ok(())
    }
}
