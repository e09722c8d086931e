//! Automatic badges derived from item age, sales, discount and stock.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Days, NaiveDate};
use common::catalog_item::BadgeSource;
use serde::Serialize;

use crate::{catalog_store::{CatalogStore, ItemBadgeSignals}, config::BadgeRules};


pub const NEW_BADGE: &str = "New";
pub const BESTSELLER_BADGE: &str = "Bestseller";
pub const ON_SALE_BADGE: &str = "On Sale";
pub const LOW_STOCK_BADGE: &str = "Low Stock";


#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BadgeRecomputeReport {
    pub items_checked: usize,
    pub items_updated: usize,
}


/// The `top_n` items with the most units sold. Ties go to the smaller item code.
pub fn bestseller_codes(signals: &[ItemBadgeSignals], top_n: usize) -> BTreeSet<String> {
    let mut sold = signals.iter().filter(|s| s.sold_qty > 0.0).collect::<Vec<_>>();
    sold.sort_by(|a, b| b.sold_qty.total_cmp(&a.sold_qty).then_with(|| a.item_code.cmp(&b.item_code)));
    sold.into_iter().take(top_n).map(|s| s.item_code.clone()).collect()
}

/// Automatic badge types the item qualifies for, in display order.
pub fn auto_badges_for(signals: &ItemBadgeSignals, rules: &BadgeRules, today: NaiveDate, bestsellers: &BTreeSet<String>) -> Vec<String> {
    let new_since = today.checked_sub_days(Days::new(rules.new_item_days.into())).unwrap_or(NaiveDate::MIN);
    let mut badges = vec![];
    if signals.created_on.is_some_and(|created| created >= new_since) {
        badges.push(NEW_BADGE.to_string());
    }
    if bestsellers.contains(&signals.item_code) {
        badges.push(BESTSELLER_BADGE.to_string());
    }
    if signals.consumer_discount.is_some_and(|d| d > 0.0) {
        badges.push(ON_SALE_BADGE.to_string());
    }
    if signals.is_stock_item && signals.stock_qty > 0.0 && signals.stock_qty <= rules.low_stock_threshold {
        badges.push(LOW_STOCK_BADGE.to_string());
    }
    badges
}

/// Rewrites the automatic badges of every published item. Items whose
/// automatic badges already match are left alone; manual badges are never
/// touched.
pub async fn recompute_item_badges<S: CatalogStore>(store: &S, rules: &BadgeRules, today: NaiveDate) -> anyhow::Result<BadgeRecomputeReport> {
    let sales_since = today.checked_sub_days(Days::new(rules.new_item_days.into())).unwrap_or(NaiveDate::MIN);
    let signals = store.badge_signals(sales_since).await?;
    let bestsellers = bestseller_codes(&signals, rules.bestseller_top_n);

    let codes = signals.iter().map(|s| s.item_code.clone()).collect::<Vec<_>>();
    let mut current: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for item in store.items_by_code(&codes).await? {
        let auto = item.badges.iter()
            .filter(|b| b.source == BadgeSource::Auto)
            .map(|b| b.badge_type.clone())
            .collect::<Vec<_>>();
        current.insert(item.item_code, auto);
    }

    let mut report = BadgeRecomputeReport { items_checked: signals.len(), ..Default::default() };
    for item_signals in &signals {
        let wanted = auto_badges_for(item_signals, rules, today, &bestsellers);
        let existing = current.remove(&item_signals.item_code).unwrap_or_default();
        if existing == wanted {
            continue;
        }
        store.replace_auto_badges(&item_signals.item_code, &wanted).await?;
        report.items_updated += 1;
    }
    tracing::info!("recompute_item_badges: {} checked, {} updated", report.items_checked, report.items_updated);
    Ok(report)
}


#[cfg(test)]
mod tests {
    use super::*;
    use common::catalog_item::{CatalogItem, ItemBadge};
    use pretty_assertions::assert_eq;
    use crate::catalog_store::InMemoryCatalogStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
    }

    fn signals(code: &str) -> ItemBadgeSignals {
        ItemBadgeSignals { item_code: code.into(), ..Default::default() }
    }

    fn badges(s: &ItemBadgeSignals) -> Vec<String> {
        auto_badges_for(s, &BadgeRules::default(), today(), &BTreeSet::new())
    }

    #[test]
    fn new_items_within_the_window() {
        let fresh = ItemBadgeSignals { created_on: NaiveDate::from_ymd_opt(2026, 5, 31), ..signals("a") };
        let old = ItemBadgeSignals { created_on: NaiveDate::from_ymd_opt(2026, 5, 30), ..signals("b") };
        assert_eq!(badges(&fresh), vec![NEW_BADGE]);
        assert!(badges(&old).is_empty());
        assert!(badges(&signals("undated")).is_empty());
    }

    #[test]
    fn on_sale_needs_a_positive_discount() {
        assert_eq!(badges(&ItemBadgeSignals { consumer_discount: Some(10.0), ..signals("a") }), vec![ON_SALE_BADGE]);
        assert!(badges(&ItemBadgeSignals { consumer_discount: Some(0.0), ..signals("a") }).is_empty());
    }

    #[test]
    fn low_stock_only_for_stock_items_with_some_left() {
        let low = ItemBadgeSignals { is_stock_item: true, stock_qty: 5.0, ..signals("a") };
        assert_eq!(badges(&low), vec![LOW_STOCK_BADGE]);
        assert!(badges(&ItemBadgeSignals { stock_qty: 0.0, ..low.clone() }).is_empty());
        assert!(badges(&ItemBadgeSignals { stock_qty: 6.0, ..low.clone() }).is_empty());
        assert!(badges(&ItemBadgeSignals { is_stock_item: false, ..low }).is_empty());
    }

    #[test]
    fn bestsellers_are_the_top_sellers() {
        let all = vec![
            ItemBadgeSignals { sold_qty: 3.0, ..signals("c") },
            ItemBadgeSignals { sold_qty: 9.0, ..signals("a") },
            ItemBadgeSignals { sold_qty: 3.0, ..signals("b") },
            signals("unsold"),
        ];
        assert_eq!(bestseller_codes(&all, 2), BTreeSet::from(["a".to_string(), "b".to_string()]));
        assert_eq!(bestseller_codes(&all, 10).len(), 3);
    }

    #[tokio::test]
    async fn recompute_keeps_manual_badges_and_collapses_duplicates() {
        let auto = |t: &str| ItemBadge { source: BadgeSource::Auto, ..ItemBadge::new(t) };
        let store = InMemoryCatalogStore::new(vec![
            CatalogItem {
                item_code: "a".into(),
                published: true,
                badges: vec![ItemBadge::new("Staff Pick"), auto(ON_SALE_BADGE), auto(ON_SALE_BADGE), auto(NEW_BADGE)],
                ..Default::default()
            },
            CatalogItem { item_code: "b".into(), published: true, badges: vec![auto(ON_SALE_BADGE)], ..Default::default() },
            CatalogItem { item_code: "hidden".into(), published: false, ..Default::default() },
        ])
        .with_badge_signals(ItemBadgeSignals { consumer_discount: Some(15.0), ..signals("a") })
        .with_badge_signals(ItemBadgeSignals { consumer_discount: Some(5.0), ..signals("b") });

        let report = recompute_item_badges(&store, &BadgeRules::default(), today()).await.unwrap();
        assert_eq!(report, BadgeRecomputeReport { items_checked: 2, items_updated: 1 });

        let items = store.items_by_code(&["a".to_string()]).await.unwrap();
        let a = items[0].badges.iter().map(|b| (b.badge_type.as_str(), b.source)).collect::<Vec<_>>();
        assert_eq!(a, vec![("Staff Pick", BadgeSource::Manual), (ON_SALE_BADGE, BadgeSource::Auto)]);

        let again = recompute_item_badges(&store, &BadgeRules::default(), today()).await.unwrap();
        assert_eq!(again.items_updated, 0);
    }
}
