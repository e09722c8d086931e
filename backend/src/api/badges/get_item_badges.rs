//! Active badges per item, for product cards.

use chrono::NaiveDate;
use common::listing::ItemBadgeMap;

use crate::catalog_store::CatalogStore;


/// Every requested code gets an entry; unpublished or unknown items map to
/// an empty list. Badges outside their validity window are dropped.
pub async fn get_item_badges<S: CatalogStore>(store: &S, item_codes: Vec<String>, today: NaiveDate) -> anyhow::Result<ItemBadgeMap> {
    let mut item_codes = item_codes.into_iter().map(|c| c.trim().to_string()).filter(|c| !c.is_empty()).collect::<Vec<_>>();
    item_codes.sort();
    item_codes.dedup();

    let mut result: ItemBadgeMap = item_codes.iter().map(|code| (code.clone(), vec![])).collect();
    if item_codes.is_empty() {
        return Ok(result);
    }

    for item in store.items_by_code(&item_codes).await? {
        if !item.published {
            continue;
        }
        let active = item.badges.into_iter()
            .filter(|badge| !badge.badge_type.trim().is_empty() && badge.is_active_on(today))
            .collect::<Vec<_>>();
        result.insert(item.item_code, active);
    }
    Ok(result)
}


#[cfg(test)]
mod tests {
    use super::*;
    use common::catalog_item::{CatalogItem, ItemBadge};
    use crate::catalog_store::InMemoryCatalogStore;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    #[tokio::test]
    async fn expired_and_unpublished_badges_are_hidden() {
        let store = InMemoryCatalogStore::new(vec![
            CatalogItem {
                item_code: "a".into(),
                published: true,
                badges: vec![
                    ItemBadge::new("New"),
                    ItemBadge { valid_upto: Some(day(1)), ..ItemBadge::new("On Sale") },
                    ItemBadge { valid_from: Some(day(20)), ..ItemBadge::new("Preorder") },
                ],
                ..Default::default()
            },
            CatalogItem { item_code: "b".into(), published: false, badges: vec![ItemBadge::new("New")], ..Default::default() },
        ]);

        let badges = get_item_badges(&store, vec!["a".into(), "b".into(), "zzz".into(), " ".into()], day(10)).await.unwrap();
        assert_eq!(badges.keys().collect::<Vec<_>>(), vec!["a", "b", "zzz"]);
        assert_eq!(badges["a"].iter().map(|b| b.badge_type.as_str()).collect::<Vec<_>>(), vec!["New"]);
        assert!(badges["b"].is_empty());
        assert!(badges["zzz"].is_empty());
    }
}
