//! The visibility rule shared by facets and the product listing.
//!
//! Facet counts are only meaningful if they are taken over exactly the items
//! the listing can show, so both resolve their item set through this module.

use std::collections::BTreeSet;

use common::catalog_item::CatalogItem;

use crate::{catalog_store::{CatalogStore, group_with_descendants}, config::CatalogConfig};


#[derive(Debug, Clone, PartialEq, Default)]
pub struct EligibilityPredicate {
    /// `None` means every item group.
    pub item_groups: Option<BTreeSet<String>>,
    pub require_in_stock: bool,
}

impl EligibilityPredicate {
    pub async fn resolve<S: CatalogStore>(store: &S, config: &CatalogConfig, scope: Option<&str>) -> anyhow::Result<Self> {
        let item_groups = match scope.map(str::trim).filter(|s| !s.is_empty()) {
            Some(group) => {
                let parents = store.item_group_parents().await?;
                Some(group_with_descendants(&parents, group))
            }
            None => None,
        };
        Ok(Self { item_groups, require_in_stock: config.require_in_stock })
    }

    pub fn is_eligible(&self, item: &CatalogItem) -> bool {
        item.published
            && (!self.require_in_stock || item.in_stock)
            && self.item_groups.as_ref().is_none_or(|groups| groups.contains(&item.item_group))
    }

    pub async fn eligible_items<S: CatalogStore>(&self, store: &S) -> anyhow::Result<Vec<CatalogItem>> {
        let mut items = store.published_items(self.item_groups.as_ref()).await?;
        items.retain(|item| self.is_eligible(item));
        Ok(items)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::InMemoryCatalogStore;

    fn item(code: &str, group: &str, published: bool, in_stock: bool) -> CatalogItem {
        CatalogItem {
            item_code: code.to_string(),
            item_group: group.to_string(),
            published,
            in_stock,
            ..Default::default()
        }
    }

    fn store() -> InMemoryCatalogStore {
        InMemoryCatalogStore::new(vec![
            item("a", "Shoes", true, true),
            item("b", "Sneakers", true, false),
            item("c", "Hats", true, true),
            item("d", "Shoes", false, true),
        ])
        .with_item_group("Shoes", None)
        .with_item_group("Sneakers", Some("Shoes"))
        .with_item_group("Hats", None)
    }

    fn codes(items: Vec<CatalogItem>) -> Vec<String> {
        items.into_iter().map(|i| i.item_code).collect()
    }

    #[tokio::test]
    async fn scope_includes_child_groups() {
        let store = store();
        let predicate = EligibilityPredicate::resolve(&store, &CatalogConfig::default(), Some("Shoes")).await.unwrap();
        assert_eq!(codes(predicate.eligible_items(&store).await.unwrap()), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn stock_policy_hides_out_of_stock_items() {
        let store = store();
        let config = CatalogConfig { require_in_stock: true, ..Default::default() };
        let predicate = EligibilityPredicate::resolve(&store, &config, None).await.unwrap();
        assert_eq!(codes(predicate.eligible_items(&store).await.unwrap()), vec!["a", "c"]);
    }

    #[tokio::test]
    async fn blank_scope_means_everything_published() {
        let store = store();
        let predicate = EligibilityPredicate::resolve(&store, &CatalogConfig::default(), Some("  ")).await.unwrap();
        assert_eq!(predicate.item_groups, None);
        assert_eq!(codes(predicate.eligible_items(&store).await.unwrap()), vec!["a", "b", "c"]);
    }
}
