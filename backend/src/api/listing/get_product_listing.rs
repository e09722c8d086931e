use std::collections::{BTreeMap, BTreeSet};

use common::{catalog_item::CatalogItem, filter_state::{BRAND_FILTER, ITEM_GROUP_FILTER}, listing::{FilterOptions, ListingPage, ListingQuery}};

use crate::{api::listing::normalize_listing_query, catalog_store::CatalogStore, config::CatalogConfig, eligibility::EligibilityPredicate};


pub async fn get_product_listing<S: CatalogStore>(store: &S, config: &CatalogConfig, query: ListingQuery) -> anyhow::Result<ListingPage> {
    let filters = normalize_listing_query(&query);
    let predicate = EligibilityPredicate::resolve(store, config, query.item_group.as_deref()).await?;
    let eligible = predicate.eligible_items(store).await?;
    let field_filters = available_field_filters(&eligible);
    let attribute_filters = available_attribute_filters(&eligible);

    let mut matching = eligible.into_iter().filter(|item| filters.matches(item)).collect::<Vec<_>>();
    matching.sort_by(|a, b| a.item_name.cmp(&b.item_name).then_with(|| a.item_code.cmp(&b.item_code)));

    let items_count = matching.len() as u64;
    let items = matching.into_iter()
        .skip(filters.start as usize)
        .take(config.page_length as usize)
        .collect::<Vec<_>>();
    tracing::info!(
        "get_product_listing: scope {:?}, {} matching, returning {} from {}",
        query.item_group, items_count, items.len(), filters.start,
    );

    Ok(ListingPage {
        items,
        items_count,
        start: filters.start,
        page_length: config.page_length,
        field_filters,
        attribute_filters,
    })
}

fn available_field_filters(items: &[CatalogItem]) -> Vec<FilterOptions> {
    let brands = items.iter().filter_map(|i| i.brand_name()).collect::<BTreeSet<_>>();
    let groups = items.iter().map(|i| i.item_group.trim()).filter(|g| !g.is_empty()).collect::<BTreeSet<_>>();
    [(BRAND_FILTER, brands), (ITEM_GROUP_FILTER, groups)]
        .into_iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(name, values)| FilterOptions {
            name: name.to_string(),
            values: values.into_iter().map(str::to_string).collect(),
        })
        .collect()
}

fn available_attribute_filters(items: &[CatalogItem]) -> Vec<FilterOptions> {
    let mut by_name: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for item in items {
        for (name, value) in &item.attributes {
            if !value.trim().is_empty() {
                by_name.entry(name.as_str()).or_default().insert(value.as_str());
            }
        }
    }
    by_name.into_iter().map(|(name, values)| FilterOptions {
        name: name.to_string(),
        values: values.into_iter().map(str::to_string).collect(),
    }).collect()
}
