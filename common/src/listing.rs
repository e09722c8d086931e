//! Product listing request/response models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    catalog_item::CatalogItem,
    filter_state::{ATTRIBUTE_FILTERS_PARAM, BRAND_FILTER, FIELD_FILTERS_PARAM, FROM_FILTERS_PARAM, ITEM_GROUP_PARAM, START_PARAM},
    url_query::QueryParams,
};


/// Listing arguments as sent by the storefront. `field_filters` may arrive as
/// a JSON object or as the JSON string taken straight from the URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ListingQuery {
    pub item_group: Option<String>,
    pub field_filters: Option<Value>,
    pub attribute_filters: Option<Value>,
    pub brand: Option<Value>,
    pub search: Option<String>,
    pub start: Option<u64>,
    pub from_filters: bool,
}

impl ListingQuery {
    pub fn from_query_params(query: &QueryParams) -> Self {
        let brands = query.get_all(BRAND_FILTER).map(|b| Value::String(b.to_string())).collect::<Vec<_>>();
        Self {
            item_group: query.get(ITEM_GROUP_PARAM).filter(|g| !g.trim().is_empty()).map(str::to_string),
            field_filters: query.get(FIELD_FILTERS_PARAM).map(|f| Value::String(f.to_string())),
            attribute_filters: query.get(ATTRIBUTE_FILTERS_PARAM).map(|f| Value::String(f.to_string())),
            brand: match brands.len() {
                0 => None,
                1 => brands.into_iter().next(),
                _ => Some(Value::Array(brands)),
            },
            search: query.get("search").filter(|s| !s.trim().is_empty()).map(str::to_string),
            start: query.get(START_PARAM).and_then(|s| s.trim().parse().ok()),
            from_filters: query.get(FROM_FILTERS_PARAM).is_some_and(|f| matches!(f.trim(), "1" | "true")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ListingPage {
    pub items: Vec<CatalogItem>,
    pub items_count: u64,
    pub start: u64,
    pub page_length: u64,
    /// Native field filters (brand, item group) available for the scope.
    pub field_filters: Vec<FilterOptions>,
    /// Attribute filters available for the scope, in display order.
    pub attribute_filters: Vec<FilterOptions>,
}

impl ListingPage {
    pub fn has_previous(&self) -> bool {
        self.start > 0
    }

    pub fn has_next(&self) -> bool {
        self.start.saturating_add(self.page_length) < self.items_count
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub name: String,
    pub values: Vec<String>,
}

pub type ItemBadgeMap = BTreeMap<String, Vec<crate::catalog_item::ItemBadge>>;

/// Distinct non-blank badge types to show on the item's card, first
/// occurrence first. Items missing from the map show none.
pub fn card_badge_codes(badges: &ItemBadgeMap, item_code: &str) -> Vec<String> {
    let mut codes: Vec<String> = vec![];
    for badge in badges.get(item_code).into_iter().flatten() {
        let code = badge.badge_type.trim();
        if !code.is_empty() && !codes.iter().any(|c| c == code) {
            codes.push(code.to_string());
        }
    }
    codes
}
