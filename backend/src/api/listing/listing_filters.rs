//! Normalization of listing arguments into typed filters.

use std::collections::BTreeMap;

use common::{
    catalog_item::CatalogItem,
    filter_state::{BADGES_FILTER, BRAND_FILTER, OFFERS_FILTER, OFFERS_FILTER_ALIAS, PRICE_FROM_FILTER, PRICE_TO_FILTER, normalize_filter_values},
    listing::ListingQuery,
};
use serde_json::{Map, Value};


#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListingFilters {
    /// Item fields (and, failing that, attributes) to match, by name.
    pub field_filters: BTreeMap<String, Vec<String>>,
    pub attribute_filters: BTreeMap<String, Vec<String>>,
    pub offers: Vec<String>,
    pub badges: Vec<String>,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
    pub search: Option<String>,
    pub start: u64,
}

pub fn normalize_listing_query(query: &ListingQuery) -> ListingFilters {
    let mut field_filters = json_object(query.field_filters.as_ref());

    if let Some(brand) = &query.brand {
        let mut merged = field_filters.get(BRAND_FILTER).map(normalize_filter_values).unwrap_or_default();
        for value in normalize_filter_values(brand) {
            if !merged.contains(&value) {
                merged.push(value);
            }
        }
        field_filters.insert(BRAND_FILTER.to_string(), Value::from(merged));
    }

    let mut offers = take_values(&mut field_filters, OFFERS_FILTER_ALIAS);
    for value in take_values(&mut field_filters, OFFERS_FILTER) {
        if !offers.contains(&value) {
            offers.push(value);
        }
    }
    let badges = take_values(&mut field_filters, BADGES_FILTER);
    let price_from = take_price(&mut field_filters, PRICE_FROM_FILTER);
    let price_to = take_price(&mut field_filters, PRICE_TO_FILTER);

    ListingFilters {
        field_filters: values_by_name(field_filters),
        attribute_filters: values_by_name(json_object(query.attribute_filters.as_ref())),
        offers,
        badges,
        price_from,
        price_to,
        search: query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_lowercase),
        // a filter-driven navigation always starts from the first page
        start: if query.from_filters { 0 } else { query.start.unwrap_or(0) },
    }
}

impl ListingFilters {
    pub fn matches(&self, item: &CatalogItem) -> bool {
        if self.price_from.is_some() || self.price_to.is_some() {
            let Some(price) = item.price else {
                return false;
            };
            if self.price_from.is_some_and(|from| price < from) || self.price_to.is_some_and(|to| price > to) {
                return false;
            }
        }
        if !self.offers.is_empty() && !item.offer_titles().iter().any(|o| self.offers.iter().any(|s| s == o)) {
            return false;
        }
        if !self.badges.is_empty() && !item.badge_codes().iter().any(|b| self.badges.iter().any(|s| s == b)) {
            return false;
        }
        for (name, values) in &self.field_filters {
            match field_value(item, name) {
                Some(value) if values.iter().any(|v| v == value) => {}
                _ => return false,
            }
        }
        for (name, values) in &self.attribute_filters {
            match item.attributes.get(name) {
                Some(value) if values.contains(value) => {}
                _ => return false,
            }
        }
        if let Some(search) = &self.search {
            if !item.item_name.to_lowercase().contains(search) && !item.item_code.to_lowercase().contains(search) {
                return false;
            }
        }
        true
    }
}


fn field_value<'a>(item: &'a CatalogItem, name: &str) -> Option<&'a str> {
    match name {
        "brand" => item.brand_name(),
        "item_group" => Some(item.item_group.as_str()),
        "item_code" => Some(item.item_code.as_str()),
        "item_name" => Some(item.item_name.as_str()),
        other => item.attributes.get(other).map(String::as_str),
    }
}

/// Accepts an object or a string holding one; anything else is empty.
fn json_object(raw: Option<&Value>) -> Map<String, Value> {
    match raw {
        Some(Value::Object(map)) => map.clone(),
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        },
        _ => Map::new(),
    }
}

fn take_values(map: &mut Map<String, Value>, name: &str) -> Vec<String> {
    map.remove(name).map(|v| normalize_filter_values(&v)).unwrap_or_default()
}

fn take_price(map: &mut Map<String, Value>, name: &str) -> Option<f64> {
    take_values(map, name).into_iter().find_map(|v| v.trim().parse::<f64>().ok().filter(|p| p.is_finite()))
}

fn values_by_name(map: Map<String, Value>) -> BTreeMap<String, Vec<String>> {
    map.into_iter()
        .map(|(name, value)| (name, normalize_filter_values(&value)))
        .filter(|(_, values)| !values.is_empty())
        .collect()
}
