//! Filter selections encoded in the page URL.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;


pub const FIELD_FILTERS_PARAM: &str = "field_filters";
pub const ATTRIBUTE_FILTERS_PARAM: &str = "attribute_filters";
pub const START_PARAM: &str = "start";
pub const FROM_FILTERS_PARAM: &str = "from_filters";
pub const ITEM_GROUP_PARAM: &str = "item_group";

pub const PRICE_FROM_FILTER: &str = "price_from";
pub const PRICE_TO_FILTER: &str = "price_to";
pub const OFFERS_FILTER: &str = "offers_title";
/// Older name for the offers filter, still accepted in URLs.
pub const OFFERS_FILTER_ALIAS: &str = "offers";
pub const BADGES_FILTER: &str = "badges";
pub const BRAND_FILTER: &str = "brand";
pub const ITEM_GROUP_FILTER: &str = "item_group";


/// Selected values per filter name. Sets make the value order irrelevant and
/// the sorted map makes the name order irrelevant, so encoding is canonical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterState {
    pub field_filters: BTreeMap<String, BTreeSet<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterEdit {
    Toggle { name: String, value: String, checked: bool },
    PriceRange { from: Option<f64>, to: Option<f64> },
}

impl FilterEdit {
    pub fn toggle(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        Self::Toggle { name: name.into(), value: value.into(), checked }
    }
}

impl FilterState {
    /// Absent, malformed or non-object input decodes to the empty state.
    pub fn decode(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Self::default();
        };
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::from_json(&value),
            Err(_) => Self::default(),
        }
    }

    pub fn from_json(value: &Value) -> Self {
        let mut state = Self::default();
        let Value::Object(map) = value else {
            return state;
        };
        for (name, values) in map {
            for value in normalize_filter_values(values) {
                state.insert(name, value);
            }
        }
        state
    }

    /// `None` when nothing is selected: an empty structure is omitted from
    /// the URL rather than written as `{}`.
    pub fn encode(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        serde_json::to_string(&self.field_filters).ok()
    }

    pub fn is_empty(&self) -> bool {
        self.field_filters.is_empty()
    }

    /// Also true when the value is selected under another accepted name for
    /// the same filter.
    pub fn is_selected(&self, name: &str, value: &str) -> bool {
        std::iter::once(name)
            .chain(filter_aliases(name).iter().copied())
            .any(|name| self.field_filters.get(name).is_some_and(|values| values.contains(value)))
    }

    pub fn values(&self, name: &str) -> impl Iterator<Item = &str> {
        self.field_filters.get(name).into_iter().flatten().map(String::as_str)
    }

    pub fn set_value(&mut self, name: &str, value: &str, selected: bool) {
        if selected {
            self.insert(name, value.to_string());
        } else {
            self.remove(name, value);
            for alias in filter_aliases(name) {
                self.remove(alias, value);
            }
        }
    }

    /// Both bounds are written as single-valued filters; a missing bound
    /// removes its entry.
    pub fn set_price_range(&mut self, from: Option<f64>, to: Option<f64>) {
        for (name, bound) in [(PRICE_FROM_FILTER, from), (PRICE_TO_FILTER, to)] {
            self.field_filters.remove(name);
            if let Some(bound) = bound.filter(|b| b.is_finite()) {
                self.insert(name, bound.to_string());
            }
        }
    }

    pub fn price_range(&self) -> (Option<f64>, Option<f64>) {
        let bound = |name| self.values(name).find_map(|v| v.trim().parse::<f64>().ok());
        (bound(PRICE_FROM_FILTER), bound(PRICE_TO_FILTER))
    }

    pub fn apply(&mut self, edit: &FilterEdit) {
        match edit {
            FilterEdit::Toggle { name, value, checked } => self.set_value(name, value, *checked),
            FilterEdit::PriceRange { from, to } => self.set_price_range(*from, *to),
        }
    }

    fn insert(&mut self, name: &str, value: String) {
        if value.trim().is_empty() {
            return;
        }
        self.field_filters.entry(name.to_string()).or_default().insert(value);
    }

    fn remove(&mut self, name: &str, value: &str) {
        let Some(entry) = self.field_filters.get_mut(name) else {
            return;
        };
        entry.remove(value);
        if entry.is_empty() {
            self.field_filters.remove(name);
        }
    }
}


/// Other names the listing accepts for the same filter.
pub fn filter_aliases(name: &str) -> &'static [&'static str] {
    match name {
        OFFERS_FILTER => &[OFFERS_FILTER_ALIAS],
        _ => &[],
    }
}

/// Coerces whatever a client sent for one filter into a flat list of strings:
/// arrays give their elements, a string holding a JSON array gives that
/// array's elements, any other scalar gives itself. Nulls give nothing.
pub fn normalize_filter_values(value: &Value) -> Vec<String> {
    match value {
        Value::Null => vec![],
        Value::Array(values) => values.iter().filter_map(scalar_to_string).collect(),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Array(values)) => values.iter().filter_map(scalar_to_string).collect(),
            _ => vec![s.clone()],
        },
        other => scalar_to_string(other).into_iter().collect(),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state(pairs: &[(&str, &[&str])]) -> FilterState {
        let mut state = FilterState::default();
        for (name, values) in pairs {
            for value in *values {
                state.set_value(name, value, true);
            }
        }
        state
    }

    #[test]
    fn decode_tolerates_garbage() {
        assert!(FilterState::decode(None).is_empty());
        assert!(FilterState::decode(Some("")).is_empty());
        assert!(FilterState::decode(Some("{not json")).is_empty());
        assert!(FilterState::decode(Some("[1,2]")).is_empty());
        assert!(FilterState::decode(Some("{\"badges\": []}")).is_empty());
    }

    #[test]
    fn decode_coerces_scalars_and_numbers() {
        let decoded = FilterState::decode(Some(r#"{"brand":"Acme","price_from":[25],"badges":["new",null,"sale"]}"#));
        assert_eq!(decoded, state(&[("brand", &["Acme"]), ("price_from", &["25"]), ("badges", &["new", "sale"])]));
    }

    #[test]
    fn reencoding_is_canonical() {
        let a = FilterState::decode(Some(r#"{"badges":["sale","new"],"brand":["Acme"]}"#));
        let b = FilterState::decode(Some(r#"{"brand":["Acme"],"badges":["new","sale","new"]}"#));
        assert_eq!(a.encode(), b.encode());
        assert_eq!(a.encode().as_deref(), Some(r#"{"badges":["new","sale"],"brand":["Acme"]}"#));
        assert_eq!(FilterState::decode(a.encode().as_deref()), a);
    }

    #[test]
    fn toggle_on_then_off_restores_state() {
        let before = state(&[("brand", &["Acme"])]);
        let mut after = before.clone();
        after.apply(&FilterEdit::toggle(BADGES_FILTER, "new", true));
        assert!(after.is_selected(BADGES_FILTER, "new"));
        after.apply(&FilterEdit::toggle(BADGES_FILTER, "new", false));
        assert_eq!(after, before);
        assert!(!after.field_filters.contains_key(BADGES_FILTER));
    }

    #[test]
    fn empty_state_encodes_to_nothing() {
        let mut s = state(&[("badges", &["new"])]);
        s.set_value("badges", "new", false);
        assert_eq!(s.encode(), None);
    }

    #[test]
    fn price_range_replaces_previous_bounds() {
        let mut s = state(&[("price_from", &["10"]), ("price_to", &["20"])]);
        s.apply(&FilterEdit::PriceRange { from: Some(25.0), to: Some(99.5) });
        assert_eq!(s.price_range(), (Some(25.0), Some(99.5)));
        assert_eq!(s.values(PRICE_FROM_FILTER).collect::<Vec<_>>(), vec!["25"]);

        s.apply(&FilterEdit::PriceRange { from: None, to: Some(50.0) });
        assert_eq!(s.price_range(), (None, Some(50.0)));
        assert!(!s.field_filters.contains_key(PRICE_FROM_FILTER));
    }

    #[test]
    fn offers_selected_under_the_old_name() {
        let mut s = FilterState::decode(Some(r#"{"offers":["Summer Sale"]}"#));
        assert!(s.is_selected(OFFERS_FILTER, "Summer Sale"));
        assert!(!s.is_selected(BADGES_FILTER, "Summer Sale"));

        s.apply(&FilterEdit::toggle(OFFERS_FILTER, "Summer Sale", false));
        assert!(s.is_empty());
    }

    #[test]
    fn normalize_unwraps_json_array_strings() {
        assert_eq!(normalize_filter_values(&Value::String(r#"["a","b"]"#.into())), vec!["a", "b"]);
        assert_eq!(normalize_filter_values(&Value::String("plain".into())), vec!["plain"]);
        assert_eq!(normalize_filter_values(&serde_json::json!(3)), vec!["3"]);
        assert!(normalize_filter_values(&Value::Null).is_empty());
    }
}
