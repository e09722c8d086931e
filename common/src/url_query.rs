//! Query string handling and the filter commit step.

use url::form_urlencoded;

use crate::filter_state::{FROM_FILTERS_PARAM, FilterEdit, FilterState, START_PARAM};


/// Ordered query parameters. Order of unrelated parameters survives a
/// parse/serialize cycle so rewritten URLs stay recognisable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn parse(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
        self.pairs.iter().filter(move |(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Replaces the first occurrence in place and drops any repeats, or
    /// appends when the key is new.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(index) => {
                self.pairs[index].1 = value;
                let mut seen = false;
                self.pairs.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    /// Encoded query including the leading `?`, or an empty string.
    pub fn to_query_string(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish();
        format!("?{encoded}")
    }

    pub fn filter_state(&self, param: &str) -> FilterState {
        FilterState::decode(self.get(param))
    }
}

impl std::fmt::Display for QueryParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_query_string().trim_start_matches('?'))
    }
}


/// Decode the structured filter parameter, apply the edit, write it back
/// (or drop it when nothing is left), clear the pagination offset and mark
/// the navigation as filter driven.
pub fn commit_filter_edit(query: &QueryParams, param: &str, edit: &FilterEdit) -> QueryParams {
    let mut state = query.filter_state(param);
    state.apply(edit);

    let mut next = query.clone();
    match state.encode() {
        Some(encoded) => next.set(param, encoded),
        None => next.remove(param),
    }
    next.remove(START_PARAM);
    next.set(FROM_FILTERS_PARAM, "1");
    next
}

/// Same pagination rules as a filter change, for plain parameter edits such
/// as switching the category scope.
pub fn commit_param_change(query: &QueryParams, param: &str, value: Option<&str>) -> QueryParams {
    let mut next = query.clone();
    match value {
        Some(value) => next.set(param, value),
        None => next.remove(param),
    }
    next.remove(START_PARAM);
    next.set(FROM_FILTERS_PARAM, "1");
    next
}

pub fn url_with_query(path: &str, query: &QueryParams) -> String {
    format!("{}{}", path, query.to_query_string())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter_state::{BADGES_FILTER, FIELD_FILTERS_PARAM};
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_and_serialize_keep_order() {
        let q = QueryParams::parse("?item_group=Shoes&search=red+shoe&start=20");
        assert_eq!(q.get("search"), Some("red shoe"));
        assert_eq!(q.to_query_string(), "?item_group=Shoes&search=red+shoe&start=20");
        assert_eq!(QueryParams::parse("").to_query_string(), "");
    }

    #[test]
    fn set_replaces_in_place_and_dedups() {
        let mut q = QueryParams::parse("a=1&b=2&a=3");
        q.set("a", "9");
        assert_eq!(q.to_string(), "a=9&b=2");
        q.set("c", "x");
        assert_eq!(q.to_string(), "a=9&b=2&c=x");
    }

    #[test]
    fn unchecking_last_value_drops_the_parameter() {
        let q = QueryParams::parse(r#"?field_filters={"badges":["new"]}&start=40"#);
        let next = commit_filter_edit(&q, FIELD_FILTERS_PARAM, &FilterEdit::toggle(BADGES_FILTER, "new", false));
        assert_eq!(next.get(FIELD_FILTERS_PARAM), None);
        assert_eq!(next.get(START_PARAM), None);
        assert_eq!(url_with_query("/catalog", &next), "/catalog?from_filters=1");
    }

    #[test]
    fn every_commit_clears_start() {
        for start in ["0", "20", "garbage"] {
            let q = QueryParams::parse(&format!("item_group=Shoes&start={start}"));
            let next = commit_filter_edit(&q, FIELD_FILTERS_PARAM, &FilterEdit::PriceRange { from: Some(10.0), to: None });
            assert_eq!(next.get(START_PARAM), None);
            assert_eq!(next.get("item_group"), Some("Shoes"));
            assert_eq!(next.get(FIELD_FILTERS_PARAM), Some(r#"{"price_from":["10"]}"#));
        }
    }

    #[test]
    fn scoping_to_a_group_keeps_filters_and_restarts_paging() {
        let q = QueryParams::parse(r#"field_filters={"badges":["new"]}&start=40"#);
        let next = commit_param_change(&q, "item_group", Some("Hats"));
        assert_eq!(next.to_string(), r#"field_filters=%7B%22badges%22%3A%5B%22new%22%5D%7D&item_group=Hats&from_filters=1"#);
        let back = commit_param_change(&next, "item_group", None);
        assert_eq!(back.get("item_group"), None);
        assert_eq!(back.get(FIELD_FILTERS_PARAM), Some(r#"{"badges":["new"]}"#));
    }

    #[test]
    fn commit_merges_into_existing_filters() {
        let q = QueryParams::parse(r#"field_filters={"brand":["Acme"]}"#);
        let next = commit_filter_edit(&q, FIELD_FILTERS_PARAM, &FilterEdit::toggle(BADGES_FILTER, "sale", true));
        assert_eq!(next.get(FIELD_FILTERS_PARAM), Some(r#"{"badges":["sale"],"brand":["Acme"]}"#));
        assert_eq!(next.get(FROM_FILTERS_PARAM), Some("1"));
    }

    #[test]
    fn malformed_filters_are_replaced() {
        let q = QueryParams::parse("field_filters=%7Bbroken");
        let next = commit_filter_edit(&q, FIELD_FILTERS_PARAM, &FilterEdit::toggle(BADGES_FILTER, "new", true));
        assert_eq!(next.get(FIELD_FILTERS_PARAM), Some(r#"{"badges":["new"]}"#));
    }

    #[test]
    fn encoded_url_round_trips() {
        let q = QueryParams::parse("");
        let next = commit_filter_edit(&q, FIELD_FILTERS_PARAM, &FilterEdit::toggle("brand", "Acme & Sons", true));
        let reparsed = QueryParams::parse(&next.to_query_string());
        assert_eq!(reparsed.filter_state(FIELD_FILTERS_PARAM), next.filter_state(FIELD_FILTERS_PARAM));
        assert!(reparsed.filter_state(FIELD_FILTERS_PARAM).is_selected("brand", "Acme & Sons"));
    }
}
