//! The catalog page query string as a route segment.

use std::fmt::Display;

use common::{
    filter_state::FilterEdit,
    url_query::{QueryParams, commit_filter_edit, commit_param_change, url_with_query},
};
use dioxus::prelude::*;

use crate::routes::Route;


pub const CATALOG_PATH: &str = "/";


/// Whole query string of the catalog page. The router needs `From<&str>` and
/// `Display` to carry it as a query segment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogQuery(pub QueryParams);

impl From<&str> for CatalogQuery {
    fn from(value: &str) -> Self {
        CatalogQuery(QueryParams::parse(value))
    }
}

impl From<QueryParams> for CatalogQuery {
    fn from(value: QueryParams) -> Self {
        CatalogQuery(value)
    }
}

impl Display for CatalogQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}


/// Query of the page being shown, provided as context by the catalog page.
#[derive(Clone, Copy)]
pub struct CatalogPageState {
    pub query: ReadSignal<QueryParams>,
}

impl CatalogPageState {
    pub fn commit_edit(&self, param: &str, edit: &FilterEdit) {
        let next = commit_filter_edit(&self.query.peek(), param, edit);
        reload_catalog(next);
    }

    pub fn commit_param(&self, param: &str, value: Option<&str>) {
        let next = commit_param_change(&self.query.peek(), param, value);
        reload_catalog(next);
    }
}

/// Filter changes are full page loads so the listing, the facets and the
/// address bar are always rebuilt from the same URL.
pub fn reload_catalog(query: QueryParams) {
    let url = url_with_query(CATALOG_PATH, &query);
    dioxus::logger::tracing::info!("navigating to {}", url);

    #[cfg(target_arch = "wasm32")]
    {
        match web_sys::window().map(|window| window.location().set_href(&url)) {
            Some(Ok(())) => return,
            Some(Err(err)) => dioxus::logger::tracing::warn!("full reload to {} failed: {:?}", url, err),
            None => dioxus::logger::tracing::warn!("no window; falling back to router navigation"),
        }
    }

    navigator().push(Route::CatalogPage { query: query.into() });
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_segment_survives_the_router() {
        let query = CatalogQuery::from("item_group=Shoes&field_filters=%7B%22badges%22%3A%5B%22new%22%5D%7D");
        assert!(query.0.filter_state("field_filters").is_selected("badges", "new"));
        assert_eq!(CatalogQuery::from(query.to_string().as_str()), query);
    }
}
