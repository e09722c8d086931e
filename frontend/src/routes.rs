use dioxus::prelude::*;

use crate::data_definitions::catalog_query::CatalogQuery;
use crate::pages::catalog_page::CatalogPage;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    // the whole query string is the page state; filters are read from and written back to it
    #[route("/?:..query")]
    CatalogPage { query: CatalogQuery },
}
