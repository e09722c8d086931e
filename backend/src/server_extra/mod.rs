//! Plain HTTP routes served next to the app.

pub mod catalog_routes;
