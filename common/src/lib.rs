//! Common library exports shared between frontend and backend.

extern crate serde;


pub mod catalog_item;
pub mod price_bucket;
pub mod facet_summary;
pub mod filter_state;
pub mod url_query;
pub mod listing;
pub mod sidebar_layout;
pub mod retry_policy;
pub mod debounce;
