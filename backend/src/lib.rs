//! Catalog facet and listing backend.

pub mod api;
pub mod catalog_store;
pub mod config;
pub mod db_utils;
pub mod eligibility;
pub mod server_extra;
