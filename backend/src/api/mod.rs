//! Catalog API operations and module exports.

pub mod catalog;
pub mod facets;
pub mod listing;
pub mod badges;
pub mod item_details;
