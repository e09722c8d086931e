//! Product listing that understands the sidebar's filter parameters.

mod listing_filters;
pub use listing_filters::{ListingFilters, normalize_listing_query};

mod get_product_listing;
pub use get_product_listing::get_product_listing;
