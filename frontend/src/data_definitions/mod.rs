pub mod catalog_query;
pub mod host_region;
