//! Filter facet query and aggregation.

mod facet_aggregator;
pub use facet_aggregator::{FacetOptions, aggregate_facets};

mod get_filter_facets;
pub use get_filter_facets::{FacetService, get_filter_facets};
