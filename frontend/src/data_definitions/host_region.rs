//! The listing's own filter blocks, shared with the sidebar.

use common::{
    filter_state::{ATTRIBUTE_FILTERS_PARAM, FIELD_FILTERS_PARAM},
    listing::{FilterOptions, ListingPage},
    sidebar_layout::FilterBlockKind,
};
use dioxus::prelude::*;


/// A filter block rendered by the listing, independent of the sidebar.
#[derive(Debug, Clone, PartialEq)]
pub struct HostFilterBlock {
    pub kind: FilterBlockKind,
    /// Query parameter holding this block's selection.
    pub param: &'static str,
    pub name: String,
    pub title: String,
    pub values: Vec<String>,
}

/// Filled by the listing once its filters are known. `None` until then.
#[derive(Clone, Copy)]
pub struct HostFilterRegion {
    pub blocks: Signal<Option<Vec<HostFilterBlock>>>,
}


pub fn host_blocks_from_listing(page: &ListingPage) -> Vec<HostFilterBlock> {
    let block = |kind, param, options: &FilterOptions| HostFilterBlock {
        kind,
        param,
        name: options.name.clone(),
        title: filter_title(&options.name),
        values: options.values.clone(),
    };
    page.field_filters.iter()
        .map(|f| block(FilterBlockKind::Field, FIELD_FILTERS_PARAM, f))
        .chain(page.attribute_filters.iter().map(|f| block(FilterBlockKind::Attribute, ATTRIBUTE_FILTERS_PARAM, f)))
        .collect()
}

/// `item_group` -> `Item Group`
pub fn filter_title(name: &str) -> String {
    name.split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_filters_become_field_then_attribute_blocks() {
        let page = ListingPage {
            field_filters: vec![FilterOptions { name: "brand".into(), values: vec!["Acme".into()] }],
            attribute_filters: vec![FilterOptions { name: "colour".into(), values: vec!["Red".into()] }],
            ..Default::default()
        };
        let blocks = host_blocks_from_listing(&page);
        assert_eq!(blocks.iter().map(|b| b.kind).collect::<Vec<_>>(), vec![FilterBlockKind::Field, FilterBlockKind::Attribute]);
        assert_eq!(blocks[1].param, ATTRIBUTE_FILTERS_PARAM);
        assert_eq!(blocks[0].title, "Brand");
    }

    #[test]
    fn titles() {
        assert_eq!(filter_title("item_group"), "Item Group");
        assert_eq!(filter_title("offers_title"), "Offers Title");
    }
}
