//! Single-pass facet counting over eligible items.

use std::collections::BTreeMap;

use common::{
    catalog_item::CatalogItem,
    facet_summary::{FacetEntry, FacetSummary, NamedCount, PriceMinMax, PriceRangeFacet},
    price_bucket::PriceBucket,
};

use crate::config::CatalogConfig;


#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacetOptions {
    pub show_offers: bool,
    pub show_badges: bool,
    pub brand_limit: usize,
}

impl From<&CatalogConfig> for FacetOptions {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            show_offers: config.show_offers_filter,
            show_badges: config.show_badges_filter,
            brand_limit: config.brand_facet_limit,
        }
    }
}

/// `buckets` must already be validated and ordered; `None` leaves the price
/// range group out of the summary.
pub fn aggregate_facets(items: &[CatalogItem], buckets: Option<&[PriceBucket]>, options: FacetOptions) -> FacetSummary {
    let mut bucket_counts = vec![0_u64; buckets.map_or(0, |b| b.len())];
    let mut min_max = PriceMinMax::default();
    let mut offers: BTreeMap<&str, u64> = BTreeMap::new();
    let mut badges: BTreeMap<&str, u64> = BTreeMap::new();
    let mut brands: BTreeMap<&str, u64> = BTreeMap::new();
    let mut item_groups: BTreeMap<&str, u64> = BTreeMap::new();

    for item in items {
        if let Some(price) = item.price.filter(|p| !p.is_nan()) {
            min_max.min = Some(min_max.min.map_or(price, |m| m.min(price)));
            min_max.max = Some(min_max.max.map_or(price, |m| m.max(price)));
            if let Some(buckets) = buckets {
                if let Some(index) = buckets.iter().position(|b| b.contains(price)) {
                    bucket_counts[index] += 1;
                }
            }
        }
        for title in item.offer_titles() {
            *offers.entry(title).or_default() += 1;
        }
        for code in item.badge_codes() {
            *badges.entry(code).or_default() += 1;
        }
        if let Some(brand) = item.brand_name() {
            *brands.entry(brand).or_default() += 1;
        }
        let group = item.item_group.trim();
        if !group.is_empty() {
            *item_groups.entry(group).or_default() += 1;
        }
    }

    let mut brands = named_counts(brands);
    brands.truncate(options.brand_limit);

    FacetSummary {
        price_ranges: buckets.map(|buckets| {
            buckets.iter().zip(bucket_counts).map(|(bucket, count)| PriceRangeFacet {
                name: bucket.name.clone(),
                label: bucket.label.clone(),
                from_amount: bucket.from_amount,
                to_amount: bucket.to_amount,
                count,
            }).collect()
        }),
        price_min_max: Some(min_max),
        offers: options.show_offers.then(|| facet_entries(offers)),
        badges: options.show_badges.then(|| facet_entries(badges)),
        brands: Some(brands),
        item_groups: Some(named_counts(item_groups)),
    }
}


fn facet_entries(counts: BTreeMap<&str, u64>) -> Vec<FacetEntry> {
    let mut entries = counts.into_iter().map(|(code, count)| FacetEntry {
        code: code.to_string(),
        label: code.to_string(),
        count,
    }).collect::<Vec<_>>();
    entries.sort_by_key(|entry| (u64::MAX - entry.count, entry.label.clone()));
    entries
}

fn named_counts(counts: BTreeMap<&str, u64>) -> Vec<NamedCount> {
    let mut entries = counts.into_iter().map(|(name, count)| NamedCount { name: name.to_string(), count }).collect::<Vec<_>>();
    entries.sort_by_key(|entry| (u64::MAX - entry.count, entry.name.clone()));
    entries
}


#[cfg(test)]
mod tests {
    use super::*;
    use common::catalog_item::ItemBadge;
    use pretty_assertions::assert_eq;

    const ALL: FacetOptions = FacetOptions { show_offers: true, show_badges: true, brand_limit: 20 };

    fn item(code: &str, price: Option<f64>, badges: &[&str], offers: &[&str], brand: Option<&str>) -> CatalogItem {
        CatalogItem {
            item_code: code.to_string(),
            item_group: "Shoes".to_string(),
            price,
            published: true,
            in_stock: true,
            brand: brand.map(str::to_string),
            badges: badges.iter().map(|b| ItemBadge::new(*b)).collect(),
            offers: offers.iter().map(|o| o.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn shoes_scenario() {
        let items = vec![
            item("a", Some(20.0), &["new"], &[], None),
            item("b", Some(60.0), &["new"], &[], None),
            item("c", Some(60.0), &[], &[], None),
        ];
        let buckets = vec![
            PriceBucket::new("Under $25", Some(0.0), Some(25.0)),
            PriceBucket::new("$25-$100", Some(25.0), Some(100.0)),
        ];
        let summary = aggregate_facets(&items, Some(&buckets), ALL);

        let ranges = summary.price_ranges.unwrap().into_iter().map(|r| (r.label, r.count)).collect::<Vec<_>>();
        assert_eq!(ranges, vec![("Under $25".to_string(), 1), ("$25-$100".to_string(), 2)]);
        assert_eq!(summary.badges.unwrap(), vec![FacetEntry { code: "new".into(), label: "new".into(), count: 2 }]);
        assert_eq!(summary.price_min_max, Some(PriceMinMax { min: Some(20.0), max: Some(60.0) }));
    }

    #[test]
    fn bucket_counts_cover_every_priced_item_once() {
        let prices = [0.0, 24.99, 25.0, 49.99, 50.0, 100.0, 250.0, 9999.0];
        let mut items = prices.iter().enumerate().map(|(i, p)| item(&i.to_string(), Some(*p), &[], &[], None)).collect::<Vec<_>>();
        items.push(item("unpriced", None, &[], &[], None));
        let buckets = PriceBucket::default_buckets();

        let summary = aggregate_facets(&items, Some(&buckets), ALL);
        let ranges = summary.price_ranges.unwrap();
        assert_eq!(ranges.iter().map(|r| r.count).sum::<u64>(), prices.len() as u64);
        assert_eq!(ranges.iter().map(|r| r.count).collect::<Vec<_>>(), vec![2, 2, 1, 1, 2]);

        let min_max = summary.price_min_max.unwrap();
        assert_eq!(min_max.min, Some(0.0));
        assert_eq!(min_max.max, Some(9999.0));
    }

    #[test]
    fn counts_sort_by_count_then_label() {
        let items = vec![
            item("a", None, &["sale", "new"], &["Summer"], Some("Zed")),
            item("b", None, &["sale", "sale"], &["Autumn"], Some("Acme")),
            item("c", None, &["new"], &["Summer", "Autumn"], Some("Acme")),
            item("d", None, &["bestseller"], &[], Some("Beta")),
        ];
        let summary = aggregate_facets(&items, None, ALL);

        let badges = summary.badges().iter().map(|b| (b.code.as_str(), b.count)).collect::<Vec<_>>();
        assert_eq!(badges, vec![("new", 2), ("sale", 2), ("bestseller", 1)]);
        let offers = summary.offers().iter().map(|o| (o.code.as_str(), o.count)).collect::<Vec<_>>();
        assert_eq!(offers, vec![("Autumn", 2), ("Summer", 2)]);
        let brands = summary.brands().iter().map(|b| (b.name.as_str(), b.count)).collect::<Vec<_>>();
        assert_eq!(brands, vec![("Acme", 2), ("Beta", 1), ("Zed", 1)]);
        assert_eq!(summary.item_groups(), &[NamedCount { name: "Shoes".into(), count: 4 }]);
        assert_eq!(summary.price_ranges, None);
        assert_eq!(summary.price_min_max, Some(PriceMinMax { min: None, max: None }));
    }

    #[test]
    fn switched_off_groups_are_absent_and_brands_are_capped() {
        let items = (0..30).map(|i| item(&i.to_string(), None, &["new"], &["Deal"], Some(format!("Brand {i:02}").as_str()))).collect::<Vec<_>>();
        let options = FacetOptions { show_offers: false, show_badges: false, brand_limit: 20 };
        let summary = aggregate_facets(&items, None, options);
        assert_eq!(summary.offers, None);
        assert_eq!(summary.badges, None);
        assert_eq!(summary.brands().len(), 20);
        assert_eq!(summary.brands()[0].name, "Brand 00");
    }
}
