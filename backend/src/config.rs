//! Site configuration read from the environment.

use std::str::FromStr;


#[derive(Debug, Clone, PartialEq)]
pub struct ClickhouseConfig {
    pub url: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl ClickhouseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env_or("CLICKHOUSE_URL", "http://localhost:8123"),
            user: env_or("CLICKHOUSE_USER", "catalog"),
            password: env_or("CLICKHOUSE_PASSWORD", "catalog"),
            database: env_or("CLICKHOUSE_DATABASE", "catalog"),
        }
    }
}


#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub show_offers_filter: bool,
    pub show_badges_filter: bool,
    pub brand_facet_limit: usize,
    pub page_length: u64,
    /// Store policy: hide items that are out of stock from listings and facets.
    pub require_in_stock: bool,
    /// Selling price list whose rates are the display prices.
    pub price_list: String,
    pub badge_rules: BadgeRules,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            show_offers_filter: true,
            show_badges_filter: true,
            brand_facet_limit: 20,
            page_length: 20,
            require_in_stock: false,
            price_list: "Standard Selling".to_string(),
            badge_rules: BadgeRules::default(),
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            show_offers_filter: env_flag("CATALOG_SHOW_OFFERS_FILTER", defaults.show_offers_filter),
            show_badges_filter: env_flag("CATALOG_SHOW_BADGES_FILTER", defaults.show_badges_filter),
            brand_facet_limit: env_parse("CATALOG_BRAND_FACET_LIMIT", defaults.brand_facet_limit),
            page_length: env_parse("CATALOG_PAGE_LENGTH", defaults.page_length).max(1),
            require_in_stock: env_flag("CATALOG_REQUIRE_IN_STOCK", defaults.require_in_stock),
            price_list: env_or("CATALOG_PRICE_LIST", &defaults.price_list),
            badge_rules: BadgeRules::from_env(),
        }
    }
}


/// Thresholds of the automatic badges.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeRules {
    /// Items created within this many days are "New"; also the sales window.
    pub new_item_days: u32,
    /// Stock items with a positive quantity at or below this are "Low Stock".
    pub low_stock_threshold: f64,
    /// This many best selling items are "Bestseller".
    pub bestseller_top_n: usize,
}

impl Default for BadgeRules {
    fn default() -> Self {
        Self { new_item_days: 30, low_stock_threshold: 5.0, bestseller_top_n: 50 }
    }
}

impl BadgeRules {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            new_item_days: env_parse("CATALOG_NEW_ITEM_DAYS", defaults.new_item_days),
            low_stock_threshold: env_parse("CATALOG_LOW_STOCK_THRESHOLD", defaults.low_stock_threshold),
            bestseller_top_n: env_parse("CATALOG_BESTSELLER_TOP_N", defaults.bestseller_top_n),
        }
    }
}


fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty()).unwrap_or(default.to_string())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("config: ignoring unparseable {key}={raw:?}");
            default
        }),
        Err(_) => default,
    }
}

fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(raw) => parse_flag(&raw).unwrap_or(default),
        Err(_) => default,
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_site_config_spellings() {
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn defaults_show_every_group() {
        let config = CatalogConfig::default();
        assert!(config.show_offers_filter && config.show_badges_filter);
        assert_eq!(config.brand_facet_limit, 20);
    }
}
