//! Catalog item models as read from the catalog store.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CatalogItem {
    pub item_code: String,
    pub item_name: String,
    pub item_group: String,
    pub brand: Option<String>,
    /// Effective display price for the active selling price list.
    pub price: Option<f64>,
    pub published: bool,
    pub in_stock: bool,
    /// Titles of the offers currently attached to the item.
    pub offers: Vec<String>,
    pub badges: Vec<ItemBadge>,
    pub attributes: BTreeMap<String, String>,
}

impl CatalogItem {
    pub fn brand_name(&self) -> Option<&str> {
        self.brand.as_deref().map(str::trim).filter(|b| !b.is_empty())
    }

    pub fn offer_titles(&self) -> BTreeSet<&str> {
        self.offers.iter().map(|o| o.trim()).filter(|o| !o.is_empty()).collect()
    }

    pub fn has_active_offer(&self) -> bool {
        !self.offer_titles().is_empty()
    }

    /// Distinct, non-blank badge codes. An item carrying the same badge twice
    /// (for example an automatic and a manual row) still yields it once.
    pub fn badge_codes(&self) -> BTreeSet<&str> {
        self.badges.iter().map(|b| b.badge_type.trim()).filter(|b| !b.is_empty()).collect()
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BadgeSource {
    #[default]
    Manual,
    Auto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ItemBadge {
    pub badge_type: String,
    pub source: BadgeSource,
    pub valid_from: Option<NaiveDate>,
    pub valid_upto: Option<NaiveDate>,
}

impl ItemBadge {
    pub fn new(badge_type: impl Into<String>) -> Self {
        Self { badge_type: badge_type.into(), ..Default::default() }
    }

    /// Both ends of the validity window are inclusive; a missing end is open.
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        if let Some(from) = self.valid_from {
            if day < from {
                return false;
            }
        }
        if let Some(upto) = self.valid_upto {
            if day > upto {
                return false;
            }
        }
        true
    }
}
