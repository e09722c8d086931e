//! Configured price intervals used by the price facet.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBucket {
    pub name: String,
    pub label: String,
    /// Inclusive lower bound; `None` is unbounded below.
    pub from_amount: Option<f64>,
    /// Exclusive upper bound; `None` is unbounded above.
    pub to_amount: Option<f64>,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl PriceBucket {
    pub fn new(label: impl Into<String>, from_amount: Option<f64>, to_amount: Option<f64>) -> Self {
        let label = label.into();
        Self { name: label.clone(), label, from_amount, to_amount, sort_order: 0, enabled: true }
    }

    pub fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn contains(&self, price: f64) -> bool {
        self.from_amount.is_none_or(|from| price >= from) && self.to_amount.is_none_or(|to| price < to)
    }

    /// Ranges installed on a fresh site when nothing is configured.
    pub fn default_buckets() -> Vec<PriceBucket> {
        vec![
            PriceBucket::new("Under $25", Some(0.0), Some(25.0)).with_sort_order(10),
            PriceBucket::new("$25 - $50", Some(25.0), Some(50.0)).with_sort_order(20),
            PriceBucket::new("$50 - $100", Some(50.0), Some(100.0)).with_sort_order(30),
            PriceBucket::new("$100 - $250", Some(100.0), Some(250.0)).with_sort_order(40),
            PriceBucket::new("Over $250", Some(250.0), None).with_sort_order(50),
        ]
    }

    fn lower(&self) -> f64 {
        self.from_amount.unwrap_or(f64::NEG_INFINITY)
    }

    fn upper(&self) -> f64 {
        self.to_amount.unwrap_or(f64::INFINITY)
    }
}


#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BucketConfigError {
    #[error("price range {label:?} has a non-numeric bound")]
    NotANumber { label: String },

    #[error("price range {label:?} has an upper bound that is not above its lower bound")]
    Inverted { label: String },

    #[error("price ranges {first:?} and {second:?} overlap")]
    Overlapping { first: String, second: String },
}

/// Drops disabled buckets, checks that no two of the rest can claim the same
/// price, and orders them by `sort_order`, then bounds, then name.
pub fn prepare_buckets(mut buckets: Vec<PriceBucket>) -> Result<Vec<PriceBucket>, BucketConfigError> {
    buckets.retain(|bucket| bucket.enabled);
    for bucket in &buckets {
        if bucket.from_amount.is_some_and(f64::is_nan) || bucket.to_amount.is_some_and(f64::is_nan) {
            return Err(BucketConfigError::NotANumber { label: bucket.label.clone() });
        }
        if bucket.upper() <= bucket.lower() {
            return Err(BucketConfigError::Inverted { label: bucket.label.clone() });
        }
    }

    buckets.sort_by(|a, b| {
        a.lower().total_cmp(&b.lower())
            .then_with(|| a.upper().total_cmp(&b.upper()))
            .then_with(|| a.name.cmp(&b.name))
    });

    for pair in buckets.windows(2) {
        if pair[0].upper().partial_cmp(&pair[1].lower()) == Some(Ordering::Greater) {
            return Err(BucketConfigError::Overlapping { first: pair[0].label.clone(), second: pair[1].label.clone() });
        }
    }
    // stable, so equal sort orders keep the bound order from above
    buckets.sort_by_key(|bucket| bucket.sort_order);
    Ok(buckets)
}
