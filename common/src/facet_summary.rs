//! Facet summary returned by the filter facet query.

use serde::{Deserialize, Serialize};


/// Each group is optional on the wire: a group that could not be computed,
/// or that is switched off for the site, is simply absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FacetSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_ranges: Option<Vec<PriceRangeFacet>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min_max: Option<PriceMinMax>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offers: Option<Vec<FacetEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badges: Option<Vec<FacetEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brands: Option<Vec<NamedCount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_groups: Option<Vec<NamedCount>>,
}

impl FacetSummary {
    pub fn is_empty(&self) -> bool {
        *self == FacetSummary::default()
    }

    pub fn offers(&self) -> &[FacetEntry] {
        self.offers.as_deref().unwrap_or_default()
    }

    pub fn badges(&self) -> &[FacetEntry] {
        self.badges.as_deref().unwrap_or_default()
    }

    pub fn brands(&self) -> &[NamedCount] {
        self.brands.as_deref().unwrap_or_default()
    }

    pub fn item_groups(&self) -> &[NamedCount] {
        self.item_groups.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRangeFacet {
    pub name: String,
    pub label: String,
    pub from_amount: Option<f64>,
    pub to_amount: Option<f64>,
    pub count: u64,
}

/// True observed bounds, not derived from the buckets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PriceMinMax {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetEntry {
    pub code: String,
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedCount {
    pub name: String,
    pub count: u64,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_groups_are_not_serialized() {
        let summary = FacetSummary {
            badges: Some(vec![FacetEntry { code: "new".into(), label: "new".into(), count: 2 }]),
            ..Default::default()
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json, serde_json::json!({"badges": [{"code": "new", "label": "new", "count": 2}]}));
        assert_eq!(serde_json::to_string(&FacetSummary::default()).unwrap(), "{}");
    }

    #[test]
    fn missing_response_reads_as_empty() {
        let summary: FacetSummary = serde_json::from_str("{}").unwrap();
        assert!(summary.is_empty());
        assert!(summary.badges().is_empty());
    }
}
