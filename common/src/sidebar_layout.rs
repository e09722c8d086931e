//! Layout rules for the filter sidebar: where the catalog filter blocks go,
//! how the price slider is bounded, and how native labels get their counts.

use crate::facet_summary::{FacetSummary, NamedCount, PriceMinMax};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterBlockKind {
    /// Filters on item fields rendered by the host page (brand, item group).
    Field,
    /// Filters on item attributes rendered by the host page.
    Attribute,
    Other,
}

/// Blocks contributed by the sidebar, in the order they are inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SidebarBlock {
    Price,
    Offers,
    Badges,
}

pub const SIDEBAR_BLOCKS: [SidebarBlock; 3] = [SidebarBlock::Price, SidebarBlock::Offers, SidebarBlock::Badges];

/// Right after the last field filter; otherwise right before the first
/// attribute filter; otherwise the top of the region.
pub fn insertion_index(existing: &[FilterBlockKind]) -> usize {
    if let Some(last_field) = existing.iter().rposition(|k| *k == FilterBlockKind::Field) {
        return last_field + 1;
    }
    existing.iter().position(|k| *k == FilterBlockKind::Attribute).unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlacedBlock<T> {
    Host(T),
    Sidebar(SidebarBlock),
}

pub fn arrange_blocks<T>(existing: Vec<(FilterBlockKind, T)>) -> Vec<PlacedBlock<T>> {
    let kinds = existing.iter().map(|(kind, _)| *kind).collect::<Vec<_>>();
    let at = insertion_index(&kinds);
    let mut placed = existing.into_iter().map(|(_, block)| PlacedBlock::Host(block)).collect::<Vec<_>>();
    let tail = placed.split_off(at);
    placed.extend(SIDEBAR_BLOCKS.into_iter().map(PlacedBlock::Sidebar));
    placed.extend(tail);
    placed
}


pub fn round_up_to_nearest_thousand(value: f64) -> f64 {
    ((value / 1000.0).ceil() * 1000.0).max(1000.0)
}

/// Slider range `[true_min, max rounded up to a thousand]`, or `None` when
/// no priced item exists.
pub fn slider_bounds(min_max: &PriceMinMax) -> Option<(f64, f64)> {
    let (min, max) = (min_max.min?, min_max.max?);
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    Some((min.min(max), round_up_to_nearest_thousand(max)))
}

/// The price block is only worth showing with a usable slider or a bucket
/// that holds something.
pub fn has_price_filter(summary: &FacetSummary) -> bool {
    summary.price_min_max.as_ref().and_then(slider_bounds).is_some()
        || summary.price_ranges.iter().flatten().any(|bucket| bucket.count > 0)
}

/// The range being dragged before Apply commits it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingPriceRange {
    pub bounds: (f64, f64),
    pub low: f64,
    pub high: f64,
}

impl PendingPriceRange {
    /// Starts from the committed selection, falling back to the full range.
    pub fn new(bounds: (f64, f64), committed: (Option<f64>, Option<f64>)) -> Self {
        let mut range = Self { bounds, low: bounds.0, high: bounds.1 };
        if let Some(from) = committed.0 {
            range.set_low(from);
        }
        if let Some(to) = committed.1 {
            range.set_high(to);
        }
        range
    }

    pub fn set_low(&mut self, value: f64) {
        self.low = self.clamp(value);
        self.swap_if_crossed();
    }

    pub fn set_high(&mut self, value: f64) {
        self.high = self.clamp(value);
        self.swap_if_crossed();
    }

    /// Bounds to commit. An end sitting on the slider limit is left open.
    pub fn committed(&self) -> (Option<f64>, Option<f64>) {
        let from = (self.low > self.bounds.0).then_some(self.low);
        let to = (self.high < self.bounds.1).then_some(self.high);
        (from, to)
    }

    fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.bounds.0;
        }
        value.clamp(self.bounds.0, self.bounds.1)
    }

    fn swap_if_crossed(&mut self) {
        if self.low > self.high {
            std::mem::swap(&mut self.low, &mut self.high);
        }
    }
}


pub fn annotate_label(label: &str, count: u64) -> String {
    format!("{label} ({count})")
}

/// Adds the facet count to a native filter label by matching its text.
/// A label that already ends in the matching count is left alone, so
/// re-running over patched labels does not stack counts. Any other
/// parenthesised suffix is part of the name.
pub fn annotate_native_label(rendered: &str, counts: &[NamedCount]) -> String {
    let label = rendered.trim();
    let find = |name: &str| counts.iter().find(|c| c.name.trim().eq_ignore_ascii_case(name));
    if let Some(found) = find(label) {
        return annotate_label(label, found.count);
    }
    if let Some((bare, count)) = split_count_suffix(label) {
        if find(bare).is_some_and(|found| found.count == count) {
            return label.to_string();
        }
    }
    label.to_string()
}

fn split_count_suffix(label: &str) -> Option<(&str, u64)> {
    let open = label.rfind(" (")?;
    let digits = label[open + 2..].strip_suffix(')')?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((label[..open].trim_end(), digits.parse().ok()?))
}
