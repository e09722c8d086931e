//! Per-card details looked up by item code.

mod get_item_brands;
pub use get_item_brands::get_item_brands;

mod get_item_offers;
pub use get_item_offers::get_item_offers;


/// Trimmed, non-blank, sorted and deduplicated.
fn clean_item_codes(item_codes: Vec<String>) -> Vec<String> {
    let mut codes = item_codes.into_iter().map(|c| c.trim().to_string()).filter(|c| !c.is_empty()).collect::<Vec<_>>();
    codes.sort();
    codes.dedup();
    codes
}
