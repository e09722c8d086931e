use std::collections::BTreeMap;

use crate::catalog_store::CatalogStore;
use super::clean_item_codes;


/// Offer titles per requested code, in listing order. Unknown codes map to
/// an empty list.
pub async fn get_item_offers<S: CatalogStore>(store: &S, item_codes: Vec<String>) -> anyhow::Result<BTreeMap<String, Vec<String>>> {
    let item_codes = clean_item_codes(item_codes);
    let mut result: BTreeMap<String, Vec<String>> = item_codes.iter().map(|code| (code.clone(), vec![])).collect();
    if item_codes.is_empty() {
        return Ok(result);
    }
    for item in store.items_by_code(&item_codes).await? {
        let titles = item.offers.iter().map(|o| o.trim()).filter(|o| !o.is_empty()).map(str::to_string).collect();
        result.insert(item.item_code, titles);
    }
    Ok(result)
}
