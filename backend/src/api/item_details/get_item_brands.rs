use std::collections::BTreeMap;

use crate::catalog_store::CatalogStore;
use super::clean_item_codes;


/// Brand per known item, published or not. Unknown codes are left out.
pub async fn get_item_brands<S: CatalogStore>(store: &S, item_codes: Vec<String>) -> anyhow::Result<BTreeMap<String, Option<String>>> {
    let item_codes = clean_item_codes(item_codes);
    if item_codes.is_empty() {
        return Ok(BTreeMap::new());
    }
    Ok(store.items_by_code(&item_codes).await?
        .into_iter()
        .map(|item| {
            let brand = item.brand_name().map(str::to_string);
            (item.item_code, brand)
        })
        .collect())
}
