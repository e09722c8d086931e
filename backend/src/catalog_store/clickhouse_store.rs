//! Catalog store backed by ClickHouse tables.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Context;
use chrono::NaiveDate;
use clickhouse::Row;
use common::{catalog_item::{BadgeSource, CatalogItem, ItemBadge}, price_bucket::PriceBucket};
use serde::Deserialize;

use crate::{config::ClickhouseConfig, db_utils::clickhouse_utils::get_clickhouse_client};
use super::{CatalogStore, ItemBadgeSignals};


const ITEM_COLUMNS: &str = "
    wi.item_code AS item_code, wi.item_name AS item_name, wi.item_group AS item_group,
    wi.brand AS brand, ip.price_list_rate AS price_list_rate,
    wi.published AS published, wi.in_stock AS in_stock, wi.offer_titles AS offer_titles
";

const ITEM_FROM_CLAUSE: &str = "
    FROM website_item wi
    LEFT JOIN (
        SELECT item_code, min(price_list_rate) AS price_list_rate
        FROM item_price
        WHERE selling = 1 AND price_list = ?
        GROUP BY item_code
    ) ip ON ip.item_code = wi.item_code
";

// items without a price row must read back as NULL, not 0
const JOIN_SETTINGS: &str = " SETTINGS join_use_nulls = 1";

// automatic rows sort after the manual ones
const AUTO_BADGE_IDX_BASE: u32 = 1000;

const BADGE_SIGNALS_SQL: &str = "
    SELECT
        wi.item_code AS item_code,
        toString(toDate(it.creation)) AS created_on,
        toFloat64(ifNull(sales.qty, 0)) AS sold_qty,
        wi.consumer_discount AS consumer_discount,
        ifNull(it.is_stock_item, 0) AS is_stock_item,
        toFloat64(ifNull(stock.qty, 0)) AS stock_qty
    FROM website_item wi
    LEFT JOIN item it ON it.name = wi.item_code
    LEFT JOIN (
        SELECT si_item.item_code AS item_code, sum(si_item.qty) AS qty
        FROM sales_invoice_item si_item
        INNER JOIN sales_invoice si ON si.name = si_item.parent
        WHERE si.docstatus = 1 AND si.posting_date >= ?
        GROUP BY si_item.item_code
    ) sales ON sales.item_code = wi.item_code
    LEFT JOIN (
        SELECT item_code, sum(actual_qty) AS qty FROM bin GROUP BY item_code
    ) stock ON stock.item_code = wi.item_code
    WHERE wi.published = 1
    SETTINGS join_use_nulls = 1
";


#[derive(Debug, Row, Deserialize)]
struct ItemRow {
    item_code: String,
    item_name: String,
    item_group: String,
    brand: Option<String>,
    price_list_rate: Option<f64>,
    published: u8,
    in_stock: u8,
    offer_titles: Vec<String>,
}

#[derive(Debug, Row, Deserialize)]
struct BadgeRow {
    item_code: String,
    badge_type: String,
    source: String,
    valid_from: Option<String>,
    valid_upto: Option<String>,
}

#[derive(Debug, Row, Deserialize)]
struct BadgeSignalsRow {
    item_code: String,
    created_on: Option<String>,
    sold_qty: f64,
    consumer_discount: Option<f64>,
    is_stock_item: u8,
    stock_qty: f64,
}

#[derive(Debug, Row, Deserialize)]
struct PriceRangeRow {
    name: String,
    label: String,
    from_amount: Option<f64>,
    to_amount: Option<f64>,
    sort_order: i64,
    enabled: u8,
}


#[derive(Clone)]
pub struct ClickhouseCatalogStore {
    client: clickhouse::Client,
    price_list: String,
}

impl ClickhouseCatalogStore {
    pub fn new(config: &ClickhouseConfig, price_list: impl Into<String>) -> Self {
        Self { client: get_clickhouse_client(config), price_list: price_list.into() }
    }

    async fn attach_badges(&self, rows: Vec<ItemRow>) -> anyhow::Result<Vec<CatalogItem>> {
        let codes = rows.iter().map(|r| r.item_code.clone()).collect::<Vec<_>>();
        let mut badges = self.badges_for(codes).await?;
        Ok(rows.into_iter().map(|row| {
            let item_badges = badges.remove(&row.item_code).unwrap_or_default();
            CatalogItem {
                item_code: row.item_code,
                item_name: row.item_name,
                item_group: row.item_group,
                brand: row.brand,
                price: row.price_list_rate,
                published: row.published != 0,
                in_stock: row.in_stock != 0,
                offers: row.offer_titles,
                badges: item_badges,
                attributes: BTreeMap::new(),
            }
        }).collect())
    }

    async fn badges_for(&self, item_codes: Vec<String>) -> anyhow::Result<BTreeMap<String, Vec<ItemBadge>>> {
        if item_codes.is_empty() {
            return Ok(BTreeMap::new());
        }
        let sql = "
        SELECT item_code, badge_type, source, valid_from, valid_upto
        FROM item_badge
        WHERE item_code IN ?
        ORDER BY item_code, idx
        ";
        let rows = self.client.query(sql).bind(item_codes).fetch_all::<BadgeRow>().await
            .context("Failed to fetch item badges")?;

        let mut by_item: BTreeMap<String, Vec<ItemBadge>> = BTreeMap::new();
        for row in rows {
            by_item.entry(row.item_code).or_default().push(ItemBadge {
                badge_type: row.badge_type,
                source: if row.source.eq_ignore_ascii_case("auto") { BadgeSource::Auto } else { BadgeSource::Manual },
                valid_from: parse_date(row.valid_from.as_deref()),
                valid_upto: parse_date(row.valid_upto.as_deref()),
            });
        }
        Ok(by_item)
    }

    async fn item_attributes(&self, items: &mut [CatalogItem]) -> anyhow::Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        let codes = items.iter().map(|i| i.item_code.clone()).collect::<Vec<_>>();
        let sql = "
        SELECT item_code, attribute, attribute_value
        FROM item_variant_attribute
        WHERE item_code IN ?
        ";
        let rows = self.client.query(sql).bind(codes).fetch_all::<(String, String, String)>().await
            .context("Failed to fetch item attributes")?;
        let mut by_item: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for (item_code, attribute, value) in rows {
            by_item.entry(item_code).or_default().insert(attribute, value);
        }
        for item in items.iter_mut() {
            item.attributes = by_item.remove(&item.item_code).unwrap_or_default();
        }
        Ok(())
    }
}

/// Unparseable validity dates are treated as absent, i.e. the window is open on that side.
fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

impl CatalogStore for ClickhouseCatalogStore {
    async fn published_items(&self, item_groups: Option<&BTreeSet<String>>) -> anyhow::Result<Vec<CatalogItem>> {
        let mut sql = format!("SELECT {ITEM_COLUMNS} {ITEM_FROM_CLAUSE} WHERE wi.published = 1");
        if item_groups.is_some() {
            sql.push_str(" AND wi.item_group IN ?");
        }
        sql.push_str(JOIN_SETTINGS);
        let mut query = self.client.query(&sql).bind(self.price_list.clone());
        if let Some(groups) = item_groups {
            query = query.bind(groups.iter().cloned().collect::<Vec<_>>());
        }
        let rows = query.fetch_all::<ItemRow>().await.context("Failed to fetch published items")?;
        tracing::debug!("published_items: {} rows", rows.len());

        let mut items = self.attach_badges(rows).await?;
        self.item_attributes(&mut items).await?;
        Ok(items)
    }

    async fn item_group_parents(&self) -> anyhow::Result<BTreeMap<String, Option<String>>> {
        let rows = self.client
            .query("SELECT name, parent_item_group FROM item_group")
            .fetch_all::<(String, Option<String>)>()
            .await
            .context("Failed to fetch item groups")?;
        Ok(rows.into_iter().map(|(name, parent)| (name, parent.filter(|p| !p.is_empty()))).collect())
    }

    async fn price_buckets(&self) -> anyhow::Result<Vec<PriceBucket>> {
        let rows = self.client
            .query("SELECT name, label, from_amount, to_amount, toInt64(sort_order) AS sort_order, enabled FROM catalog_price_range")
            .fetch_all::<PriceRangeRow>()
            .await
            .context("Failed to fetch price ranges")?;
        Ok(rows.into_iter().map(|row| PriceBucket {
            name: row.name,
            label: row.label,
            from_amount: row.from_amount,
            to_amount: row.to_amount,
            sort_order: row.sort_order,
            enabled: row.enabled != 0,
        }).collect())
    }

    async fn items_by_code(&self, item_codes: &[String]) -> anyhow::Result<Vec<CatalogItem>> {
        if item_codes.is_empty() {
            return Ok(vec![]);
        }
        let sql = format!("SELECT {ITEM_COLUMNS} {ITEM_FROM_CLAUSE} WHERE wi.item_code IN ? {JOIN_SETTINGS}");
        let rows = self.client.query(&sql)
            .bind(self.price_list.clone())
            .bind(item_codes.to_vec())
            .fetch_all::<ItemRow>()
            .await
            .context("Failed to fetch items by code")?;
        self.attach_badges(rows).await
    }

    async fn badge_signals(&self, sales_since: NaiveDate) -> anyhow::Result<Vec<ItemBadgeSignals>> {
        let rows = self.client.query(BADGE_SIGNALS_SQL)
            .bind(sales_since.format("%Y-%m-%d").to_string())
            .fetch_all::<BadgeSignalsRow>()
            .await
            .context("Failed to fetch badge signals")?;
        tracing::debug!("badge_signals: {} rows", rows.len());
        Ok(rows.into_iter().map(|row| ItemBadgeSignals {
            item_code: row.item_code,
            created_on: parse_date(row.created_on.as_deref()),
            sold_qty: row.sold_qty,
            consumer_discount: row.consumer_discount,
            is_stock_item: row.is_stock_item != 0,
            stock_qty: row.stock_qty,
        }).collect())
    }

    async fn replace_auto_badges(&self, item_code: &str, badge_types: &[String]) -> anyhow::Result<()> {
        self.client.query("DELETE FROM item_badge WHERE item_code = ? AND source = 'Auto'")
            .bind(item_code)
            .execute()
            .await
            .with_context(|| format!("Failed to clear automatic badges of {item_code}"))?;
        for (i, badge_type) in (0u32..).zip(badge_types) {
            self.client.query("INSERT INTO item_badge (item_code, badge_type, source, idx) VALUES (?, ?, 'Auto', ?)")
                .bind(item_code)
                .bind(badge_type.as_str())
                .bind(AUTO_BADGE_IDX_BASE + i)
                .execute()
                .await
                .with_context(|| format!("Failed to write badge {badge_type} of {item_code}"))?;
        }
        Ok(())
    }
}
