//! HTTP surface of the catalog endpoints.

use std::sync::Arc;

use axum::{body::Body, http::{Request, StatusCode}};
use backend::{
    api::catalog::CatalogBackend,
    catalog_store::{InMemoryCatalogStore, ItemBadgeSignals},
    config::CatalogConfig,
    server_extra::catalog_routes::catalog_router,
};
use common::catalog_item::{BadgeSource, CatalogItem, ItemBadge};
use chrono::NaiveDate;
use tower::ServiceExt;


fn app() -> axum::Router {
    catalog_router(Arc::new(CatalogBackend::new(store(), CatalogConfig::default())))
}

fn store() -> InMemoryCatalogStore {
    let items = (1..=25).map(|i| CatalogItem {
        item_code: format!("item-{i:02}"),
        item_name: format!("Item {i:02}"),
        item_group: if i % 2 == 0 { "Shoes".to_string() } else { "Hats".to_string() },
        brand: Some(if i <= 5 { "Acme".to_string() } else { "Zed".to_string() }),
        price: Some(i as f64 * 10.0),
        published: true,
        in_stock: true,
        badges: match i {
            5 | 10 | 15 | 20 | 25 => vec![ItemBadge::new("new")],
            7 => vec![ItemBadge { valid_upto: NaiveDate::from_ymd_opt(2000, 1, 31), ..ItemBadge::new("Clearance") }],
            _ => vec![],
        },
        offers: if i == 3 { vec!["Free Shipping".to_string()] } else { vec![] },
        ..Default::default()
    }).collect();
    InMemoryCatalogStore::new(items).with_item_group("Shoes", None).with_item_group("Hats", None)
}

async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
    send(app(), "GET", uri).await
}

async fn send(app: axum::Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}


#[tokio::test]
async fn facets_endpoint_returns_summary_for_scope() {
    let (status, body) = get_json("/api/catalog/filter_facets?item_group=Shoes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item_groups"], serde_json::json!([{"name": "Shoes", "count": 12}]));
    assert_eq!(body["badges"], serde_json::json!([{"code": "new", "label": "new", "count": 2}]));
    assert_eq!(body["price_min_max"], serde_json::json!({"min": 20.0, "max": 240.0}));
}

#[tokio::test]
async fn products_endpoint_applies_url_filters() {
    let uri = "/api/catalog/products?field_filters=%7B%22brand%22%3A%5B%22Acme%22%5D%2C%22price_to%22%3A%5B%2230%22%5D%7D";
    let (status, body) = get_json(uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items_count"], 3);
    let codes = body["items"].as_array().unwrap().iter().map(|i| i["item_code"].as_str().unwrap().to_string()).collect::<Vec<_>>();
    assert_eq!(codes, vec!["item-01", "item-02", "item-03"]);
}

#[tokio::test]
async fn filter_navigation_resets_to_first_page() {
    let (_, body) = get_json("/api/catalog/products?start=20&from_filters=1").await;
    assert_eq!(body["start"], 0);
    assert_eq!(body["items"].as_array().unwrap().len(), 20);

    let (_, body) = get_json("/api/catalog/products?start=20").await;
    assert_eq!(body["start"], 20);
    assert_eq!(body["items"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn item_badges_endpoint_maps_every_code() {
    let (status, body) = get_json("/api/catalog/item_badges?item_codes=item-05,item-06").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item-05"][0]["badge_type"], "new");
    assert_eq!(body["item-06"], serde_json::json!([]));
}

#[tokio::test]
async fn products_lists_the_native_filters_of_the_scope() {
    let (_, body) = get_json("/api/catalog/products?item_group=Shoes").await;
    assert_eq!(body["field_filters"], serde_json::json!([
        {"name": "brand", "values": ["Acme", "Zed"]},
        {"name": "item_group", "values": ["Shoes"]},
    ]));
    assert_eq!(body["attribute_filters"], serde_json::json!([]));
}

#[tokio::test]
async fn expired_badges_are_not_served_to_cards() {
    let (status, body) = get_json("/api/catalog/item_badges?item_codes=item-07").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"item-07": []}));
}

#[tokio::test]
async fn item_brands_and_offers_endpoints() {
    let (_, brands) = get_json("/api/catalog/item_brands?item_codes=item-03,item-09,missing").await;
    assert_eq!(brands, serde_json::json!({"item-03": "Acme", "item-09": "Zed"}));

    let (_, offers) = get_json("/api/catalog/item_offers?item_codes=%5B%22item-03%22%2C%22missing%22%5D").await;
    assert_eq!(offers, serde_json::json!({"item-03": ["Free Shipping"], "missing": []}));
}

#[tokio::test]
async fn recompute_writes_automatic_badges_once() {
    let store = store().with_badge_signals(ItemBadgeSignals {
        item_code: "item-01".into(),
        consumer_discount: Some(20.0),
        ..Default::default()
    });
    let app = catalog_router(Arc::new(CatalogBackend::new(store, CatalogConfig::default())));

    let (status, report) = send(app.clone(), "POST", "/api/catalog/recompute_item_badges").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report, serde_json::json!({"items_checked": 25, "items_updated": 1}));

    let (_, badges) = send(app.clone(), "GET", "/api/catalog/item_badges?item_codes=item-01").await;
    assert_eq!(badges["item-01"][0]["badge_type"], "On Sale");
    assert_eq!(badges["item-01"][0]["source"], serde_json::json!(BadgeSource::Auto));

    let (_, again) = send(app, "POST", "/api/catalog/recompute_item_badges").await;
    assert_eq!(again["items_updated"], 0);
}
