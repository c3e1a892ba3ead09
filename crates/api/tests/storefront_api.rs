//! HTTP-level integration tests for the public storefront read path.

mod common;

use axum::http::StatusCode;
use common::{body_json, editor_token, get, post_json, put_json};
use sqlx::PgPool;

async fn create_banner(pool: &PgPool, token: &str, title: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/banners",
        Some(token),
        serde_json::json!({
            "title": title,
            "headline": format!("{title} headline"),
            "cta_text": "Shop now",
            "cta_url": "/sale",
            "image_desktop": format!("/img/{title}.png"),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn attach(pool: &PgPool, token: &str, key: &str, banner_id: i64) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/spaces/{key}/placements"),
        Some(token),
        serde_json::json!({ "banner_id": banner_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_storefront_requires_no_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/storefront/spaces/home_hero_slider", None).await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_storefront_returns_visible_content_in_rank_order(pool: PgPool) {
    let token = editor_token();
    let b1 = create_banner(&pool, &token, "first").await;
    let b2 = create_banner(&pool, &token, "second").await;
    let hidden = create_banner(&pool, &token, "hidden").await;
    attach(&pool, &token, "home_hero_slider", b1).await;
    attach(&pool, &token, "home_hero_slider", b2).await;
    attach(&pool, &token, "home_hero_slider", hidden).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/spaces/home_hero_slider/placements/{hidden}/active"),
        Some(&token),
        serde_json::json!({ "is_active": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/storefront/spaces/home_hero_slider", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let placements = json["data"].as_array().unwrap();
    assert_eq!(placements.len(), 2);
    assert_eq!(placements[0]["banner_id"], b1);
    assert_eq!(placements[0]["headline"], "first headline");
    assert_eq!(placements[0]["cta_url"], "/sale");
    assert_eq!(placements[1]["banner_id"], b2);

    // The storefront payload carries content, not admin bookkeeping.
    assert!(placements[0].get("is_active").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_storefront_preview_at_future_instant(pool: PgPool) {
    let token = editor_token();
    let banner = create_banner(&pool, &token, "future").await;
    attach(&pool, &token, "home_hero_slider", banner).await;

    let starts = chrono::Utc::now() + chrono::Duration::days(1);
    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/spaces/home_hero_slider/placements/{banner}/window"),
        Some(&token),
        serde_json::json!({ "starts_at": starts, "ends_at": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Not visible now.
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/storefront/spaces/home_hero_slider", None).await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    // Visible when previewed past the window start.
    let preview_at = (starts + chrono::Duration::hours(1)).to_rfc3339();
    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!(
            "/api/v1/storefront/spaces/home_hero_slider?at={}",
            urlencode(&preview_at)
        ),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let placements = json["data"].as_array().unwrap();
    assert_eq!(placements.len(), 1);
    assert_eq!(placements[0]["status"], "live");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_storefront_unknown_space_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/storefront/spaces/no_such_space", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "SPACE_NOT_FOUND");
}

/// Minimal percent-encoding for RFC 3339 timestamps in query strings
/// (`+` and `:` are the only characters that need escaping here).
fn urlencode(value: &str) -> String {
    value.replace('+', "%2B").replace(':', "%3A")
}
