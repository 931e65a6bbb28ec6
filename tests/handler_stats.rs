mod common;

use sqlx::PgPool;
use urlshort::api::dto::stats::StatsResponse;

const TOKEN: &str = "stats-token";
const PEER: &str = "203.0.113.7:40000";

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_stats_aggregates_clicks(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    common::create_test_token(&pool, user_id, TOKEN).await;
    let link_id = common::create_test_link(&pool, user_id, "stats1", "https://example.com").await;
    common::create_test_click(&pool, link_id, "pc", "Chrome", "Berlin, Germany").await;
    common::create_test_click(&pool, link_id, "smartphone", "Safari", "unknown").await;
    let server = common::test_server(pool, PEER);

    let response = server
        .get("/api/links/STATS1/stats")
        .add_header("Authorization", format!("Bearer {TOKEN}"))
        .await;

    assert_eq!(response.status_code(), 200);
    let stats = response.json::<StatsResponse>();
    assert_eq!(stats.short_code, "stats1");
    assert_eq!(stats.original_url, "https://example.com");
    assert_eq!(stats.total_clicks, 2);
    assert_eq!(stats.devices.get("pc"), Some(&1));
    assert_eq!(stats.browsers.get("Safari"), Some(&1));
    assert_eq!(stats.locations.get("Berlin, Germany"), Some(&1));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_stats_after_redirect(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    common::create_test_token(&pool, user_id, TOKEN).await;
    common::create_test_link(&pool, user_id, "flow01", "https://example.com").await;
    let server = common::test_server(pool, PEER);

    assert_eq!(server.get("/flow01").await.status_code(), 301);

    let stats = server
        .get("/api/links/flow01/stats")
        .add_header("Authorization", format!("Bearer {TOKEN}"))
        .await
        .json::<StatsResponse>();
    assert_eq!(stats.click_count, 1);
    assert_eq!(stats.total_clicks, 1);
    assert_eq!(stats.locations.get("unknown"), Some(&1));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_stats_not_found(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    common::create_test_token(&pool, user_id, TOKEN).await;
    let server = common::test_server(pool, PEER);

    let response = server
        .get("/api/links/missing/stats")
        .add_header("Authorization", format!("Bearer {TOKEN}"))
        .await;

    response.assert_status_not_found();
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_stats_requires_token(pool: PgPool) {
    let server = common::test_server(pool, PEER);

    let response = server.get("/api/links/any/stats").await;

    response.assert_status_unauthorized();
}
