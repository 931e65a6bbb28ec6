#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use urlshort::application::services::auth_service::hash_token;
use urlshort::infrastructure::geo::{GeoCache, GeoError, GeoProvider};
use urlshort::infrastructure::persistence::{
    PgAnalyticsRepository, PgLinkRepository, PgTokenRepository,
};
use urlshort::state::{AppState, StateSettings};

pub const TEST_SECRET: &str = "test-signing-secret";
pub const TEST_BASE_URL: &str = "http://sho.rt";

/// Geo provider that behaves like an unreachable upstream.
pub struct UnreachableGeo;

#[async_trait]
impl GeoProvider for UnreachableGeo {
    async fn lookup(&self, _ip: &str) -> Result<String, GeoError> {
        Err(GeoError::Timeout)
    }
}

pub async fn create_test_user(pool: &PgPool, username: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO users (username, email) VALUES ($1, $2) RETURNING id")
        .bind(username)
        .bind(format!("{username}@example.com"))
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Stores the hash of `raw_token` for `user_id`, as `admin token create` would.
pub async fn create_test_token(pool: &PgPool, user_id: i64, raw_token: &str) {
    sqlx::query("INSERT INTO api_tokens (user_id, name, token_hash) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(format!("token-{user_id}"))
        .bind(hash_token(TEST_SECRET, raw_token))
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_test_link(pool: &PgPool, user_id: i64, code: &str, url: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO links (user_id, original_url, code) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(user_id)
    .bind(url)
    .bind(code)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_click(
    pool: &PgPool,
    link_id: i64,
    device_type: &str,
    browser: &str,
    location: &str,
) {
    sqlx::query(
        "INSERT INTO click_events (link_id, ip, user_agent, location, device_type, os, browser) \
         VALUES ($1, '203.0.113.1', 'TestAgent', $2, $3, 'Linux', $4)",
    )
    .bind(link_id)
    .bind(location)
    .bind(device_type)
    .bind(browser)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn click_count(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT click_count FROM links WHERE LOWER(code) = LOWER($1)")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn click_events_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM click_events")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    let pool = Arc::new(pool);
    let geo_cache = Arc::new(GeoCache::new(
        Arc::new(UnreachableGeo),
        Duration::from_secs(60),
    ));

    AppState::new(
        Arc::new(PgLinkRepository::new(pool.clone())),
        Arc::new(PgAnalyticsRepository::new(pool.clone())),
        Arc::new(PgTokenRepository::new(pool)),
        geo_cache,
        StateSettings {
            base_url: TEST_BASE_URL.to_string(),
            token_signing_secret: TEST_SECRET.to_string(),
            behind_proxy: false,
        },
    )
}

/// Inserts a fixed peer address so `ConnectInfo` works without a real socket.
#[derive(Clone)]
pub struct MockConnectInfoLayer(pub SocketAddr);

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService {
            inner,
            addr: self.0,
        }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
    addr: SocketAddr,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        req.extensions_mut().insert(ConnectInfo(self.addr));
        self.inner.call(req)
    }
}

pub fn test_server(pool: PgPool, peer: &str) -> axum_test::TestServer {
    let state = create_test_state(pool);
    let app = urlshort::routes::router(state).layer(MockConnectInfoLayer(peer.parse().unwrap()));
    axum_test::TestServer::new(app).unwrap()
}
