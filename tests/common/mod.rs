#![allow(dead_code)]

use axum_test::{TestResponse, TestServer};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use shortn::application::services::{SessionManager, UrlService, UserService};
use shortn::infrastructure::persistence::{PgUrlMappingRepository, PgUserRepository};
use shortn::infrastructure::session::MemorySessionStore;
use shortn::routes::router;
use shortn::state::AppState;
use shortn::utils::password::PasswordHasherConfig;
use shortn::utils::session_cookie::CookieSigner;

pub const TEST_HOST: &str = "localhost:3000";
pub const TEST_SECRET: &str = "test-session-secret-0123456789";

/// Alias of `example.com/page` shortened anonymously.
pub const EXAMPLE_ALIAS: &str = "1kHz7Po";

pub fn create_test_state(pool: PgPool) -> AppState {
    create_test_state_with(pool, true)
}

pub fn create_test_state_with(pool: PgPool, auto_register: bool) -> AppState {
    let pool = Arc::new(pool);
    let ttl = Duration::from_secs(3600);

    let url_repo = Arc::new(PgUrlMappingRepository::new(pool.clone()));
    let user_repo = Arc::new(PgUserRepository::new(pool));

    let url_service = Arc::new(UrlService::new(url_repo, TEST_HOST.to_string()));
    let user_service = Arc::new(UserService::new(
        user_repo,
        PasswordHasherConfig::new(1),
        auto_register,
    ));
    let sessions = Arc::new(SessionManager::new(
        Arc::new(MemorySessionStore::new(ttl)),
        CookieSigner::new(TEST_SECRET, ttl, false),
    ));

    AppState::new(url_service, user_service, sessions)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

/// `sid=<value>` taken from a response's `Set-Cookie` header.
pub fn session_cookie(response: &TestResponse) -> String {
    let set_cookie = response.header("set-cookie");
    set_cookie
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/login")
        .json(&serde_json::json!({ "email": email, "password": password }))
        .await;

    response.assert_status_ok();
    session_cookie(&response)
}

pub async fn insert_mapping(pool: &PgPool, original_url: &str, short_url: &str, owner: &str) {
    sqlx::query("INSERT INTO url_mappings (original_url, short_url, owner) VALUES ($1, $2, $3)")
        .bind(original_url)
        .bind(short_url)
        .bind(owner)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn times_accessed(pool: &PgPool, short_url: &str) -> i64 {
    sqlx::query_scalar("SELECT times_accessed FROM url_mappings WHERE short_url = $1")
        .bind(short_url)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_mappings(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_users(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .unwrap()
}
