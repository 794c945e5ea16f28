mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test]
async fn test_shorten_anonymous(pool: PgPool) {
    let server = common::test_server(common::create_test_state(pool));

    let response = server
        .post("/")
        .json(&json!({ "url": "http://www.example.com/page" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["shortened_url"], "localhost:3000/1kHz7Po");
    assert_eq!(json["original_url"], "example.com/page");
    assert_eq!(json["times_shortened"], 1);
    assert_eq!(json["times_accessed"], 0);
    assert_eq!(json["logged_in"], false);
}

#[sqlx::test]
async fn test_shorten_twice_increments_counter(pool: PgPool) {
    let server = common::test_server(common::create_test_state(pool.clone()));

    let first = server
        .post("/")
        .json(&json!({ "url": "example.com/page" }))
        .await
        .json::<serde_json::Value>();

    let second = server
        .post("/")
        .json(&json!({ "url": "https://example.com/page" }))
        .await
        .json::<serde_json::Value>();

    assert_eq!(first["shortened_url"], second["shortened_url"]);
    assert_eq!(second["times_shortened"], 2);
    assert_eq!(common::count_mappings(&pool).await, 1);
}

#[sqlx::test]
async fn test_shorten_invalid_url(pool: PgPool) {
    let server = common::test_server(common::create_test_state(pool.clone()));

    let response = server
        .post("/")
        .json(&json!({ "url": "http://not a url" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_url");
    assert_eq!(json["logged_in"], false);
    assert_eq!(common::count_mappings(&pool).await, 0);
}

#[sqlx::test]
async fn test_shorten_malformed_body(pool: PgPool) {
    let server = common::test_server(common::create_test_state(pool));

    let response = server.post("/").json(&json!({ "link": "example.com" })).await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[sqlx::test]
async fn test_shorten_logged_in_uses_owner_salt(pool: PgPool) {
    let server = common::test_server(common::create_test_state(pool.clone()));

    let cookie = common::login(&server, "alice@example.com", "secret").await;

    let owned = server
        .post("/")
        .add_header("Cookie", cookie.as_str())
        .json(&json!({ "url": "example.com/page" }))
        .await;

    owned.assert_status(StatusCode::CREATED);
    let owned = owned.json::<serde_json::Value>();
    assert_eq!(owned["logged_in"], true);
    assert_ne!(owned["shortened_url"], "localhost:3000/1kHz7Po");

    let anonymous = server
        .post("/")
        .json(&json!({ "url": "example.com/page" }))
        .await
        .json::<serde_json::Value>();

    assert_eq!(anonymous["shortened_url"], "localhost:3000/1kHz7Po");
    assert_eq!(anonymous["times_shortened"], 1);
    assert_eq!(common::count_mappings(&pool).await, 2);
}

#[sqlx::test]
async fn test_shorten_alias_is_url_safe(pool: PgPool) {
    let server = common::test_server(common::create_test_state(pool));

    let response = server
        .post("/")
        .json(&json!({ "url": "rust-lang.org" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let json = response.json::<serde_json::Value>();
    let short_url = json["shortened_url"].as_str().unwrap();
    let alias = short_url.rsplit('/').next().unwrap();

    assert!(short_url.starts_with("localhost:3000/"));
    assert_eq!(alias.len(), 7);
    assert!(
        alias
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    );
}
