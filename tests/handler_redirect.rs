mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test]
async fn test_redirect_success(pool: PgPool) {
    let server = common::test_server(common::create_test_state(pool.clone()));

    server
        .post("/")
        .json(&json!({ "url": "http://www.example.com/page" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.get(&format!("/{}", common::EXAMPLE_ALIAS)).await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.header("location"), "http://example.com/page");
    assert_eq!(
        common::times_accessed(&pool, "localhost:3000/1kHz7Po").await,
        1
    );
}

#[sqlx::test]
async fn test_redirect_counts_every_access(pool: PgPool) {
    common::insert_mapping(&pool, "example.org", "localhost:3000/abcDEF1", "").await;
    let server = common::test_server(common::create_test_state(pool.clone()));

    for _ in 0..3 {
        server
            .get("/abcDEF1")
            .await
            .assert_status(StatusCode::MOVED_PERMANENTLY);
    }

    assert_eq!(
        common::times_accessed(&pool, "localhost:3000/abcDEF1").await,
        3
    );
}

#[sqlx::test]
async fn test_redirect_not_found(pool: PgPool) {
    let server = common::test_server(common::create_test_state(pool));

    let response = server.get("/nope123").await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["logged_in"], false);
}

#[sqlx::test]
async fn test_redirect_keeps_query_string(pool: PgPool) {
    common::insert_mapping(
        &pool,
        "example.com/search?q=rust",
        "localhost:3000/q_Rust0",
        "",
    )
    .await;
    let server = common::test_server(common::create_test_state(pool));

    let response = server.get("/q_Rust0").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.header("location"),
        "http://example.com/search?q=rust"
    );
}

#[sqlx::test]
async fn test_redirect_not_found_reports_login_state(pool: PgPool) {
    let server = common::test_server(common::create_test_state(pool));
    let cookie = common::login(&server, "bob@example.com", "pw").await;

    let response = server
        .get("/missing")
        .add_header("Cookie", cookie.as_str())
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<serde_json::Value>()["logged_in"], true);
}
