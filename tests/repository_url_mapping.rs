mod common;

use sqlx::PgPool;
use std::sync::Arc;
use shortn::application::services::UrlService;
use shortn::domain::entities::{Identity, NewUrlMapping, UpsertOutcome};
use shortn::domain::repositories::UrlMappingRepository;
use shortn::infrastructure::persistence::PgUrlMappingRepository;

fn new_mapping(original_url: &str, short_url: &str, owner: &str) -> NewUrlMapping {
    NewUrlMapping {
        original_url: original_url.to_string(),
        short_url: short_url.to_string(),
        owner: owner.to_string(),
    }
}

#[sqlx::test]
async fn test_upsert_creates_mapping(pool: PgPool) {
    let repo = PgUrlMappingRepository::new(Arc::new(pool));

    let outcome = repo
        .upsert(new_mapping("example.com", "localhost:3000/aaaaaaa", ""))
        .await
        .unwrap();

    let UpsertOutcome::Created(mapping) = outcome else {
        panic!("expected a new mapping, got {:?}", outcome);
    };
    assert_eq!(mapping.original_url, "example.com");
    assert_eq!(mapping.times_shortened, 1);
    assert_eq!(mapping.times_accessed, 0);
    assert!(mapping.is_anonymous());
}

#[sqlx::test]
async fn test_upsert_existing_increments(pool: PgPool) {
    let repo = PgUrlMappingRepository::new(Arc::new(pool));

    repo.upsert(new_mapping("example.com", "localhost:3000/aaaaaaa", ""))
        .await
        .unwrap();
    let outcome = repo
        .upsert(new_mapping("example.com", "localhost:3000/aaaaaaa", ""))
        .await
        .unwrap();

    let UpsertOutcome::Incremented(mapping) = outcome else {
        panic!("expected an increment, got {:?}", outcome);
    };
    assert_eq!(mapping.times_shortened, 2);
    assert_eq!(mapping.short_url, "localhost:3000/aaaaaaa");
}

#[sqlx::test]
async fn test_upsert_same_url_other_owner(pool: PgPool) {
    let repo = PgUrlMappingRepository::new(Arc::new(pool.clone()));

    repo.upsert(new_mapping("example.com", "localhost:3000/aaaaaaa", ""))
        .await
        .unwrap();
    let outcome = repo
        .upsert(new_mapping(
            "example.com",
            "localhost:3000/bbbbbbb",
            "alice@example.com",
        ))
        .await
        .unwrap();

    assert!(matches!(outcome, UpsertOutcome::Created(_)));
    assert_eq!(common::count_mappings(&pool).await, 2);
}

#[sqlx::test]
async fn test_upsert_alias_taken(pool: PgPool) {
    let repo = PgUrlMappingRepository::new(Arc::new(pool.clone()));

    repo.upsert(new_mapping("example.com", "localhost:3000/aaaaaaa", ""))
        .await
        .unwrap();
    let outcome = repo
        .upsert(new_mapping("other.com", "localhost:3000/aaaaaaa", ""))
        .await
        .unwrap();

    assert!(matches!(outcome, UpsertOutcome::AliasTaken));
    assert_eq!(common::count_mappings(&pool).await, 1);
}

#[sqlx::test]
async fn test_record_access(pool: PgPool) {
    common::insert_mapping(&pool, "example.com", "localhost:3000/aaaaaaa", "").await;
    let repo = PgUrlMappingRepository::new(Arc::new(pool.clone()));

    let url = repo.record_access("localhost:3000/aaaaaaa").await.unwrap();

    assert_eq!(url.as_deref(), Some("example.com"));
    assert_eq!(
        common::times_accessed(&pool, "localhost:3000/aaaaaaa").await,
        1
    );
}

#[sqlx::test]
async fn test_record_access_not_found(pool: PgPool) {
    let repo = PgUrlMappingRepository::new(Arc::new(pool));

    let url = repo.record_access("localhost:3000/missing").await.unwrap();

    assert!(url.is_none());
}

#[sqlx::test]
async fn test_concurrent_access_loses_no_increments(pool: PgPool) {
    common::insert_mapping(&pool, "example.com", "localhost:3000/aaaaaaa", "").await;
    let repo = Arc::new(PgUrlMappingRepository::new(Arc::new(pool.clone())));

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.record_access("localhost:3000/aaaaaaa").await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap().is_some());
    }

    assert_eq!(
        common::times_accessed(&pool, "localhost:3000/aaaaaaa").await,
        20
    );
}

#[sqlx::test]
async fn test_concurrent_shorten_creates_one_mapping(pool: PgPool) {
    let repo = Arc::new(PgUrlMappingRepository::new(Arc::new(pool.clone())));
    let service = Arc::new(UrlService::new(repo.clone(), common::TEST_HOST.to_string()));

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .shorten_url("http://example.com/page", &Identity::Anonymous)
                    .await
            })
        })
        .collect();

    for handle in handles {
        let mapping = handle.await.unwrap().unwrap();
        assert_eq!(mapping.short_url, "localhost:3000/1kHz7Po");
    }

    let mapping = repo
        .find_by_original_url("example.com/page", "")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mapping.times_shortened, 10);
    assert_eq!(common::count_mappings(&pool).await, 1);
}

#[sqlx::test]
async fn test_find_by_short_url(pool: PgPool) {
    common::insert_mapping(&pool, "example.com", "localhost:3000/aaaaaaa", "bob@example.com")
        .await;
    let repo = PgUrlMappingRepository::new(Arc::new(pool));

    let found = repo
        .find_by_short_url("localhost:3000/aaaaaaa")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.owner, "bob@example.com");
    assert_eq!(found.times_accessed, 0);
    assert!(repo.find_by_short_url("localhost:3000/zzzzzzz").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let repo = PgUrlMappingRepository::new(Arc::new(pool));
    assert!(repo.ping().await.is_ok());
}
