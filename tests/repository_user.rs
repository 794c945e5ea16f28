mod common;

use sqlx::PgPool;
use std::sync::Arc;
use shortn::domain::entities::NewUser;
use shortn::domain::repositories::UserRepository;
use shortn::error::AppError;
use shortn::infrastructure::persistence::PgUserRepository;

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=1,p=1$c2FsdA$aGFzaA".to_string(),
    }
}

#[sqlx::test]
async fn test_create_and_find_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let created = repo.create(new_user("alice@example.com")).await.unwrap();
    let found = repo
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(created.id, found.id);
    assert_eq!(found.password_hash, new_user("x").password_hash);
}

#[sqlx::test]
async fn test_find_unknown_email(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    assert!(
        repo.find_by_email("nobody@example.com")
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test]
async fn test_duplicate_email_conflict(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    repo.create(new_user("alice@example.com")).await.unwrap();
    let result = repo.create(new_user("alice@example.com")).await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
}

#[sqlx::test]
async fn test_count_users(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    assert_eq!(repo.count().await.unwrap(), 0);
    repo.create(new_user("a@example.com")).await.unwrap();
    repo.create(new_user("b@example.com")).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 2);
}
