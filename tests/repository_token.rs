mod common;

use sqlx::PgPool;
use std::sync::Arc;
use urlshort::domain::entities::NewUser;
use urlshort::domain::repositories::{TokenRepository, UserRepository};
use urlshort::error::AppError;
use urlshort::infrastructure::persistence::{PgTokenRepository, PgUserRepository};

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_token(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo.create_token(user_id, "laptop", "hash123").await.unwrap();

    assert_eq!(token.user_id, user_id);
    assert_eq!(token.name, "laptop");
    assert_eq!(token.token_hash, "hash123");
    assert!(token.revoked_at.is_none());
    assert!(token.last_used_at.is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_token_duplicate_hash_conflicts(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token(user_id, "one", "samehash").await.unwrap();
    let result = repo.create_token(user_id, "two", "samehash").await;

    assert!(matches!(result, Err(AppError::CodeConflict { .. })));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_owner(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let repo = PgTokenRepository::new(Arc::new(pool));
    repo.create_token(user_id, "laptop", "ownerhash").await.unwrap();

    assert_eq!(repo.find_owner("ownerhash").await.unwrap(), Some(user_id));
    assert_eq!(repo.find_owner("nonexistent").await.unwrap(), None);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_owner_revoked(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo
        .create_token(user_id, "revoked-token", "revokedhash")
        .await
        .unwrap();
    repo.revoke_token(token.id).await.unwrap();

    assert_eq!(repo.find_owner("revokedhash").await.unwrap(), None);
    let stored = repo.find_by_id(token.id).await.unwrap().unwrap();
    assert!(stored.is_revoked());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_last_used(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let repo = PgTokenRepository::new(Arc::new(pool));
    let token = repo.create_token(user_id, "laptop", "usedhash").await.unwrap();

    repo.update_last_used("usedhash").await.unwrap();

    let stored = repo.find_by_id(token.id).await.unwrap().unwrap();
    assert!(stored.last_used_at.is_some());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_and_find_by_name(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let repo = PgTokenRepository::new(Arc::new(pool));
    repo.create_token(user_id, "first", "h1").await.unwrap();
    repo.create_token(user_id, "second", "h2").await.unwrap();

    let tokens = repo.list_tokens().await.unwrap();
    assert_eq!(tokens.len(), 2);

    let found = repo.find_by_name("second").await.unwrap().unwrap();
    assert_eq!(found.token_hash, "h2");
    assert!(repo.find_by_name("third").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_revoke_unknown_token_not_found(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    let result = repo.revoke_token(999_999).await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_user_create_and_find(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo
        .create(NewUser {
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
        })
        .await
        .unwrap();

    let found = repo.find_by_username("bob").await.unwrap().unwrap();
    assert_eq!(found.id, user.id);
    assert_eq!(found.email, "bob@example.com");
    assert!(repo.find_by_username("carol").await.unwrap().is_none());

    let duplicate = repo
        .create(NewUser {
            username: "bob".to_string(),
            email: "other@example.com".to_string(),
        })
        .await;
    let err = duplicate.unwrap_err();
    assert!(matches!(err, AppError::CodeConflict { .. }));
    assert_eq!(err.to_string(), "Username already exists");

    let duplicate_email = repo
        .create(NewUser {
            username: "bobby".to_string(),
            email: "bob@example.com".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(duplicate_email.to_string(), "Email already exists");
}
