//! Integration tests for the user repository.

use assert_matches::assert_matches;
use roster_db::models::user::CreateUser;
use roster_db::repositories::UserRepo;
use sqlx::PgPool;

fn new_user(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "$argon2id$placeholder".to_string(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find_by_username(pool: PgPool) {
    let created = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    assert!(created.is_active);
    assert_eq!(created.failed_login_count, 0);

    let found = UserRepo::find_by_username(&pool, "alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, created.id);
    assert_matches!(UserRepo::find_by_username(&pool, "ALICE").await, Ok(None));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_username_violates_unique_constraint(pool: PgPool) {
    UserRepo::create(&pool, &new_user("bob")).await.unwrap();

    let mut dup = new_user("bob");
    dup.email = "other@example.com".into();
    let err = UserRepo::create(&pool, &dup).await.unwrap_err();

    let sqlx::Error::Database(db_err) = err else {
        panic!("expected a database error");
    };
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_users_username"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_login_counter_and_reset(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("carol")).await.unwrap();

    assert_eq!(UserRepo::increment_failed_login(&pool, user.id).await.unwrap(), 1);
    assert_eq!(UserRepo::increment_failed_login(&pool, user.id).await.unwrap(), 2);

    let until = chrono::Utc::now() + chrono::Duration::minutes(15);
    UserRepo::lock_account(&pool, user.id, until).await.unwrap();
    let locked = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(locked.locked_until.is_some());

    UserRepo::record_successful_login(&pool, user.id).await.unwrap();
    let reset = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(reset.failed_login_count, 0);
    assert!(reset.locked_until.is_none());
    assert!(reset.last_login_at.is_some());
}
