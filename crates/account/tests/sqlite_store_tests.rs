#![cfg(feature = "full")]

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx_migrator::{Migrate, Plan};
use time::{Duration, OffsetDateTime};
use userkit_account::{Account, AccountStore, SqliteStore};

async fn setup_store() -> SqliteStore {
    let pool: SqlitePool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    userkit_db::migrator()
        .unwrap()
        .run(&mut conn, &Plan::apply_all())
        .await
        .unwrap();
    drop(conn);

    SqliteStore::new(pool)
}

fn account_with_reset(username: &str, email: &str) -> Account {
    let mut account = Account::new(username, email);
    account.password_hash = "hash".to_string();
    account.reset_token = Some(format!("tok-{username}"));
    account.reset_requested_at = Some(
        OffsetDateTime::from_unix_timestamp(OffsetDateTime::now_utc().unix_timestamp()).unwrap(),
    );
    account.locale = Some("en_US".to_string());
    account
}

#[tokio::test]
async fn save_assigns_a_ulid_and_roundtrips_every_field() {
    let store = setup_store().await;

    let saved = store
        .save(account_with_reset("alice", "a@x.com"))
        .await
        .unwrap();
    let id = saved.id.clone().unwrap();
    assert_eq!(id.len(), 26);

    let found = store.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(found, saved);
}

#[tokio::test]
async fn save_with_an_id_updates_in_place() {
    let store = setup_store().await;
    let mut saved = store
        .save(account_with_reset("alice", "a@x.com"))
        .await
        .unwrap();
    let id = saved.id.clone().unwrap();

    saved.password_hash = "new-hash".to_string();
    saved.clear_reset_token();
    store.save(saved).await.unwrap();

    let found = store.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(found.password_hash, "new-hash");
    assert!(found.reset_token.is_none());
    assert!(found.reset_requested_at.is_none());
    // Still only one row for alice.
    assert!(store.find_by_reset_token("tok-alice").await.unwrap().is_none());
}

#[tokio::test]
async fn unique_indices_reject_duplicate_username_and_email() {
    let store = setup_store().await;
    store.save(Account::new("alice", "a@x.com")).await.unwrap();

    assert!(store.save(Account::new("alice", "b@x.com")).await.is_err());
    assert!(store.save(Account::new("bob", "a@x.com")).await.is_err());
    assert!(store.save(Account::new("bob", "b@x.com")).await.is_ok());
}

#[tokio::test]
async fn all_finders_resolve_and_miss_cleanly() {
    let store = setup_store().await;
    let saved = store
        .save(account_with_reset("alice", "a@x.com"))
        .await
        .unwrap();

    assert_eq!(
        store.find_by_username("alice").await.unwrap().unwrap().id,
        saved.id
    );
    assert_eq!(
        store.find_by_email("a@x.com").await.unwrap().unwrap().id,
        saved.id
    );
    assert_eq!(
        store
            .find_by_reset_token("tok-alice")
            .await
            .unwrap()
            .unwrap()
            .id,
        saved.id
    );
    assert!(store.find_by_username("bob").await.unwrap().is_none());
    assert!(store.find_by_id("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn username_match_wins_over_email_match() {
    let store = setup_store().await;
    let alice = store.save(Account::new("alice", "a@x.com")).await.unwrap();
    // A second account whose email collides with alice's username.
    store.save(Account::new("bob", "alice")).await.unwrap();

    let found = store
        .find_by_username_or_email("alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, alice.id);

    let bob = store
        .find_by_username_or_email("b-missing")
        .await
        .unwrap();
    assert!(bob.is_none());
}

#[tokio::test]
async fn timestamps_are_persisted_with_second_precision() {
    let store = setup_store().await;
    let mut account = Account::new("alice", "a@x.com");
    let requested_at = OffsetDateTime::now_utc() - Duration::seconds(100);
    account.reset_token = Some("tok".to_string());
    account.reset_requested_at = Some(requested_at);

    let saved = store.save(account).await.unwrap();
    let found = store
        .find_by_id(saved.id.as_deref().unwrap())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        found.reset_requested_at.unwrap().unix_timestamp(),
        requested_at.unix_timestamp()
    );
}
