use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use ulid::Ulid;

use crate::model::Account;

/// Keyed lookup and upsert of account records.
///
/// Lookup misses are `Ok(None)`, never an error. Implementations own two
/// invariants the service cannot enforce on its own:
///
/// - username and email stay unique under concurrent writes (the service's
///   check-then-save is racy by design; a unique constraint closes it),
/// - [`find_by_username_or_email`] resolves a username match before an
///   email match when the same value hits different accounts.
///
/// [`find_by_username_or_email`]: AccountStore::find_by_username_or_email
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Account>>;

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<Account>>;

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Account>>;

    async fn find_by_username_or_email(&self, value: &str) -> anyhow::Result<Option<Account>>;

    async fn find_by_reset_token(&self, token: &str) -> anyhow::Result<Option<Account>>;

    /// Assigns an id if the account has none, otherwise updates in place.
    /// Returns the authoritative persisted copy.
    async fn save(&self, account: Account) -> anyhow::Result<Account>;
}

/// Map-backed store for tests and embedding. Assigns ULID ids and enforces
/// the same uniqueness rules as the SQLite store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: Mutex<HashMap<String, Account>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_first<F>(&self, predicate: F) -> anyhow::Result<Option<Account>>
    where
        F: Fn(&Account) -> bool,
    {
        let accounts = self.lock()?;

        Ok(accounts.values().find(|account| predicate(account)).cloned())
    }

    fn lock(&self) -> anyhow::Result<std::sync::MutexGuard<'_, HashMap<String, Account>>> {
        self.accounts
            .lock()
            .map_err(|_| anyhow::anyhow!("account store mutex poisoned"))
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Account>> {
        Ok(self.lock()?.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<Account>> {
        self.find_first(|account| account.username == username)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Account>> {
        self.find_first(|account| account.email == email)
    }

    async fn find_by_username_or_email(&self, value: &str) -> anyhow::Result<Option<Account>> {
        // Username match wins over an email match.
        if let Some(account) = self.find_first(|account| account.username == value)? {
            return Ok(Some(account));
        }

        self.find_first(|account| account.email == value)
    }

    async fn find_by_reset_token(&self, token: &str) -> anyhow::Result<Option<Account>> {
        self.find_first(|account| account.reset_token.as_deref() == Some(token))
    }

    async fn save(&self, mut account: Account) -> anyhow::Result<Account> {
        let mut accounts = self.lock()?;

        let id = match account.id.clone() {
            Some(id) => id,
            None => Ulid::new().to_string(),
        };

        let collision = accounts.values().any(|existing| {
            existing.id.as_deref() != Some(id.as_str())
                && (existing.username == account.username || existing.email == account.email)
        });
        if collision {
            anyhow::bail!("unique constraint violation on username or email");
        }

        account.id = Some(id.clone());
        accounts.insert(id, account.clone());

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_assigns_an_id_once() {
        let store = MemoryStore::new();

        let saved = store.save(Account::new("alice", "a@x.com")).await.unwrap();
        let id = saved.id.clone().unwrap();

        let updated = store.save(saved).await.unwrap();
        assert_eq!(updated.id.as_deref(), Some(id.as_str()));
    }

    #[tokio::test]
    async fn rejects_duplicate_username_or_email() {
        let store = MemoryStore::new();
        store.save(Account::new("alice", "a@x.com")).await.unwrap();

        assert!(store.save(Account::new("alice", "b@x.com")).await.is_err());
        assert!(store.save(Account::new("bob", "a@x.com")).await.is_err());
        assert!(store.save(Account::new("bob", "b@x.com")).await.is_ok());
    }

    #[tokio::test]
    async fn username_match_wins_over_email_match() {
        let store = MemoryStore::new();
        let alice = store.save(Account::new("alice", "a@x.com")).await.unwrap();
        // A different account whose email happens to equal alice's username.
        store.save(Account::new("bob", "alice")).await.unwrap();

        let found = store.find_by_username_or_email("alice").await.unwrap().unwrap();
        assert_eq!(found.id, alice.id);
    }

    #[tokio::test]
    async fn finds_by_reset_token() {
        let store = MemoryStore::new();
        let mut account = Account::new("alice", "a@x.com");
        account.reset_token = Some("tok".into());
        store.save(account).await.unwrap();

        assert!(store.find_by_reset_token("tok").await.unwrap().is_some());
        assert!(store.find_by_reset_token("nope").await.unwrap().is_none());
    }
}
