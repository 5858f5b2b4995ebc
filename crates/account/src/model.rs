use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Identity and credential record managed by the [`AccountService`].
///
/// `username` and `email` are each unique across all accounts; enforcing
/// that under concurrent writes is the store's job (unique indices in the
/// provided SQLite store). `password_hash` is only ever set through a
/// [`PasswordEncoder`], never from a plaintext directly.
///
/// `reset_token` and `reset_requested_at` travel as a pair: both present
/// while a reset is outstanding, both absent otherwise. Any successful
/// password write clears the pair.
///
/// [`AccountService`]: crate::AccountService
/// [`PasswordEncoder`]: crate::PasswordEncoder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Opaque identifier, assigned by the store on first save.
    pub id: Option<String>,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub reset_token: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub reset_requested_at: Option<OffsetDateTime>,
    pub locale: Option<String>,
}

impl Account {
    /// New, not-yet-persisted account with no credentials set.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            email: email.into(),
            password_hash: String::new(),
            reset_token: None,
            reset_requested_at: None,
            locale: None,
        }
    }

    pub fn clear_reset_token(&mut self) {
        self.reset_token = None;
        self.reset_requested_at = None;
    }
}
