use std::sync::Arc;

use time::{Duration, OffsetDateTime};

use crate::error::{AccountError, AccountResult};
use crate::event::{
    AccountCreated, AccountListener, PasswordChanged, ResetCompleted, ResetRequested,
};
use crate::model::Account;
use crate::password::PasswordEncoder;
use crate::policy::PasswordPolicy;
use crate::store::AccountStore;
use crate::token::TokenGenerator;

/// How long an issued reset token stays valid unless overridden with
/// [`AccountService::with_reset_token_ttl`].
pub const DEFAULT_RESET_TOKEN_TTL: Duration = Duration::seconds(300);

/// Orchestrates the account lifecycle: registration, lookups, the
/// time-boxed password-reset flow and authenticated password changes.
///
/// Every operation is one linear sequence of collaborator calls on the
/// caller's task; the mutating store write always happens before listener
/// fan-out. The service itself does not serialize concurrent calls against
/// the same identity; the store's unique constraints are expected to close
/// that race.
pub struct AccountService<S, E, T> {
    store: S,
    encoder: E,
    tokens: T,
    policy: Option<Box<dyn PasswordPolicy>>,
    listeners: Vec<Arc<dyn AccountListener>>,
    reset_token_ttl: Duration,
}

impl<S, E, T> AccountService<S, E, T>
where
    S: AccountStore,
    E: PasswordEncoder,
    T: TokenGenerator,
{
    pub fn new(store: S, encoder: E, tokens: T) -> Self {
        Self {
            store,
            encoder,
            tokens,
            policy: None,
            listeners: Vec::new(),
            reset_token_ttl: DEFAULT_RESET_TOKEN_TTL,
        }
    }

    pub fn with_reset_token_ttl(mut self, ttl: Duration) -> Self {
        self.reset_token_ttl = ttl;
        self
    }

    pub fn with_password_policy(mut self, policy: Box<dyn PasswordPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Listeners fire in registration order. Register during setup, not
    /// concurrently with dispatch.
    pub fn add_listener(&mut self, listener: Arc<dyn AccountListener>) {
        self.listeners.push(listener);
    }

    /// Registers a new account.
    ///
    /// Fails with [`AccountError::AlreadyExists`] before touching the
    /// encoder or the store if the username is taken. The plaintext is
    /// hashed exactly once and never persisted.
    pub async fn register(
        &self,
        mut account: Account,
        plain_password: &str,
    ) -> AccountResult<Account> {
        if self.store.find_by_username(&account.username).await?.is_some() {
            return Err(AccountError::AlreadyExists);
        }

        self.check_policy(plain_password)?;

        account.password_hash = self.encoder.encode(plain_password)?;

        let account = self.store.save(account).await?;

        tracing::info!(username = %account.username, "account registered");

        let event = AccountCreated {
            account: account.clone(),
        };
        for listener in &self.listeners {
            listener.on_account_created(&event).await;
        }

        Ok(account)
    }

    pub async fn find_by_id(&self, id: &str) -> AccountResult<Option<Account>> {
        Ok(self.store.find_by_id(id).await?)
    }

    pub async fn find_by_username(&self, username: &str) -> AccountResult<Option<Account>> {
        Ok(self.store.find_by_username(username).await?)
    }

    /// Queries the same value against both the username and email indices;
    /// the store resolves a username match first.
    pub async fn find_by_username_or_email(&self, value: &str) -> AccountResult<Option<Account>> {
        Ok(self.store.find_by_username_or_email(value).await?)
    }

    /// Issues a reset token for the account matching `username_or_email`.
    ///
    /// A new request always overwrites any outstanding token; only the most
    /// recently issued token is valid.
    pub async fn request_password_reset(
        &self,
        username_or_email: &str,
    ) -> AccountResult<Account> {
        let Some(mut account) = self.store.find_by_username_or_email(username_or_email).await?
        else {
            return Err(AccountError::NotFound);
        };

        account.reset_token = Some(self.tokens.generate(&account.email));
        account.reset_requested_at = Some(OffsetDateTime::now_utc());

        let account = self.store.save(account).await?;

        tracing::info!(username = %account.username, "password reset requested");

        let event = ResetRequested {
            account: account.clone(),
        };
        for listener in &self.listeners {
            listener.on_reset_requested(&event).await;
        }

        Ok(account)
    }

    /// Consumes a reset token and sets a new password.
    ///
    /// Checks run in strict order and short-circuit: token resolution,
    /// exact token equality, TTL, confirmation match, policy. A token aged
    /// exactly the TTL is still accepted; one second past it is not. On
    /// success the token pair is cleared before the save, so the token
    /// cannot be replayed.
    pub async fn complete_password_reset(
        &self,
        token: &str,
        password: &str,
        confirmation: &str,
    ) -> AccountResult<Account> {
        let Some(mut account) = self.store.find_by_reset_token(token).await? else {
            return Err(AccountError::NotFound);
        };

        // Defends against a store that indexes tokens loosely.
        if account.reset_token.as_deref() != Some(token) {
            return Err(AccountError::ResetTokenInvalid);
        }

        let Some(requested_at) = account.reset_requested_at else {
            return Err(AccountError::ResetTokenInvalid);
        };

        if OffsetDateTime::now_utc() - requested_at > self.reset_token_ttl {
            tracing::warn!(username = %account.username, "expired reset token presented");
            return Err(AccountError::ResetTokenInvalid);
        }

        if password != confirmation {
            return Err(AccountError::PasswordConfirmationMismatch);
        }

        self.check_policy(password)?;

        account.password_hash = self.encoder.encode(password)?;
        account.clear_reset_token();

        let account = self.store.save(account).await?;

        tracing::info!(username = %account.username, "password reset completed");

        let event = ResetCompleted {
            account: account.clone(),
        };
        for listener in &self.listeners {
            listener.on_reset_completed(&event).await;
        }

        Ok(account)
    }

    /// Changes the password of an already-authenticated account.
    ///
    /// No identity or token check happens here; the caller vouches for the
    /// account. Any outstanding reset token is invalidated by the write.
    pub async fn change_password(
        &self,
        mut account: Account,
        password: &str,
        confirmation: &str,
    ) -> AccountResult<Account> {
        if password != confirmation {
            return Err(AccountError::PasswordConfirmationMismatch);
        }

        self.check_policy(password)?;

        account.password_hash = self.encoder.encode(password)?;
        account.clear_reset_token();

        let account = self.store.save(account).await?;

        tracing::info!(username = %account.username, "password changed");

        let event = PasswordChanged {
            account: account.clone(),
        };
        for listener in &self.listeners {
            listener.on_password_changed(&event).await;
        }

        Ok(account)
    }

    /// Persists arbitrary mutations to an already-resolved account. No
    /// uniqueness or credential logic, no event.
    pub async fn update(&self, account: Account) -> AccountResult<Account> {
        Ok(self.store.save(account).await?)
    }

    fn check_policy(&self, plain: &str) -> AccountResult<()> {
        if let Some(policy) = &self.policy {
            policy.validate_password(plain)?;
        }

        Ok(())
    }
}
