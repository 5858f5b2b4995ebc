use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::Account;

/// AccountCreated event emitted after a registration has been persisted
///
/// Carries the account snapshot as saved, including the store-assigned id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCreated {
    pub account: Account,
}

/// PasswordChanged event emitted after an authenticated password change
///
/// Only the new hash is part of the snapshot; the old password is not
/// recorded anywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordChanged {
    pub account: Account,
}

/// ResetRequested event emitted after a reset token has been issued and
/// persisted. The snapshot carries the token so a mail listener can build
/// the reset link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetRequested {
    pub account: Account,
}

/// ResetCompleted event emitted after a reset token has been consumed and
/// the new password hash persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetCompleted {
    pub account: Account,
}

/// Observer interface for account lifecycle events.
///
/// Listeners are invoked by the [`AccountService`](crate::AccountService)
/// after the corresponding store write succeeded: awaited in place, in
/// registration order. Dispatch is best effort; a listener that needs to
/// surface failures has to handle them itself (see the mailer in
/// `userkit-notification`, which logs and swallows delivery errors).
///
/// All methods default to a no-op so implementations only override the
/// events they care about.
#[async_trait]
pub trait AccountListener: Send + Sync {
    async fn on_account_created(&self, _event: &AccountCreated) {}

    async fn on_password_changed(&self, _event: &PasswordChanged) {}

    async fn on_reset_requested(&self, _event: &ResetRequested) {}

    async fn on_reset_completed(&self, _event: &ResetCompleted) {}
}
