use async_trait::async_trait;
use userkit_account::{
    Account, AccountCreated, AccountListener, PasswordChanged, ResetCompleted, ResetRequested,
};

use crate::service::EmailService;
use crate::template::{self, MailContent};

/// Sends an email for each account lifecycle event.
///
/// Delivery is best effort: failures are logged and swallowed so one dead
/// SMTP relay cannot fail the account workflow that already committed.
pub struct AccountMailer {
    email: EmailService,
    reset_url_base: String,
}

impl AccountMailer {
    /// `reset_url_base` is the page that consumes the reset token; the
    /// token is appended as a `token` query parameter.
    pub fn new(email: EmailService, reset_url_base: impl Into<String>) -> Self {
        Self {
            email,
            reset_url_base: reset_url_base.into(),
        }
    }

    fn deliver(&self, account: &Account, content: MailContent) {
        if let Err(error) = self
            .email
            .send_plain(&account.email, content.subject, content.body)
        {
            tracing::error!(
                username = %account.username,
                error = %error,
                "failed to deliver account notification mail"
            );
        }
    }
}

#[async_trait]
impl AccountListener for AccountMailer {
    async fn on_account_created(&self, event: &AccountCreated) {
        self.deliver(&event.account, template::registration(&event.account));
    }

    async fn on_password_changed(&self, event: &PasswordChanged) {
        self.deliver(&event.account, template::password_changed(&event.account));
    }

    async fn on_reset_requested(&self, event: &ResetRequested) {
        let Some(token) = event.account.reset_token.as_deref() else {
            tracing::warn!(
                username = %event.account.username,
                "reset requested event without a token, skipping mail"
            );
            return;
        };

        self.deliver(
            &event.account,
            template::reset_requested(&event.account, &self.reset_url_base, token),
        );
    }

    async fn on_reset_completed(&self, event: &ResetCompleted) {
        self.deliver(&event.account, template::reset_completed(&event.account));
    }
}
