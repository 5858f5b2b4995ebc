//! Plain-text mail bodies for account lifecycle events

use userkit_account::Account;

pub(crate) struct MailContent {
    pub subject: String,
    pub body: String,
}

pub(crate) fn registration(account: &Account) -> MailContent {
    MailContent {
        subject: "Welcome!".to_string(),
        body: format!(
            "Hi {},\n\nyour account has been created. You can sign in with your \
             username right away.\n",
            account.username
        ),
    }
}

pub(crate) fn reset_requested(account: &Account, reset_url_base: &str, token: &str) -> MailContent {
    MailContent {
        subject: "Reset your password".to_string(),
        body: format!(
            "Hi {},\n\na password reset was requested for your account. Follow this \
             link to choose a new password:\n\n{}?token={}\n\nThe link expires \
             shortly. If you did not request a reset, you can ignore this mail.\n",
            account.username, reset_url_base, token
        ),
    }
}

pub(crate) fn reset_completed(account: &Account) -> MailContent {
    MailContent {
        subject: "Your password was reset".to_string(),
        body: format!(
            "Hi {},\n\nyour password has been reset. If this wasn't you, request a \
             new reset immediately.\n",
            account.username
        ),
    }
}

pub(crate) fn password_changed(account: &Account) -> MailContent {
    MailContent {
        subject: "Your password was changed".to_string(),
        body: format!(
            "Hi {},\n\nyour password has been changed. If this wasn't you, request a \
             password reset immediately.\n",
            account.username
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account::new("alice", "a@x.com")
    }

    #[test]
    fn reset_mail_contains_the_link_with_token() {
        let content = reset_requested(&account(), "https://app.example/reset", "tok123");

        assert!(content.body.contains("https://app.example/reset?token=tok123"));
    }

    #[test]
    fn mails_greet_by_username() {
        assert!(registration(&account()).body.contains("Hi alice"));
        assert!(reset_completed(&account()).body.contains("Hi alice"));
        assert!(password_changed(&account()).body.contains("Hi alice"));
    }
}
