mod error;
mod event;
mod model;
mod service;

pub mod password;
pub mod policy;
pub mod store;
pub mod token;

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        mod sqlite;

        pub use sqlite::SqliteStore;
    }
}

pub use error::{AccountError, AccountResult};
pub use event::{
    AccountCreated, AccountListener, PasswordChanged, ResetCompleted, ResetRequested,
};
pub use model::Account;
pub use password::{Argon2Encoder, PasswordEncoder};
pub use policy::{LengthPolicy, PasswordPolicy};
pub use service::{AccountService, DEFAULT_RESET_TOKEN_TTL};
pub use store::{AccountStore, MemoryStore};
pub use token::{RandomTokenGenerator, TokenGenerator};
