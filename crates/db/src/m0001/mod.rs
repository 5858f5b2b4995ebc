mod account_create_email_idx;
mod account_create_reset_token_idx;
mod account_create_table;
mod account_create_username_idx;

use sqlx_migrator::vec_box;

pub struct M0001;

sqlx_migrator::sqlite_migration!(
    M0001,
    "main",
    "m0001",
    vec_box![],
    vec_box![
        account_create_table::Operation,
        account_create_username_idx::Operation,
        account_create_email_idx::Operation,
        account_create_reset_token_idx::Operation
    ]
);
