use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder, Value};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};
use time::OffsetDateTime;
use ulid::Ulid;

use async_trait::async_trait;
use userkit_db::table::Account as AccountTable;

use crate::model::Account;
use crate::store::AccountStore;

#[derive(FromRow)]
struct AccountRow {
    id: String,
    username: String,
    email: String,
    password_hash: String,
    reset_token: Option<String>,
    reset_requested_at: Option<i64>,
    locale: Option<String>,
}

impl TryFrom<AccountRow> for Account {
    type Error = anyhow::Error;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let reset_requested_at = row
            .reset_requested_at
            .map(OffsetDateTime::from_unix_timestamp)
            .transpose()?;

        Ok(Account {
            id: Some(row.id),
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            reset_token: row.reset_token,
            reset_requested_at,
            locale: row.locale,
        })
    }
}

enum FindKey<'a> {
    Id(&'a str),
    Username(&'a str),
    Email(&'a str),
    ResetToken(&'a str),
}

/// [`AccountStore`] over the `userkit-db` SQLite schema.
///
/// Ids are ULID strings assigned on first save. Username and email
/// uniqueness is enforced by the schema's unique indices, so a racing
/// duplicate registration surfaces as a store error from `save`.
/// Timestamps are persisted as unix seconds; sub-second precision of
/// `reset_requested_at` is truncated.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find(&self, key: FindKey<'_>) -> anyhow::Result<Option<Account>> {
        let mut statement = Query::select()
            .columns([
                AccountTable::Id,
                AccountTable::Username,
                AccountTable::Email,
                AccountTable::PasswordHash,
                AccountTable::ResetToken,
                AccountTable::ResetRequestedAt,
                AccountTable::Locale,
            ])
            .from(AccountTable::Table)
            .limit(1)
            .to_owned();

        match key {
            FindKey::Id(id) => statement.and_where(Expr::col(AccountTable::Id).eq(id)),
            FindKey::Username(username) => {
                statement.and_where(Expr::col(AccountTable::Username).eq(username))
            }
            FindKey::Email(email) => statement.and_where(Expr::col(AccountTable::Email).eq(email)),
            FindKey::ResetToken(token) => {
                statement.and_where(Expr::col(AccountTable::ResetToken).eq(token))
            }
        };

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        let row = sqlx::query_as_with::<_, AccountRow, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Account::try_from).transpose()
    }

    async fn insert(&self, mut account: Account) -> anyhow::Result<Account> {
        let id = Ulid::new().to_string();
        let now = OffsetDateTime::now_utc().unix_timestamp();

        let statement = Query::insert()
            .into_table(AccountTable::Table)
            .columns([
                AccountTable::Id,
                AccountTable::Username,
                AccountTable::Email,
                AccountTable::PasswordHash,
                AccountTable::ResetToken,
                AccountTable::ResetRequestedAt,
                AccountTable::Locale,
                AccountTable::CreatedAt,
            ])
            .values_panic([
                id.clone().into(),
                account.username.clone().into(),
                account.email.clone().into(),
                account.password_hash.clone().into(),
                Value::from(account.reset_token.clone()).into(),
                Value::from(
                    account
                        .reset_requested_at
                        .map(|at| at.unix_timestamp()),
                )
                .into(),
                Value::from(account.locale.clone()).into(),
                now.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        account.id = Some(id);

        Ok(account)
    }

    async fn update(&self, account: Account, id: &str) -> anyhow::Result<Account> {
        let statement = Query::update()
            .table(AccountTable::Table)
            .and_where(Expr::col(AccountTable::Id).eq(id))
            .value(AccountTable::Username, account.username.clone())
            .value(AccountTable::Email, account.email.clone())
            .value(AccountTable::PasswordHash, account.password_hash.clone())
            .value(
                AccountTable::ResetToken,
                Value::from(account.reset_token.clone()),
            )
            .value(
                AccountTable::ResetRequestedAt,
                Value::from(account.reset_requested_at.map(|at| at.unix_timestamp())),
            )
            .value(AccountTable::Locale, Value::from(account.locale.clone()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(account)
    }
}

#[async_trait]
impl AccountStore for SqliteStore {
    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Account>> {
        self.find(FindKey::Id(id)).await
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<Account>> {
        self.find(FindKey::Username(username)).await
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Account>> {
        self.find(FindKey::Email(email)).await
    }

    async fn find_by_username_or_email(&self, value: &str) -> anyhow::Result<Option<Account>> {
        // Username match wins over an email match.
        if let Some(account) = self.find(FindKey::Username(value)).await? {
            return Ok(Some(account));
        }

        self.find(FindKey::Email(value)).await
    }

    async fn find_by_reset_token(&self, token: &str) -> anyhow::Result<Option<Account>> {
        self.find(FindKey::ResetToken(token)).await
    }

    async fn save(&self, account: Account) -> anyhow::Result<Account> {
        match account.id.clone() {
            Some(id) => self.update(account, &id).await,
            None => self.insert(account).await,
        }
    }
}
