use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Account;

pub struct Operation;

fn create_account_table_statement() -> TableCreateStatement {
    Table::create()
        .table(Account::Table)
        .col(
            ColumnDef::new(Account::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(ColumnDef::new(Account::Username).string().not_null())
        .col(ColumnDef::new(Account::Email).string().not_null())
        .col(ColumnDef::new(Account::PasswordHash).string().not_null())
        .col(ColumnDef::new(Account::ResetToken).string())
        .col(ColumnDef::new(Account::ResetRequestedAt).big_integer())
        .col(ColumnDef::new(Account::Locale).string())
        .col(ColumnDef::new(Account::CreatedAt).big_integer().not_null())
        .to_owned()
}

fn drop_account_table_statement() -> TableDropStatement {
    Table::drop().table(Account::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Operation {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = create_account_table_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = drop_account_table_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }
}
