use sqlx_migrator::{Info, Migrator};

mod m0001;
pub mod table;

/// Migrator covering the account schema.
pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec![Box::new(m0001::M0001)])?;

    Ok(migrator)
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx_migrator::{Migrate, Plan};

    #[tokio::test]
    async fn migrations_apply_cleanly() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .unwrap();

        let mut conn = pool.acquire().await.unwrap();
        super::migrator()
            .unwrap()
            .run(&mut conn, &Plan::apply_all())
            .await
            .unwrap();
        drop(conn);

        sqlx::query("SELECT id, username, email, password_hash, reset_token, reset_requested_at, locale, created_at FROM account")
            .fetch_all(&pool)
            .await
            .unwrap();
    }
}
