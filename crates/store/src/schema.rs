//! Schema management: table creation and first-run catalog seeding.

use tracing::{debug, info};

use crate::{Result, Store, StoreError};

/// Titles inserted into an empty catalog on startup.
pub const SEED_ITEMS: [&str; 2] = ["Sản phẩm A", "Sản phẩm B"];

impl Store {
    /// Creates the `items`, `orders` and `order_items` tables if they are
    /// missing, then seeds the catalog when it is empty.
    ///
    /// Safe to call on every startup. Any failure is reported as
    /// [`StoreError::SchemaInit`] and should abort the process.
    #[tracing::instrument(skip(self), fields(backend = %self.dialect().backend()))]
    pub async fn ensure_schema(&self) -> Result<()> {
        for statement in self.dialect().schema() {
            sqlx::query(statement.sql)
                .execute(self.pool())
                .await
                .map_err(|source| StoreError::SchemaInit {
                    statement: statement.name,
                    source,
                })?;
            debug!(statement = statement.name, "schema statement applied");
        }

        let seeded = self
            .seed_catalog()
            .await
            .map_err(|source| StoreError::SchemaInit {
                statement: "seed items",
                source,
            })?;

        info!(seeded, "schema ready");
        Ok(())
    }

    /// Inserts [`SEED_ITEMS`] if `items` is empty. Returns the rows added.
    async fn seed_catalog(&self) -> std::result::Result<usize, sqlx::Error> {
        let mut tx = self.pool().begin().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&mut *tx)
            .await?;
        if count > 0 {
            tx.commit().await?;
            return Ok(0);
        }

        for title in SEED_ITEMS {
            sqlx::query("INSERT INTO items (title) VALUES ($1)")
                .bind(title)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(SEED_ITEMS.len())
    }
}
