use sqlx::any::AnyPoolOptions;
use sqlx::{Any, AnyPool, Transaction};
use tracing::info;

use crate::{Capabilities, Dialect, Result, StoreConfig, StoreError};

/// Shared handle to the relational store.
///
/// Cloning is cheap: clones share one connection pool. Each operation
/// acquires a connection (or transaction) from the pool for its own scope
/// and returns it on every exit path.
#[derive(Debug, Clone)]
pub struct Store {
    pool: AnyPool,
    dialect: Dialect,
}

impl Store {
    /// Opens a connection pool for the backend named by `config.url`.
    pub async fn connect(config: StoreConfig) -> Result<Self> {
        sqlx::any::install_default_drivers();
        let dialect = Dialect::from_url(&config.url)?;

        info!(
            backend = %dialect.backend(),
            max_connections = config.max_connections,
            "connecting to store"
        );

        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .after_connect(move |conn, _meta| {
                Box::pin(async move {
                    for statement in dialect.session_statements() {
                        sqlx::query(statement).execute(&mut *conn).await?;
                    }
                    Ok(())
                })
            })
            .connect(&config.url)
            .await
            .map_err(StoreError::Connection)?;

        Ok(Self { pool, dialect })
    }

    /// Overrides the backend's capability flags.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.dialect = self.dialect.with_capabilities(capabilities);
        self
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Starts a transaction on a pooled connection.
    ///
    /// Dropping the transaction without committing rolls it back.
    pub async fn begin(&self) -> Result<Transaction<'static, Any>> {
        Ok(self.pool.begin().await?)
    }

    /// Returns true if the store answers a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Closes every pooled connection. Pending acquisitions fail afterwards.
    pub async fn close(&self) {
        info!("closing store connection pool");
        self.pool.close().await;
    }
}
