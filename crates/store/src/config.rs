//! Store connection settings.

use std::time::Duration;

/// Local single-file embedded store used when no connection URL is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data.db?mode=rwc";

/// Connection pool configuration.
///
/// ```rust,ignore
/// let config = StoreConfig::new("postgres://localhost/shop").max_connections(10);
/// let store = Store::connect(config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Connection URL; its scheme selects the backend.
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    /// `None` keeps idle connections open indefinitely.
    pub idle_timeout: Option<Duration>,
    /// `None` never recycles a connection because of its age.
    pub max_lifetime: Option<Duration>,
}

impl StoreConfig {
    /// Creates a configuration for the given URL with pool defaults.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 5,
            min_connections: 0,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            max_lifetime: Some(Duration::from_secs(1800)),
        }
    }

    /// Private in-memory SQLite database.
    ///
    /// The database lives exactly as long as its one connection, so the pool
    /// is pinned to a single connection that is never reaped.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: None,
            max_lifetime: None,
        }
    }

    /// Uses `url` when present, the embedded default otherwise.
    pub fn from_optional_url(url: Option<String>) -> Self {
        Self::new(url.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()))
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_URL)
    }
}
