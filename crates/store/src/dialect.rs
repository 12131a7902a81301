//! Backend dialects.
//!
//! Everything that differs between the supported backends lives here: DDL,
//! per-connection session setup, timestamp rendering and the
//! [`Capabilities`] flags that callers branch on. Callers never compare
//! backend names; they ask the dialect what the backend can do.

use crate::{Result, StoreError};

/// Relational backends the store can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Postgres => write!(f, "postgres"),
            Backend::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Feature flags describing what a backend supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities {
    /// `INSERT ... RETURNING` hands back generated keys. When false, the
    /// connection's last-inserted-id facility is used instead.
    pub returning_clause: bool,
}

/// A named DDL statement, so schema failures can say which step broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaStatement {
    pub name: &'static str,
    pub sql: &'static str,
}

const POSTGRES_SCHEMA: &[SchemaStatement] = &[
    SchemaStatement {
        name: "create items",
        sql: r#"
            CREATE TABLE IF NOT EXISTS items (
                id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                title VARCHAR(200) NOT NULL
            )
        "#,
    },
    SchemaStatement {
        name: "create orders",
        sql: r#"
            CREATE TABLE IF NOT EXISTS orders (
                id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
        "#,
    },
    SchemaStatement {
        name: "create order_items",
        sql: r#"
            CREATE TABLE IF NOT EXISTS order_items (
                id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                order_id BIGINT NOT NULL REFERENCES orders (id) ON DELETE CASCADE,
                item_id BIGINT NOT NULL REFERENCES items (id),
                quantity BIGINT NOT NULL DEFAULT 1 CHECK (quantity >= 1)
            )
        "#,
    },
    SchemaStatement {
        name: "index order_items.order_id",
        sql: "CREATE INDEX IF NOT EXISTS idx_order_items_order_id ON order_items (order_id)",
    },
];

const SQLITE_SCHEMA: &[SchemaStatement] = &[
    SchemaStatement {
        name: "create items",
        sql: r#"
            CREATE TABLE IF NOT EXISTS items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title VARCHAR(200) NOT NULL
            )
        "#,
    },
    SchemaStatement {
        name: "create orders",
        sql: r#"
            CREATE TABLE IF NOT EXISTS orders (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
        "#,
    },
    SchemaStatement {
        name: "create order_items",
        sql: r#"
            CREATE TABLE IF NOT EXISTS order_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                order_id INTEGER NOT NULL REFERENCES orders (id) ON DELETE CASCADE,
                item_id INTEGER NOT NULL REFERENCES items (id),
                quantity INTEGER NOT NULL DEFAULT 1 CHECK (quantity >= 1)
            )
        "#,
    },
    SchemaStatement {
        name: "index order_items.order_id",
        sql: "CREATE INDEX IF NOT EXISTS idx_order_items_order_id ON order_items (order_id)",
    },
];

// SQLite ships with foreign keys off; cascade and referential checks need them on.
const SQLITE_SESSION: &[&str] = &["PRAGMA foreign_keys = ON", "PRAGMA busy_timeout = 5000"];

/// SQL dialect of one backend plus its capability flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    backend: Backend,
    capabilities: Capabilities,
}

impl Dialect {
    /// PostgreSQL: generated keys come back through `RETURNING`.
    pub const fn postgres() -> Self {
        Self {
            backend: Backend::Postgres,
            capabilities: Capabilities {
                returning_clause: true,
            },
        }
    }

    /// SQLite: generated keys are read from the connection's last rowid.
    pub const fn sqlite() -> Self {
        Self {
            backend: Backend::Sqlite,
            capabilities: Capabilities {
                returning_clause: false,
            },
        }
    }

    /// Resolves the dialect from the scheme of a connection URL.
    pub fn from_url(url: &str) -> Result<Self> {
        let scheme = url.split(':').next().unwrap_or_default();
        match scheme.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::postgres()),
            "sqlite" => Ok(Self::sqlite()),
            _ => Err(StoreError::UnsupportedBackend(scheme.to_string())),
        }
    }

    /// Replaces the capability flags, keeping the backend's SQL.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// DDL statements creating the catalog and order tables, in dependency order.
    pub fn schema(&self) -> &'static [SchemaStatement] {
        match self.backend {
            Backend::Postgres => POSTGRES_SCHEMA,
            Backend::Sqlite => SQLITE_SCHEMA,
        }
    }

    /// Statements run on every freshly opened connection.
    pub fn session_statements(&self) -> &'static [&'static str] {
        match self.backend {
            Backend::Postgres => &[],
            Backend::Sqlite => SQLITE_SESSION,
        }
    }

    /// Expression rendering `orders.created_at` as UTC text in the form
    /// `YYYY-MM-DDTHH:MM:SS.fff`.
    pub fn created_at_text(&self) -> &'static str {
        match self.backend {
            Backend::Postgres => {
                r#"to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS.US')"#
            }
            Backend::Sqlite => "strftime('%Y-%m-%dT%H:%M:%f', created_at)",
        }
    }

    /// Query reading back the key generated by the previous insert on the
    /// same connection, for backends without `RETURNING`.
    ///
    /// `None` means the backend has no such facility and only the driver's
    /// own report (if any) can be used.
    pub fn last_insert_id_sql(&self) -> Option<&'static str> {
        match self.backend {
            Backend::Postgres => None,
            Backend::Sqlite => Some("SELECT last_insert_rowid()"),
        }
    }

    /// Most bind parameters a single statement may carry.
    pub fn max_bind_parameters(&self) -> usize {
        match self.backend {
            Backend::Postgres => 65_535,
            Backend::Sqlite => 32_766,
        }
    }
}
