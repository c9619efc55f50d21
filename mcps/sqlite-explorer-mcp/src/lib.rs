//! SQLite Explorer MCP Library
//!
//! Guarded read-only access to a single SQLite file: caller SQL is checked to
//! be one SELECT/WITH statement, capped with a row limit and executed on a
//! fresh read-only connection. Schema listing, column description and a
//! health probe round out the tool set.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use sqlite_explorer_mcp::{DatabasePath, Explorer, FetchMode, DEFAULT_ROW_LIMIT};
//!
//! let explorer = Explorer::new(DatabasePath::new("financial_data.db"));
//! let rows = explorer.read_query("SELECT * FROM accounts", &[], FetchMode::All, DEFAULT_ROW_LIMIT)?;
//! ```

pub mod config;
pub mod connection;
pub mod executor;
pub mod explorer;
pub mod health;
pub mod params;
pub mod schema;
pub mod server;
pub mod types;
pub mod validator;

// Re-export main server type
pub use server::SqliteExplorerServer;

pub use connection::{ConnectionScope, DatabasePath};
pub use explorer::{Explorer, DEFAULT_ROW_LIMIT};
pub use params::{DescribeTableParams, ReadQueryParams};
pub use types::{ColumnDescriptor, ExplorerError, FetchMode, HealthReport, HealthStatus, Row};
pub use validator::{validate, ValidatedQuery};
