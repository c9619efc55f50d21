//! Type definitions for SQLite Explorer MCP

use std::path::PathBuf;

use mcp_common::{ClassifiedError, ErrorClass};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Result Types
// ============================================================================

/// One result row: column name to JSON scalar
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Column metadata as reported by `describe_table`
///
/// Every field is rendered as text; NULL becomes an empty string so all
/// descriptors share the same keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub notnull: String,
    pub dflt_value: String,
    pub pk: String,
}

/// Outcome of a health probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Error,
}

/// Health report returned by `health_check`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub database: String,
    pub message: String,
}

/// How many rows the executor pulls from the statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    All,
    One,
}

impl FetchMode {
    pub fn from_fetch_all(fetch_all: bool) -> Self {
        if fetch_all {
            FetchMode::All
        } else {
            FetchMode::One
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("SQLite database not found at: {}", .path.display())]
    DatabaseMissing { path: PathBuf },

    #[error("Multiple SQL statements are not allowed")]
    MultipleStatements,

    #[error("Only SELECT queries (including WITH clauses) are allowed for safety")]
    UnsupportedStatementType,

    #[error("Table '{name}' does not exist")]
    TableNotFound { name: String },

    #[error("SQLite error: {0}")]
    Execution(#[from] rusqlite::Error),

    #[error("SQLite error: unsupported parameter type {kind} at position {index}")]
    UnsupportedParameter { index: usize, kind: &'static str },
}

impl ClassifiedError for ExplorerError {
    fn kind(&self) -> &'static str {
        match self {
            ExplorerError::DatabaseMissing { .. } => "database_missing",
            ExplorerError::MultipleStatements => "multiple_statements",
            ExplorerError::UnsupportedStatementType => "unsupported_statement_type",
            ExplorerError::TableNotFound { .. } => "table_not_found",
            ExplorerError::Execution(_) | ExplorerError::UnsupportedParameter { .. } => {
                "execution_error"
            }
        }
    }

    fn class(&self) -> ErrorClass {
        match self {
            ExplorerError::MultipleStatements | ExplorerError::UnsupportedStatementType => {
                ErrorClass::InvalidRequest
            }
            ExplorerError::TableNotFound { .. } => ErrorClass::InvalidParams,
            ExplorerError::DatabaseMissing { .. }
            | ExplorerError::Execution(_)
            | ExplorerError::UnsupportedParameter { .. } => ErrorClass::Internal,
        }
    }
}

pub type Result<T, E = ExplorerError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_health_report_shape() {
        let report = HealthReport {
            status: HealthStatus::Error,
            database: "/tmp/x.db".into(),
            message: "Health check failed: boom".into(),
        };
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "status": "error",
                "database": "/tmp/x.db",
                "message": "Health check failed: boom",
            })
        );
    }

    #[test]
    fn test_column_descriptor_keys() {
        let column = ColumnDescriptor {
            name: "id".into(),
            data_type: "INTEGER".into(),
            notnull: "0".into(),
            dflt_value: String::new(),
            pk: "1".into(),
        };
        let value = serde_json::to_value(&column).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 5);
        for key in ["name", "type", "notnull", "dflt_value", "pk"] {
            assert!(keys.contains(&key), "missing {key}");
        }
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(ExplorerError::MultipleStatements.kind(), "multiple_statements");
        assert_eq!(
            ExplorerError::TableNotFound { name: "ghost".into() }.to_string(),
            "Table 'ghost' does not exist"
        );
        let missing = ExplorerError::DatabaseMissing { path: "/nope/db.sqlite".into() };
        assert_eq!(missing.to_string(), "SQLite database not found at: /nope/db.sqlite");
        assert_eq!(missing.class(), ErrorClass::Internal);
        assert_eq!(
            ExplorerError::UnsupportedParameter { index: 0, kind: "array" }.kind(),
            "execution_error"
        );
    }
}
