//! The four caller-facing operations
//!
//! Each call opens its own [`ConnectionScope`], does its work and lets the
//! scope close the connection before returning. No state is kept between calls.

use std::num::NonZeroU32;

use serde_json::Value;

use crate::connection::{ConnectionScope, DatabasePath};
use crate::types::{ColumnDescriptor, FetchMode, HealthReport, Result, Row};
use crate::{executor, health, schema, validator};

/// Default row cap when the caller does not supply one
pub const DEFAULT_ROW_LIMIT: NonZeroU32 = match NonZeroU32::new(1000) {
    Some(n) => n,
    None => unreachable!(),
};

/// Read-only gateway over one SQLite file
#[derive(Debug, Clone)]
pub struct Explorer {
    database: DatabasePath,
}

impl Explorer {
    pub fn new(database: DatabasePath) -> Self {
        Self { database }
    }

    pub fn database(&self) -> &DatabasePath {
        &self.database
    }

    /// Validate and run a caller-supplied SELECT/WITH statement
    pub fn read_query(
        &self,
        query: &str,
        params: &[Value],
        fetch: FetchMode,
        row_limit: NonZeroU32,
    ) -> Result<Vec<Row>> {
        self.database.ensure_exists()?;

        let validated = validator::validate(query, row_limit).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected query");
        })?;
        tracing::debug!(sql = validated.as_str(), params = params.len(), "Executing query");

        let conn = ConnectionScope::open(&self.database)?;
        let rows = executor::execute(&conn, &validated, params, fetch).inspect_err(|e| {
            tracing::warn!(error = %e, "Query failed");
        })?;

        tracing::debug!(rows = rows.len(), "Query completed");
        Ok(rows)
    }

    /// All table names in ascending order
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let conn = ConnectionScope::open(&self.database)?;
        schema::list_tables(&conn)
    }

    /// Column descriptors for `table_name`
    pub fn describe_table(&self, table_name: &str) -> Result<Vec<ColumnDescriptor>> {
        let conn = ConnectionScope::open(&self.database)?;
        schema::describe_table(&conn, table_name).inspect_err(|e| {
            tracing::warn!(table = table_name, error = %e, "Describe failed");
        })
    }

    /// Liveness report; never fails
    pub fn health_check(&self) -> HealthReport {
        health::check(&self.database)
    }
}
