//! Liveness probe

use crate::connection::{ConnectionScope, DatabasePath};
use crate::types::{HealthReport, HealthStatus, Result};

const HEALTHY_MESSAGE: &str = "SQLite Explorer server is running properly";

/// Run `SELECT 1` through a fresh connection and report the outcome
///
/// Never fails: every error on the connect-or-query path becomes an
/// `error` report.
pub fn check(path: &DatabasePath) -> HealthReport {
    let (status, message) = match probe(path) {
        Ok(true) => (HealthStatus::Healthy, HEALTHY_MESSAGE.to_string()),
        Ok(false) => {
            tracing::warn!(database = %path, "Health probe returned an unexpected value");
            (HealthStatus::Error, "Database test query failed".to_string())
        }
        Err(e) => {
            tracing::warn!(database = %path, error = %e, "Health check failed");
            (HealthStatus::Error, format!("Health check failed: {e}"))
        }
    };

    HealthReport {
        status,
        database: path.to_string(),
        message,
    }
}

fn probe(path: &DatabasePath) -> Result<bool> {
    let conn = ConnectionScope::open(path)?;
    let value: i64 = conn.query_row("SELECT 1 AS test", [], |row| row.get(0))?;
    Ok(value == 1)
}
