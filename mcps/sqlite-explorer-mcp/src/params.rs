//! Parameter types for SQLite Explorer MCP tools

use std::num::NonZeroU32;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ReadQueryParams {
    #[schemars(description = "SELECT SQL query to execute (a single statement; WITH clauses allowed)")]
    pub query: String,

    #[schemars(description = "Optional list of positional parameters for ? placeholders")]
    #[serde(default)]
    pub params: Option<Vec<Value>>,

    #[schemars(description = "If true (default), fetch all rows; if false, fetch at most one row")]
    #[serde(default = "default_fetch_all")]
    pub fetch_all: bool,

    #[schemars(
        description = "Maximum number of rows to return when the query has no LIMIT (default 1000)"
    )]
    #[serde(default)]
    pub row_limit: Option<NonZeroU32>,
}

fn default_fetch_all() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DescribeTableParams {
    #[schemars(description = "Name of the table to describe")]
    pub table_name: String,
}
