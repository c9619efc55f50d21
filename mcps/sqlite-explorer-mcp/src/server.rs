//! MCP Server implementation for SQLite Explorer
//!
//! Each tool delegates to [`Explorer`]; domain errors are converted to MCP
//! errors tagged with their kind.

use std::num::NonZeroU32;
use std::path::PathBuf;

use clap::Parser;
use mcp_common::{
    async_trait, json_success, ClassifiedError, EmbeddableError, EmbeddableMcp,
    EmbeddableResult, McpError,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router,
};
use serde_json::Value;

use crate::config::{Cli, ExplorerConfig};
use crate::connection::DatabasePath;
use crate::explorer::Explorer;
use crate::params::*;
use crate::types::FetchMode;

const INSTRUCTIONS: &str = "SQLite Explorer - guarded read-only access to a SQLite database. \
     Use read_query to run a single SELECT (or WITH) statement with optional positional \
     parameters; rows are capped by row_limit unless the query has its own LIMIT. \
     Use list_tables and describe_table to explore the schema, and health_check to \
     verify the database is reachable.";

/// The SQLite Explorer MCP Server
#[derive(Clone)]
pub struct SqliteExplorerServer {
    explorer: Explorer,
    default_row_limit: NonZeroU32,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Tool Router - Each tool delegates to the explorer
// ============================================================================

#[tool_router]
impl SqliteExplorerServer {
    /// Create a server from resolved configuration
    pub fn with_config(config: &ExplorerConfig) -> Self {
        Self {
            explorer: Explorer::new(DatabasePath::new(config.database.path.clone())),
            default_row_limit: config.query.default_row_limit,
            tool_router: Self::tool_router(),
        }
    }

    /// Create a server for `path` with default settings
    pub fn with_database(path: impl Into<PathBuf>) -> Self {
        let mut config = ExplorerConfig::default();
        config.database.path = path.into();
        Self::with_config(&config)
    }

    /// Parse the command line, resolve configuration and check the database
    ///
    /// Refuses to start when the database file does not exist.
    pub fn from_cli() -> anyhow::Result<Self> {
        let config = ExplorerConfig::resolve(&Cli::parse())?;
        let server = Self::with_config(&config);

        if let Err(e) = server.explorer.database().ensure_exists() {
            tracing::error!("{e}");
            return Err(e.into());
        }

        tracing::info!(
            database = %server.explorer.database(),
            default_row_limit = server.default_row_limit.get(),
            "Initialized SQLite Explorer"
        );
        tracing::info!("Available tools: read_query, list_tables, describe_table, health_check");
        Ok(server)
    }

    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    #[tool(
        description = "Execute a read-only SELECT (or WITH ... SELECT) query on the SQLite database. \
                       Only a single statement is allowed. Returns a list of row objects keyed by column name. \
                       fetch_all=false returns at most one row; row_limit (default 1000) caps results \
                       when the query has no LIMIT of its own."
    )]
    async fn read_query(
        &self,
        Parameters(params): Parameters<ReadQueryParams>,
    ) -> Result<CallToolResult, McpError> {
        let rows = self
            .explorer
            .read_query(
                &params.query,
                params.params.as_deref().unwrap_or_default(),
                FetchMode::from_fetch_all(params.fetch_all),
                params.row_limit.unwrap_or(self.default_row_limit),
            )
            .map_err(ClassifiedError::into_mcp_error)?;

        json_success(&rows)
    }

    #[tool(description = "List all tables in the SQLite database, in alphabetical order")]
    async fn list_tables(&self) -> Result<CallToolResult, McpError> {
        let tables = self
            .explorer
            .list_tables()
            .map_err(ClassifiedError::into_mcp_error)?;

        json_success(&tables)
    }

    #[tool(
        description = "Describe a table's columns. Each entry has name, type, notnull, dflt_value \
                       and pk, all as strings (empty string for NULL)."
    )]
    async fn describe_table(
        &self,
        Parameters(params): Parameters<DescribeTableParams>,
    ) -> Result<CallToolResult, McpError> {
        let columns = self
            .explorer
            .describe_table(&params.table_name)
            .map_err(ClassifiedError::into_mcp_error)?;

        json_success(&columns)
    }

    #[tool(description = "Check that the server can open and query the database")]
    async fn health_check(&self) -> Result<CallToolResult, McpError> {
        json_success(&self.explorer.health_check())
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for SqliteExplorerServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for SqliteExplorerServer {
    fn server_name(&self) -> &str {
        "sqlite-explorer"
    }

    fn server_description(&self) -> Option<&str> {
        Some(INSTRUCTIONS)
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        match name {
            "read_query" => {
                let params: ReadQueryParams = serde_json::from_value(params)?;
                self.read_query(Parameters(params)).await.map_err(Into::into)
            }

            "list_tables" => self.list_tables().await.map_err(Into::into),

            "describe_table" => {
                let params: DescribeTableParams = serde_json::from_value(params)?;
                self.describe_table(Parameters(params))
                    .await
                    .map_err(Into::into)
            }

            "health_check" => self.health_check().await.map_err(Into::into),

            _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcp_common::first_text;
    use serde_json::json;

    fn seeded() -> (tempfile::TempDir, SqliteExplorerServer) {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("financial_data.db");
        rusqlite::Connection::open(&file)
            .unwrap()
            .execute_batch(
                "CREATE TABLE zeta (id INTEGER PRIMARY KEY, name TEXT);
                 CREATE TABLE alpha (v REAL);
                 INSERT INTO zeta VALUES (1, 'x'), (2, 'y'), (3, 'z');",
            )
            .unwrap();
        let server = SqliteExplorerServer::with_database(file);
        (dir, server)
    }

    fn body(result: &CallToolResult) -> Value {
        serde_json::from_str(first_text(result).unwrap()).unwrap()
    }

    #[test]
    fn test_embeddable_server_name() {
        let (_dir, server) = seeded();
        assert_eq!(server.server_name(), "sqlite-explorer");
    }

    #[test]
    fn test_embeddable_list_tools() {
        let (_dir, server) = seeded();
        let tools = server.list_tools();
        assert_eq!(tools.len(), 4);

        let tool_names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        for name in ["read_query", "list_tables", "describe_table", "health_check"] {
            assert!(tool_names.contains(&name), "missing tool {name}");
        }
    }

    #[tokio::test]
    async fn test_read_query_tool() {
        let (_dir, server) = seeded();
        let result = server
            .call_tool(
                "read_query",
                json!({ "query": "SELECT * FROM zeta WHERE id = ?", "params": [1] }),
            )
            .await
            .unwrap();
        assert_eq!(body(&result), json!([{ "id": 1, "name": "x" }]));
    }

    #[tokio::test]
    async fn test_read_query_row_limit_and_fetch_one() {
        let (_dir, server) = seeded();
        let limited = server
            .call_tool("read_query", json!({ "query": "SELECT id FROM zeta", "row_limit": 2 }))
            .await
            .unwrap();
        assert_eq!(body(&limited).as_array().unwrap().len(), 2);

        let one = server
            .call_tool(
                "read_query",
                json!({ "query": "SELECT id FROM zeta ORDER BY id DESC", "fetch_all": false }),
            )
            .await
            .unwrap();
        assert_eq!(body(&one), json!([{ "id": 3 }]));
    }

    #[tokio::test]
    async fn test_rejections_carry_kind() {
        let (_dir, server) = seeded();

        let err = server
            .call_tool("read_query", json!({ "query": "SELECT 1; SELECT 2" }))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some("multiple_statements"));

        let err = server
            .call_tool("read_query", json!({ "query": "DELETE FROM zeta" }))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some("unsupported_statement_type"));

        let err = server
            .call_tool("read_query", json!({ "query": "SELECT nope FROM zeta" }))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some("execution_error"));

        let err = server
            .call_tool("describe_table", json!({ "table_name": "ghost_table" }))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some("table_not_found"));
    }

    #[tokio::test]
    async fn test_list_and_describe_tools() {
        let (_dir, server) = seeded();
        let tables = server.call_tool("list_tables", json!({})).await.unwrap();
        assert_eq!(body(&tables), json!(["alpha", "zeta"]));

        let columns = server
            .call_tool("describe_table", json!({ "table_name": "zeta" }))
            .await
            .unwrap();
        assert_eq!(
            body(&columns),
            json!([
                { "name": "id", "type": "INTEGER", "notnull": "0", "dflt_value": "", "pk": "1" },
                { "name": "name", "type": "TEXT", "notnull": "0", "dflt_value": "", "pk": "0" },
            ])
        );
    }

    #[tokio::test]
    async fn test_health_check_never_errors() {
        let server = SqliteExplorerServer::with_database("/definitely/not/here/data.db");
        let result = server.call_tool("health_check", json!({})).await.unwrap();
        let report = body(&result);
        assert_eq!(report["status"], "error");
        assert_eq!(report["database"], "/definitely/not/here/data.db");
    }

    #[tokio::test]
    async fn test_missing_database_kind() {
        let server = SqliteExplorerServer::with_database("/definitely/not/here/data.db");
        let err = server.call_tool("list_tables", json!({})).await.unwrap_err();
        assert_eq!(err.kind(), Some("database_missing"));
    }

    #[tokio::test]
    async fn test_embeddable_unknown_tool() {
        let (_dir, server) = seeded();
        let result = server.call_tool("write_query", json!({})).await;
        assert!(matches!(result, Err(EmbeddableError::ToolNotFound(_))));
    }

    #[tokio::test]
    async fn test_embeddable_invalid_params() {
        let (_dir, server) = seeded();
        let result = server.call_tool("describe_table", json!({ "table": "zeta" })).await;
        assert!(matches!(result, Err(EmbeddableError::InvalidParams(_))));
    }
}
