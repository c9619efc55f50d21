//! In-process tool dispatch
//!
//! [`EmbeddableMcp`] lets a host call a server's tools directly by name with a
//! JSON argument object, without spawning the server binary and speaking the
//! protocol over stdio. The same tool functions back both paths.
//!
//! ```rust,ignore
//! use mcp_common::EmbeddableMcp;
//! use sqlite_explorer_mcp::SqliteExplorerServer;
//!
//! let server = SqliteExplorerServer::with_database("/srv/data/financial_data.db");
//! let result = server
//!     .call_tool("read_query", serde_json::json!({ "query": "SELECT 1" }))
//!     .await?;
//! ```

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

/// Failure to dispatch an in-process tool call
#[derive(Debug, thiserror::Error)]
pub enum EmbeddableError {
    /// No tool with this name is registered
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// The argument object did not match the tool's parameter type
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    /// The tool ran and reported a protocol error
    #[error("{}", .0.message)]
    Tool(rmcp::ErrorData),
}

impl From<rmcp::ErrorData> for EmbeddableError {
    fn from(err: rmcp::ErrorData) -> Self {
        EmbeddableError::Tool(err)
    }
}

impl EmbeddableError {
    /// The `kind` tag of a tool error, when the server attached one
    pub fn kind(&self) -> Option<&str> {
        match self {
            EmbeddableError::Tool(err) => err.data.as_ref()?.get("kind")?.as_str(),
            _ => None,
        }
    }
}

/// Result type for in-process tool calls
pub type EmbeddableResult<T> = Result<T, EmbeddableError>;

/// A tool server that can be driven in-process
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Name used to identify the server in host configuration
    fn server_name(&self) -> &str;

    /// All tools with their descriptions and input schemas
    fn list_tools(&self) -> Vec<Tool>;

    /// Run the tool `name` with a JSON object of arguments
    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult>;

    /// Optional human-readable description
    fn server_description(&self) -> Option<&str> {
        None
    }
}
