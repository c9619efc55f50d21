//! SQLite Explorer MCP Server
//!
//! Serves read-only query and schema tools for one SQLite file over stdio.

use sqlite_explorer_mcp::SqliteExplorerServer;

mcp_common::serve_stdio!("sqlite_explorer_mcp", SqliteExplorerServer::from_cli()?);
