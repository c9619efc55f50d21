//! Mapping domain errors onto MCP protocol errors
//!
//! Servers describe each of their error variants with an [`ErrorClass`] and a
//! stable snake_case kind. [`ClassifiedError::into_mcp_error`] then produces an
//! `ErrorData` whose `data` payload is `{"kind": "..."}`, so a host can tell
//! rejection reasons apart without parsing the message.

use rmcp::ErrorData as McpError;
use serde_json::json;

/// Protocol-level category an error is reported under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request itself is not acceptable (e.g. a rejected statement)
    InvalidRequest,
    /// An argument names something that does not exist or is malformed
    InvalidParams,
    /// The server failed while carrying out an acceptable request
    Internal,
}

/// An error that knows how it should be presented to an MCP client
pub trait ClassifiedError: std::error::Error {
    /// Stable machine-readable kind, e.g. `"table_not_found"`
    fn kind(&self) -> &'static str;

    /// Protocol category for this error
    fn class(&self) -> ErrorClass;

    /// Convert into an MCP error carrying the message and kind
    fn into_mcp_error(self) -> McpError
    where
        Self: Sized,
    {
        let data = Some(json!({ "kind": self.kind() }));
        let message = self.to_string();
        match self.class() {
            ErrorClass::InvalidRequest => McpError::invalid_request(message, data),
            ErrorClass::InvalidParams => McpError::invalid_params(message, data),
            ErrorClass::Internal => McpError::internal_error(message, data),
        }
    }
}
