//! Tool result helpers

use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
use serde::Serialize;

/// Wrap serializable data as a successful tool result with pretty JSON text
///
/// ```rust,ignore
/// fn list_tables(&self) -> Result<CallToolResult, McpError> {
///     let names = self.explorer.list_tables().map_err(ClassifiedError::into_mcp_error)?;
///     json_success(&names)
/// }
/// ```
pub fn json_success<T: Serialize + ?Sized>(data: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| McpError::internal_error(format!("JSON error: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Extract the text of the first content item of a tool result
///
/// Useful when a host (or a test) needs the JSON document back.
pub fn first_text(result: &CallToolResult) -> Option<&str> {
    result
        .content
        .first()
        .and_then(|content| content.as_text())
        .map(|text| text.text.as_str())
}
