//! MCP Common - shared plumbing for MCP servers
//!
//! - **Startup**: [`init_tracing`] and the [`serve_stdio!`] entry-point macro
//! - **Results**: [`json_success`] for structured tool output
//! - **Errors**: [`ClassifiedError`] maps domain errors to protocol errors with a `kind` tag
//! - **Embedding**: [`EmbeddableMcp`] for calling tools in-process

pub mod embeddable;
pub mod error;
pub mod init;
pub mod result;

pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use error::{ClassifiedError, ErrorClass};
pub use init::init_tracing;
pub use result::{first_text, json_success};

pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

pub use async_trait::async_trait;
