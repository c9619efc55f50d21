//! Process startup helpers
//!
//! Tracing setup and the `serve_stdio!` macro used by every server binary.
//! stdout carries the MCP protocol, so all log output is written to stderr.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    /// Human-readable lines without ANSI colours
    Text,
    /// One JSON object per line, for log aggregation
    Json,
}

impl LogFormat {
    /// Read the format from `LOG_FORMAT` (`json` or anything else for text)
    fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` is honoured; `<crate_name>=info` is added on top so the server's
/// own startup and warning lines are visible without any configuration.
pub fn init_tracing(crate_name: &str) -> anyhow::Result<()> {
    init_tracing_with(crate_name, LogFormat::from_env())
}

fn init_tracing_with(crate_name: &str, format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(format!("{crate_name}=info").parse()?);
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?,
    }

    Ok(())
}

/// Generate a `#[tokio::main]` entry point serving a tool server over stdio
///
/// The second argument is an expression producing the server; it is evaluated
/// after tracing is up, inside a function returning `anyhow::Result<()>`, so it
/// may use `?`.
///
/// ```rust,ignore
/// mcp_common::serve_stdio!("sqlite_explorer_mcp", SqliteExplorerServer::from_cli()?);
/// ```
#[macro_export]
macro_rules! serve_stdio {
    ($crate_name:expr, $server:expr) => {
        #[tokio::main]
        async fn main() -> anyhow::Result<()> {
            use rmcp::ServiceExt;

            $crate::init_tracing($crate_name)?;

            let server = $server;
            tracing::info!(server = $crate_name, "Serving MCP over stdio");

            let service = server.serve(rmcp::transport::stdio()).await?;
            service.waiting().await?;

            tracing::info!(server = $crate_name, "Server shutting down");
            Ok(())
        }
    };
}
