// file: src/logging/logger.rs
// version: 2.0.0
// guid: j0k1l2m3-n4o5-6789-0123-456789jklmno

//! Logger initialization and configuration

use crate::error::KetoError;
use crate::Result;
use tracing::Instrument;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact human readable lines on stderr
    #[default]
    Compact,
    /// One JSON object per line, for log shippers
    Json,
}

/// Pick the level filter from the CLI flags.
///
/// `RUST_LOG` wins when neither flag is given.
fn level_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize the logging system.
///
/// Logs go to stderr so rendered user data on stdout stays clean.
pub fn init_logger(verbose: bool, quiet: bool, format: LogFormat) -> Result<()> {
    let filter = level_filter(verbose, quiet);

    let result = match format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).json())
            .try_init(),
    };

    result.map_err(|e| KetoError::config(format!("Failed to initialize logger: {}", e)))?;

    Ok(())
}

/// Create a scoped logger for operations
pub fn with_operation_span<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let span = tracing::info_span!("operation", name = operation);
    let _enter = span.enter();
    f()
}

/// Create an async scoped logger for operations
pub async fn with_async_operation_span<F, Fut, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = R>,
{
    let span = tracing::info_span!("operation", name = operation);
    async move { f().await }.instrument(span).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_installs_once() {
        let _ = init_logger(false, true, LogFormat::Compact);

        // Only one global subscriber per process.
        let err = init_logger(true, false, LogFormat::Json).unwrap_err();
        assert!(matches!(err, KetoError::Config(_)));
    }

    #[test]
    fn test_with_operation_span() {
        // Arrange
        let operation = "render_master";
        let mut executed = false;

        // Act
        let result = with_operation_span(operation, || {
            executed = true;
            "rendered"
        });

        // Assert
        assert!(executed);
        assert_eq!(result, "rendered");
    }

    #[tokio::test]
    async fn test_with_async_operation_span() {
        // Act
        let result = with_async_operation_span("write_output", || async { 42 }).await;

        // Assert
        assert_eq!(result, 42);
    }
}
