use tracing::{error, info, warn};

use super::LogLevel;

/// Destination for formatted request log lines.
///
/// Implementations must not block; they are called on the response path.
pub trait LogSink: Send + Sync {
    fn emit(&self, level: LogLevel, message: &str, context: &str);
}

/// Writes lines to the process-wide `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, level: LogLevel, message: &str, context: &str) {
        match level {
            LogLevel::Error => error!(target: "http", context, "{}", message),
            LogLevel::Warn => warn!(target: "http", context, "{}", message),
            LogLevel::Log => info!(target: "http", context, "{}", message),
        }
    }
}
