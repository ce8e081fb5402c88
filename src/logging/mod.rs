//! Request log records, severity classification and output sinks.

mod level;
mod record;
mod sink;

pub use level::{LogLevel, ParseLevelError};
pub use record::{format_http_log, LogRecord, PendingRequest};
pub use sink::{LogSink, TracingSink};

/// Context tag attached to every request log line.
pub const HTTP_CONTEXT: &str = "HTTP";
