use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a completed request, also used as the configured emission threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Log,
    Warn,
    Error,
}

impl LogLevel {
    /// 5xx is `Error`, 4xx is `Warn`, anything else is `Log`.
    pub fn from_status(status: u16) -> Self {
        match status {
            500..=599 => LogLevel::Error,
            400..=499 => LogLevel::Warn,
            _ => LogLevel::Log,
        }
    }

    /// Whether a request classified as `classified` is emitted when `self`
    /// is the configured threshold.
    pub fn permits(self, classified: LogLevel) -> bool {
        match self {
            LogLevel::Log => true,
            LogLevel::Warn => classified != LogLevel::Log,
            LogLevel::Error => classified == LogLevel::Error,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Log => "log",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown log level {0:?}, expected one of: log, warn, error")]
pub struct ParseLevelError(String);

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" => Ok(LogLevel::Log),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_status_class() {
        for status in [100, 101, 200, 204, 301, 304, 399, 600, 999] {
            assert_eq!(LogLevel::from_status(status), LogLevel::Log, "status {status}");
        }
        for status in [400, 404, 418, 499] {
            assert_eq!(LogLevel::from_status(status), LogLevel::Warn, "status {status}");
        }
        for status in [500, 502, 503, 599] {
            assert_eq!(LogLevel::from_status(status), LogLevel::Error, "status {status}");
        }
    }

    #[test]
    fn log_threshold_permits_everything() {
        assert!(LogLevel::Log.permits(LogLevel::Log));
        assert!(LogLevel::Log.permits(LogLevel::Warn));
        assert!(LogLevel::Log.permits(LogLevel::Error));
    }

    #[test]
    fn warn_threshold_drops_successes() {
        assert!(!LogLevel::Warn.permits(LogLevel::from_status(200)));
        assert!(LogLevel::Warn.permits(LogLevel::from_status(404)));
        assert!(LogLevel::Warn.permits(LogLevel::from_status(500)));
    }

    #[test]
    fn error_threshold_only_server_errors() {
        assert!(!LogLevel::Error.permits(LogLevel::from_status(200)));
        assert!(!LogLevel::Error.permits(LogLevel::from_status(404)));
        assert!(LogLevel::Error.permits(LogLevel::from_status(500)));
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!(" error ".parse::<LogLevel>().unwrap(), LogLevel::Error);
        assert!("debug".parse::<LogLevel>().is_err());
    }
}
