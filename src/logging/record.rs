use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write;
use std::net::IpAddr;
use std::time::Instant;

/// A request that has been admitted for logging and is awaiting its response.
#[derive(Debug)]
pub struct PendingRequest {
    method: String,
    path: String,
    user_agent: Option<String>,
    ip: Option<IpAddr>,
    started: Instant,
}

impl PendingRequest {
    pub fn start(
        method: impl Into<String>,
        path: impl Into<String>,
        user_agent: Option<String>,
        ip: Option<IpAddr>,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            user_agent,
            ip,
            started: Instant::now(),
        }
    }

    /// Consumes the pending state; the returned record is never modified afterwards.
    pub fn complete(self, status_code: u16) -> LogRecord {
        LogRecord {
            method: self.method,
            path: self.path,
            status_code,
            duration_ms: self.started.elapsed().as_millis() as u64,
            user_agent: self.user_agent,
            ip: self.ip.map(|ip| ip.to_string()),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogRecord {
    pub method: String,
    pub path: String,
    pub status_code: u16,
    pub duration_ms: u64,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Renders a record as one line:
/// `[2026-10-16T09:30:00.123Z] GET /test/hello 200 3ms UA="curl/8.5.0" IP=127.0.0.1`
pub fn format_http_log(record: &LogRecord) -> String {
    let mut line = String::with_capacity(96);
    match write_line(&mut line, record) {
        Ok(()) => line,
        Err(_) => format!("{} {} {}", record.method, record.path, record.status_code),
    }
}

fn write_line(out: &mut String, record: &LogRecord) -> std::fmt::Result {
    write!(
        out,
        "[{}] {} {} {} {}ms",
        record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        record.method,
        record.path,
        record.status_code,
        record.duration_ms,
    )?;
    if let Some(agent) = &record.user_agent {
        write!(out, " UA={:?}", agent)?;
    }
    if let Some(ip) = &record.ip {
        write!(out, " IP={}", ip)?;
    }
    Ok(())
}
