#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header::USER_AGENT, Method, Request};
use http_access_logger::config::{AppConfig, LoggingConfig};
use http_access_logger::logging::{LogLevel, LogSink};
use http_access_logger::{create_app, AppState};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct Line {
    pub level: LogLevel,
    pub message: String,
    pub context: String,
}

/// Sink that keeps every emitted line in memory.
#[derive(Default)]
pub struct CapturingSink {
    lines: Mutex<Vec<Line>>,
}

impl CapturingSink {
    pub fn lines(&self) -> Vec<Line> {
        self.lines.lock().unwrap().clone()
    }
}

impl LogSink for CapturingSink {
    fn emit(&self, level: LogLevel, message: &str, context: &str) {
        self.lines.lock().unwrap().push(Line {
            level,
            message: message.to_string(),
            context: context.to_string(),
        });
    }
}

pub fn app_with(logging: LoggingConfig) -> (axum::Router, Arc<CapturingSink>) {
    let sink = Arc::new(CapturingSink::default());
    let config = AppConfig {
        logging,
        ..AppConfig::default()
    };
    let app = create_app(AppState::with_sink(Arc::new(config), sink.clone()));
    (app, sink)
}

pub fn get_req(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(USER_AGENT, "integration-test/1.0")
        .body(Body::empty())
        .unwrap()
}

pub fn json_req(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_bytes(resp: axum::response::Response) -> Vec<u8> {
    to_bytes(resp.into_body(), 1024 * 1024).await.unwrap().to_vec()
}

pub async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(resp).await).unwrap()
}

/// Pulls the `<n>ms` duration token out of a formatted log line.
pub fn duration_of(line: &str) -> u64 {
    line.split_whitespace()
        .find_map(|token| token.strip_suffix("ms")?.parse().ok())
        .expect("log line carries a duration")
}
