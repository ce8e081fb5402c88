use axum::{
    body::{Body, Bytes, HttpBody},
    extract::{ConnectInfo, Request, State},
    http::header::USER_AGENT,
    middleware::Next,
    response::Response,
};
use http_body::{Frame, SizeHint};
use std::{
    net::SocketAddr,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use crate::{
    config::LoggingConfig,
    logging::{format_http_log, LogLevel, LogSink, PendingRequest, TracingSink, HTTP_CONTEXT},
};

/// Decides whether and how each request is logged.
pub struct RequestLogger {
    config: Arc<LoggingConfig>,
    sink: Arc<dyn LogSink>,
}

impl RequestLogger {
    pub fn new(config: Arc<LoggingConfig>) -> Self {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    pub fn with_sink(config: Arc<LoggingConfig>, sink: Arc<dyn LogSink>) -> Self {
        Self { config, sink }
    }

    /// Starts timing `request`, or returns `None` when it is not logged at all.
    pub fn begin(&self, request: &Request) -> Option<PendingRequest> {
        let path = request.uri().path();
        if !self.config.enabled || self.config.is_excluded(path) {
            return None;
        }

        let user_agent = self.config.include_user_agent.then(|| {
            request
                .headers()
                .get(USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string()
        });

        let ip = if self.config.include_ip {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip())
        } else {
            None
        };

        Some(PendingRequest::start(
            request.method().as_str(),
            path,
            user_agent,
            ip,
        ))
    }

    /// Builds the record for a finished response and emits it if the
    /// configured level allows.
    pub fn finish(&self, pending: PendingRequest, status: u16) {
        let record = pending.complete(status);
        let severity = LogLevel::from_status(record.status_code);

        if !self.config.level.permits(severity) {
            return;
        }

        let message = format_http_log(&record);
        self.sink.emit(severity, &message, HTTP_CONTEXT);
    }
}

/// Times the request and hands the outcome to the [`RequestLogger`].
///
/// The clock stops when the response body has been fully sent, or when the
/// body is dropped early (client disconnect). Headers, status and body bytes
/// are passed back untouched.
pub async fn request_logging_middleware(
    State(logger): State<Arc<RequestLogger>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(pending) = logger.begin(&request) else {
        return next.run(request).await;
    };

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let (parts, body) = response.into_parts();

    let body = LoggedBody {
        inner: body,
        status,
        completion: Some((logger, pending)),
    };
    Response::from_parts(parts, Body::new(body))
}

/// Response body that reports to the logger at end of stream.
struct LoggedBody {
    inner: Body,
    status: u16,
    completion: Option<(Arc<RequestLogger>, PendingRequest)>,
}

impl LoggedBody {
    fn complete(&mut self) {
        if let Some((logger, pending)) = self.completion.take() {
            logger.finish(pending, self.status);
        }
    }
}

impl HttpBody for LoggedBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();
        let poll = Pin::new(&mut this.inner).poll_frame(cx);
        if let Poll::Ready(None | Some(Err(_))) = &poll {
            this.complete();
        }
        poll
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}

impl Drop for LoggedBody {
    fn drop(&mut self) {
        self.complete();
    }
}
