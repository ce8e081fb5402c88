use axum::{middleware::from_fn_with_state, routing::get, Router};
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer};

pub mod config;
pub mod docs;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod routes;

use crate::config::AppConfig;
use crate::logging::LogSink;
use crate::middleware::logging::{request_logging_middleware, RequestLogger};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub logger: Arc<RequestLogger>,
}

impl AppState {
    /// State whose request logger writes through `tracing`.
    pub fn new(config: Arc<AppConfig>) -> Self {
        let logger = RequestLogger::new(Arc::new(config.logging.clone()));
        Self {
            config,
            logger: Arc::new(logger),
        }
    }

    pub fn with_sink(config: Arc<AppConfig>, sink: Arc<dyn LogSink>) -> Self {
        let logger = RequestLogger::with_sink(Arc::new(config.logging.clone()), sink);
        Self {
            config,
            logger: Arc::new(logger),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    let server = &state.config.server;
    let cors = if server.cors_permissive {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/health", get(routes::health::health))
        .nest("/test", routes::demo::router())
        .merge(docs::openapi_router())
        // The request logger sits outermost so it sees timeout responses too.
        .layer(
            ServiceBuilder::new()
                .layer(from_fn_with_state(
                    state.logger.clone(),
                    request_logging_middleware,
                ))
                .layer(cors)
                .layer(TimeoutLayer::new(Duration::from_secs(server.timeout_seconds))),
        )
        .with_state(state)
}
