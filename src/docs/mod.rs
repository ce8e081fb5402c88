use axum::{response::Json, routing::get, Router};
use utoipa::OpenApi;

use crate::{
    routes::{demo, health},
    AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        demo::hello,
        demo::submit,
        demo::error,
        demo::not_found,
        demo::redirect,
        demo::update,
        demo::remove,
    ),
    components(
        schemas(
            health::HealthResponse,
            demo::SubmitResponse,
            demo::RedirectResponse,
            demo::UpdateResponse,
            demo::DeleteResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "testing", description = "Demo endpoints for exercising request logging"),
    ),
    info(
        title = "HTTP Access Logger",
        description = "Request-logging middleware with a demo endpoint set",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT",
        ),
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server"),
    ),
)]
pub struct ApiDoc;

pub fn openapi_router() -> Router<AppState> {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
