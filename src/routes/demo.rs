//! Demo endpoints used to exercise the request logger by hand.

use axum::{
    async_trait,
    body::{Body, Bytes},
    extract::{FromRequest, Path, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post, put},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

use crate::{error::AppError, AppState};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub received_data: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RedirectResponse {
    pub redirect: bool,
    pub destination: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub message: String,
    pub id: String,
    #[schema(value_type = Object)]
    pub updated_data: Value,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
    pub id: String,
}

/// A JSON body that may be left out. An empty body sent without a
/// `Content-Type` is absent; anything else goes through [`Json`] and keeps
/// its 400/415 rejections.
#[derive(Debug)]
pub struct OptionalJson(pub Option<Value>);

#[async_trait]
impl<S> FromRequest<S> for OptionalJson
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let headers = req.headers().clone();
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        if bytes.is_empty() && !headers.contains_key(CONTENT_TYPE) {
            return Ok(OptionalJson(None));
        }

        let mut req = Request::new(Body::from(bytes));
        *req.headers_mut() = headers;
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        Ok(OptionalJson(Some(value)))
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/hello", get(hello))
        .route("/submit", post(submit))
        .route("/error", get(error))
        .route("/not-found", get(not_found))
        .route("/redirect", get(redirect))
        .route("/update/:id", put(update))
        .route("/delete/:id", delete(remove))
}

#[utoipa::path(
    get,
    path = "/test/hello",
    tag = "testing",
    responses((status = 200, description = "Constant greeting", body = String))
)]
pub async fn hello() -> &'static str {
    "Hello World!"
}

/// Echoes the request body back with a timestamp.
#[utoipa::path(
    post,
    path = "/test/submit",
    tag = "testing",
    responses(
        (status = 200, description = "Submitted data echoed", body = SubmitResponse),
        (status = 400, description = "Malformed JSON body"),
        (status = 415, description = "Body sent without a JSON content type")
    )
)]
pub async fn submit(OptionalJson(received_data): OptionalJson) -> Json<SubmitResponse> {
    debug!(has_body = received_data.is_some(), "Demo submit received");

    Json(SubmitResponse {
        message: "Data submitted successfully".to_string(),
        timestamp: Utc::now(),
        received_data,
    })
}

#[utoipa::path(
    get,
    path = "/test/error",
    tag = "testing",
    responses((status = 500, description = "Always fails"))
)]
pub async fn error() -> Result<(), AppError> {
    Err(AppError::internal("Test error for logging"))
}

/// Fails with the same generic error as `/test/error`; it does not
/// produce a 404.
#[utoipa::path(
    get,
    path = "/test/not-found",
    tag = "testing",
    responses((status = 500, description = "Always fails with a generic error"))
)]
pub async fn not_found() -> Result<(), AppError> {
    Err(AppError::internal("Resource not found"))
}

/// Describes a redirect target without issuing a protocol-level redirect.
#[utoipa::path(
    get,
    path = "/test/redirect",
    tag = "testing",
    responses((status = 200, description = "Redirect description", body = RedirectResponse))
)]
pub async fn redirect() -> Json<RedirectResponse> {
    Json(RedirectResponse {
        redirect: true,
        destination: "/test/hello".to_string(),
    })
}

#[utoipa::path(
    put,
    path = "/test/update/{id}",
    tag = "testing",
    params(("id" = String, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Update echoed", body = UpdateResponse),
        (status = 400, description = "Malformed JSON body"),
        (status = 415, description = "Body sent without a JSON content type")
    )
)]
pub async fn update(
    Path(id): Path<String>,
    OptionalJson(body): OptionalJson,
) -> Json<UpdateResponse> {
    let updated_data = body.unwrap_or(Value::Null);

    Json(UpdateResponse {
        message: "Data updated successfully".to_string(),
        id,
        updated_data,
    })
}

#[utoipa::path(
    delete,
    path = "/test/delete/{id}",
    tag = "testing",
    params(("id" = String, Path, description = "Record identifier")),
    responses((status = 200, description = "Deletion echoed", body = DeleteResponse))
)]
pub async fn remove(Path(id): Path<String>) -> Json<DeleteResponse> {
    Json(DeleteResponse {
        message: "Data deleted successfully".to_string(),
        id,
    })
}
