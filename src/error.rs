use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::core::encoding::encode;
use crate::core::FilterError;

/// Errors surfaced to API clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Unknown match filter.")]
    UnknownMatchFilter(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Failed to encode response: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        ApiError::NotFound(format!("{} not found", what))
    }

    /// Name of the error kind as exposed in the envelope
    pub fn name(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BadRequest",
            ApiError::UnknownMatchFilter(_) => "UnknownMatchFilter",
            ApiError::NotFound(_) => "NotFound",
            ApiError::Encoding(_) | ApiError::Internal(_) => "InternalServerError",
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::UnknownMatchFilter(name) => Some(serde_json::json!({ "name": name })),
            _ => None,
        }
    }
}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::UnknownFilter(key) => ApiError::UnknownMatchFilter(key),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    name: &'a str,
    code: u16,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::UnknownMatchFilter(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Encoding(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let envelope = ErrorEnvelope {
            error: ErrorBody {
                name: self.name(),
                code: status.as_u16(),
                description: self.to_string(),
                details: self.details(),
            },
        };

        HttpResponse::build(status)
            .content_type("application/json")
            .body(encode(&envelope).unwrap_or_else(|_| {
                format!(
                    r#"{{"error":{{"name":"{}","code":{}}}}}"#,
                    self.name(),
                    status.as_u16()
                )
            }))
    }
}

/// Encode `value` as a 200 JSON response
pub fn json_response<T: Serialize + ?Sized>(value: &T) -> Result<HttpResponse, ApiError> {
    let body = encode(value)?;
    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}

/// Handle query string deserialization errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Query payload error on {}: {}", req.path(), err);
    ApiError::BadRequest(format!("Invalid query: {}", err)).into()
}

/// Fallback for unmatched routes
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound(format!(
        "The requested URL {} was not found on the server.",
        req.path()
    )))
}
