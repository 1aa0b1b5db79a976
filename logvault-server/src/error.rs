//! HTTP error mapping

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use logvault::{GatewayError, ValidationError};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Body missing, malformed or not matching the expected shape
    #[error(transparent)]
    JsonBody(#[from] JsonRejection),

    #[error(transparent)]
    QueryString(#[from] QueryRejection),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Health probe failed; the cause is logged, not returned
    #[error("Elasticsearch connection failed")]
    HealthUnavailable,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::QueryString(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::JsonBody(JsonRejection::MissingJsonContentType(_)) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            Self::JsonBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Gateway(e) if e.is_unavailable() => StatusCode::SERVICE_UNAVAILABLE,
            Self::Gateway(_) => StatusCode::BAD_GATEWAY,
            Self::HealthUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Message returned to the client. Gateway failures carry their backend cause.
    fn detail(&self) -> String {
        match self {
            Self::JsonBody(r) => r.body_text(),
            Self::QueryString(r) => r.body_text(),
            Self::Gateway(e) => format!("{}: {}", e, e.cause()),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.detail();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %detail, "Request failed");
        }

        (status, axum::Json(ErrorBody { detail })).into_response()
    }
}
