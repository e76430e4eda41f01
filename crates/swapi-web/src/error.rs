//! API error responses.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use swapi_core::SwapiError;
use thiserror::Error;

/// One entry of the `errors` array.
#[derive(Debug, Serialize)]
pub struct FieldError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub errors: Vec<FieldError>,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] SwapiError),

    #[error("{field}: {message}")]
    BadRequest { field: String, message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn bad_request(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            field: field.into(),
            message: message.into(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Core(err) => match err {
                SwapiError::Validation { .. } | SwapiError::InvalidReference { .. } => StatusCode::BAD_REQUEST,
                SwapiError::NotFound(_) | SwapiError::InvalidGlobalId(_) => StatusCode::NOT_FOUND,
                SwapiError::Database(_) | SwapiError::Io(_) | SwapiError::Config(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    fn body(&self) -> ErrorBody {
        let error = match self {
            ApiError::BadRequest { field, message } => FieldError {
                field: Some(field.clone()),
                message: message.clone(),
            },
            ApiError::Core(err) => FieldError {
                field: err.field().map(str::to_string),
                message: match err {
                    SwapiError::Validation { message, .. } | SwapiError::InvalidReference { message, .. } => {
                        message.clone()
                    }
                    other => other.to_string(),
                },
            },
        };
        ErrorBody { errors: vec![error] }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("body", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request("query", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.status_code();
        if code.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (code, Json(self.body())).into_response()
    }
}
