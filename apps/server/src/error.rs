use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use backoffice_core::errors::{DatabaseError, Error as CoreError, ValidationError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("Not Found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

impl ApiError {
    /// A required route or query parameter was blank.
    pub fn missing(field: &str) -> Self {
        ApiError::Core(CoreError::Validation(ValidationError::MissingField(
            field.to_string(),
        )))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Core(e) => match e {
                CoreError::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
                CoreError::Database(DatabaseError::UniqueViolation(_)) => StatusCode::CONFLICT,
                CoreError::Validation(_) => StatusCode::BAD_REQUEST,
                CoreError::ExternalApi(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Turn an absent record into a 404.
pub trait OrNotFound<T> {
    fn or_not_found(self) -> ApiResult<T>;
}

impl<T> OrNotFound<T> for backoffice_core::Result<Option<T>> {
    fn or_not_found(self) -> ApiResult<T> {
        self?.ok_or(ApiError::NotFound)
    }
}
