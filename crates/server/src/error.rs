use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared::{ErrorDetail, ShapeError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("model request failed: {0}")]
    Upstream(String),

    #[error("model did not answer within {0:?}")]
    UpstreamTimeout(Duration),

    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Upstream(err.to_string())
    }
}

/// Любая ошибка обработчика превращается в 500 с текстом в `detail`
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDetail {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}
