use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::db::StoreError;

/// Errors that reach the HTTP boundary. Both variants render as plain text.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    /// `message` is what the client sees; `source` is only logged.
    #[error("{message}")]
    Store {
        message: String,
        #[source]
        source: StoreError,
    },
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn product_not_found(id: i32) -> Self {
        AppError::NotFound(format!("Product with id {} not found", id))
    }

    pub fn store(source: StoreError, message: impl Into<String>) -> Self {
        AppError::Store {
            message: message.into(),
            source,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
            AppError::Store { message, source } => {
                error!(error = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}

/// Lets handlers write `.map_err(store_err(...))` on repository calls.
pub fn store_err(message: impl Into<String>) -> impl FnOnce(StoreError) -> AppError {
    let message = message.into();
    move |source| AppError::store(source, message)
}
