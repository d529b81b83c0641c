//! Error types for the library server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Template(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to any visitor
    pub fn public_message(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::Conflict(msg) => msg.clone(),
            AppError::Database(_) => "Database error".to_string(),
            AppError::Template(_) | AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

/// Error details carried to the error page renderer through response extensions
#[derive(Debug, Clone)]
pub struct ErrorPage {
    pub status: StatusCode,
    pub message: String,
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::Template(e) => tracing::error!("Template error: {:#}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            AppError::NotFound(msg) => tracing::debug!("Not found: {}", msg),
            AppError::Conflict(msg) => tracing::debug!("Conflict: {}", msg),
        }

        let page = ErrorPage {
            status,
            message: self.public_message(),
            detail: format!("{:?}", self),
        };

        let mut response = (status, page.message.clone()).into_response();
        response.extensions_mut().insert(page);
        response
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
