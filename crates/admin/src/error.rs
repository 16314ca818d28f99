//! Unified error handling for the panel.
//!
//! Screen-level failures render `error.html`: the message as-is plus a link
//! back to the panel. Navigation and lookup errors never reach the backend.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use karam_core::{StoreId, StoreIdError};

use crate::db::RepositoryError;
use crate::routes::render;

/// Application-level error type for the panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend call failed.
    #[error("{0}")]
    Backend(#[from] RepositoryError),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Missing or malformed navigation parameter.
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// The error a screen shows when its store doesn't exist.
    #[must_use]
    pub fn store_not_found(id: StoreId) -> Self {
        Self::NotFound(format!("No se encontró la tienda con ID {id}."))
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Backend(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<StoreIdError> for AppError {
    fn from(err: StoreIdError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

/// Full-page error template.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Backend(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Panel request error"
            );
        } else {
            tracing::warn!(error = %self, "Panel request rejected");
        }

        let status = self.status();
        let template = ErrorTemplate {
            title: "Error".to_string(),
            message: self.to_string(),
        };
        (status, render(&template)).into_response()
    }
}
