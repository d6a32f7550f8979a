//! Unified error handling for admin.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::TicketServiceError;

/// Application-level error type for the admin API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Ticket operation failed.
    #[error(transparent)]
    Ticket(#[from] TicketServiceError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// HTTP status this error is reported with.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Ticket(TicketServiceError::Repository(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) | Self::Ticket(TicketServiceError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            Self::BadRequest(_)
            | Self::Ticket(
                TicketServiceError::UnknownStatus(_) | TicketServiceError::InvalidInput(_),
            ) => StatusCode::BAD_REQUEST,
            Self::Ticket(TicketServiceError::InvalidTransition { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Ticket(TicketServiceError::StaleStatus { .. }) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log server errors with Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        // Don't expose internal error details to clients
        let message = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, message).into_response()
    }
}
