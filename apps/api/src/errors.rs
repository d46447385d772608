use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use thiserror::Error;

use crate::flash::{self, Flash, Level};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Validation and auth failures turn into a flash message plus a redirect,
/// matching the form-driven flow of the portal. Storage failures are fatal
/// for the request: no retries, plain 500.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        /// The form the user should be sent back to.
        back_to: &'static str,
    },

    #[error("authentication required")]
    Unauthorized,

    #[error("admin access required")]
    Forbidden,

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("record store error: {0}")]
    Csv(#[from] csv::Error),

    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    #[error("internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>, back_to: &'static str) -> Self {
        AppError::Validation {
            message: message.into(),
            back_to,
        }
    }
}

fn flash_redirect(level: Level, message: &str, to: &str) -> Response {
    let jar = flash::set(CookieJar::new(), Flash::new(level, message));
    (jar, Redirect::to(to)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation { message, back_to } => {
                flash_redirect(Level::Danger, message, back_to)
            }
            AppError::Unauthorized => {
                flash_redirect(Level::Warning, "Please login to upload resume", "/login")
            }
            AppError::Forbidden => flash_redirect(Level::Danger, "Admin access required", "/login"),
            AppError::Storage(e) => {
                tracing::error!("storage error: {e}");
                internal_error()
            }
            AppError::Csv(e) => {
                tracing::error!("record store error: {e}");
                internal_error()
            }
            AppError::Template(e) => {
                tracing::error!("template error: {e}");
                internal_error()
            }
            AppError::Internal(e) => {
                tracing::error!("internal error: {e:?}");
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html("<h1>Something went wrong</h1><p>An internal error occurred.</p>"),
    )
        .into_response()
}
