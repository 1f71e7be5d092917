use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Upstream fetch or decode failure. The message is the fixed plain-text
    /// body the client sees; the cause stays in the server log.
    #[error("{message}")]
    Upstream {
        message: &'static str,
        #[source]
        cause: anyhow::Error,
    },
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn upstream(message: &'static str, cause: anyhow::Error) -> Self {
        Self::Upstream { message, cause }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Upstream { message, cause } => {
                let chain = format!("{cause:#}");
                tracing::error!(error = %chain, "{message}");

                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            AppError::Internal(cause) => {
                let chain = format!("{cause:#}");
                tracing::error!(error = %chain, "request failed");

                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
        }
    }
}
