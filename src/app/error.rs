use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application error type for unified error handling across the app.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Validation errors (400 Bad Request) - invalid input data
    #[error("{0}")]
    Validation(String),

    /// Authentication errors (400 Bad Request) - wrong credentials, etc.
    #[error("{0}")]
    Auth(String),

    /// Caller is signed in but not an admin of the tenant (403 Forbidden)
    #[error("{0}")]
    Forbidden(String),

    /// Record missing or outside the caller's tenant (404 Not Found)
    #[error("{0}")]
    NotFound(String),

    /// Database errors (500 Internal Server Error)
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Generic internal errors (500 Internal Server Error)
    #[error("internal error")]
    Internal,
}

impl AppError {
    pub fn not_found() -> Self {
        Self::NotFound("Not found".to_string())
    }

    pub fn admin_only() -> Self {
        Self::Forbidden("Only the organization admin can do that.".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) | AppError::Auth(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Database(err) => {
                tracing::error!(%err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(AppError::not_found().into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::admin_only().into_response().status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::Validation("bad".to_string()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
