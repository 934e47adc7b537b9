use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, RuntimeErr, SqlErr, sqlx};
use serde_json::json;
use strum_macros::IntoStaticStr;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error, IntoStaticStr)]
pub enum AppError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid configuration for {key}: {message}")]
    Config { key: String, message: String },
}

impl AppError {
    pub fn user_not_found(id: i32) -> Self {
        AppError::NotFound { entity: "User", id }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::ConstraintViolation(_) => StatusCode::CONFLICT,
            AppError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Storage(_) | AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Variant name, e.g. `"NotFound"`.
    pub fn code(&self) -> &'static str {
        self.into()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg))
            | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                return AppError::ConstraintViolation(msg);
            }
            _ => {}
        }

        match &err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
                AppError::StorageUnavailable(err.to_string())
            }
            DbErr::Query(RuntimeErr::SqlxError(e)) | DbErr::Exec(RuntimeErr::SqlxError(e))
                if is_connection_loss(e) =>
            {
                AppError::StorageUnavailable(err.to_string())
            }
            _ => AppError::Storage(err.to_string()),
        }
    }
}

/// Failures of the link or the pool rather than of the statement.
fn is_connection_loss(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(code = self.code(), "{}", self);
        } else {
            tracing::debug!(code = self.code(), "{}", self);
        }

        // Storage internals stay in the log.
        let message = match &self {
            AppError::Storage(_) | AppError::Config { .. } => "Internal Server Error".to_string(),
            other => other.to_string(),
        };

        (
            status,
            Json(json!({
                "statusCode": status.as_u16(),
                "error": status.canonical_reason().unwrap_or("Unknown"),
                "code": self.code(),
                "message": message,
                "timestamp": chrono::Utc::now().to_rfc3339(),
            })),
        )
            .into_response()
    }
}
