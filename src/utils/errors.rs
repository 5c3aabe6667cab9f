//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unprocessable entity: {0}")]
    Unprocessable(String),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Todos los errores se serializan como `{ "message": ... }`.
        // Los detalles internos (SQL, hashing) solo van al log.
        let (status, message) = match self {
            AppError::Database(e) => {
                tracing::error!("database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while accessing the database".to_string(),
                )
            }

            AppError::Validation(e) => {
                (StatusCode::UNPROCESSABLE_ENTITY, format_validation_errors(&e))
            }

            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),

            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),

            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),

            AppError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),

            AppError::Hash(msg) => {
                tracing::error!("hash error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while processing credentials".to_string(),
                )
            }

            AppError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Aplana los errores del crate `validator` a un mensaje legible,
/// sin stack traces ni estructuras internas.
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    if fields.is_empty() {
        "The provided data is invalid".to_string()
    } else {
        format!("Invalid value for field(s): {}", fields.join(", "))
    }
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str) -> AppError {
    AppError::NotFound(format!("{} not found", resource))
}

/// Función helper para crear errores de conflicto
pub fn conflict_error(resource: &str, field: &str) -> AppError {
    AppError::Conflict(format!("{} with this {} already exists", resource, field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error_message() {
        let err = not_found_error("Booking");
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Booking not found"));
    }

    #[test]
    fn test_conflict_error_message() {
        let err = conflict_error("User", "username");
        assert!(matches!(err, AppError::Conflict(ref m) if m.contains("username")));
    }
}
