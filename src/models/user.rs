//! Modelo de User
//!
//! Este módulo contiene el struct User y sus variantes para CRUD operations.
//! El hash de password nunca sale en una response: las lecturas públicas
//! usan `PublicUser`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Rol del usuario - no es una jerarquía lineal, cada acción tiene su
/// propia tabla de capacidades (ver `policy`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Approver,
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Approver => "approver",
            UserRole::User => "user",
        }
    }
}

/// Estado de la cuenta
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

/// User completo - mapea a la tabla users. Solo se usa internamente
/// (login, chequeo de unicidad); nunca se serializa hacia el cliente.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub role: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

/// Proyección pública de un usuario, sin material de password
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PublicUser {
    pub id: i32,
    pub username: String,
    pub full_name: String,
    pub role: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

/// Request para crear un nuevo usuario
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,

    #[validate(length(min = 1, max = 100))]
    pub password: String,

    #[validate(length(min = 1, max = 100))]
    pub full_name: String,

    pub role: UserRole,

    pub department: Option<String>,
    pub position: Option<String>,
    pub status: Option<UserStatus>,
}

/// Request para actualizar un usuario existente (parcial)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub password: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub full_name: Option<String>,

    pub role: Option<UserRole>,

    #[serde(default, deserialize_with = "super::double_option")]
    pub department: Option<Option<String>>,

    #[serde(default, deserialize_with = "super::double_option")]
    pub position: Option<Option<String>>,

    pub status: Option<UserStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&UserRole::Approver).unwrap(), r#""approver""#);
        let role: UserRole = serde_json::from_str(r#""admin""#).unwrap();
        assert_eq!(role, UserRole::Admin);
    }

    #[test]
    fn test_create_request_rejects_unknown_role() {
        let json = r#"{"username":"a","password":"b","full_name":"c","role":"superuser"}"#;
        assert!(serde_json::from_str::<CreateUserRequest>(json).is_err());
    }

    #[test]
    fn test_update_request_department_clear() {
        let req: UpdateUserRequest = serde_json::from_str(r#"{"department": null}"#).unwrap();
        assert_eq!(req.department, Some(None));
        assert_eq!(req.position, None);
    }
}
