//! Handlers de autenticación
//!
//! Login con username/password contra el hash almacenado y emisión del
//! token de sesión. Usuario inexistente, inactivo o password incorrecto
//! devuelven el mismo 401 genérico, sin filtrar detalle.

use axum::{extract::State, Extension, Json};
use bcrypt::verify;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    middleware::auth::AuthenticatedUser,
    models::user::UserRole,
    repositories::user_repository::UserRepository,
    state::AppState,
    utils::errors::{AppError, AppResult},
    utils::jwt::{generate_token, JwtConfig},
};

/// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,

    #[validate(length(min = 1, max = 100))]
    pub password: String,
}

/// Identidad del caller, sin material de password
#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub id: i32,
    pub full_name: String,
    pub role: UserRole,
    pub department: Option<String>,
    pub position: Option<String>,
}

/// Response de login exitoso
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: IdentityResponse,
}

/// Handler de login
pub async fn login(
    State(state): State<AppState>,
    Json(login_data): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    login_data.validate().map_err(AppError::Validation)?;

    let repository = UserRepository::new(state.pool.clone());

    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

    let user = repository
        .find_by_username(&login_data.username)
        .await?
        .ok_or_else(invalid)?;

    // Cuenta inactiva => mismo error genérico que credenciales malas
    if user.status != "active" {
        return Err(invalid());
    }

    let password_valid = verify(&login_data.password, &user.password)
        .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;

    if !password_valid {
        return Err(invalid());
    }

    let role = parse_role(&user.role)?;

    let jwt_config = JwtConfig::from(&state.config);
    let access_token = generate_token(
        user.id,
        user.full_name.clone(),
        role,
        user.department.clone(),
        user.position.clone(),
        &jwt_config,
    )?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.config.jwt_expiration,
        user: IdentityResponse {
            id: user.id,
            full_name: user.full_name,
            role,
            department: user.department,
            position: user.position,
        },
    }))
}

/// Identidad del usuario autenticado (desde los claims de la sesión)
pub async fn me(Extension(user): Extension<AuthenticatedUser>) -> AppResult<Json<IdentityResponse>> {
    Ok(Json(IdentityResponse {
        id: user.id,
        full_name: user.full_name,
        role: user.role,
        department: user.department,
        position: user.position,
    }))
}

fn parse_role(raw: &str) -> Result<UserRole, AppError> {
    match raw {
        "admin" => Ok(UserRole::Admin),
        "approver" => Ok(UserRole::Approver),
        "user" => Ok(UserRole::User),
        other => Err(AppError::Internal(format!("Unknown role '{}' in store", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role("approver").unwrap(), UserRole::Approver);
        assert!(parse_role("root").is_err());
    }
}
