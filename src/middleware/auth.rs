//! Middleware de autenticación JWT
//!
//! Extrae y verifica el token de sesión y deja la identidad del caller en
//! las extensions del request. La identidad sale completa de los claims:
//! un cambio de rol en la base no afecta a una sesión ya emitida hasta
//! que el usuario vuelve a autenticarse.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{
    models::user::UserRole,
    state::AppState,
    utils::errors::AppError,
    utils::jwt::{extract_token_from_header, verify_token, JwtConfig},
};

/// Identidad autenticada que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub full_name: String,
    pub role: UserRole,
    pub department: Option<String>,
    pub position: Option<String>,
}

/// Middleware de autenticación: rechaza con 401 antes de cualquier otro
/// chequeo si no hay token válido.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    let token = extract_token_from_header(auth_header)?;

    let jwt_config = JwtConfig::from(&state.config);
    let claims = verify_token(token, &jwt_config)?;

    let authenticated_user = AuthenticatedUser {
        id: claims.sub,
        full_name: claims.full_name,
        role: claims.role,
        department: claims.department,
        position: claims.position,
    };

    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}
