//! Utilidades JWT
//!
//! Este módulo contiene funciones helper para la emisión y verificación
//! del token de sesión firmado. La identidad completa (id, nombre, rol,
//! departamento, posición) viaja dentro de los claims: el rol es inmutable
//! durante la vida del token.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    config::environment::EnvironmentConfig,
    models::user::UserRole,
    utils::errors::AppError,
};

/// Claims del token de sesión
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: i32,
    pub full_name: String,
    pub role: UserRole,
    pub department: Option<String>,
    pub position: Option<String>,
    pub exp: usize,
    pub iat: usize,
}

/// Configuración de JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration: u64,
}

impl From<&EnvironmentConfig> for JwtConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expiration: config.jwt_expiration,
        }
    }
}

/// Generar el token de sesión para un usuario autenticado
pub fn generate_token(
    user_id: i32,
    full_name: String,
    role: UserRole,
    department: Option<String>,
    position: Option<String>,
    config: &JwtConfig,
) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::seconds(config.expiration as i64);

    let claims = SessionClaims {
        sub: user_id,
        full_name,
        role,
        department,
        position,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let encoding_key = EncodingKey::from_secret(config.secret.as_ref());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Internal(format!("Error generating token: {}", e)))
}

/// Verificar y decodificar el token de sesión
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<SessionClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(config.secret.as_ref());

    let token_data = decode::<SessionClaims>(token, &decoding_key, &Validation::default())
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

    Ok(token_data.claims)
}

/// Extraer token del header Authorization
pub fn extract_token_from_header(auth_header: &str) -> Result<&str, AppError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Authorization header must be 'Bearer <token>'".to_string()))?;

    if token.is_empty() {
        return Err(AppError::Unauthorized("Token cannot be empty".to_string()));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiration: 3600,
        }
    }

    #[test]
    fn test_token_roundtrip_preserves_identity() {
        let config = test_config();
        let token = generate_token(
            7,
            "Somchai P.".to_string(),
            UserRole::Approver,
            Some("Logistics".to_string()),
            None,
            &config,
        )
        .unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.full_name, "Somchai P.");
        assert_eq!(claims.role, UserRole::Approver);
        assert_eq!(claims.department.as_deref(), Some("Logistics"));
        assert_eq!(claims.position, None);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let config = test_config();
        let token = generate_token(1, "X".to_string(), UserRole::User, None, None, &config).unwrap();

        let other = JwtConfig {
            secret: "other-secret".to_string(),
            expiration: 3600,
        };
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn test_extract_token_from_header() {
        assert_eq!(extract_token_from_header("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(extract_token_from_header("Basic abc").is_err());
        assert!(extract_token_from_header("Bearer ").is_err());
    }
}
