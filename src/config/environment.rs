//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
}

impl EnvironmentConfig {
    /// Cargar la configuración desde variables de entorno.
    /// JWT_SECRET es obligatorio; el resto tiene defaults razonables.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?,
            jwt_expiration: env::var("JWT_EXPIRATION")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("JWT_EXPIRATION must be a valid number"))?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(environment: &str) -> EnvironmentConfig {
        EnvironmentConfig {
            environment: environment.to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            jwt_secret: "secret".to_string(),
            jwt_expiration: 86400,
        }
    }

    #[test]
    fn test_server_url_is_bindable() {
        let url = config("development").server_url();
        assert_eq!(url, "0.0.0.0:3000");
        assert!(url.parse::<std::net::SocketAddr>().is_ok());
    }

    #[test]
    fn test_development_flag() {
        assert!(config("development").is_development());
        assert!(!config("production").is_development());
    }
}
