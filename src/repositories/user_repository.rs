//! Repositorio de Users
//!
//! Las lecturas públicas proyectan `PublicUser` (sin hash de password).
//! El registro completo solo se usa para login y chequeos de unicidad.

use sqlx::PgPool;

use crate::models::user::{PublicUser, User};
use crate::utils::errors::{not_found_error, AppError};

const PUBLIC_FIELDS: &str =
    "id, username, full_name, role, department, position, status, created_at";

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<PublicUser>, AppError> {
        let users = sqlx::query_as::<_, PublicUser>(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC",
            PUBLIC_FIELDS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<PublicUser>, AppError> {
        let user = sqlx::query_as::<_, PublicUser>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            PUBLIC_FIELDS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Match exacto, sensible a mayúsculas. Devuelve el registro completo
    /// (con hash) para verificación de credenciales y de unicidad.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password, full_name, role, department, position,
                   status, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        username: String,
        password_hash: String,
        full_name: String,
        role: String,
        department: Option<String>,
        position: Option<String>,
        status: String,
    ) -> Result<PublicUser, AppError> {
        let user = sqlx::query_as::<_, PublicUser>(&format!(
            r#"
            INSERT INTO users (username, password, full_name, role, department, position, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            RETURNING {}
            "#,
            PUBLIC_FIELDS
        ))
        .bind(username)
        .bind(password_hash)
        .bind(full_name)
        .bind(role)
        .bind(department)
        .bind(position)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update parcial. `password_hash` ya viene hasheado por el handler;
    /// department/position distinguen "no tocar" de "limpiar".
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: i32,
        username: Option<String>,
        password_hash: Option<String>,
        full_name: Option<String>,
        role: Option<String>,
        department: Option<Option<String>>,
        position: Option<Option<String>>,
        status: Option<String>,
    ) -> Result<PublicUser, AppError> {
        let current = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password, full_name, role, department, position,
                   status, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found_error("User"))?;

        let user = sqlx::query_as::<_, PublicUser>(&format!(
            r#"
            UPDATE users SET
                username = $2,
                password = $3,
                full_name = $4,
                role = $5,
                department = $6,
                position = $7,
                status = $8
            WHERE id = $1
            RETURNING {}
            "#,
            PUBLIC_FIELDS
        ))
        .bind(id)
        .bind(username.unwrap_or(current.username))
        .bind(password_hash.unwrap_or(current.password))
        .bind(full_name.unwrap_or(current.full_name))
        .bind(role.unwrap_or(current.role))
        .bind(department.unwrap_or(current.department))
        .bind(position.unwrap_or(current.position))
        .bind(status.unwrap_or(current.status))
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("User"));
        }

        Ok(())
    }
}
