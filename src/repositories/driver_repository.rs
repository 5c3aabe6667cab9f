//! Repositorio de Drivers

use sqlx::PgPool;

use crate::models::driver::DriverRecord;
use crate::utils::errors::{not_found_error, AppError};

const SELECT_DRIVER: &str =
    "SELECT id, name, phone, license_no, experience_years, status, created_at FROM drivers";

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<DriverRecord>, AppError> {
        let drivers =
            sqlx::query_as::<_, DriverRecord>(&format!("{} ORDER BY created_at DESC", SELECT_DRIVER))
                .fetch_all(&self.pool)
                .await?;

        Ok(drivers)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<DriverRecord>, AppError> {
        let driver = sqlx::query_as::<_, DriverRecord>(&format!("{} WHERE id = $1", SELECT_DRIVER))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    pub async fn create(
        &self,
        name: String,
        phone: String,
        license_no: String,
        experience_years: i32,
        status: String,
    ) -> Result<DriverRecord, AppError> {
        let driver = sqlx::query_as::<_, DriverRecord>(
            r#"
            INSERT INTO drivers (name, phone, license_no, experience_years, status, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING id, name, phone, license_no, experience_years, status, created_at
            "#,
        )
        .bind(name)
        .bind(phone)
        .bind(license_no)
        .bind(experience_years)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(driver)
    }

    pub async fn update(
        &self,
        id: i32,
        name: Option<String>,
        phone: Option<String>,
        license_no: Option<String>,
        experience_years: Option<i32>,
        status: Option<String>,
    ) -> Result<DriverRecord, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Driver"))?;

        let driver = sqlx::query_as::<_, DriverRecord>(
            r#"
            UPDATE drivers SET
                name = $2,
                phone = $3,
                license_no = $4,
                experience_years = $5,
                status = $6
            WHERE id = $1
            RETURNING id, name, phone, license_no, experience_years, status, created_at
            "#,
        )
        .bind(id)
        .bind(name.unwrap_or(current.name))
        .bind(phone.unwrap_or(current.phone))
        .bind(license_no.unwrap_or(current.license_no))
        .bind(experience_years.unwrap_or(current.experience_years))
        .bind(status.unwrap_or(current.status))
        .fetch_one(&self.pool)
        .await?;

        Ok(driver)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Driver"));
        }

        Ok(())
    }
}
