//! Repositorio de Vehicles
//!
//! Las lecturas llevan nombre y teléfono del conductor asignado
//! (referencia débil, LEFT JOIN).

use sqlx::PgPool;

use crate::models::vehicle::VehicleRecord;
use crate::utils::errors::{not_found_error, AppError};

const SELECT_VEHICLE: &str = r#"
    SELECT
        v.id, v.license_plate, v.brand_model, v.vehicle_type, v.capacity,
        v.status, v.assigned_driver_id, v.created_at,
        d.name AS driver_name,
        d.phone AS driver_phone
    FROM vehicles v
    LEFT JOIN drivers d ON d.id = v.assigned_driver_id
"#;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<VehicleRecord>, AppError> {
        let vehicles = sqlx::query_as::<_, VehicleRecord>(&format!(
            "{} ORDER BY v.created_at DESC",
            SELECT_VEHICLE
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<VehicleRecord>, AppError> {
        let vehicle = sqlx::query_as::<_, VehicleRecord>(&format!("{} WHERE v.id = $1", SELECT_VEHICLE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn create(
        &self,
        license_plate: String,
        brand_model: String,
        vehicle_type: String,
        capacity: i32,
        status: String,
        assigned_driver_id: Option<i32>,
    ) -> Result<VehicleRecord, AppError> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO vehicles (
                license_plate, brand_model, vehicle_type, capacity,
                status, assigned_driver_id, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING id
            "#,
        )
        .bind(license_plate)
        .bind(brand_model)
        .bind(vehicle_type)
        .bind(capacity)
        .bind(status)
        .bind(assigned_driver_id)
        .fetch_one(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal("Vehicle vanished after insert".to_string()))
    }

    /// Update parcial: merge contra el registro actual.
    /// `assigned_driver_id = Some(None)` desasigna al conductor.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: i32,
        license_plate: Option<String>,
        brand_model: Option<String>,
        vehicle_type: Option<String>,
        capacity: Option<i32>,
        status: Option<String>,
        assigned_driver_id: Option<Option<i32>>,
    ) -> Result<VehicleRecord, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;

        sqlx::query(
            r#"
            UPDATE vehicles SET
                license_plate = $2,
                brand_model = $3,
                vehicle_type = $4,
                capacity = $5,
                status = $6,
                assigned_driver_id = $7
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(license_plate.unwrap_or(current.license_plate))
        .bind(brand_model.unwrap_or(current.brand_model))
        .bind(vehicle_type.unwrap_or(current.vehicle_type))
        .bind(capacity.unwrap_or(current.capacity))
        .bind(status.unwrap_or(current.status))
        .bind(assigned_driver_id.unwrap_or(current.assigned_driver_id))
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Vehicle"));
        }

        Ok(())
    }
}
