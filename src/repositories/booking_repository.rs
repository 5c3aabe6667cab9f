//! Repositorio de Bookings
//!
//! Acceso a datos de reservas. Todas las lecturas materializan los campos
//! de display (placa, conductor, solicitante, aprobador) vía LEFT JOIN;
//! el core nunca muta una entidad relacionada desde aquí.

use chrono::NaiveDateTime;
use sqlx::PgPool;

use crate::models::booking::{BookingChanges, BookingRecord};
use crate::utils::errors::{not_found_error, AppError};

/// Proyección con joins compartida por todas las lecturas
const SELECT_BOOKING: &str = r#"
    SELECT
        b.id, b.booking_code, b.vehicle_id, b.driver_id, b.requester_id,
        b.start_datetime, b.end_datetime, b.destination, b.purpose,
        b.passenger_count, b.status, b.notes, b.approved_by, b.approved_at,
        b.created_at,
        v.license_plate, v.brand_model,
        d.name AS driver_name,
        r.full_name AS requester_name,
        r.department AS requester_department,
        r.position AS requester_position,
        a.full_name AS approver_name
    FROM bookings b
    LEFT JOIN vehicles v ON v.id = b.vehicle_id
    LEFT JOIN drivers d ON d.id = b.driver_id
    LEFT JOIN users r ON r.id = b.requester_id
    LEFT JOIN users a ON a.id = b.approved_by
"#;

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<BookingRecord>, AppError> {
        let bookings = sqlx::query_as::<_, BookingRecord>(&format!(
            "{} ORDER BY b.start_datetime DESC",
            SELECT_BOOKING
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Reservas cuyo intervalo intersecta el mes visible:
    /// `start <= month_end AND end >= month_start`
    pub async fn list_for_month(
        &self,
        month_start: NaiveDateTime,
        month_end: NaiveDateTime,
    ) -> Result<Vec<BookingRecord>, AppError> {
        let bookings = sqlx::query_as::<_, BookingRecord>(&format!(
            "{} WHERE b.start_datetime <= $1 AND b.end_datetime >= $2 ORDER BY b.start_datetime ASC",
            SELECT_BOOKING
        ))
        .bind(month_end)
        .bind(month_start)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<BookingRecord>, AppError> {
        let booking = sqlx::query_as::<_, BookingRecord>(&format!("{} WHERE b.id = $1", SELECT_BOOKING))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        booking_code: String,
        vehicle_id: i32,
        driver_id: Option<i32>,
        requester_id: i32,
        start_datetime: NaiveDateTime,
        end_datetime: NaiveDateTime,
        destination: String,
        purpose: String,
        passenger_count: i32,
        notes: Option<String>,
    ) -> Result<BookingRecord, AppError> {
        // Toda reserva nace pending; la aprobación es una transición posterior
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO bookings (
                booking_code, vehicle_id, driver_id, requester_id,
                start_datetime, end_datetime, destination, purpose,
                passenger_count, status, notes, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'pending', $10, NOW())
            RETURNING id
            "#,
        )
        .bind(booking_code)
        .bind(vehicle_id)
        .bind(driver_id)
        .bind(requester_id)
        .bind(start_datetime)
        .bind(end_datetime)
        .bind(destination)
        .bind(purpose)
        .bind(passenger_count)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal("Booking vanished after insert".to_string()))
    }

    /// Update parcial con semántica de merge: se lee el registro actual y
    /// solo se reemplazan los campos presentes en `changes`. El sello de
    /// aprobación viaja en el mismo UPDATE que el cambio de estado.
    pub async fn update(&self, id: i32, changes: BookingChanges) -> Result<BookingRecord, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Booking"))?;

        let (approved_by, approved_at) =
            changes.merged_stamp(current.approved_by, current.approved_at);
        let status = changes
            .status
            .map(|s| s.as_str().to_string())
            .unwrap_or(current.status);
        let driver_id = changes.driver_id.unwrap_or(current.driver_id);
        let notes = changes.notes.unwrap_or(current.notes);

        sqlx::query(
            r#"
            UPDATE bookings SET
                driver_id = $2,
                start_datetime = $3,
                end_datetime = $4,
                destination = $5,
                purpose = $6,
                passenger_count = $7,
                notes = $8,
                status = $9,
                approved_by = $10,
                approved_at = $11
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(driver_id)
        .bind(changes.start_datetime.unwrap_or(current.start_datetime))
        .bind(changes.end_datetime.unwrap_or(current.end_datetime))
        .bind(changes.destination.unwrap_or(current.destination))
        .bind(changes.purpose.unwrap_or(current.purpose))
        .bind(changes.passenger_count.unwrap_or(current.passenger_count))
        .bind(notes)
        .bind(status)
        .bind(approved_by)
        .bind(approved_at)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Booking"))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Booking"));
        }

        Ok(())
    }
}
