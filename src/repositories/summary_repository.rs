//! Repositorio de conteos del dashboard
//!
//! Lanza los nueve conteos en paralelo y los espera todos; si uno falla,
//! falla el agregado completo (no hay resumen parcialmente poblado).

use chrono::NaiveDateTime;
use sqlx::PgPool;

use crate::models::summary::Summary;
use crate::utils::errors::AppError;

/// Corte de actividad en hora de pared local, la misma fuente de reloj
/// que escribe start/end_datetime y approved_at.
fn active_cutoff() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

pub struct SummaryRepository {
    pool: PgPool,
}

impl SummaryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn summary(&self) -> Result<Summary, AppError> {
        let now = active_cutoff();

        let (
            total_bookings,
            pending_bookings,
            approved_bookings,
            active_bookings,
            available_vehicles,
            inuse_vehicles,
            maintenance_vehicles,
            active_drivers,
            pending_users,
        ) = tokio::try_join!(
            self.count("SELECT COUNT(*) FROM bookings", None),
            self.count("SELECT COUNT(*) FROM bookings WHERE status = $1", Some("pending")),
            self.count("SELECT COUNT(*) FROM bookings WHERE status = $1", Some("approved")),
            self.count_active_bookings(now),
            self.count("SELECT COUNT(*) FROM vehicles WHERE status = $1", Some("available")),
            self.count("SELECT COUNT(*) FROM vehicles WHERE status = $1", Some("in_use")),
            self.count("SELECT COUNT(*) FROM vehicles WHERE status = $1", Some("maintenance")),
            self.count("SELECT COUNT(*) FROM drivers WHERE status = $1", Some("active")),
            self.count("SELECT COUNT(*) FROM users WHERE status = $1", Some("inactive")),
        )?;

        Ok(Summary {
            total_bookings,
            pending_bookings,
            approved_bookings,
            active_bookings,
            available_vehicles,
            inuse_vehicles,
            maintenance_vehicles,
            active_drivers,
            pending_users,
        })
    }

    async fn count(&self, sql: &str, status: Option<&str>) -> Result<i64, AppError> {
        let mut query = sqlx::query_scalar::<_, i64>(sql);
        if let Some(status) = status {
            query = query.bind(status);
        }
        let count = query.fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// Activas = aprobadas y que todavía no terminaron
    async fn count_active_bookings(&self, now: NaiveDateTime) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM bookings WHERE status = 'approved' AND end_datetime >= $1",
        )
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_cutoff_is_local_wall_clock() {
        // El corte debe salir del mismo reloj que escribe los timestamps
        // de las reservas (hora de pared local, no UTC)
        let expected = chrono::Local::now().naive_local();
        let cutoff = active_cutoff();
        let drift = (cutoff - expected).num_seconds().abs();
        assert!(drift < 2, "cutoff drifted {}s from local wall clock", drift);
    }
}
