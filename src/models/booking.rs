//! Modelo de Booking
//!
//! Este módulo contiene el struct Booking y sus variantes para CRUD
//! operations, más el generador del código legible `BK...`. Las lecturas
//! llevan los campos denormalizados de vehículo, conductor, solicitante
//! y aprobador (LEFT JOIN resueltos en el repositorio).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Estado de la reserva
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Transiciones que sellan approved_by/approved_at
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            BookingStatus::Approved | BookingStatus::Rejected | BookingStatus::Completed
        )
    }
}

/// Booking con campos de display (vehículo, conductor, solicitante, aprobador)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookingRecord {
    pub id: i32,
    pub booking_code: String,
    pub vehicle_id: i32,
    pub driver_id: Option<i32>,
    pub requester_id: i32,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
    pub destination: String,
    pub purpose: String,
    pub passenger_count: i32,
    pub status: String,
    pub notes: Option<String>,
    pub approved_by: Option<i32>,
    pub approved_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    // Campos denormalizados de solo lectura
    pub license_plate: Option<String>,
    pub brand_model: Option<String>,
    pub driver_name: Option<String>,
    pub requester_name: Option<String>,
    pub requester_department: Option<String>,
    pub requester_position: Option<String>,
    pub approver_name: Option<String>,
}

/// Request para crear una reserva. Los datetimes llegan como string y se
/// parsean con `utils::validation::parse_datetime` (acepta datetime-local).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[validate(range(min = 1))]
    pub vehicle_id: i32,

    pub driver_id: Option<i32>,

    #[validate(length(min = 1))]
    pub start_datetime: String,

    #[validate(length(min = 1))]
    pub end_datetime: String,

    #[validate(length(min = 1, max = 200))]
    pub destination: String,

    #[validate(length(min = 1, max = 500))]
    pub purpose: String,

    #[validate(range(min = 1))]
    pub passenger_count: i32,

    pub notes: Option<String>,
}

/// Request para actualizar una reserva (parcial)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBookingRequest {
    pub status: Option<BookingStatus>,

    #[serde(default, deserialize_with = "super::double_option")]
    pub driver_id: Option<Option<i32>>,

    pub start_datetime: Option<String>,
    pub end_datetime: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub destination: Option<String>,

    #[validate(length(min = 1, max = 500))]
    pub purpose: Option<String>,

    #[validate(range(min = 1))]
    pub passenger_count: Option<i32>,

    #[serde(default, deserialize_with = "super::double_option")]
    pub notes: Option<Option<String>>,
}

/// Cambios ya parseados que el repositorio aplica con semántica de merge
#[derive(Debug, Default)]
pub struct BookingChanges {
    pub status: Option<BookingStatus>,
    pub driver_id: Option<Option<i32>>,
    pub start_datetime: Option<NaiveDateTime>,
    pub end_datetime: Option<NaiveDateTime>,
    pub destination: Option<String>,
    pub purpose: Option<String>,
    pub passenger_count: Option<i32>,
    pub notes: Option<Option<String>>,
    /// (approver_id, timestamp) - sellado junto con el cambio de estado
    pub approval: Option<(i32, NaiveDateTime)>,
}

impl BookingChanges {
    /// Sello resultante del merge: una transición de resolución sobreescribe
    /// approved_by/approved_at; cualquier otra edición conserva el sello
    /// existente intacto.
    pub fn merged_stamp(
        &self,
        current_by: Option<i32>,
        current_at: Option<NaiveDateTime>,
    ) -> (Option<i32>, Option<NaiveDateTime>) {
        match self.approval {
            Some((by, at)) => (Some(by), Some(at)),
            None => (current_by, current_at),
        }
    }
}

/// Decide el sello de aprobación de un cambio de estado: solo la resolución
/// (approved/rejected/completed) estampa quién y cuándo; pending/cancelled
/// y las ediciones sin cambio de estado no estampan nunca.
pub fn approval_stamp(
    status: Option<BookingStatus>,
    actor_id: i32,
    at: NaiveDateTime,
) -> Option<(i32, NaiveDateTime)> {
    match status {
        Some(status) if status.is_resolution() => Some((actor_id, at)),
        _ => None,
    }
}

/// Generar el código legible de una reserva: `BK` + yymmddHHMMSS.
/// La granularidad es de un segundo, así que dos creaciones en el mismo
/// segundo pueden colisionar; comportamiento conocido y sin guardas.
pub fn generate_booking_code(at: NaiveDateTime) -> String {
    format!("BK{}", at.format("%y%m%d%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_booking_code_format() {
        let at = NaiveDate::from_ymd_opt(2025, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap();
        assert_eq!(generate_booking_code(at), "BK250309140507");
    }

    #[test]
    fn test_booking_code_same_second_does_not_panic() {
        let at = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let a = generate_booking_code(at);
        let b = generate_booking_code(at);
        // Misma marca de tiempo => mismo código; la unicidad no está garantizada
        assert_eq!(a, b);
        assert_eq!(a.len(), 14);
        assert!(a.starts_with("BK"));
        assert!(a[2..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_status_resolution_set() {
        assert!(BookingStatus::Approved.is_resolution());
        assert!(BookingStatus::Rejected.is_resolution());
        assert!(BookingStatus::Completed.is_resolution());
        assert!(!BookingStatus::Pending.is_resolution());
        assert!(!BookingStatus::Cancelled.is_resolution());
    }

    #[test]
    fn test_resolution_transition_stamps_approver() {
        let at = dt_stamp();
        for status in [BookingStatus::Approved, BookingStatus::Rejected, BookingStatus::Completed] {
            assert_eq!(approval_stamp(Some(status), 9, at), Some((9, at)));
        }
    }

    #[test]
    fn test_non_resolution_never_stamps() {
        let at = dt_stamp();
        assert_eq!(approval_stamp(Some(BookingStatus::Pending), 9, at), None);
        assert_eq!(approval_stamp(Some(BookingStatus::Cancelled), 9, at), None);
        assert_eq!(approval_stamp(None, 9, at), None);
    }

    #[test]
    fn test_merge_preserves_existing_stamp_on_plain_edit() {
        let sealed_at = dt_stamp();
        // Edición sin resolución: destino nuevo, sin approval
        let changes = BookingChanges {
            destination: Some("ศาลากลาง".to_string()),
            ..Default::default()
        };
        assert_eq!(
            changes.merged_stamp(Some(4), Some(sealed_at)),
            (Some(4), Some(sealed_at))
        );
        // Y tampoco inventa un sello donde no lo había
        assert_eq!(changes.merged_stamp(None, None), (None, None));
    }

    #[test]
    fn test_merge_overwrites_stamp_on_resolution() {
        let old_at = dt_stamp();
        let new_at = old_at + chrono::Duration::hours(1);
        let changes = BookingChanges {
            status: Some(BookingStatus::Approved),
            approval: approval_stamp(Some(BookingStatus::Approved), 7, new_at),
            ..Default::default()
        };
        assert_eq!(
            changes.merged_stamp(Some(4), Some(old_at)),
            (Some(7), Some(new_at))
        );
    }

    fn dt_stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_update_request_clear_driver() {
        let req: UpdateBookingRequest = serde_json::from_str(r#"{"driver_id": null}"#).unwrap();
        assert_eq!(req.driver_id, Some(None));
        assert!(req.status.is_none());
    }
}
