//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD operations.
//! Las lecturas llevan los campos denormalizados del conductor asignado.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Estado del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    InUse,
    Maintenance,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::InUse => "in_use",
            VehicleStatus::Maintenance => "maintenance",
        }
    }
}

/// Vehicle con los campos de display del conductor asignado (LEFT JOIN)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VehicleRecord {
    pub id: i32,
    pub license_plate: String,
    pub brand_model: String,
    pub vehicle_type: String,
    pub capacity: i32,
    pub status: String,
    pub assigned_driver_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub driver_name: Option<String>,
    pub driver_phone: Option<String>,
}

/// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 20))]
    pub license_plate: String,

    #[validate(length(min = 1, max = 100))]
    pub brand_model: String,

    #[validate(length(min = 1, max = 50))]
    pub vehicle_type: String,

    #[validate(range(min = 1))]
    pub capacity: i32,

    pub status: Option<VehicleStatus>,
    pub assigned_driver_id: Option<i32>,
}

/// Request para actualizar un vehículo existente (parcial)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 20))]
    pub license_plate: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub brand_model: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub vehicle_type: Option<String>,

    #[validate(range(min = 1))]
    pub capacity: Option<i32>,

    pub status: Option<VehicleStatus>,

    // Referencia débil al conductor; null explícito la limpia
    #[serde(default, deserialize_with = "super::double_option")]
    pub assigned_driver_id: Option<Option<i32>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_string(&VehicleStatus::InUse).unwrap(), r#""in_use""#);
        let status: VehicleStatus = serde_json::from_str(r#""maintenance""#).unwrap();
        assert_eq!(status, VehicleStatus::Maintenance);
    }

    #[test]
    fn test_update_request_unassign_driver() {
        let req: UpdateVehicleRequest =
            serde_json::from_str(r#"{"assigned_driver_id": null}"#).unwrap();
        assert_eq!(req.assigned_driver_id, Some(None));
    }
}
