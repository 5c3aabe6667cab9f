//! Conteos del dashboard
//!
//! Registro plano que agrega los conteos independientes del store.
//! Cada conteo refleja el estado del store al momento de su propia query;
//! no hay garantía de consistencia entre ellos.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_bookings: i64,
    pub pending_bookings: i64,
    pub approved_bookings: i64,
    pub active_bookings: i64,
    pub available_vehicles: i64,
    pub inuse_vehicles: i64,
    pub maintenance_vehicles: i64,
    pub active_drivers: i64,
    pub pending_users: i64,
}
