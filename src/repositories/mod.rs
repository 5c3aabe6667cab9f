//! Repositorios de acceso a datos
//!
//! Un repositorio por entidad; los joins de display se resuelven aquí.

pub mod booking_repository;
pub mod driver_repository;
pub mod summary_repository;
pub mod user_repository;
pub mod vehicle_repository;
