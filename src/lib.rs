//! Backend de administración de reservas de vehículos
//!
//! CRUD con roles sobre usuarios, vehículos, conductores y reservas,
//! más el calendario mensual público.

pub mod api;
pub mod calendar;
pub mod config;
pub mod database;
pub mod middleware;
pub mod models;
pub mod policy;
pub mod repositories;
pub mod state;
pub mod utils;
