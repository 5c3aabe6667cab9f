//! API endpoints
//!
//! Este módulo contiene los handlers y el armado del router. El calendario
//! público y el login quedan fuera del middleware de autenticación; todo
//! lo demás exige token.

pub mod auth;
pub mod bookings;
pub mod calendar;
pub mod drivers;
pub mod summary;
pub mod users;
pub mod vehicles;

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};

use crate::middleware::auth::auth_middleware;
use crate::state::AppState;

/// Router principal de la API
pub fn create_api_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/bookings", get(bookings::list_bookings))
        .route("/api/bookings", post(bookings::create_booking))
        .route("/api/bookings/:id", get(bookings::get_booking))
        .route("/api/bookings/:id", patch(bookings::update_booking))
        .route("/api/bookings/:id", delete(bookings::delete_booking))
        .route("/api/vehicles", get(vehicles::list_vehicles))
        .route("/api/vehicles", post(vehicles::create_vehicle))
        .route("/api/vehicles/:id", get(vehicles::get_vehicle))
        .route("/api/vehicles/:id", patch(vehicles::update_vehicle))
        .route("/api/vehicles/:id", delete(vehicles::delete_vehicle))
        .route("/api/drivers", get(drivers::list_drivers))
        .route("/api/drivers", post(drivers::create_driver))
        .route("/api/drivers/:id", get(drivers::get_driver))
        .route("/api/drivers/:id", patch(drivers::update_driver))
        .route("/api/drivers/:id", delete(drivers::delete_driver))
        .route("/api/users", get(users::list_users))
        .route("/api/users", post(users::create_user))
        .route("/api/users/:id", get(users::get_user))
        .route("/api/users/:id", patch(users::update_user))
        .route("/api/users/:id", delete(users::delete_user))
        .route("/api/summary", get(summary::get_summary))
        .route("/api/dashboard", get(summary::get_dashboard))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        // Calendario público, acceso anónimo
        .route("/", get(calendar::public_calendar))
        .route("/calendar", get(calendar::public_calendar))
        .route("/api/auth/login", post(auth::login))
        .merge(protected)
}
