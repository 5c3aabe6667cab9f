//! Handlers de Summary y Dashboard
//!
//! Fan-out/fan-in: las lecturas independientes se lanzan en paralelo y se
//! espera a todas; el fallo de una falla el agregado completo.

use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::{
    middleware::auth::AuthenticatedUser,
    models::{
        booking::BookingRecord, driver::DriverRecord, summary::Summary, user::PublicUser,
        user::UserRole, vehicle::VehicleRecord,
    },
    policy::{self, Action},
    repositories::{
        booking_repository::BookingRepository, driver_repository::DriverRepository,
        summary_repository::SummaryRepository, user_repository::UserRepository,
        vehicle_repository::VehicleRepository,
    },
    state::AppState,
    utils::errors::AppResult,
};

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub summary: Summary,
    pub bookings: Vec<BookingRecord>,
    pub vehicles: Vec<VehicleRecord>,
    pub drivers: Vec<DriverRecord>,
    pub users: Vec<PublicUser>,
}

pub async fn get_summary(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Summary>> {
    policy::authorize(user.role, Action::ViewSummary)?;

    let summary = SummaryRepository::new(state.pool.clone()).summary().await?;
    Ok(Json(summary))
}

/// Carga del dashboard completa: summary + listados, en paralelo.
/// El listado de usuarios solo se incluye para admin.
pub async fn get_dashboard(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> AppResult<Json<DashboardResponse>> {
    policy::authorize(user.role, Action::ViewSummary)?;

    let summary_repo = SummaryRepository::new(state.pool.clone());
    let booking_repo = BookingRepository::new(state.pool.clone());
    let vehicle_repo = VehicleRepository::new(state.pool.clone());
    let driver_repo = DriverRepository::new(state.pool.clone());
    let user_repo = UserRepository::new(state.pool.clone());

    let include_users = user.role == UserRole::Admin;
    let users_future = async {
        if include_users {
            user_repo.list().await
        } else {
            Ok(Vec::new())
        }
    };

    let (summary, bookings, vehicles, drivers, users) = tokio::try_join!(
        summary_repo.summary(),
        booking_repo.list(),
        vehicle_repo.list(),
        driver_repo.list(),
        users_future,
    )?;

    Ok(Json(DashboardResponse {
        summary,
        bookings,
        vehicles,
        drivers,
        users,
    }))
}
