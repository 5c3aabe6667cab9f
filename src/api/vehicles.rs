//! Handlers de Vehicles
//!
//! Lectura abierta a cualquier rol autenticado; escritura solo admin.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::json;
use validator::Validate;

use crate::{
    middleware::auth::AuthenticatedUser,
    models::vehicle::{CreateVehicleRequest, UpdateVehicleRequest, VehicleRecord, VehicleStatus},
    policy::{self, Action},
    repositories::vehicle_repository::VehicleRepository,
    state::AppState,
    utils::errors::{not_found_error, AppError, AppResult},
    utils::validation::parse_id,
};

pub async fn list_vehicles(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<VehicleRecord>>> {
    policy::authorize(user.role, Action::ViewVehicles)?;

    let vehicles = VehicleRepository::new(state.pool.clone()).list().await?;
    Ok(Json(vehicles))
}

pub async fn get_vehicle(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<VehicleRecord>> {
    policy::authorize(user.role, Action::ViewVehicles)?;
    let id = parse_id(&id)?;

    let vehicle = VehicleRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found_error("Vehicle"))?;

    Ok(Json(vehicle))
}

pub async fn create_vehicle(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(payload): Json<CreateVehicleRequest>,
) -> AppResult<(StatusCode, Json<VehicleRecord>)> {
    policy::authorize(user.role, Action::ManageVehicles)?;
    payload.validate().map_err(AppError::Validation)?;

    let status = payload.status.unwrap_or(VehicleStatus::Available);

    let vehicle = VehicleRepository::new(state.pool.clone())
        .create(
            payload.license_plate,
            payload.brand_model,
            payload.vehicle_type,
            payload.capacity,
            status.as_str().to_string(),
            payload.assigned_driver_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(vehicle)))
}

pub async fn update_vehicle(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateVehicleRequest>,
) -> AppResult<Json<VehicleRecord>> {
    policy::authorize(user.role, Action::ManageVehicles)?;
    let id = parse_id(&id)?;
    payload.validate().map_err(AppError::Validation)?;

    let vehicle = VehicleRepository::new(state.pool.clone())
        .update(
            id,
            payload.license_plate,
            payload.brand_model,
            payload.vehicle_type,
            payload.capacity,
            payload.status.map(|s| s.as_str().to_string()),
            payload.assigned_driver_id,
        )
        .await?;

    Ok(Json(vehicle))
}

pub async fn delete_vehicle(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    policy::authorize(user.role, Action::ManageVehicles)?;
    let id = parse_id(&id)?;

    VehicleRepository::new(state.pool.clone()).delete(id).await?;
    Ok(Json(json!({ "message": "Deleted successfully" })))
}
