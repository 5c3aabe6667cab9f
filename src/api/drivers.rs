//! Handlers de Drivers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::json;
use validator::Validate;

use crate::{
    middleware::auth::AuthenticatedUser,
    models::driver::{CreateDriverRequest, DriverRecord, DriverStatus, UpdateDriverRequest},
    policy::{self, Action},
    repositories::driver_repository::DriverRepository,
    state::AppState,
    utils::errors::{not_found_error, AppError, AppResult},
    utils::validation::parse_id,
};

pub async fn list_drivers(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DriverRecord>>> {
    policy::authorize(user.role, Action::ViewDrivers)?;

    let drivers = DriverRepository::new(state.pool.clone()).list().await?;
    Ok(Json(drivers))
}

pub async fn get_driver(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DriverRecord>> {
    policy::authorize(user.role, Action::ViewDrivers)?;
    let id = parse_id(&id)?;

    let driver = DriverRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found_error("Driver"))?;

    Ok(Json(driver))
}

pub async fn create_driver(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(payload): Json<CreateDriverRequest>,
) -> AppResult<(StatusCode, Json<DriverRecord>)> {
    policy::authorize(user.role, Action::ManageDrivers)?;
    payload.validate().map_err(AppError::Validation)?;

    let driver = DriverRepository::new(state.pool.clone())
        .create(
            payload.name,
            payload.phone,
            payload.license_no,
            payload.experience_years.unwrap_or(0),
            payload.status.unwrap_or(DriverStatus::Active).as_str().to_string(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(driver)))
}

pub async fn update_driver(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateDriverRequest>,
) -> AppResult<Json<DriverRecord>> {
    policy::authorize(user.role, Action::ManageDrivers)?;
    let id = parse_id(&id)?;
    payload.validate().map_err(AppError::Validation)?;

    let driver = DriverRepository::new(state.pool.clone())
        .update(
            id,
            payload.name,
            payload.phone,
            payload.license_no,
            payload.experience_years,
            payload.status.map(|s| s.as_str().to_string()),
        )
        .await?;

    Ok(Json(driver))
}

pub async fn delete_driver(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    policy::authorize(user.role, Action::ManageDrivers)?;
    let id = parse_id(&id)?;

    DriverRepository::new(state.pool.clone()).delete(id).await?;
    Ok(Json(json!({ "message": "Deleted successfully" })))
}
