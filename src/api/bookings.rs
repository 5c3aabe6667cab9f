//! Handlers de Bookings
//!
//! CRUD de reservas. La creación asigna status pending, code `BK...` y
//! requester = caller; la transición a approved/rejected/completed exige
//! capacidad de aprobador y sella approved_by/approved_at.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::json;
use validator::Validate;

use crate::{
    middleware::auth::AuthenticatedUser,
    models::booking::{
        approval_stamp, generate_booking_code, BookingChanges, BookingRecord,
        CreateBookingRequest, UpdateBookingRequest,
    },
    policy::{self, Action},
    repositories::booking_repository::BookingRepository,
    state::AppState,
    utils::errors::{not_found_error, AppError, AppResult},
    utils::validation::{parse_datetime, parse_id},
};

pub async fn list_bookings(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BookingRecord>>> {
    policy::authorize(user.role, Action::ViewBookings)?;

    let bookings = BookingRepository::new(state.pool.clone()).list().await?;
    Ok(Json(bookings))
}

pub async fn get_booking(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookingRecord>> {
    policy::authorize(user.role, Action::ViewBookings)?;
    let id = parse_id(&id)?;

    let booking = BookingRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found_error("Booking"))?;

    Ok(Json(booking))
}

pub async fn create_booking(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingRecord>)> {
    policy::authorize(user.role, Action::CreateBooking)?;
    payload.validate().map_err(AppError::Validation)?;

    let start = parse_datetime(&payload.start_datetime)?;
    let end = parse_datetime(&payload.end_datetime)?;

    let now = chrono::Local::now().naive_local();
    let booking = BookingRepository::new(state.pool.clone())
        .create(
            generate_booking_code(now),
            payload.vehicle_id,
            payload.driver_id,
            user.id,
            start,
            end,
            payload.destination,
            payload.purpose,
            payload.passenger_count,
            payload.notes,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn update_booking(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateBookingRequest>,
) -> AppResult<Json<BookingRecord>> {
    let id = parse_id(&id)?;
    let repository = BookingRepository::new(state.pool.clone());

    repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found_error("Booking"))?;

    payload.validate().map_err(AppError::Validation)?;

    // Solo la resolución (approved/rejected/completed) está restringida;
    // se sella quién y cuándo en el mismo update
    if payload.status.is_some_and(|s| s.is_resolution()) {
        policy::authorize(user.role, Action::ApproveBooking)?;
    }
    let approval = approval_stamp(payload.status, user.id, chrono::Local::now().naive_local());

    let changes = BookingChanges {
        status: payload.status,
        driver_id: payload.driver_id,
        start_datetime: payload.start_datetime.as_deref().map(parse_datetime).transpose()?,
        end_datetime: payload.end_datetime.as_deref().map(parse_datetime).transpose()?,
        destination: payload.destination,
        purpose: payload.purpose,
        passenger_count: payload.passenger_count,
        notes: payload.notes,
        approval,
    };

    let booking = repository.update(id, changes).await?;
    Ok(Json(booking))
}

pub async fn delete_booking(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    // Cualquier rol autenticado puede borrar cualquier reserva;
    // gap conocido del producto, mantenido tal cual
    policy::authorize(user.role, Action::DeleteBooking)?;
    let id = parse_id(&id)?;

    BookingRepository::new(state.pool.clone()).delete(id).await?;
    Ok(Json(json!({ "message": "Deleted successfully" })))
}
