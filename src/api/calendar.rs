//! Calendario público
//!
//! Acceso anónimo. Los query params se parsean de forma laxa: un valor
//! ilegible cae al mes actual, nunca se rechaza la página.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    calendar::{build_calendar, month_bounds, resolve_month_year, CalendarData},
    repositories::booking_repository::BookingRepository,
    state::AppState,
    utils::errors::AppResult,
};

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub month: Option<String>,
    pub year: Option<String>,
}

pub async fn public_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<CalendarData>> {
    let month = query.month.as_deref().and_then(|m| m.parse::<i32>().ok());
    let year = query.year.as_deref().and_then(|y| y.parse::<i32>().ok());

    let today = chrono::Local::now().date_naive();
    let (month, year) = resolve_month_year(month, year, today);
    let (month_start, month_end) = month_bounds(month, year);

    let bookings = BookingRepository::new(state.pool.clone())
        .list_for_month(month_start, month_end)
        .await?;

    Ok(Json(build_calendar(month, year, today, &bookings)))
}
