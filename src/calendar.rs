//! Calendario público de reservas
//!
//! Construye la grilla mensual día por día a partir de las reservas que
//! intersectan el mes visible. Una reserva multi-día produce un evento por
//! cada día, con la etiqueta horaria derivada del sub-intervalo de ese día
//! (no del span completo). Función pura: el fetch de reservas lo hace el
//! repositorio y el handler compone ambos.
//!
//! El año se muestra en era budista (+543) y los nombres de mes y las
//! etiquetas de estado en tailandés, como en el formulario en papel que
//! acompaña a la grilla.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::models::booking::BookingRecord;

const BUDDHIST_ERA_OFFSET: i32 = 543;

const THAI_MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

/// Clasificación visual gruesa de un evento
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum CalendarBadge {
    #[serde(rename = "badge-full")]
    Full,
    #[serde(rename = "badge-morning")]
    Morning,
    #[serde(rename = "badge-afternoon")]
    Afternoon,
    #[serde(rename = "badge-pending")]
    Pending,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarEvent {
    pub title: String,
    pub subtitle: Option<String>,
    pub vehicle: Option<String>,
    pub status: String,
    pub status_label: String,
    pub time_label: String,
    pub badge: CalendarBadge,
    /// Timestamps originales de la reserva, sin recortar
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
    pub requester: Option<String>,
    pub driver: Option<String>,
    pub purpose: Option<String>,
    pub destination: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub day: u32,
    pub date: String,
    pub events: Vec<CalendarEvent>,
    pub is_today: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MonthRef {
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Navigation {
    pub prev: MonthRef,
    pub next: MonthRef,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarData {
    /// Filas de exactamente 7 celdas; `None` es relleno fuera del mes
    pub weeks: Vec<Vec<Option<CalendarDay>>>,
    pub month_name: String,
    /// Año en era budista; NO es el año gregoriano de la query
    pub year: i32,
    pub navigation: Navigation,
}

/// Resolver month/year de la query de forma laxa: valores ausentes o
/// implausibles caen al mes actual en vez de rechazar (los links de
/// navegación nunca deben romper la página).
pub fn resolve_month_year(month: Option<i32>, year: Option<i32>, today: NaiveDate) -> (u32, i32) {
    let month = match month {
        Some(m) if (1..=12).contains(&m) => m as u32,
        _ => today.month(),
    };
    let year = match year {
        Some(y) if y >= 2000 => y,
        _ => today.year(),
    };
    (month, year)
}

/// Límites del mes visible, para la query de intersección
/// `start <= month_end AND end >= month_start`.
pub fn month_bounds(month: u32, year: i32) -> (NaiveDateTime, NaiveDateTime) {
    let first = first_of_month(year, month);
    let last = last_of_month(year, month);
    (
        first.and_hms_opt(0, 0, 0).expect("valid midnight"),
        last.and_hms_opt(23, 59, 59).expect("valid end of day"),
    )
}

/// Construye la grilla del mes. `month`/`year` ya resueltos; `bookings`
/// son las reservas cuyo intervalo intersecta el mes.
pub fn build_calendar(
    month: u32,
    year: i32,
    today: NaiveDate,
    bookings: &[BookingRecord],
) -> CalendarData {
    let (month_start, month_end) = month_bounds(month, year);
    let days_in_month = last_of_month(year, month).day();

    // Eventos por día del mes, índice 1..=days_in_month
    let mut events_by_day: Vec<Vec<CalendarEvent>> =
        (0..=days_in_month).map(|_| Vec::new()).collect();

    for booking in bookings {
        let start = booking.start_datetime;
        let end = booking.end_datetime;

        // Recorte del rango de iteración al mes visible
        let loop_start = start.max(month_start);
        let loop_end = end.min(month_end);
        if loop_start > loop_end {
            continue;
        }

        let mut date = loop_start.date();
        while date <= loop_end.date() {
            let day_start = date.and_hms_opt(0, 0, 0).expect("valid midnight");
            let day_end = date.and_hms_opt(23, 59, 59).expect("valid end of day");

            // Sub-intervalo ocupado dentro de este día calendario
            let slot_start = start.max(day_start);
            let slot_end = end.min(day_end);

            events_by_day[date.day() as usize].push(build_event(booking, slot_start, slot_end));

            date = date.succ_opt().expect("date within month range");
        }
    }

    // Filas de semanas: relleno inicial según el día de semana del 1,
    // una celda por día, relleno final hasta completar 7
    let first_weekday = first_of_month(year, month).weekday().num_days_from_sunday();
    let mut weeks: Vec<Vec<Option<CalendarDay>>> = Vec::new();
    let mut week: Vec<Option<CalendarDay>> = Vec::new();

    for _ in 0..first_weekday {
        week.push(None);
    }

    for day in 1..=days_in_month {
        week.push(Some(CalendarDay {
            day,
            date: format!("{:04}-{:02}-{:02}", year, month, day),
            events: std::mem::take(&mut events_by_day[day as usize]),
            is_today: today.year() == year && today.month() == month && today.day() == day,
        }));
        if week.len() == 7 {
            weeks.push(std::mem::take(&mut week));
        }
    }
    if !week.is_empty() {
        while week.len() < 7 {
            week.push(None);
        }
        weeks.push(week);
    }

    let prev = if month == 1 {
        MonthRef { month: 12, year: year - 1 }
    } else {
        MonthRef { month: month - 1, year }
    };
    let next = if month == 12 {
        MonthRef { month: 1, year: year + 1 }
    } else {
        MonthRef { month: month + 1, year }
    };

    CalendarData {
        weeks,
        month_name: THAI_MONTHS[(month - 1) as usize].to_string(),
        year: year + BUDDHIST_ERA_OFFSET,
        navigation: Navigation { prev, next },
    }
}

fn build_event(
    booking: &BookingRecord,
    slot_start: NaiveDateTime,
    slot_end: NaiveDateTime,
) -> CalendarEvent {
    let title = if !booking.destination.is_empty() {
        booking.destination.clone()
    } else if !booking.purpose.is_empty() {
        booking.purpose.clone()
    } else {
        "การจอง".to_string()
    };

    let subtitle = if !booking.purpose.is_empty() {
        Some(booking.purpose.clone())
    } else {
        booking.requester_name.clone()
    };

    CalendarEvent {
        title,
        subtitle,
        vehicle: booking.license_plate.clone(),
        status: booking.status.clone(),
        status_label: status_label(&booking.status),
        time_label: time_label(slot_start, slot_end).to_string(),
        badge: resolve_badge(&booking.status, slot_start, slot_end),
        start_datetime: booking.start_datetime,
        end_datetime: booking.end_datetime,
        requester: booking.requester_name.clone(),
        driver: booking.driver_name.clone(),
        purpose: Some(booking.purpose.clone()),
        destination: Some(booking.destination.clone()),
    }
}

/// Etiqueta horaria del sub-intervalo del día (umbrales por hora local)
fn time_label(start: NaiveDateTime, end: NaiveDateTime) -> &'static str {
    let start_hour = start.hour();
    let end_hour = end.hour();
    if start_hour <= 8 && end_hour >= 16 {
        "เต็มวัน"
    } else if end_hour <= 12 {
        "ครึ่งวันเช้า"
    } else if start_hour >= 12 {
        "ครึ่งวันบ่าย"
    } else {
        "ช่วงเวลา"
    }
}

/// El estado domina: todo lo no aprobado lleva badge pending sin importar
/// la ventana horaria. Full es el fallback para intervalos que cruzan el
/// mediodía sin caer en las otras reglas.
fn resolve_badge(status: &str, start: NaiveDateTime, end: NaiveDateTime) -> CalendarBadge {
    if status != "approved" {
        return CalendarBadge::Pending;
    }
    let start_hour = start.hour();
    let end_hour = end.hour();
    if start_hour <= 8 && end_hour >= 16 {
        CalendarBadge::Full
    } else if end_hour <= 12 {
        CalendarBadge::Morning
    } else if start_hour >= 12 {
        CalendarBadge::Afternoon
    } else {
        CalendarBadge::Full
    }
}

fn status_label(status: &str) -> String {
    match status {
        "pending" => "รออนุมัติ",
        "approved" => "อนุมัติแล้ว",
        "rejected" => "ถูกปฏิเสธ",
        "completed" => "เสร็จสิ้น",
        "cancelled" => "ยกเลิก",
        other => other,
    }
    .to_string()
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("month already validated")
}

fn last_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("month already validated")
        .pred_opt()
        .expect("first of month has a predecessor")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(
        id: i32,
        start: NaiveDateTime,
        end: NaiveDateTime,
        status: &str,
    ) -> BookingRecord {
        BookingRecord {
            id,
            booking_code: format!("BK25010100000{}", id),
            vehicle_id: 1,
            driver_id: None,
            requester_id: 1,
            start_datetime: start,
            end_datetime: end,
            destination: "ศาลากลาง".to_string(),
            purpose: "ประชุม".to_string(),
            passenger_count: 3,
            status: status.to_string(),
            notes: None,
            approved_by: None,
            approved_at: None,
            created_at: start,
            license_plate: Some("กข 1234".to_string()),
            brand_model: Some("Toyota Commuter".to_string()),
            driver_name: None,
            requester_name: Some("Somchai".to_string()),
            requester_department: None,
            requester_position: None,
            approver_name: None,
        }
    }

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn grid_days(data: &CalendarData) -> Vec<u32> {
        data.weeks
            .iter()
            .flatten()
            .filter_map(|cell| cell.as_ref().map(|c| c.day))
            .collect()
    }

    #[test]
    fn test_grid_shape_for_all_month_lengths() {
        // (mes, año, días esperados): 28, 29, 30 y 31
        for (month, year, expected_days) in [(2, 2025, 28), (2, 2024, 29), (4, 2025, 30), (1, 2025, 31)] {
            let data = build_calendar(month, year, day(2025, 6, 15), &[]);

            let first_weekday = NaiveDate::from_ymd_opt(year, month, 1)
                .unwrap()
                .weekday()
                .num_days_from_sunday();
            let expected_weeks = (first_weekday + expected_days + 6) / 7;
            assert_eq!(data.weeks.len() as u32, expected_weeks, "month {}-{}", year, month);

            for week in &data.weeks {
                assert_eq!(week.len(), 7);
            }

            let days = grid_days(&data);
            assert_eq!(days.len() as u32, expected_days);
            // Estrictamente crecientes y consecutivos
            for (i, d) in days.iter().enumerate() {
                assert_eq!(*d, i as u32 + 1);
            }
        }
    }

    #[test]
    fn test_single_day_approved_booking_is_full_day() {
        let b = booking(1, dt(2025, 3, 10, 7, 0), dt(2025, 3, 10, 18, 0), "approved");
        let data = build_calendar(3, 2025, day(2025, 6, 15), &[b]);

        let events: Vec<&CalendarEvent> = data
            .weeks
            .iter()
            .flatten()
            .filter_map(|c| c.as_ref())
            .flat_map(|c| c.events.iter())
            .collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].badge, CalendarBadge::Full);
        assert_eq!(events[0].time_label, "เต็มวัน");
        assert_eq!(events[0].status_label, "อนุมัติแล้ว");
    }

    #[test]
    fn test_booking_clipped_to_month_boundary() {
        // Tres días, solo el 31 de marzo cae en el mes consultado
        let b = booking(1, dt(2025, 3, 31, 9, 0), dt(2025, 4, 2, 17, 0), "approved");
        let data = build_calendar(3, 2025, day(2025, 6, 15), &[b]);

        let cells_with_events: Vec<u32> = data
            .weeks
            .iter()
            .flatten()
            .filter_map(|c| c.as_ref())
            .filter(|c| !c.events.is_empty())
            .map(|c| c.day)
            .collect();
        assert_eq!(cells_with_events, vec![31]);

        // Y los tres días aparecen al consultar abril
        let b2 = booking(1, dt(2025, 3, 31, 9, 0), dt(2025, 4, 2, 17, 0), "approved");
        let april = build_calendar(4, 2025, day(2025, 6, 15), &[b2]);
        let april_days: Vec<u32> = april
            .weeks
            .iter()
            .flatten()
            .filter_map(|c| c.as_ref())
            .filter(|c| !c.events.is_empty())
            .map(|c| c.day)
            .collect();
        assert_eq!(april_days, vec![1, 2]);
    }

    #[test]
    fn test_multi_day_booking_gets_per_day_labels() {
        // Arranca al mediodía del día 10, termina a media mañana del 12
        let b = booking(1, dt(2025, 3, 10, 12, 0), dt(2025, 3, 12, 10, 0), "approved");
        let data = build_calendar(3, 2025, day(2025, 6, 15), &[b]);

        let mut by_day = std::collections::HashMap::new();
        for cell in data.weeks.iter().flatten().filter_map(|c| c.as_ref()) {
            for ev in &cell.events {
                by_day.insert(cell.day, ev.badge);
            }
        }
        assert_eq!(by_day[&10], CalendarBadge::Afternoon);
        assert_eq!(by_day[&11], CalendarBadge::Full); // día intermedio: 00:00-23:59
        assert_eq!(by_day[&12], CalendarBadge::Morning);
    }

    #[test]
    fn test_pending_status_dominates_time_window() {
        let b = booking(1, dt(2025, 3, 10, 7, 0), dt(2025, 3, 10, 18, 0), "pending");
        let data = build_calendar(3, 2025, day(2025, 6, 15), &[b]);

        let event = data
            .weeks
            .iter()
            .flatten()
            .filter_map(|c| c.as_ref())
            .flat_map(|c| c.events.iter())
            .next()
            .unwrap();
        assert_eq!(event.badge, CalendarBadge::Pending);
        // La etiqueta horaria sí describe la ventana, solo el badge cambia
        assert_eq!(event.time_label, "เต็มวัน");
    }

    #[test]
    fn test_event_keeps_unclipped_timestamps() {
        let start = dt(2025, 2, 27, 8, 0);
        let end = dt(2025, 3, 2, 17, 0);
        let b = booking(1, start, end, "approved");
        let data = build_calendar(3, 2025, day(2025, 6, 15), &[b]);

        let event = data
            .weeks
            .iter()
            .flatten()
            .filter_map(|c| c.as_ref())
            .flat_map(|c| c.events.iter())
            .next()
            .unwrap();
        assert_eq!(event.start_datetime, start);
        assert_eq!(event.end_datetime, end);
    }

    #[test]
    fn test_resolve_month_year_fallbacks() {
        let today = day(2025, 6, 15);
        assert_eq!(resolve_month_year(Some(3), Some(2025), today), (3, 2025));
        assert_eq!(resolve_month_year(Some(0), Some(2025), today), (6, 2025));
        assert_eq!(resolve_month_year(Some(13), Some(2025), today), (6, 2025));
        assert_eq!(resolve_month_year(None, None, today), (6, 2025));
        assert_eq!(resolve_month_year(Some(3), Some(1999), today), (3, 2025));
    }

    #[test]
    fn test_navigation_rolls_over_year_boundaries() {
        let jan = build_calendar(1, 2025, day(2025, 1, 1), &[]);
        assert_eq!(jan.navigation.prev.month, 12);
        assert_eq!(jan.navigation.prev.year, 2024);
        assert_eq!(jan.navigation.next.month, 2);
        assert_eq!(jan.navigation.next.year, 2025);

        let dec = build_calendar(12, 2025, day(2025, 1, 1), &[]);
        assert_eq!(dec.navigation.next.month, 1);
        assert_eq!(dec.navigation.next.year, 2026);
    }

    #[test]
    fn test_display_year_is_buddhist_era() {
        let data = build_calendar(3, 2025, day(2025, 3, 10), &[]);
        assert_eq!(data.year, 2568);
        assert_eq!(data.month_name, "มีนาคม");
        // La navegación se queda en años gregorianos para los links
        assert_eq!(data.navigation.prev.year, 2025);
    }

    #[test]
    fn test_today_flag_only_in_displayed_month() {
        let data = build_calendar(3, 2025, day(2025, 3, 10), &[]);
        let todays: Vec<u32> = data
            .weeks
            .iter()
            .flatten()
            .filter_map(|c| c.as_ref())
            .filter(|c| c.is_today)
            .map(|c| c.day)
            .collect();
        assert_eq!(todays, vec![10]);

        let other = build_calendar(4, 2025, day(2025, 3, 10), &[]);
        assert!(other
            .weeks
            .iter()
            .flatten()
            .filter_map(|c| c.as_ref())
            .all(|c| !c.is_today));
    }

    #[test]
    fn test_badge_serializes_with_css_names() {
        assert_eq!(serde_json::to_string(&CalendarBadge::Morning).unwrap(), r#""badge-morning""#);
        assert_eq!(serde_json::to_string(&CalendarBadge::Pending).unwrap(), r#""badge-pending""#);
    }

    #[test]
    fn test_midday_crossing_interval_falls_back_to_full() {
        // 10:00-14:00 no cae en ninguna regla: badge full, etiqueta genérica
        let b = booking(1, dt(2025, 3, 10, 10, 0), dt(2025, 3, 10, 14, 0), "approved");
        let data = build_calendar(3, 2025, day(2025, 6, 15), &[b]);
        let event = data
            .weeks
            .iter()
            .flatten()
            .filter_map(|c| c.as_ref())
            .flat_map(|c| c.events.iter())
            .next()
            .unwrap();
        assert_eq!(event.badge, CalendarBadge::Full);
        assert_eq!(event.time_label, "ช่วงเวลา");
    }
}
