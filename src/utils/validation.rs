//! Utilidades de validación
//!
//! Helpers de parseo y validación compartidos por los handlers.

use chrono::NaiveDateTime;

use crate::utils::errors::AppError;

/// Parsear el id de un path param. El surface HTTP exige 400 (no 422)
/// cuando el id no es un entero.
pub fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.parse::<i32>()
        .map_err(|_| AppError::BadRequest("Invalid id".to_string()))
}

/// Parsear un datetime de entrada. Acepta el formato con segundos y el
/// formato de los inputs `datetime-local` (sin segundos).
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, AppError> {
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }
    Err(AppError::Unprocessable(format!(
        "Invalid datetime '{}', expected YYYY-MM-DDTHH:MM:SS",
        value
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(parse_id("abc").is_err());
        assert!(parse_id("1.5").is_err());
        assert!(parse_id("").is_err());
    }

    #[test]
    fn test_parse_datetime_with_seconds() {
        let dt = parse_datetime("2025-03-10T08:30:00").unwrap();
        assert_eq!(dt.hour(), 8);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_datetime_without_seconds() {
        let dt = parse_datetime("2025-03-10T08:30").unwrap();
        assert_eq!(dt.second(), 0);
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        assert!(parse_datetime("10/03/2025").is_err());
        assert!(parse_datetime("").is_err());
    }
}
