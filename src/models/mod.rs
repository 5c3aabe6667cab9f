//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema PostgreSQL,
//! junto con los request/response DTOs de cada entidad.

pub mod booking;
pub mod driver;
pub mod summary;
pub mod user;
pub mod vehicle;

use serde::{Deserialize, Deserializer};

/// Deserializador para campos anulables de un PATCH parcial:
/// campo ausente => `None` (no tocar), `null` explícito => `Some(None)`
/// (limpiar), valor => `Some(Some(v))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "super::double_option")]
        notes: Option<Option<String>>,
    }

    #[test]
    fn test_double_option_missing_field() {
        let patch: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(patch.notes, None);
    }

    #[test]
    fn test_double_option_explicit_null() {
        let patch: Patch = serde_json::from_str(r#"{"notes": null}"#).unwrap();
        assert_eq!(patch.notes, Some(None));
    }

    #[test]
    fn test_double_option_value() {
        let patch: Patch = serde_json::from_str(r#"{"notes": "x"}"#).unwrap();
        assert_eq!(patch.notes, Some(Some("x".to_string())));
    }
}
