//! Modelo de Driver

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Estado del conductor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DriverStatus {
    Active,
    Inactive,
}

impl DriverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Active => "active",
            DriverStatus::Inactive => "inactive",
        }
    }
}

/// Driver - mapea a la tabla drivers
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DriverRecord {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub license_no: String,
    pub experience_years: i32,
    pub status: String,
    pub created_at: NaiveDateTime,
}

/// Request para crear un nuevo conductor
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 20))]
    pub phone: String,

    #[validate(length(min = 1, max = 50))]
    pub license_no: String,

    #[validate(range(min = 0))]
    pub experience_years: Option<i32>,

    pub status: Option<DriverStatus>,
}

/// Request para actualizar un conductor existente (parcial)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDriverRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub phone: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub license_no: Option<String>,

    #[validate(range(min = 0))]
    pub experience_years: Option<i32>,

    pub status: Option<DriverStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults_are_optional() {
        let req: CreateDriverRequest =
            serde_json::from_str(r#"{"name":"Anan","phone":"0812345678","license_no":"DL-991"}"#)
                .unwrap();
        assert_eq!(req.experience_years, None);
        assert_eq!(req.status, None);
    }
}
