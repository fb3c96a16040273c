//! Equipment (fleet) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Equipment record (drill rigs, compressors, support vehicles)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    /// Project (site) the equipment is currently allocated to
    pub project_id: Option<i32>,
    /// Equipment name / fleet tag
    pub name: String,
    /// Category (drill rig, compressor, truck...)
    pub category: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    /// Owned equipment is costed by depreciation, rented equipment by rental fee
    pub owned: bool,
    pub monthly_rental_cost: Option<f64>,
    pub monthly_depreciation: Option<f64>,
    /// Status (0=active, 1=maintenance, 2=retired)
    pub status: Option<i16>,
    /// Current hour meter reading
    pub hour_meter: Option<f64>,
    pub notes: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl Equipment {
    /// Fixed monthly cost: depreciation when owned, rental otherwise
    pub fn fixed_monthly_cost(&self) -> f64 {
        let cost = if self.owned {
            self.monthly_depreciation
        } else {
            self.monthly_rental_cost
        };
        cost.filter(|c| c.is_finite()).unwrap_or(0.0)
    }
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub project_id: Option<i32>,
    pub category: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    #[serde(default)]
    pub owned: bool,
    #[validate(range(min = 0.0))]
    pub monthly_rental_cost: Option<f64>,
    #[validate(range(min = 0.0))]
    pub monthly_depreciation: Option<f64>,
    pub hour_meter: Option<f64>,
    pub notes: Option<String>,
}

/// Update equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    pub name: Option<String>,
    pub project_id: Option<i32>,
    pub category: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub owned: Option<bool>,
    #[validate(range(min = 0.0))]
    pub monthly_rental_cost: Option<f64>,
    #[validate(range(min = 0.0))]
    pub monthly_depreciation: Option<f64>,
    pub status: Option<i16>,
    pub hour_meter: Option<f64>,
    pub notes: Option<String>,
}

/// Query parameters for listing equipment
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct EquipmentQuery {
    pub project_id: Option<i32>,
}
