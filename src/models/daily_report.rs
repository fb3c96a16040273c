//! Daily drilling report (BDP) model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::enums::ReportStatus;
use crate::metrics::duration::parse_clock;

/// Stoppage event within a shift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Occurrence {
    /// Occurrence type label (e.g. "Mecânica", "Refeição")
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Occurrence type is required"))]
    pub occurrence_type: String,
    /// Start time (HH:mm)
    #[validate(custom(function = "validate_clock"))]
    pub time_start: String,
    /// End time (HH:mm)
    #[validate(custom(function = "validate_clock"))]
    pub time_end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Consumable usage line (diesel, water, grease...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct SupplyLine {
    /// Supply type label (e.g. "Diesel (L)")
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Supply type is required"))]
    pub supply_type: String,
    #[validate(range(min = 0.0, message = "Quantity must not be negative"))]
    pub quantity: f64,
}

/// Daily report record, one per equipment-shift-day
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DailyReport {
    pub id: i32,
    pub project_id: i32,
    pub equipment_id: Option<i32>,
    pub report_date: NaiveDate,
    pub operator: Option<String>,
    /// Shift label (day/night)
    pub shift: Option<String>,
    /// Drilled meters
    pub total_meters: Option<f64>,
    /// Hour meter delta reported by the operator
    pub total_hours: Option<f64>,
    /// Scheduled shift start (HH:mm)
    pub start_time: Option<String>,
    /// Scheduled shift end (HH:mm)
    pub end_time: Option<String>,
    #[schema(value_type = Vec<Occurrence>)]
    pub occurrences: Json<Vec<Occurrence>>,
    #[schema(value_type = Vec<SupplyLine>)]
    pub supplies: Json<Vec<SupplyLine>>,
    /// Status (0=pending, 1=approved, 2=rejected)
    pub status: i16,
    pub notes: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl DailyReport {
    pub fn status(&self) -> ReportStatus {
        ReportStatus::from(self.status)
    }
}

/// Create daily report request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDailyReport {
    pub project_id: i32,
    pub equipment_id: Option<i32>,
    /// Report date (YYYY-MM-DD)
    pub report_date: NaiveDate,
    pub operator: Option<String>,
    pub shift: Option<String>,
    #[validate(range(min = 0.0, message = "Meters must not be negative"))]
    pub total_meters: Option<f64>,
    #[validate(range(min = 0.0, message = "Hours must not be negative"))]
    pub total_hours: Option<f64>,
    #[validate(custom(function = "validate_clock"))]
    pub start_time: Option<String>,
    #[validate(custom(function = "validate_clock"))]
    pub end_time: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub occurrences: Vec<Occurrence>,
    #[serde(default)]
    #[validate(nested)]
    pub supplies: Vec<SupplyLine>,
    pub notes: Option<String>,
}

impl CreateDailyReport {
    /// Trim labels and blank-out empty shift bounds before storage
    pub fn normalized(mut self) -> Self {
        let blank_to_none = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        self.start_time = blank_to_none(self.start_time);
        self.end_time = blank_to_none(self.end_time);
        for occ in &mut self.occurrences {
            occ.occurrence_type = occ.occurrence_type.trim().to_string();
            occ.time_start = occ.time_start.trim().to_string();
            occ.time_end = occ.time_end.trim().to_string();
        }
        for supply in &mut self.supplies {
            supply.supply_type = supply.supply_type.trim().to_string();
        }
        self
    }
}

/// Update report status request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReportStatus {
    pub status: ReportStatus,
}

/// Query parameters for listing reports
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ReportQuery {
    pub project_id: Option<i32>,
    pub equipment_id: Option<i32>,
    /// Start date (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    /// End date (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
    pub status: Option<ReportStatus>,
}

fn validate_clock(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || parse_clock(value).is_some() {
        Ok(())
    } else {
        let mut err = ValidationError::new("clock");
        err.message = Some(format!("Invalid time '{}', expected HH:mm", value).into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_request() -> CreateDailyReport {
        serde_json::from_value(json!({
            "project_id": 1,
            "report_date": "2024-03-05",
            "total_meters": 120.5,
            "start_time": "07:00",
            "end_time": "15:00",
            "occurrences": [
                { "type": "Mecânica", "time_start": "08:00", "time_end": "08:30" }
            ],
            "supplies": [
                { "type": "Diesel (L)", "quantity": 80.0 }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_report_passes() {
        assert!(sample_request().validate().is_ok());
    }

    #[test]
    fn test_bad_occurrence_time_rejected() {
        let mut req = sample_request();
        req.occurrences[0].time_end = "8h30".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_negative_supply_rejected() {
        let mut req = sample_request();
        req.supplies[0].quantity = -1.0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_normalized_blanks_empty_bounds() {
        let mut req = sample_request();
        req.start_time = Some("  ".to_string());
        req.occurrences[0].occurrence_type = " Mecânica ".to_string();
        let req = req.normalized();
        assert_eq!(req.start_time, None);
        assert_eq!(req.end_time.as_deref(), Some("15:00"));
        assert_eq!(req.occurrences[0].occurrence_type, "Mecânica");
    }

    #[test]
    fn test_occurrence_wire_names() {
        let occ: Occurrence = serde_json::from_value(json!({
            "type": "Chuva", "time_start": "10:00", "time_end": "11:00"
        }))
        .unwrap();
        assert_eq!(occ.occurrence_type, "Chuva");
        let back = serde_json::to_value(&occ).unwrap();
        assert_eq!(back["type"], "Chuva");
        assert!(back.get("notes").is_none());
    }
}
