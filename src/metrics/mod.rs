//! Operational KPI computation over daily drilling reports
//!
//! Everything in here is plain data in, plain data out: no database access,
//! no I/O, no failure path. Durations are integer minutes until the final
//! percentages and per-hour ratios are derived.

pub mod aggregator;
pub mod classifier;
pub mod duration;

use serde::Serialize;
use utoipa::ToSchema;

pub use aggregator::{MetricsAggregator, MetricsInput};
pub use classifier::{DowntimeCause, OccurrenceClassifier};
pub use duration::minutes_between;

/// Downtime accumulated by one occurrence type
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DowntimeByType {
    pub occurrence_type: String,
    pub minutes: i64,
    pub cause: DowntimeCause,
}

/// Cost components of the cost-per-meter rollup
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct CostBreakdown {
    pub fuel: f64,
    pub labor: f64,
    /// Rental or depreciation of in-scope equipment
    pub equipment: f64,
    pub maintenance: f64,
    pub total: f64,
}

/// Derived KPIs for a period. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct KpiSet {
    pub report_count: usize,
    /// False for an empty period; zero percentages then mean "no data"
    pub has_data: bool,

    /// Drilled meters, one decimal
    pub total_production: f64,
    /// Operator-reported hours
    pub total_reported_hours: f64,

    pub total_scheduled_minutes: i64,
    pub total_downtime_minutes: i64,
    pub maintenance_downtime_minutes: i64,
    pub operational_downtime_minutes: i64,
    pub total_scheduled_stop_minutes: i64,
    pub drilling_hours: f64,

    /// Drilling time over scheduled time net of planned stops (%)
    pub efficiency: f64,
    /// DF (%)
    pub physical_availability: f64,
    /// UF (%), relative to available time
    pub physical_utilization: f64,

    pub diesel_consumption: f64,
    pub diesel_per_meter: f64,
    pub diesel_per_hour: f64,

    pub costs: CostBreakdown,
    pub cost_per_meter: f64,

    pub bit_stock_outs: usize,
    /// Meters per bit issued. Approximation: assumes one bit type per rig.
    pub bit_performance: f64,

    /// Heuristic 0-100 score
    pub project_viability_index: f64,

    /// In first-seen order
    pub downtime_by_type: Vec<DowntimeByType>,
    pub top_bottleneck: Option<DowntimeByType>,
}
