//! KPI rollup over a period's daily reports

use indexmap::IndexMap;

use super::{
    classifier::{DowntimeCause, OccurrenceClassifier},
    duration::{minutes_between, window_minutes},
    CostBreakdown, DowntimeByType, KpiSet,
};
use crate::{
    config::MetricsConfig,
    models::{DailyReport, Equipment, MaintenanceEvent, MovementKind, StockMovement},
};

/// Plain records a KPI computation needs
#[derive(Debug, Clone, Copy)]
pub struct MetricsInput<'a> {
    pub reports: &'a [DailyReport],
    /// Equipment whose fixed cost is charged to the period
    pub equipment: &'a [Equipment],
    pub maintenance: &'a [MaintenanceEvent],
    /// Stock movements of the period; only stock-outs are considered
    pub stock_movements: &'a [StockMovement],
    /// Calendar months the period spans
    pub period_months: u32,
}

impl<'a> MetricsInput<'a> {
    pub fn reports_only(reports: &'a [DailyReport]) -> Self {
        Self {
            reports,
            equipment: &[],
            maintenance: &[],
            stock_movements: &[],
            period_months: 1,
        }
    }
}

/// Minute totals collected in a single pass over the reports
#[derive(Default)]
struct Totals<'r> {
    production: f64,
    reported_hours: f64,
    diesel: f64,
    scheduled: i64,
    downtime: i64,
    maintenance: i64,
    operational: i64,
    scheduled_stops: i64,
    by_type: IndexMap<&'r str, i64>,
}

#[derive(Debug, Clone)]
pub struct MetricsAggregator {
    config: MetricsConfig,
    classifier: OccurrenceClassifier,
}

impl MetricsAggregator {
    pub fn new(config: MetricsConfig) -> Self {
        let classifier = OccurrenceClassifier::new(&config);
        Self { config, classifier }
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// Compute the KPI set. Deterministic; malformed fields count as zero.
    pub fn aggregate(&self, input: &MetricsInput<'_>) -> KpiSet {
        let totals = self.collect(input.reports);

        let total_production = round1(totals.production);
        let drilling_minutes = (totals.scheduled - totals.downtime).max(0);
        let net_available = (totals.scheduled - totals.scheduled_stops).max(1);
        let efficiency = 100.0 * drilling_minutes as f64 / net_available as f64;

        let available = totals.scheduled - totals.maintenance;
        let physical_availability = if totals.scheduled > 0 {
            percent(available, totals.scheduled)
        } else {
            0.0
        };
        let operating = available - totals.operational;
        let physical_utilization = if available > 0 {
            percent(operating, available)
        } else {
            0.0
        };

        let drilling_hours = drilling_minutes as f64 / 60.0;
        let diesel_per_meter = if total_production > 0.0 {
            totals.diesel / total_production
        } else {
            0.0
        };
        let diesel_per_hour = totals.diesel / drilling_hours.max(1.0);

        let costs = self.costs(input, totals.diesel);
        let cost_per_meter = if total_production > 0.0 {
            costs.total / total_production
        } else {
            0.0
        };

        let bit_stock_outs = self.count_bit_stock_outs(input.stock_movements);
        let bit_performance = if bit_stock_outs > 0 {
            total_production / bit_stock_outs as f64
        } else {
            0.0
        };

        let downtime_ratio = if totals.reported_hours > 0.0 {
            (totals.downtime as f64 / 60.0) / totals.reported_hours
        } else {
            0.0
        };
        let project_viability_index = self.viability(efficiency, downtime_ratio);

        let downtime_by_type: Vec<DowntimeByType> = totals
            .by_type
            .iter()
            .map(|(occurrence_type, minutes)| DowntimeByType {
                occurrence_type: occurrence_type.to_string(),
                minutes: *minutes,
                cause: self.classifier.classify(occurrence_type),
            })
            .collect();
        let top_bottleneck = top_bottleneck(&downtime_by_type);

        KpiSet {
            report_count: input.reports.len(),
            has_data: !input.reports.is_empty(),
            total_production,
            total_reported_hours: totals.reported_hours,
            total_scheduled_minutes: totals.scheduled,
            total_downtime_minutes: totals.downtime,
            maintenance_downtime_minutes: totals.maintenance,
            operational_downtime_minutes: totals.operational,
            total_scheduled_stop_minutes: totals.scheduled_stops,
            drilling_hours,
            efficiency,
            physical_availability,
            physical_utilization,
            diesel_consumption: totals.diesel,
            diesel_per_meter,
            diesel_per_hour,
            costs,
            cost_per_meter,
            bit_stock_outs,
            bit_performance,
            project_viability_index,
            downtime_by_type,
            top_bottleneck,
        }
    }

    fn collect<'r>(&self, reports: &'r [DailyReport]) -> Totals<'r> {
        let mut totals = Totals::default();

        for report in reports {
            totals.production += finite_or_zero(report.total_meters);
            totals.reported_hours += finite_or_zero(report.total_hours);
            totals.diesel += report
                .supplies
                .iter()
                .filter(|line| self.is_diesel(&line.supply_type))
                .map(|line| finite_or_zero(Some(line.quantity)))
                .sum::<f64>();

            let shift = window_minutes(report.start_time.as_deref(), report.end_time.as_deref());
            if shift == 0 {
                // No usable shift window: the day is left out of downtime accounting
                continue;
            }
            totals.scheduled += shift;

            for occurrence in report.occurrences.iter() {
                let minutes = minutes_between(&occurrence.time_start, &occurrence.time_end);
                if minutes <= 0 {
                    continue;
                }
                let kind = occurrence.occurrence_type.as_str();
                totals.downtime += minutes;
                match self.classifier.classify(kind) {
                    DowntimeCause::Maintenance => totals.maintenance += minutes,
                    DowntimeCause::Operational => totals.operational += minutes,
                }
                if self.classifier.is_scheduled_stop(kind) {
                    totals.scheduled_stops += minutes;
                }
                *totals.by_type.entry(kind).or_insert(0) += minutes;
            }
        }

        totals
    }

    fn is_diesel(&self, supply_type: &str) -> bool {
        supply_type
            .to_lowercase()
            .contains(&self.config.diesel_supply_pattern.to_lowercase())
    }

    fn count_bit_stock_outs(&self, movements: &[StockMovement]) -> usize {
        movements
            .iter()
            .filter(|m| m.kind() == MovementKind::StockOut)
            .filter(|m| m.item_name.contains(&self.config.bit_item_pattern))
            .count()
    }

    fn costs(&self, input: &MetricsInput<'_>, diesel: f64) -> CostBreakdown {
        let months = input.period_months.max(1) as f64;
        let fuel = diesel * self.config.diesel_price_per_liter;
        let labor = self.config.monthly_labor_cost * months;
        let equipment = input
            .equipment
            .iter()
            // retired units carry no fixed cost
            .filter(|e| e.status != Some(2))
            .map(Equipment::fixed_monthly_cost)
            .sum::<f64>()
            * months;
        let maintenance = input
            .maintenance
            .iter()
            .map(|event| finite_or_zero(Some(event.cost)))
            .sum::<f64>();

        CostBreakdown {
            fuel,
            labor,
            equipment,
            maintenance,
            total: fuel + labor + equipment + maintenance,
        }
    }

    fn viability(&self, efficiency: f64, downtime_ratio: f64) -> f64 {
        let target = self.config.viability_efficiency_target;
        let ceiling = self.config.viability_downtime_ceiling;

        let efficiency_score = if target > 0.0 {
            (efficiency / target).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let downtime_score = if ceiling > 0.0 {
            (1.0 - downtime_ratio / ceiling).max(0.0)
        } else if downtime_ratio > 0.0 {
            0.0
        } else {
            1.0
        };

        (efficiency_score * 50.0 + downtime_score * 50.0).clamp(0.0, 100.0)
    }
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new(MetricsConfig::default())
    }
}

/// Largest accumulated downtime; ties keep the earlier entry
fn top_bottleneck(entries: &[DowntimeByType]) -> Option<DowntimeByType> {
    let mut best: Option<&DowntimeByType> = None;
    for entry in entries {
        if best.map_or(true, |b| entry.minutes > b.minutes) {
            best = Some(entry);
        }
    }
    best.cloned()
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn percent(part: i64, whole: i64) -> f64 {
    (100.0 * part as f64 / whole as f64).clamp(0.0, 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
