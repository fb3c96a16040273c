//! KPI dashboard service

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::{
    api::dashboard::{DashboardQuery, DashboardResponse},
    config::MetricsConfig,
    error::{AppError, AppResult},
    metrics::{KpiSet, MetricsAggregator, MetricsInput},
    models::PeriodFilter,
    repository::RecordStore,
};

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn RecordStore>,
    aggregator: MetricsAggregator,
}

impl DashboardService {
    pub fn new(store: Arc<dyn RecordStore>, config: MetricsConfig) -> Self {
        Self {
            store,
            aggregator: MetricsAggregator::new(config),
        }
    }

    /// Turn query parameters into a scoped period.
    ///
    /// `year`/`month` win over explicit dates; with neither, the month
    /// containing `today` is used.
    pub fn resolve_period(query: &DashboardQuery, today: NaiveDate) -> AppResult<PeriodFilter> {
        let period = match (query.year, query.month, query.start_date, query.end_date) {
            (year, Some(month), _, _) => PeriodFilter::month(year.unwrap_or(today.year()), month)?,
            (Some(year), None, _, _) => {
                let start = NaiveDate::from_ymd_opt(year, 1, 1)
                    .ok_or_else(|| AppError::BadRequest(format!("Invalid year {}", year)))?;
                let end = NaiveDate::from_ymd_opt(year, 12, 31)
                    .ok_or_else(|| AppError::BadRequest(format!("Invalid year {}", year)))?;
                PeriodFilter::range(start, end)?
            }
            (None, None, Some(start), Some(end)) => PeriodFilter::range(start, end)?,
            (None, None, Some(start), None) => PeriodFilter::range(start, today)?,
            (None, None, None, Some(end)) => PeriodFilter::range(first_of_month(end), end)?,
            (None, None, None, None) => PeriodFilter::month(today.year(), today.month())?,
        };
        Ok(period.scoped(query.project_id, query.equipment_id))
    }

    /// Resolve the query and compute its KPIs.
    ///
    /// An unknown equipment filter is the caller's mistake and is reported as
    /// such; any other lookup failure is left to the degraded path of [`kpis`].
    ///
    /// [`kpis`]: DashboardService::kpis
    pub async fn dashboard(
        &self,
        query: &DashboardQuery,
        today: NaiveDate,
    ) -> AppResult<DashboardResponse> {
        let period = Self::resolve_period(query, today)?;
        if let Some(equipment_id) = period.equipment_id {
            if let Err(e @ AppError::NotFound(_)) = self.store.equipment_by_id(equipment_id).await {
                return Err(e);
            }
        }
        Ok(self.kpis(period).await)
    }

    /// Compute the KPIs of a period.
    ///
    /// Fetch failures never surface to the caller: the dashboard gets a zeroed
    /// KPI set flagged as degraded so it can still render.
    pub async fn kpis(&self, period: PeriodFilter) -> DashboardResponse {
        let fetched = tokio::try_join!(
            self.store.reports_for_period(&period),
            self.store.equipment_in_scope(&period),
            self.store.maintenance_for_period(&period),
            self.store.stock_outs_for_period(&period),
        );

        let (kpis, degraded) = match fetched {
            Ok((reports, equipment, maintenance, stock_outs)) => {
                let input = MetricsInput {
                    reports: &reports,
                    equipment: &equipment,
                    maintenance: &maintenance,
                    stock_movements: &stock_outs,
                    period_months: period.months(),
                };
                let kpis = self.aggregator.aggregate(&input);
                tracing::debug!(
                    project_id = ?period.project_id,
                    equipment_id = ?period.equipment_id,
                    reports = kpis.report_count,
                    efficiency = kpis.efficiency,
                    "Computed dashboard KPIs"
                );
                (kpis, false)
            }
            Err(e) => {
                tracing::warn!(
                    project_id = ?period.project_id,
                    "Dashboard data unavailable, serving zeroed KPIs: {}",
                    e
                );
                (KpiSet::default(), true)
            }
        };

        DashboardResponse {
            period_start: period.start,
            period_end: period.end,
            period_months: period.months(),
            project_id: period.project_id,
            equipment_id: period.equipment_id,
            degraded,
            kpis,
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{DailyReport, MovementKind, Occurrence, StockMovement},
        repository::MockRecordStore,
    };
    use chrono::Utc;
    use sqlx::types::Json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn report(meters: f64) -> DailyReport {
        DailyReport {
            id: 1,
            project_id: 1,
            equipment_id: Some(3),
            report_date: date(2024, 3, 5),
            operator: Some("J. Silva".to_string()),
            shift: Some("day".to_string()),
            total_meters: Some(meters),
            total_hours: Some(8.0),
            start_time: Some("07:00".to_string()),
            end_time: Some("15:00".to_string()),
            occurrences: Json(vec![Occurrence {
                occurrence_type: "Mecânica".to_string(),
                time_start: "08:00".to_string(),
                time_end: "08:30".to_string(),
                notes: None,
            }]),
            supplies: Json(vec![]),
            status: 0,
            notes: None,
            crea_date: None,
            modif_date: None,
        }
    }

    fn bit_out(equipment_id: i32) -> StockMovement {
        StockMovement {
            id: 9,
            item_id: 4,
            project_id: 1,
            item_name: "Bit 76mm".to_string(),
            kind: MovementKind::StockOut.into(),
            quantity: 1.0,
            equipment_id: Some(equipment_id),
            counterpart_project_id: None,
            notes: None,
            moved_at: Utc::now(),
        }
    }

    fn query() -> DashboardQuery {
        DashboardQuery {
            project_id: None,
            equipment_id: None,
            year: None,
            month: None,
            start_date: None,
            end_date: None,
        }
    }

    fn healthy_store() -> MockRecordStore {
        let mut store = MockRecordStore::new();
        store
            .expect_reports_for_period()
            .returning(|_| Ok(vec![report(100.0)]));
        store.expect_equipment_in_scope().returning(|_| Ok(vec![]));
        store.expect_maintenance_for_period().returning(|_| Ok(vec![]));
        store.expect_stock_outs_for_period().returning(|_| Ok(vec![bit_out(3)]));
        store
    }

    #[test]
    fn test_resolve_defaults_to_current_month() {
        let p = DashboardService::resolve_period(&query(), date(2024, 2, 17)).unwrap();
        assert_eq!(p.start, date(2024, 2, 1));
        assert_eq!(p.end, date(2024, 2, 29));
    }

    #[test]
    fn test_resolve_year_month_and_ranges() {
        let mut q = query();
        q.year = Some(2023);
        q.month = Some(11);
        q.project_id = Some(5);
        let p = DashboardService::resolve_period(&q, date(2024, 2, 17)).unwrap();
        assert_eq!((p.start, p.end), (date(2023, 11, 1), date(2023, 11, 30)));
        assert_eq!(p.project_id, Some(5));

        let mut q = query();
        q.year = Some(2023);
        let p = DashboardService::resolve_period(&q, date(2024, 2, 17)).unwrap();
        assert_eq!(p.months(), 12);

        let mut q = query();
        q.end_date = Some(date(2024, 1, 20));
        let p = DashboardService::resolve_period(&q, date(2024, 2, 17)).unwrap();
        assert_eq!(p.start, date(2024, 1, 1));

        let mut q = query();
        q.start_date = Some(date(2024, 3, 1));
        q.end_date = Some(date(2024, 2, 1));
        assert!(DashboardService::resolve_period(&q, date(2024, 2, 17)).is_err());
    }

    #[test]
    fn test_kpis_from_store() {
        let service = DashboardService::new(Arc::new(healthy_store()), MetricsConfig::default());
        let period = PeriodFilter::month(2024, 3).unwrap().scoped(Some(1), None);

        let response = tokio_test::block_on(service.kpis(period));

        assert!(!response.degraded);
        assert_eq!(response.project_id, Some(1));
        assert_eq!(response.kpis.total_downtime_minutes, 30);
        assert_eq!(response.kpis.physical_availability, 93.75);
        assert_eq!(response.kpis.bit_performance, 100.0);
        // one month of labor at the default estimate
        assert_eq!(response.kpis.costs.labor, 45_000.0);
    }

    #[test]
    fn test_equipment_scope_reaches_every_fetch() {
        let mut store = MockRecordStore::new();
        store
            .expect_reports_for_period()
            .withf(|f| f.equipment_id == Some(3))
            .times(1)
            .returning(|_| Ok(vec![report(60.0)]));
        store
            .expect_equipment_in_scope()
            .withf(|f| f.equipment_id == Some(3))
            .returning(|_| Ok(vec![]));
        store
            .expect_maintenance_for_period()
            .withf(|f| f.equipment_id == Some(3))
            .returning(|_| Ok(vec![]));
        store
            .expect_stock_outs_for_period()
            .withf(|f| f.equipment_id == Some(3))
            .times(1)
            .returning(|_| Ok(vec![bit_out(3), bit_out(3)]));

        let service = DashboardService::new(Arc::new(store), MetricsConfig::default());
        let period = PeriodFilter::month(2024, 3).unwrap().scoped(Some(1), Some(3));
        let response = tokio_test::block_on(service.kpis(period));

        assert_eq!(response.kpis.bit_stock_outs, 2);
        assert_eq!(response.kpis.bit_performance, 30.0);
    }

    #[test]
    fn test_unknown_equipment_is_not_found() {
        let mut store = MockRecordStore::new();
        store
            .expect_equipment_by_id()
            .returning(|id| Err(AppError::NotFound(format!("Equipment {} not found", id))));
        store.expect_reports_for_period().times(0);
        store.expect_equipment_in_scope().times(0);
        store.expect_maintenance_for_period().times(0);
        store.expect_stock_outs_for_period().times(0);

        let service = DashboardService::new(Arc::new(store), MetricsConfig::default());
        let mut q = query();
        q.equipment_id = Some(404);
        let result = tokio_test::block_on(service.dashboard(&q, date(2024, 3, 10)));

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_known_equipment_reaches_kpis() {
        let mut store = healthy_store();
        store
            .expect_equipment_by_id()
            .withf(|id| *id == 3)
            .times(1)
            .returning(|_| Err(AppError::Internal("pool timed out".to_string())));

        let service = DashboardService::new(Arc::new(store), MetricsConfig::default());
        let mut q = query();
        q.equipment_id = Some(3);
        let response = tokio_test::block_on(service.dashboard(&q, date(2024, 3, 10))).unwrap();

        // lookup outage is not a client error; the fetches still run
        assert!(!response.degraded);
        assert_eq!(response.equipment_id, Some(3));
        assert_eq!(response.kpis.report_count, 1);
    }

    #[test]
    fn test_fetch_failure_degrades_to_zeroed_kpis() {
        let mut store = MockRecordStore::new();
        store
            .expect_reports_for_period()
            .returning(|_| Err(AppError::Internal("connection reset".to_string())));
        store.expect_equipment_in_scope().returning(|_| Ok(vec![]));
        store.expect_maintenance_for_period().returning(|_| Ok(vec![]));
        store.expect_stock_outs_for_period().returning(|_| Ok(vec![]));

        let service = DashboardService::new(Arc::new(store), MetricsConfig::default());
        let response = tokio_test::block_on(service.kpis(PeriodFilter::month(2024, 3).unwrap()));

        assert!(response.degraded);
        assert_eq!(response.kpis, KpiSet::default());
        assert!(!response.kpis.has_data);
    }
}
