//! Reporting period and scope

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{AppError, AppResult};

/// Date range plus optional project / equipment scope for KPI queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodFilter {
    pub project_id: Option<i32>,
    pub equipment_id: Option<i32>,
    /// Inclusive
    pub start: NaiveDate,
    /// Inclusive
    pub end: NaiveDate,
}

impl PeriodFilter {
    /// Whole calendar month
    pub fn month(year: i32, month: u32) -> AppResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid month {}-{}", year, month)))?;
        let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
        let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .map(|d| d - Duration::days(1))
            .ok_or_else(|| AppError::BadRequest(format!("Invalid month {}-{}", year, month)))?;
        Ok(Self {
            project_id: None,
            equipment_id: None,
            start,
            end,
        })
    }

    pub fn range(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if end < start {
            return Err(AppError::BadRequest(
                "end_date must not be before start_date".to_string(),
            ));
        }
        Ok(Self {
            project_id: None,
            equipment_id: None,
            start,
            end,
        })
    }

    pub fn scoped(mut self, project_id: Option<i32>, equipment_id: Option<i32>) -> Self {
        self.project_id = project_id;
        self.equipment_id = equipment_id;
        self
    }

    /// Number of calendar months the period touches (at least 1)
    pub fn months(&self) -> u32 {
        let span = (self.end.year() - self.start.year()) * 12 + self.end.month() as i32
            - self.start.month() as i32
            + 1;
        span.max(1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_bounds() {
        let p = PeriodFilter::month(2024, 2).unwrap();
        assert_eq!(p.start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(p.end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        let dec = PeriodFilter::month(2023, 12).unwrap();
        assert_eq!(dec.end, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert!(PeriodFilter::month(2024, 13).is_err());
    }

    #[test]
    fn test_months_spanned() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        assert_eq!(PeriodFilter::month(2024, 5).unwrap().months(), 1);
        assert_eq!(PeriodFilter::range(d(2023, 11, 15), d(2024, 1, 10)).unwrap().months(), 3);
        assert!(PeriodFilter::range(d(2024, 2, 1), d(2024, 1, 1)).is_err());
    }
}
