//! Stoppage classification

use std::collections::HashSet;

use serde::Serialize;
use utoipa::ToSchema;

use crate::config::MetricsConfig;

/// Which availability bucket a stoppage is charged to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DowntimeCause {
    /// Lowers physical availability (DF)
    Maintenance,
    /// Lowers physical utilization (UF)
    Operational,
}

/// Exact-match lookup of occurrence type labels against the policy sets
#[derive(Debug, Clone)]
pub struct OccurrenceClassifier {
    maintenance: HashSet<String>,
    scheduled_stops: HashSet<String>,
}

impl OccurrenceClassifier {
    pub fn new(config: &MetricsConfig) -> Self {
        Self {
            maintenance: config.maintenance_types.iter().cloned().collect(),
            scheduled_stops: config.scheduled_stop_types.iter().cloned().collect(),
        }
    }

    pub fn is_maintenance(&self, occurrence_type: &str) -> bool {
        self.maintenance.contains(occurrence_type)
    }

    pub fn is_scheduled_stop(&self, occurrence_type: &str) -> bool {
        self.scheduled_stops.contains(occurrence_type)
    }

    /// Every type lands in exactly one bucket
    pub fn classify(&self, occurrence_type: &str) -> DowntimeCause {
        if self.is_maintenance(occurrence_type) {
            DowntimeCause::Maintenance
        } else {
            DowntimeCause::Operational
        }
    }
}

impl Default for OccurrenceClassifier {
    fn default() -> Self {
        Self::new(&MetricsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OccurrenceType;

    #[test]
    fn test_default_partition() {
        let c = OccurrenceClassifier::default();
        for t in OccurrenceType::ALL {
            let expected = if OccurrenceType::MAINTENANCE.contains(&t) {
                DowntimeCause::Maintenance
            } else {
                DowntimeCause::Operational
            };
            assert_eq!(c.classify(t.as_str()), expected, "{}", t);
        }
    }

    #[test]
    fn test_exact_membership_only() {
        let c = OccurrenceClassifier::default();
        assert!(c.is_maintenance("Mecânica"));
        assert!(!c.is_maintenance("mecânica"));
        assert!(!c.is_maintenance("Mecânica leve"));
        assert!(!c.is_maintenance("Mec"));
        assert_eq!(c.classify("anything else"), DowntimeCause::Operational);
    }

    #[test]
    fn test_scheduled_stops() {
        let c = OccurrenceClassifier::default();
        assert!(c.is_scheduled_stop("Refeição"));
        assert!(c.is_scheduled_stop("DDS"));
        assert!(!c.is_scheduled_stop("Chuva"));
        assert_eq!(c.classify("Refeição"), DowntimeCause::Operational);
    }

    #[test]
    fn test_configured_sets() {
        let config = MetricsConfig {
            maintenance_types: vec!["Hidráulica".to_string()],
            ..MetricsConfig::default()
        };
        let c = OccurrenceClassifier::new(&config);
        assert!(c.is_maintenance("Hidráulica"));
        assert!(!c.is_maintenance("Mecânica"));
    }
}
