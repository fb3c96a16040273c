//! Occurrence type catalog endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    config::MetricsConfig,
    metrics::{DowntimeCause, OccurrenceClassifier},
    models::OccurrenceType,
};

/// One pickable stoppage type and how the KPIs charge it
#[derive(Debug, Serialize, ToSchema)]
pub struct OccurrenceTypeInfo {
    pub label: String,
    pub cause: DowntimeCause,
    /// Planned stop, excluded from utilization downtime
    pub scheduled: bool,
}

/// List occurrence types with their classification under the active policy
#[utoipa::path(
    get,
    path = "/occurrence-types",
    tag = "dashboard",
    responses(
        (status = 200, description = "Occurrence type catalog", body = Vec<OccurrenceTypeInfo>)
    )
)]
pub async fn list_occurrence_types(
    State(state): State<crate::AppState>,
) -> Json<Vec<OccurrenceTypeInfo>> {
    Json(catalog(&state.config.metrics))
}

fn catalog(config: &MetricsConfig) -> Vec<OccurrenceTypeInfo> {
    let classifier = OccurrenceClassifier::new(config);
    OccurrenceType::ALL
        .iter()
        .map(|t| OccurrenceTypeInfo {
            label: t.as_str().to_string(),
            cause: classifier.classify(t.as_str()),
            scheduled: classifier.is_scheduled_stop(t.as_str()),
        })
        .collect()
}
