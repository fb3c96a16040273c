//! DrillOps Server
//!
//! REST JSON API for drilling operations: daily operator reports, fleet and
//! maintenance records, per-project inventory, and the KPI dashboard derived
//! from them.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
