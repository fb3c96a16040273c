//! API handlers for the DrillOps REST endpoints

pub mod dashboard;
pub mod equipment;
pub mod health;
pub mod inventory;
pub mod maintenance;
pub mod occurrence_types;
pub mod openapi;
pub mod projects;
pub mod reports;
