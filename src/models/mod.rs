//! Data models for drilling operations

pub mod daily_report;
pub mod enums;
pub mod equipment;
pub mod inventory;
pub mod maintenance;
pub mod period;
pub mod project;

// Re-export commonly used types
pub use daily_report::{DailyReport, Occurrence, SupplyLine};
pub use enums::{InventoryCategory, MovementKind, OccurrenceType, ReportStatus};
pub use equipment::Equipment;
pub use inventory::{InventoryItem, StockMovement};
pub use maintenance::MaintenanceEvent;
pub use period::PeriodFilter;
pub use project::Project;
