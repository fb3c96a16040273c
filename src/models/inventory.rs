//! Inventory, PPE stock and stock movement models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{InventoryCategory, MovementKind};
use crate::error::{AppError, AppResult};

/// Stock row of one item at one project
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct InventoryItem {
    pub id: i32,
    pub project_id: i32,
    pub name: String,
    /// Category (0=consumable, 1=PPE, 2=spare part, 3=tool)
    pub category: i16,
    /// Unit of measure (un, L, kg...)
    pub unit: Option<String>,
    pub quantity: f64,
    /// Reorder threshold
    pub min_quantity: Option<f64>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl InventoryItem {
    pub fn category(&self) -> InventoryCategory {
        InventoryCategory::from(self.category)
    }

    pub fn is_low_stock(&self) -> bool {
        self.min_quantity
            .map(|min| self.quantity <= min)
            .unwrap_or(false)
    }

    /// Quantity left after withdrawing `quantity`, or an error if the row
    /// cannot cover it.
    pub fn remaining_after(&self, quantity: f64) -> AppResult<f64> {
        check_quantity(quantity)?;
        if self.quantity < quantity {
            return Err(AppError::BusinessRule(format!(
                "Insufficient stock for '{}': {} available, {} requested",
                self.name, self.quantity, quantity
            )));
        }
        Ok(self.quantity - quantity)
    }
}

/// Audit-trail row for every stock change
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StockMovement {
    pub id: i32,
    pub item_id: i32,
    pub project_id: i32,
    /// Item name at the time of the movement
    pub item_name: String,
    /// Kind (0=entry, 1=stock-out, 2=transfer-out, 3=transfer-in)
    pub kind: i16,
    pub quantity: f64,
    /// Equipment the stock-out was issued to
    pub equipment_id: Option<i32>,
    /// Other side of a transfer
    pub counterpart_project_id: Option<i32>,
    pub notes: Option<String>,
    pub moved_at: DateTime<Utc>,
}

impl StockMovement {
    pub fn kind(&self) -> MovementKind {
        MovementKind::from(self.kind)
    }
}

/// Create inventory item request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInventoryItem {
    pub project_id: i32,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub category: Option<InventoryCategory>,
    pub unit: Option<String>,
    #[validate(range(min = 0.0, message = "Quantity must not be negative"))]
    pub quantity: Option<f64>,
    #[validate(range(min = 0.0))]
    pub min_quantity: Option<f64>,
}

/// Stock entry (receipt) request
#[derive(Debug, Deserialize, ToSchema)]
pub struct StockInRequest {
    pub quantity: f64,
    pub notes: Option<String>,
}

/// Stock-out (consumption) request
#[derive(Debug, Deserialize, ToSchema)]
pub struct StockOutRequest {
    pub quantity: f64,
    /// Equipment the material is issued to
    pub equipment_id: Option<i32>,
    pub notes: Option<String>,
}

/// Transfer stock of an item to another project
#[derive(Debug, Deserialize, ToSchema)]
pub struct StockTransferRequest {
    pub destination_project_id: i32,
    pub quantity: f64,
    pub notes: Option<String>,
}

/// Quantities a transfer will write, computed before any write happens
#[derive(Debug, Clone, PartialEq)]
pub struct TransferPlan {
    pub source_remaining: f64,
    /// New quantity of the destination row
    pub destination_quantity: f64,
    /// Existing destination row; `None` when the transfer creates it
    pub destination_id: Option<i32>,
}

impl StockTransferRequest {
    /// Check the request against the locked source and destination rows.
    pub fn plan(
        &self,
        source: &InventoryItem,
        destination: Option<&InventoryItem>,
    ) -> AppResult<TransferPlan> {
        if self.destination_project_id == source.project_id {
            return Err(AppError::BadRequest(
                "Destination project must differ from the source project".to_string(),
            ));
        }
        if let Some(dest) = destination {
            if dest.project_id != self.destination_project_id || dest.name != source.name {
                return Err(AppError::Internal(format!(
                    "Destination row {} does not match transfer target",
                    dest.id
                )));
            }
        }

        let source_remaining = source.remaining_after(self.quantity)?;

        Ok(match destination {
            Some(dest) => TransferPlan {
                source_remaining,
                destination_quantity: dest.quantity + self.quantity,
                destination_id: Some(dest.id),
            },
            None => TransferPlan {
                source_remaining,
                destination_quantity: self.quantity,
                destination_id: None,
            },
        })
    }
}

/// Result of a completed transfer
#[derive(Debug, Serialize, ToSchema)]
pub struct TransferResult {
    pub source: InventoryItem,
    pub destination: InventoryItem,
}

/// Query parameters for listing inventory
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct InventoryQuery {
    pub project_id: Option<i32>,
    pub category: Option<InventoryCategory>,
}

/// Query parameters for listing stock movements
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct MovementQuery {
    pub project_id: Option<i32>,
    pub item_id: Option<i32>,
    pub kind: Option<MovementKind>,
    /// Start date (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    /// End date (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
}

fn check_quantity(quantity: f64) -> AppResult<()> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(AppError::Validation(
            "Quantity must be a positive number".to_string(),
        ));
    }
    Ok(())
}

/// Entry quantities are validated the same way as withdrawals
pub fn check_entry_quantity(quantity: f64) -> AppResult<()> {
    check_quantity(quantity)
}
