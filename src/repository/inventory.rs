//! Inventory and stock movements repository
//!
//! Every stock change runs in one transaction: the touched rows are locked
//! with `FOR UPDATE`, checked, written, and the audit rows appended before
//! commit. A rejected request returns before the first write.

use chrono::Utc;
use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{InventoryCategory, MovementKind},
        inventory::{
            check_entry_quantity, CreateInventoryItem, InventoryItem, InventoryQuery,
            MovementQuery, StockInRequest, StockMovement, StockOutRequest, StockTransferRequest,
            TransferResult,
        },
        PeriodFilter,
    },
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: Pool<Postgres>,
}

/// Audit row to append inside a stock transaction
struct NewMovement<'a> {
    item: &'a InventoryItem,
    kind: MovementKind,
    quantity: f64,
    equipment_id: Option<i32>,
    counterpart_project_id: Option<i32>,
    notes: Option<&'a str>,
}

impl InventoryRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: &InventoryQuery) -> AppResult<Vec<InventoryItem>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.project_id.is_some() {
            conditions.push(format!("project_id = ${}", idx));
            idx += 1;
        }
        if query.category.is_some() {
            conditions.push(format!("category = ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT * FROM inventory_items {} ORDER BY name",
            where_clause
        );

        let mut builder = sqlx::query_as::<_, InventoryItem>(&sql);
        if let Some(id) = query.project_id {
            builder = builder.bind(id);
        }
        if let Some(category) = query.category {
            builder = builder.bind(i16::from(category));
        }

        Ok(builder.fetch_all(&self.pool).await?)
    }

    /// Items at or below their reorder threshold
    pub async fn list_low_stock(&self, project_id: Option<i32>) -> AppResult<Vec<InventoryItem>> {
        let rows = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT * FROM inventory_items
            WHERE min_quantity IS NOT NULL AND quantity <= min_quantity
              AND ($1::int IS NULL OR project_id = $1)
            ORDER BY project_id, name
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<InventoryItem> {
        sqlx::query_as::<_, InventoryItem>("SELECT * FROM inventory_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Inventory item {} not found", id)))
    }

    pub async fn create(&self, data: &CreateInventoryItem) -> AppResult<InventoryItem> {
        let category = data.category.unwrap_or(InventoryCategory::Consumable);
        sqlx::query_as::<_, InventoryItem>(
            r#"
            INSERT INTO inventory_items (project_id, name, category, unit, quantity, min_quantity)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(data.project_id)
        .bind(data.name.trim())
        .bind(i16::from(category))
        .bind(&data.unit)
        .bind(data.quantity.unwrap_or(0.0))
        .bind(data.min_quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::Conflict(
                format!("Item '{}' already exists in project {}", data.name, data.project_id),
            ),
            other => AppError::Database(other),
        })
    }

    /// Receive stock
    pub async fn stock_in(&self, item_id: i32, data: &StockInRequest) -> AppResult<InventoryItem> {
        check_entry_quantity(data.quantity)?;

        let mut tx = self.pool.begin().await?;
        let item = lock_item(&mut tx, item_id).await?;

        let item = set_quantity(&mut tx, item.id, item.quantity + data.quantity).await?;
        record_movement(
            &mut tx,
            NewMovement {
                item: &item,
                kind: MovementKind::Entry,
                quantity: data.quantity,
                equipment_id: None,
                counterpart_project_id: None,
                notes: data.notes.as_deref(),
            },
        )
        .await?;

        tx.commit().await?;
        Ok(item)
    }

    /// Issue stock for consumption, optionally to a piece of equipment
    pub async fn stock_out(&self, item_id: i32, data: &StockOutRequest) -> AppResult<InventoryItem> {
        let mut tx = self.pool.begin().await?;
        let item = lock_item(&mut tx, item_id).await?;

        let remaining = item.remaining_after(data.quantity)?;

        let item = set_quantity(&mut tx, item.id, remaining).await?;
        record_movement(
            &mut tx,
            NewMovement {
                item: &item,
                kind: MovementKind::StockOut,
                quantity: data.quantity,
                equipment_id: data.equipment_id,
                counterpart_project_id: None,
                notes: data.notes.as_deref(),
            },
        )
        .await?;

        tx.commit().await?;
        Ok(item)
    }

    /// Move stock of an item to the same-named row of another project,
    /// creating that row when absent.
    pub async fn transfer(
        &self,
        item_id: i32,
        data: &StockTransferRequest,
    ) -> AppResult<TransferResult> {
        let destination_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)")
                .bind(data.destination_project_id)
                .fetch_one(&self.pool)
                .await?;
        if !destination_exists {
            return Err(AppError::NotFound(format!(
                "Project {} not found",
                data.destination_project_id
            )));
        }

        self.transfer_locked(item_id, data)
            .await
            .map_err(contention_as_conflict)
    }

    async fn transfer_locked(
        &self,
        item_id: i32,
        data: &StockTransferRequest,
    ) -> AppResult<TransferResult> {
        let mut tx = self.pool.begin().await?;

        // Source and destination are locked by one statement in id order, so
        // opposite transfers of the same item queue instead of deadlocking.
        let locked = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT * FROM inventory_items
            WHERE id = $1
               OR (project_id = $2 AND name = (SELECT name FROM inventory_items WHERE id = $1))
            ORDER BY id
            FOR UPDATE
            "#,
        )
        .bind(item_id)
        .bind(data.destination_project_id)
        .fetch_all(&mut *tx)
        .await?;

        let (source, destination) =
            split_locked(locked, item_id, data.destination_project_id)?;

        // Dropping `tx` on error rolls back; nothing has been written yet.
        let plan = data.plan(&source, destination.as_ref())?;

        let source = set_quantity(&mut tx, source.id, plan.source_remaining).await?;
        let destination = match plan.destination_id {
            Some(id) => set_quantity(&mut tx, id, plan.destination_quantity).await?,
            // A concurrent transfer may create the row first; add to it then.
            None => {
                sqlx::query_as::<_, InventoryItem>(
                    r#"
                    INSERT INTO inventory_items (project_id, name, category, unit, quantity, min_quantity)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    ON CONFLICT (project_id, name) DO UPDATE
                    SET quantity = inventory_items.quantity + EXCLUDED.quantity,
                        modif_date = NOW()
                    RETURNING *
                    "#,
                )
                .bind(data.destination_project_id)
                .bind(&source.name)
                .bind(source.category)
                .bind(&source.unit)
                .bind(data.quantity)
                .bind(source.min_quantity)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        record_movement(
            &mut tx,
            NewMovement {
                item: &source,
                kind: MovementKind::TransferOut,
                quantity: data.quantity,
                equipment_id: None,
                counterpart_project_id: Some(destination.project_id),
                notes: data.notes.as_deref(),
            },
        )
        .await?;
        record_movement(
            &mut tx,
            NewMovement {
                item: &destination,
                kind: MovementKind::TransferIn,
                quantity: data.quantity,
                equipment_id: None,
                counterpart_project_id: Some(source.project_id),
                notes: data.notes.as_deref(),
            },
        )
        .await?;

        tx.commit().await?;

        Ok(TransferResult {
            source,
            destination,
        })
    }

    pub async fn list_movements(&self, query: &MovementQuery) -> AppResult<Vec<StockMovement>> {
        let mut conditions: Vec<String> = Vec::new();

        macro_rules! add_condition {
            ($field:expr, $sql:literal) => {
                if $field.is_some() {
                    conditions.push(format!($sql, conditions.len() + 1));
                }
            };
        }

        add_condition!(query.project_id, "project_id = ${}");
        add_condition!(query.item_id, "item_id = ${}");
        add_condition!(query.kind, "kind = ${}");
        add_condition!(query.start_date, "moved_at::date >= ${}");
        add_condition!(query.end_date, "moved_at::date <= ${}");

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT * FROM stock_movements {} ORDER BY moved_at DESC, id DESC",
            where_clause
        );

        let mut builder = sqlx::query_as::<_, StockMovement>(&sql);
        if let Some(id) = query.project_id {
            builder = builder.bind(id);
        }
        if let Some(id) = query.item_id {
            builder = builder.bind(id);
        }
        if let Some(kind) = query.kind {
            builder = builder.bind(i16::from(kind));
        }
        if let Some(d) = query.start_date {
            builder = builder.bind(d);
        }
        if let Some(d) = query.end_date {
            builder = builder.bind(d);
        }

        Ok(builder.fetch_all(&self.pool).await?)
    }

    /// Stock-outs of a KPI period, scoped to the equipment when one is given
    pub async fn stock_outs_for_period(&self, filter: &PeriodFilter) -> AppResult<Vec<StockMovement>> {
        let rows = sqlx::query_as::<_, StockMovement>(
            r#"
            SELECT * FROM stock_movements
            WHERE kind = $1
              AND moved_at::date >= $2 AND moved_at::date <= $3
              AND ($4::int IS NULL OR project_id = $4)
              AND ($5::int IS NULL OR equipment_id = $5)
            ORDER BY moved_at
            "#,
        )
        .bind(i16::from(MovementKind::StockOut))
        .bind(filter.start)
        .bind(filter.end)
        .bind(filter.project_id)
        .bind(filter.equipment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

/// Pick the source row and the destination project's row out of the
/// rows locked for a transfer.
fn split_locked(
    rows: Vec<InventoryItem>,
    item_id: i32,
    destination_project_id: i32,
) -> AppResult<(InventoryItem, Option<InventoryItem>)> {
    let mut source = None;
    let mut destination = None;
    for row in rows {
        if row.id == item_id {
            source = Some(row);
        } else if row.project_id == destination_project_id {
            destination = Some(row);
        }
    }
    let source = source
        .ok_or_else(|| AppError::NotFound(format!("Inventory item {} not found", item_id)))?;
    Ok((source, destination))
}

/// SQLSTATEs of a transaction Postgres aborted to resolve lock contention
fn is_lock_conflict(code: Option<&str>) -> bool {
    matches!(code, Some("40P01") | Some("40001"))
}

fn contention_as_conflict(err: AppError) -> AppError {
    match err {
        AppError::Database(sqlx::Error::Database(ref db))
            if is_lock_conflict(db.code().as_deref()) =>
        {
            tracing::warn!("Stock transfer aborted by lock contention: {}", db);
            AppError::Conflict(
                "Stock is being changed by another request, retry the transfer".to_string(),
            )
        }
        other => other,
    }
}

async fn lock_item(conn: &mut PgConnection, item_id: i32) -> AppResult<InventoryItem> {
    sqlx::query_as::<_, InventoryItem>("SELECT * FROM inventory_items WHERE id = $1 FOR UPDATE")
        .bind(item_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Inventory item {} not found", item_id)))
}

async fn set_quantity(conn: &mut PgConnection, item_id: i32, quantity: f64) -> AppResult<InventoryItem> {
    let row = sqlx::query_as::<_, InventoryItem>(
        "UPDATE inventory_items SET quantity = $1, modif_date = $2 WHERE id = $3 RETURNING *",
    )
    .bind(quantity)
    .bind(Utc::now())
    .bind(item_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(row)
}

async fn record_movement(conn: &mut PgConnection, movement: NewMovement<'_>) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO stock_movements (
            item_id, project_id, item_name, kind, quantity,
            equipment_id, counterpart_project_id, notes, moved_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(movement.item.id)
    .bind(movement.item.project_id)
    .bind(&movement.item.name)
    .bind(i16::from(movement.kind))
    .bind(movement.quantity)
    .bind(movement.equipment_id)
    .bind(movement.counterpart_project_id)
    .bind(movement.notes)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i32, project_id: i32, quantity: f64) -> InventoryItem {
        InventoryItem {
            id,
            project_id,
            name: "Bit 76mm".to_string(),
            category: 0,
            unit: Some("un".to_string()),
            quantity,
            min_quantity: None,
            crea_date: None,
            modif_date: None,
        }
    }

    #[test]
    fn test_split_locked_any_row_order() {
        // rows come back in id order, whichever side the source is on
        let (source, dest) = split_locked(vec![row(3, 2, 1.0), row(8, 1, 10.0)], 8, 2).unwrap();
        assert_eq!(source.id, 8);
        assert_eq!(dest.map(|d| d.id), Some(3));

        let (source, dest) = split_locked(vec![row(3, 2, 1.0), row(8, 1, 10.0)], 3, 1).unwrap();
        assert_eq!(source.id, 3);
        assert_eq!(dest.map(|d| d.id), Some(8));
    }

    #[test]
    fn test_split_locked_without_destination() {
        let (source, dest) = split_locked(vec![row(4, 1, 5.0)], 4, 2).unwrap();
        assert_eq!(source.quantity, 5.0);
        assert!(dest.is_none());

        // same-project target: only the source row matches
        let (_, dest) = split_locked(vec![row(4, 1, 5.0)], 4, 1).unwrap();
        assert!(dest.is_none());
    }

    #[test]
    fn test_split_locked_missing_source() {
        assert!(matches!(
            split_locked(vec![row(3, 2, 1.0)], 8, 2),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_lock_conflict_codes() {
        assert!(is_lock_conflict(Some("40P01")));
        assert!(is_lock_conflict(Some("40001")));
        assert!(!is_lock_conflict(Some("23505")));
        assert!(!is_lock_conflict(None));
    }

    #[test]
    fn test_other_errors_pass_through() {
        let err = contention_as_conflict(AppError::BusinessRule("short".to_string()));
        assert!(matches!(err, AppError::BusinessRule(_)));
        let err = contention_as_conflict(AppError::Database(sqlx::Error::RowNotFound));
        assert!(matches!(err, AppError::Database(_)));
    }
}
