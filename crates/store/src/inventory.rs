use common::Entity;
use domain::{DomainError, Inventory, NewInventory, Restock, StockLevels};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::Result;
use crate::error::{Classify, StoreError, is_out_of_range};

/// Inventory repository, one row per product.
#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_inventory(row: PgRow) -> Result<Inventory> {
        Ok(Inventory {
            id: row.try_get("id")?,
            product_id: row.try_get("product_id")?,
            current_stock: row.try_get("current_stock")?,
            reorder_level: row.try_get("reorder_level")?,
            last_restock_date: row.try_get("last_restock_date")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    pub async fn list(&self) -> Result<Vec<Inventory>> {
        let rows = sqlx::query(
            r#"
            SELECT id, product_id, current_stock, reorder_level, last_restock_date,
                   created_at, updated_at
            FROM inventory
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .classify(Entity::Inventory)?;

        rows.into_iter().map(Self::row_to_inventory).collect()
    }

    pub async fn get(&self, id: i64) -> Result<Inventory> {
        let row = sqlx::query(
            r#"
            SELECT id, product_id, current_stock, reorder_level, last_restock_date,
                   created_at, updated_at
            FROM inventory
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .classify(Entity::Inventory)?;

        Self::row_to_inventory(row)
    }

    pub async fn get_by_product(&self, product_id: i64) -> Result<Inventory> {
        let row = sqlx::query(
            r#"
            SELECT id, product_id, current_stock, reorder_level, last_restock_date,
                   created_at, updated_at
            FROM inventory
            WHERE product_id = $1
            "#,
        )
        .bind(product_id)
        .fetch_one(&self.pool)
        .await
        .classify(Entity::Inventory)?;

        Self::row_to_inventory(row)
    }

    /// Items whose stock has reached their reorder level (`current_stock <= reorder_level`).
    ///
    /// The dashboard uses the stricter `<` rule; see the `reports` crate.
    pub async fn low_stock(&self) -> Result<Vec<Inventory>> {
        let rows = sqlx::query(
            r#"
            SELECT id, product_id, current_stock, reorder_level, last_restock_date,
                   created_at, updated_at
            FROM inventory
            WHERE current_stock <= reorder_level
            ORDER BY current_stock ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .classify(Entity::Inventory)?;

        rows.into_iter().map(Self::row_to_inventory).collect()
    }

    #[tracing::instrument(skip(self, inventory))]
    pub async fn create(&self, inventory: &NewInventory) -> Result<Inventory> {
        inventory.validate()?;

        let row = sqlx::query(
            r#"
            INSERT INTO inventory (product_id, current_stock, reorder_level, last_restock_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, product_id, current_stock, reorder_level, last_restock_date,
                      created_at, updated_at
            "#,
        )
        .bind(inventory.product_id)
        .bind(inventory.current_stock)
        .bind(inventory.reorder_level)
        .bind(inventory.last_restock_date)
        .fetch_one(&self.pool)
        .await
        .classify(Entity::Inventory)?;

        let created = Self::row_to_inventory(row)?;
        tracing::info!(
            inventory_id = created.id,
            product_id = created.product_id,
            "inventory created"
        );
        Ok(created)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: i64, levels: StockLevels) -> Result<Inventory> {
        levels.validate()?;

        let row = sqlx::query(
            r#"
            UPDATE inventory
            SET current_stock = $1, reorder_level = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING id, product_id, current_stock, reorder_level, last_restock_date,
                      created_at, updated_at
            "#,
        )
        .bind(levels.current_stock)
        .bind(levels.reorder_level)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .classify(Entity::Inventory)?;

        Self::row_to_inventory(row)
    }

    /// Adds received units to stock and stamps the restock date.
    #[tracing::instrument(skip(self))]
    pub async fn restock(&self, id: i64, restock: Restock) -> Result<Inventory> {
        restock.validate()?;

        let row = sqlx::query(
            r#"
            UPDATE inventory
            SET current_stock = current_stock + $1,
                last_restock_date = NOW(),
                updated_at = NOW()
            WHERE id = $2
            RETURNING id, product_id, current_stock, reorder_level, last_restock_date,
                      created_at, updated_at
            "#,
        )
        .bind(restock.quantity)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_out_of_range(&e) {
                StoreError::Invalid(DomainError::invalid(
                    "quantity",
                    "would overflow current stock",
                ))
            } else {
                StoreError::classify(e, Entity::Inventory)
            }
        })?;

        let updated = Self::row_to_inventory(row)?;
        tracing::info!(
            inventory_id = id,
            quantity = restock.quantity,
            current_stock = updated.current_stock,
            "inventory restocked"
        );
        Ok(updated)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM inventory WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .classify_delete(Entity::Inventory)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(Entity::Inventory));
        }
        Ok(())
    }
}
