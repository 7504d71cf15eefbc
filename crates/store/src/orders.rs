//! Orders and order items.
//!
//! An order and its items are written in one transaction: either the
//! header and every line become visible together, or nothing does.

use chrono::Utc;
use common::Entity;
use domain::{
    NewOrder, NewOrderItem, Order, OrderItem, OrderStatus, OrderWithItems, UpdateOrder,
};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::Result;
use crate::error::{Classify, StoreError};

/// Order repository and transactional writer.
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_order(row: PgRow) -> Result<Order> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::Decode(e.into()))?;

        Ok(Order {
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            quotation_id: row.try_get("quotation_id")?,
            order_date: row.try_get("order_date")?,
            shipping_address: row.try_get("shipping_address")?,
            status,
            total_amount: row.try_get("total_amount")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn row_to_item(row: PgRow) -> Result<OrderItem> {
        Ok(OrderItem {
            id: row.try_get("id")?,
            order_id: row.try_get("order_id")?,
            product_id: row.try_get("product_id")?,
            quantity: row.try_get("quantity")?,
            unit_price: row.try_get("unit_price")?,
            discount: row.try_get("discount")?,
            line_total: row.try_get("line_total")?,
        })
    }

    pub async fn list(&self) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_id, quotation_id, order_date, shipping_address, status,
                   total_amount, created_at, updated_at
            FROM orders
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .classify(Entity::Order)?;

        rows.into_iter().map(Self::row_to_order).collect()
    }

    pub async fn list_for_customer(&self, customer_id: i64) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_id, quotation_id, order_date, shipping_address, status,
                   total_amount, created_at, updated_at
            FROM orders
            WHERE customer_id = $1
            ORDER BY order_date DESC, id DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .classify(Entity::Order)?;

        rows.into_iter().map(Self::row_to_order).collect()
    }

    pub async fn get(&self, id: i64) -> Result<Order> {
        let row = sqlx::query(
            r#"
            SELECT id, customer_id, quotation_id, order_date, shipping_address, status,
                   total_amount, created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .classify(Entity::Order)?;

        Self::row_to_order(row)
    }

    pub async fn items(&self, order_id: i64) -> Result<Vec<OrderItem>> {
        let rows = sqlx::query(
            r#"
            SELECT id, order_id, product_id, quantity, unit_price, discount, line_total
            FROM order_items
            WHERE order_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .classify(Entity::OrderItem)?;

        rows.into_iter().map(Self::row_to_item).collect()
    }

    pub async fn get_with_items(&self, id: i64) -> Result<OrderWithItems> {
        let order = self.get(id).await?;
        let items = self.items(id).await?;
        Ok(OrderWithItems { order, items })
    }

    /// Creates an order and all of its items atomically.
    ///
    /// Items are inserted in the supplied order, each receiving the new
    /// order's id. The returned rows carry database-generated ids,
    /// timestamps, and line totals. Any failure rolls the whole write back.
    #[tracing::instrument(skip(self, order, items), fields(customer_id = order.customer_id, items = items.len()))]
    pub async fn create_order_with_items(
        &self,
        order: &NewOrder,
        items: &[NewOrderItem],
    ) -> Result<OrderWithItems> {
        let status = order.validate_with_items(items)?;
        let order_date = order.order_date.unwrap_or_else(Utc::now);

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO orders (customer_id, quotation_id, order_date, shipping_address, status, total_amount)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, customer_id, quotation_id, order_date, shipping_address, status,
                      total_amount, created_at, updated_at
            "#,
        )
        .bind(order.customer_id)
        .bind(order.quotation_id)
        .bind(order_date)
        .bind(&order.shipping_address)
        .bind(status.as_str())
        .bind(order.total_amount)
        .fetch_one(&mut *tx)
        .await
        .classify(Entity::Order)?;
        let created = Self::row_to_order(row)?;

        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, unit_price, discount)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, order_id, product_id, quantity, unit_price, discount, line_total
                "#,
            )
            .bind(created.id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.discount)
            .fetch_one(&mut *tx)
            .await
            .classify(Entity::OrderItem)?;
            lines.push(Self::row_to_item(row)?);
        }

        tx.commit().await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(order_id = created.id, items = lines.len(), "order created");

        Ok(OrderWithItems {
            order: created,
            items: lines,
        })
    }

    /// Replaces the order header fields. Status is left untouched.
    #[tracing::instrument(skip(self, order))]
    pub async fn update(&self, id: i64, order: &UpdateOrder) -> Result<Order> {
        order.validate()?;

        let row = sqlx::query(
            r#"
            UPDATE orders
            SET customer_id = $1,
                quotation_id = $2,
                order_date = COALESCE($3, order_date),
                shipping_address = $4,
                total_amount = $5,
                updated_at = NOW()
            WHERE id = $6
            RETURNING id, customer_id, quotation_id, order_date, shipping_address, status,
                      total_amount, created_at, updated_at
            "#,
        )
        .bind(order.customer_id)
        .bind(order.quotation_id)
        .bind(order.order_date)
        .bind(&order.shipping_address)
        .bind(order.total_amount)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .classify(Entity::Order)?;

        Self::row_to_order(row)
    }

    /// Moves an order to `status` if the status guard allows it.
    ///
    /// The current row is locked with `FOR UPDATE` for the duration of the
    /// check and the write, so two concurrent updates cannot both pass the
    /// guard against the same starting status.
    #[tracing::instrument(skip(self))]
    pub async fn update_order_status(&self, order_id: i64, status: OrderStatus) -> Result<Order> {
        let mut tx = self.pool.begin().await?;

        let current: String = sqlx::query_scalar("SELECT status FROM orders WHERE id = $1 FOR UPDATE")
            .bind(order_id)
            .fetch_one(&mut *tx)
            .await
            .classify(Entity::Order)?;
        let current = current
            .parse::<OrderStatus>()
            .map_err(|e| StoreError::Database(sqlx::Error::Decode(e.into())))?;

        if let Err(reason) = current.check_transition(status) {
            metrics::counter!("order_status_rejections_total").increment(1);
            tracing::warn!(order_id, from = %current, to = %status, %reason, "order status change rejected");
            return Err(StoreError::InvalidTransition(reason));
        }

        let row = sqlx::query(
            r#"
            UPDATE orders
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, customer_id, quotation_id, order_date, shipping_address, status,
                      total_amount, created_at, updated_at
            "#,
        )
        .bind(status.as_str())
        .bind(order_id)
        .fetch_one(&mut *tx)
        .await
        .classify(Entity::Order)?;
        let updated = Self::row_to_order(row)?;

        tx.commit().await?;

        metrics::counter!("order_status_transitions_total", "to" => status.as_str()).increment(1);
        tracing::info!(order_id, from = %current, to = %status, "order status updated");
        Ok(updated)
    }

    /// Deletes an order's items and then the order, in one transaction.
    #[tracing::instrument(skip(self))]
    pub async fn delete_order(&self, order_id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await
            .classify_delete(Entity::OrderItem)?;

        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await
            .classify_delete(Entity::Order)?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(StoreError::NotFound(Entity::Order));
        }

        tx.commit().await?;
        tracing::info!(order_id, "order deleted");
        Ok(())
    }
}
