//! Quotations and quotation items.

use chrono::{DateTime, Utc};
use common::Entity;
use domain::{
    NewQuotation, NewQuotationItem, Quotation, QuotationItem, QuotationWithItems,
    quotation::validate_status,
};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::Result;
use crate::error::{Classify, StoreError};

/// Quotation repository and transactional writer.
#[derive(Clone)]
pub struct QuotationRepository {
    pool: PgPool,
}

impl QuotationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_quotation(row: PgRow) -> Result<Quotation> {
        Ok(Quotation {
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            quote_date: row.try_get("quote_date")?,
            valid_until: row.try_get("valid_until")?,
            status: row.try_get("status")?,
            total_amount: row.try_get("total_amount")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn row_to_item(row: PgRow) -> Result<QuotationItem> {
        Ok(QuotationItem {
            id: row.try_get("id")?,
            quotation_id: row.try_get("quotation_id")?,
            product_id: row.try_get("product_id")?,
            quantity: row.try_get("quantity")?,
            unit_price: row.try_get("unit_price")?,
            discount: row.try_get("discount")?,
            line_total: row.try_get("line_total")?,
        })
    }

    pub async fn list(&self) -> Result<Vec<Quotation>> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_id, quote_date, valid_until, status, total_amount,
                   created_at, updated_at
            FROM quotations
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .classify(Entity::Quotation)?;

        rows.into_iter().map(Self::row_to_quotation).collect()
    }

    pub async fn get(&self, id: i64) -> Result<Quotation> {
        let row = sqlx::query(
            r#"
            SELECT id, customer_id, quote_date, valid_until, status, total_amount,
                   created_at, updated_at
            FROM quotations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .classify(Entity::Quotation)?;

        Self::row_to_quotation(row)
    }

    pub async fn items(&self, quotation_id: i64) -> Result<Vec<QuotationItem>> {
        let rows = sqlx::query(
            r#"
            SELECT id, quotation_id, product_id, quantity, unit_price, discount, line_total
            FROM quotation_items
            WHERE quotation_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(quotation_id)
        .fetch_all(&self.pool)
        .await
        .classify(Entity::QuotationItem)?;

        rows.into_iter().map(Self::row_to_item).collect()
    }

    pub async fn get_with_items(&self, id: i64) -> Result<QuotationWithItems> {
        let quotation = self.get(id).await?;
        let items = self.items(id).await?;
        Ok(QuotationWithItems { quotation, items })
    }

    /// Creates a quotation and all of its items atomically, after filling
    /// header defaults (see [`NewQuotation::resolve`]). A zero header total
    /// is replaced by the sum of the stored line totals before commit.
    #[tracing::instrument(skip(self, quotation, items), fields(customer_id = quotation.customer_id, items = items.len()))]
    pub async fn create_quotation_with_items(
        &self,
        quotation: &NewQuotation,
        items: &[NewQuotationItem],
    ) -> Result<QuotationWithItems> {
        let draft = quotation.resolve(items, Utc::now())?;

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO quotations (customer_id, quote_date, valid_until, status, total_amount)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, customer_id, quote_date, valid_until, status, total_amount,
                      created_at, updated_at
            "#,
        )
        .bind(draft.customer_id)
        .bind(draft.quote_date)
        .bind(draft.valid_until)
        .bind(&draft.status)
        .bind(draft.total_amount)
        .fetch_one(&mut *tx)
        .await
        .classify(Entity::Quotation)?;
        let mut created = Self::row_to_quotation(row)?;

        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query(
                r#"
                INSERT INTO quotation_items (quotation_id, product_id, quantity, unit_price, discount)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, quotation_id, product_id, quantity, unit_price, discount, line_total
                "#,
            )
            .bind(created.id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.discount)
            .fetch_one(&mut *tx)
            .await
            .classify(Entity::QuotationItem)?;
            lines.push(Self::row_to_item(row)?);
        }

        if let Some(total_amount) = draft.total_from_lines(&lines) {
            let row = sqlx::query(
                r#"
                UPDATE quotations
                SET total_amount = $1
                WHERE id = $2
                RETURNING id, customer_id, quote_date, valid_until, status, total_amount,
                          created_at, updated_at
                "#,
            )
            .bind(total_amount)
            .bind(created.id)
            .fetch_one(&mut *tx)
            .await
            .classify(Entity::Quotation)?;
            created = Self::row_to_quotation(row)?;
        }

        tx.commit().await?;

        metrics::counter!("quotations_created_total").increment(1);
        tracing::info!(
            quotation_id = created.id,
            items = lines.len(),
            "quotation created"
        );

        Ok(QuotationWithItems {
            quotation: created,
            items: lines,
        })
    }

    /// Replaces the quotation header. An absent quote date keeps the stored
    /// one, and an absent validity date is recomputed from the quote date
    /// in effect.
    #[tracing::instrument(skip(self, quotation))]
    pub async fn update(&self, id: i64, quotation: &NewQuotation) -> Result<Quotation> {
        quotation.validate(&[])?;

        let mut tx = self.pool.begin().await?;

        let stored_quote_date: DateTime<Utc> =
            sqlx::query_scalar("SELECT quote_date FROM quotations WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_one(&mut *tx)
                .await
                .classify(Entity::Quotation)?;
        let draft = quotation.resolve(&[], stored_quote_date)?;

        let row = sqlx::query(
            r#"
            UPDATE quotations
            SET customer_id = $1, quote_date = $2, valid_until = $3, status = $4,
                total_amount = $5, updated_at = NOW()
            WHERE id = $6
            RETURNING id, customer_id, quote_date, valid_until, status, total_amount,
                      created_at, updated_at
            "#,
        )
        .bind(draft.customer_id)
        .bind(draft.quote_date)
        .bind(draft.valid_until)
        .bind(&draft.status)
        .bind(draft.total_amount)
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .classify(Entity::Quotation)?;
        let updated = Self::row_to_quotation(row)?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Sets a free-form status. Quotations have no transition guard.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(&self, id: i64, status: &str) -> Result<Quotation> {
        validate_status(status)?;

        let row = sqlx::query(
            r#"
            UPDATE quotations
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, customer_id, quote_date, valid_until, status, total_amount,
                      created_at, updated_at
            "#,
        )
        .bind(status.trim())
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .classify(Entity::Quotation)?;

        Self::row_to_quotation(row)
    }

    /// Deletes a quotation's items and then the quotation, in one transaction.
    #[tracing::instrument(skip(self))]
    pub async fn delete_quotation_with_items(&self, quotation_id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM quotation_items WHERE quotation_id = $1")
            .bind(quotation_id)
            .execute(&mut *tx)
            .await
            .classify_delete(Entity::QuotationItem)?;

        let result = sqlx::query("DELETE FROM quotations WHERE id = $1")
            .bind(quotation_id)
            .execute(&mut *tx)
            .await
            .classify_delete(Entity::Quotation)?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(StoreError::NotFound(Entity::Quotation));
        }

        tx.commit().await?;
        tracing::info!(quotation_id, "quotation deleted");
        Ok(())
    }
}
