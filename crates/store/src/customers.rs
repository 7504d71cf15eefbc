use common::Entity;
use domain::{Customer, NewCustomer};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::Result;
use crate::error::{Classify, StoreError};

/// Customer repository.
#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_customer(row: PgRow) -> Result<Customer> {
        Ok(Customer {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            address: row.try_get("address")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    pub async fn list(&self) -> Result<Vec<Customer>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, phone, address, created_at, updated_at
            FROM customers
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .classify(Entity::Customer)?;

        rows.into_iter().map(Self::row_to_customer).collect()
    }

    pub async fn get(&self, id: i64) -> Result<Customer> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, phone, address, created_at, updated_at
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .classify(Entity::Customer)?;

        Self::row_to_customer(row)
    }

    #[tracing::instrument(skip(self, customer))]
    pub async fn create(&self, customer: &NewCustomer) -> Result<Customer> {
        customer.validate()?;

        let row = sqlx::query(
            r#"
            INSERT INTO customers (name, email, phone, address)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, phone, address, created_at, updated_at
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .fetch_one(&self.pool)
        .await
        .classify(Entity::Customer)?;

        let created = Self::row_to_customer(row)?;
        tracing::info!(customer_id = created.id, "customer created");
        Ok(created)
    }

    #[tracing::instrument(skip(self, customer))]
    pub async fn update(&self, id: i64, customer: &NewCustomer) -> Result<Customer> {
        customer.validate()?;

        let row = sqlx::query(
            r#"
            UPDATE customers
            SET name = $1, email = $2, phone = $3, address = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING id, name, email, phone, address, created_at, updated_at
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .classify(Entity::Customer)?;

        Self::row_to_customer(row)
    }

    /// Deletes a customer and its contacts. Fails with `Referenced` while
    /// orders or quotations still point at the customer.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .classify_delete(Entity::Customer)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(Entity::Customer));
        }
        tracing::info!(customer_id = id, "customer deleted");
        Ok(())
    }
}
