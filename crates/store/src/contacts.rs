use common::Entity;
use domain::{Contact, NewContact};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::Result;
use crate::error::{Classify, StoreError};

/// Contact repository.
#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_contact(row: PgRow) -> Result<Contact> {
        Ok(Contact {
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            position: row.try_get("position")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    pub async fn list(&self) -> Result<Vec<Contact>> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_id, name, email, phone, position, created_at, updated_at
            FROM contacts
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .classify(Entity::Contact)?;

        rows.into_iter().map(Self::row_to_contact).collect()
    }

    /// Lists the contacts of one customer. An unknown customer yields an empty list.
    pub async fn list_for_customer(&self, customer_id: i64) -> Result<Vec<Contact>> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_id, name, email, phone, position, created_at, updated_at
            FROM contacts
            WHERE customer_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .classify(Entity::Contact)?;

        rows.into_iter().map(Self::row_to_contact).collect()
    }

    pub async fn get(&self, id: i64) -> Result<Contact> {
        let row = sqlx::query(
            r#"
            SELECT id, customer_id, name, email, phone, position, created_at, updated_at
            FROM contacts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .classify(Entity::Contact)?;

        Self::row_to_contact(row)
    }

    #[tracing::instrument(skip(self, contact))]
    pub async fn create(&self, contact: &NewContact) -> Result<Contact> {
        contact.validate()?;

        let row = sqlx::query(
            r#"
            INSERT INTO contacts (customer_id, name, email, phone, position)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, customer_id, name, email, phone, position, created_at, updated_at
            "#,
        )
        .bind(contact.customer_id)
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.position)
        .fetch_one(&self.pool)
        .await
        .classify(Entity::Contact)?;

        let created = Self::row_to_contact(row)?;
        tracing::info!(
            contact_id = created.id,
            customer_id = created.customer_id,
            "contact created"
        );
        Ok(created)
    }

    #[tracing::instrument(skip(self, contact))]
    pub async fn update(&self, id: i64, contact: &NewContact) -> Result<Contact> {
        contact.validate()?;

        let row = sqlx::query(
            r#"
            UPDATE contacts
            SET customer_id = $1, name = $2, email = $3, phone = $4, position = $5,
                updated_at = NOW()
            WHERE id = $6
            RETURNING id, customer_id, name, email, phone, position, created_at, updated_at
            "#,
        )
        .bind(contact.customer_id)
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.position)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .classify(Entity::Contact)?;

        Self::row_to_contact(row)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .classify_delete(Entity::Contact)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(Entity::Contact));
        }
        Ok(())
    }
}
