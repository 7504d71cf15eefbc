use common::Entity;
use domain::{NewProduct, Product};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::Result;
use crate::error::{Classify, StoreError};

/// Product catalogue repository.
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: PgRow) -> Result<Product> {
        Ok(Product {
            id: row.try_get("id")?,
            sku: row.try_get("sku")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    pub async fn list(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT id, sku, name, description, price, created_at, updated_at
            FROM products
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .classify(Entity::Product)?;

        rows.into_iter().map(Self::row_to_product).collect()
    }

    pub async fn get(&self, id: i64) -> Result<Product> {
        let row = sqlx::query(
            r#"
            SELECT id, sku, name, description, price, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .classify(Entity::Product)?;

        Self::row_to_product(row)
    }

    #[tracing::instrument(skip(self, product))]
    pub async fn create(&self, product: &NewProduct) -> Result<Product> {
        product.validate()?;

        let row = sqlx::query(
            r#"
            INSERT INTO products (sku, name, description, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, sku, name, description, price, created_at, updated_at
            "#,
        )
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .fetch_one(&self.pool)
        .await
        .classify(Entity::Product)?;

        let created = Self::row_to_product(row)?;
        tracing::info!(product_id = created.id, sku = %created.sku, "product created");
        Ok(created)
    }

    #[tracing::instrument(skip(self, product))]
    pub async fn update(&self, id: i64, product: &NewProduct) -> Result<Product> {
        product.validate()?;

        let row = sqlx::query(
            r#"
            UPDATE products
            SET sku = $1, name = $2, description = $3, price = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING id, sku, name, description, price, created_at, updated_at
            "#,
        )
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .classify(Entity::Product)?;

        Self::row_to_product(row)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .classify_delete(Entity::Product)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(Entity::Product));
        }
        tracing::info!(product_id = id, "product deleted");
        Ok(())
    }
}
