use common::Entity;
use domain::{NewUser, PasswordHash, UpdateUser, User};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::Result;
use crate::error::{Classify, StoreError};

/// User account repository.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: PgRow) -> Result<User> {
        Ok(User {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            role: row.try_get("role")?,
            password_hash: row.try_get("password_hash")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, email, role, password_hash, created_at, updated_at
            FROM users
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .classify(Entity::User)?;

        rows.into_iter().map(Self::row_to_user).collect()
    }

    pub async fn get(&self, id: i64) -> Result<User> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, role, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .classify(Entity::User)?;

        Self::row_to_user(row)
    }

    #[tracing::instrument(skip(self, user), fields(username = %user.username))]
    pub async fn create(&self, user: &NewUser) -> Result<User> {
        user.validate()?;
        let password_hash = PasswordHash::generate(&user.password);

        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, role, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, role, password_hash, created_at, updated_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.role())
        .bind(password_hash.as_str())
        .fetch_one(&self.pool)
        .await
        .classify(Entity::User)?;

        let created = Self::row_to_user(row)?;
        tracing::info!(user_id = created.id, "user created");
        Ok(created)
    }

    #[tracing::instrument(skip(self, user))]
    pub async fn update(&self, id: i64, user: &UpdateUser) -> Result<User> {
        user.validate()?;

        let row = sqlx::query(
            r#"
            UPDATE users
            SET username = $1, email = $2, role = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING id, username, email, role, password_hash, created_at, updated_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.role())
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .classify(Entity::User)?;

        Self::row_to_user(row)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .classify_delete(Entity::User)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(Entity::User));
        }
        Ok(())
    }
}
