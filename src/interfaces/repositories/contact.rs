use std::sync::Arc;

use async_trait::async_trait;

use crate::{entities::contact::ContactInsert, errors::AppError, repositories::sqlx_repo::SqlxContactRepo};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Stores a message and returns the generated `person.id`.
    async fn create_contact_message(&self, msg: &ContactInsert) -> Result<i32, AppError>;
}

impl SqlxContactRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxContactRepo { pool }
    }
}

#[async_trait]
impl ContactRepository for SqlxContactRepo {
    async fn create_contact_message(&self, msg: &ContactInsert) -> Result<i32, AppError> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO person (name, email, phone, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&msg.name)
        .bind(&msg.email)
        .bind(msg.phone)
        .bind(&msg.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}

#[async_trait]
impl<T> ContactRepository for Arc<T>
where
    T: ContactRepository + ?Sized,
{
    async fn create_contact_message(&self, msg: &ContactInsert) -> Result<i32, AppError> {
        (**self).create_contact_message(msg).await
    }
}
