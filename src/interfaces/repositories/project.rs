use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    entities::project::{ProjectInsert, ProjectRow, ProjectUpdate},
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

const SELECT_PROJECT: &str = r#"
    SELECT name, "start-date" AS start, "end-date" AS "end", deskripsi AS "desc", teknologi, image
    FROM project
"#;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    async fn list_projects(&self) -> Result<Vec<ProjectRow>, AppError>;
    async fn get_project_by_name(&self, name: &str) -> Result<Option<ProjectRow>, AppError>;
    /// Fails with [`AppError::Conflict`] when the name is already taken.
    async fn create_project(&self, project: &ProjectInsert) -> Result<(), AppError>;
    /// Returns the number of rows matched by `original_name`.
    async fn update_project(&self, original_name: &str, project: &ProjectUpdate) -> Result<u64, AppError>;
    async fn delete_project(&self, name: &str) -> Result<u64, AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn list_projects(&self) -> Result<Vec<ProjectRow>, AppError> {
        let projects = sqlx::query_as::<_, ProjectRow>(&format!("{SELECT_PROJECT} ORDER BY name ASC"))
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn get_project_by_name(&self, name: &str) -> Result<Option<ProjectRow>, AppError> {
        let project = sqlx::query_as::<_, ProjectRow>(&format!("{SELECT_PROJECT} WHERE name = $1"))
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project)
    }

    async fn create_project(&self, project: &ProjectInsert) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO project (name, "start-date", "end-date", deskripsi, teknologi, image)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&project.name)
        .bind(project.start)
        .bind(project.end)
        .bind(&project.desc)
        .bind(project.teknologi())
        .bind(&project.image)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_project(&self, original_name: &str, project: &ProjectUpdate) -> Result<u64, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE project SET name = ");
        builder.push_bind(project.name.clone());
        builder.push(r#", "start-date" = "#).push_bind(project.start);
        builder.push(r#", "end-date" = "#).push_bind(project.end);
        builder.push(", deskripsi = ").push_bind(project.desc.clone());
        builder.push(", teknologi = ").push_bind(project.teknologi());

        // image column is only touched when a replacement was uploaded
        if let Some(image) = &project.image {
            builder.push(", image = ").push_bind(image.clone());
        }

        builder.push(" WHERE name = ").push_bind(original_name.to_string());

        let result = builder.build().execute(&self.pool).await?;

        Ok(result.rows_affected())
    }

    async fn delete_project(&self, name: &str) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM project WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl<T> ProjectRepository for Arc<T>
where
    T: ProjectRepository + ?Sized,
{
    async fn check_connection(&self) -> Result<(), AppError> {
        (**self).check_connection().await
    }

    async fn list_projects(&self) -> Result<Vec<ProjectRow>, AppError> {
        (**self).list_projects().await
    }

    async fn get_project_by_name(&self, name: &str) -> Result<Option<ProjectRow>, AppError> {
        (**self).get_project_by_name(name).await
    }

    async fn create_project(&self, project: &ProjectInsert) -> Result<(), AppError> {
        (**self).create_project(project).await
    }

    async fn update_project(&self, original_name: &str, project: &ProjectUpdate) -> Result<u64, AppError> {
        (**self).update_project(original_name, project).await
    }

    async fn delete_project(&self, name: &str) -> Result<u64, AppError> {
        (**self).delete_project(name).await
    }
}
