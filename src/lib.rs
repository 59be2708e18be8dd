use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes, views};
pub use infrastructure::{cors, db, telemetry, utils};

use repositories::{
    contact::ContactRepository,
    project::ProjectRepository,
    sqlx_repo::{SqlxContactRepo, SqlxProjectRepo},
};
use use_cases::{contact::ContactHandler, project::ProjectHandler};

pub type AppProjectHandler = ProjectHandler<Arc<dyn ProjectRepository>>;
pub type AppContactHandler = ContactHandler<Arc<dyn ContactRepository>>;

pub struct AppState {
    pub project_handler: AppProjectHandler,
    pub contact_handler: AppContactHandler,
}

impl AppState {
    /// Wires the Postgres-backed repositories around a shared pool.
    pub fn new(pool: sqlx::PgPool) -> Self {
        AppState::with_repositories(
            Arc::new(SqlxProjectRepo::new(pool.clone())),
            Arc::new(SqlxContactRepo::new(pool)),
        )
    }

    pub fn with_repositories(
        project_repo: Arc<dyn ProjectRepository>,
        contact_repo: Arc<dyn ContactRepository>,
    ) -> Self {
        AppState {
            project_handler: ProjectHandler::new(project_repo),
            contact_handler: ContactHandler::new(contact_repo),
        }
    }
}
