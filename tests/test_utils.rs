#![allow(dead_code)]

use std::{collections::BTreeMap, sync::Arc};

use actix_web::web;
use async_trait::async_trait;
use parking_lot::Mutex;
use personal_web::{
    constants::MAX_BODY_SIZE,
    entities::{
        contact::ContactInsert,
        project::{ProjectInsert, ProjectRow, ProjectUpdate, TechStack},
    },
    errors::AppError,
    repositories::{contact::ContactRepository, project::ProjectRepository},
    routes::configure_routes,
    AppState,
};
use serde_json::{json, Value};

/// Project table kept in a `BTreeMap`, so iteration order matches `ORDER BY name`.
#[derive(Default)]
pub struct InMemoryProjectRepo {
    rows: Mutex<BTreeMap<String, ProjectRow>>,
}

impl InMemoryProjectRepo {
    pub fn stored(&self, name: &str) -> Option<ProjectRow> {
        self.rows.lock().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }
}

fn duplicate_key() -> AppError {
    AppError::Conflict("Database conflict occurred".into())
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<ProjectRow>, AppError> {
        Ok(self.rows.lock().values().cloned().collect())
    }

    async fn get_project_by_name(&self, name: &str) -> Result<Option<ProjectRow>, AppError> {
        Ok(self.stored(name))
    }

    async fn create_project(&self, project: &ProjectInsert) -> Result<(), AppError> {
        let mut rows = self.rows.lock();
        if rows.contains_key(&project.name) {
            return Err(duplicate_key());
        }
        rows.insert(
            project.name.clone(),
            ProjectRow {
                name: project.name.clone(),
                start: Some(project.start),
                end: Some(project.end),
                desc: project.desc.clone(),
                teknologi: project.teknologi(),
                image: Some(project.image.clone()),
            },
        );
        Ok(())
    }

    async fn update_project(&self, original_name: &str, project: &ProjectUpdate) -> Result<u64, AppError> {
        let mut rows = self.rows.lock();
        let Some(current) = rows.get(original_name).cloned() else {
            return Ok(0);
        };
        if project.name != original_name && rows.contains_key(&project.name) {
            return Err(duplicate_key());
        }

        rows.remove(original_name);
        rows.insert(
            project.name.clone(),
            ProjectRow {
                name: project.name.clone(),
                start: Some(project.start),
                end: Some(project.end),
                desc: project.desc.clone(),
                teknologi: project.teknologi(),
                image: project.image.clone().or(current.image),
            },
        );
        Ok(1)
    }

    async fn delete_project(&self, name: &str) -> Result<u64, AppError> {
        Ok(self.rows.lock().remove(name).map_or(0, |_| 1))
    }
}

#[derive(Default)]
pub struct InMemoryContactRepo {
    pub messages: Mutex<Vec<ContactInsert>>,
}

#[async_trait]
impl ContactRepository for InMemoryContactRepo {
    async fn create_contact_message(&self, msg: &ContactInsert) -> Result<i32, AppError> {
        let mut messages = self.messages.lock();
        messages.push(msg.clone());
        Ok(messages.len() as i32)
    }
}

/// Simulates the database going away mid-request.
pub struct BrokenContactRepo;

#[async_trait]
impl ContactRepository for BrokenContactRepo {
    async fn create_contact_message(&self, _msg: &ContactInsert) -> Result<i32, AppError> {
        Err(AppError::internal("db", DB_DOWN))
    }
}

pub const DB_DOWN: &str = "connection refused";

/// Every query fails as if Postgres were unreachable.
pub struct BrokenProjectRepo;

#[async_trait]
impl ProjectRepository for BrokenProjectRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        Err(AppError::internal("db", DB_DOWN))
    }

    async fn list_projects(&self) -> Result<Vec<ProjectRow>, AppError> {
        Err(AppError::internal("db", DB_DOWN))
    }

    async fn get_project_by_name(&self, _name: &str) -> Result<Option<ProjectRow>, AppError> {
        Err(AppError::internal("db", DB_DOWN))
    }

    async fn create_project(&self, _project: &ProjectInsert) -> Result<(), AppError> {
        Err(AppError::internal("db", DB_DOWN))
    }

    async fn update_project(&self, _original_name: &str, _project: &ProjectUpdate) -> Result<u64, AppError> {
        Err(AppError::internal("db", DB_DOWN))
    }

    async fn delete_project(&self, _name: &str) -> Result<u64, AppError> {
        Err(AppError::internal("db", DB_DOWN))
    }
}

pub struct TestState {
    pub state: web::Data<AppState>,
    pub projects: Arc<InMemoryProjectRepo>,
    pub contacts: Arc<InMemoryContactRepo>,
}

impl TestState {
    pub fn new() -> Self {
        let projects = Arc::new(InMemoryProjectRepo::default());
        let contacts = Arc::new(InMemoryContactRepo::default());
        let state = web::Data::new(AppState::with_repositories(
            projects.clone(),
            contacts.clone(),
        ));

        TestState { state, projects, contacts }
    }
}

pub fn broken_project_state() -> web::Data<AppState> {
    web::Data::new(AppState::with_repositories(
        Arc::new(BrokenProjectRepo),
        Arc::new(InMemoryContactRepo::default()),
    ))
}

pub fn configure_app(cfg: &mut web::ServiceConfig) {
    configure_routes(cfg, MAX_BODY_SIZE);
}

pub fn node_only() -> TechStack {
    TechStack { node: true, ..Default::default() }
}

pub fn project_payload(name: &str) -> Value {
    json!({
        "name": name,
        "start": "2024-01-01",
        "end": "2024-04-01",
        "desc": "x",
        "techs": { "node": true, "react": false, "next": false, "typescript": false },
        "img": "data:image/png;base64,iVBORw=="
    })
}
