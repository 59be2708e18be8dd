use crate::{
    entities::project::{
        ClientProject, MessageResponse, NewProjectRequest, ProjectInsert, ProjectMutationResponse,
        ProjectUpdate, UpdateProjectRequest,
    },
    errors::AppError,
    repositories::project::ProjectRepository,
};
use validator::Validate;

const PROJECT_NOT_FOUND: &str = "Proyek tidak ditemukan";
const LIST_FAILED: &str = "Gagal mengambil data proyek";
const DETAIL_FAILED: &str = "Server error saat mengambil detail proyek.";
const CREATE_FAILED: &str = "Terjadi kesalahan pada server.";
const UPDATE_FAILED: &str = "Terjadi kesalahan pada server saat update.";
const DELETE_FAILED: &str = "Terjadi kesalahan pada server saat delete.";
const CREATE_FIELDS_REQUIRED: &str = "Semua field wajib diisi.";
const UPDATE_FIELDS_REQUIRED: &str =
    "Field nama, tanggal, deskripsi, dan teknologi wajib diisi untuk update.";

pub struct ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub project_repo: R,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub fn new(project_repo: R) -> Self {
        ProjectHandler { project_repo }
    }

    /// Lists every project ordered by name
    pub async fn list_projects(&self) -> Result<Vec<ClientProject>, AppError> {
        let rows = self
            .project_repo
            .list_projects()
            .await
            .map_err(|e| e.context(LIST_FAILED))?;

        Ok(rows.into_iter().map(ClientProject::from).collect())
    }

    /// Retrieves a single project by its exact name
    pub async fn get_project(&self, name: &str) -> Result<ClientProject, AppError> {
        let row = self
            .project_repo
            .get_project_by_name(name)
            .await
            .map_err(|e| e.context(DETAIL_FAILED))?
            .ok_or_else(|| AppError::NotFound(PROJECT_NOT_FOUND.into()))?;

        Ok(row.into())
    }

    /// Validates and stores a new project
    pub async fn create_project(
        &self,
        request: NewProjectRequest,
    ) -> Result<ProjectMutationResponse, AppError> {
        request
            .validate()
            .map_err(|e| AppError::missing_fields(CREATE_FIELDS_REQUIRED, &e))?;

        let project = ProjectInsert::try_from(request)?;

        self.project_repo
            .create_project(&project)
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => {
                    AppError::Conflict(format!("Proyek dengan nama \"{}\" sudah ada.", project.name))
                }
                other => other.context(CREATE_FAILED),
            })?;

        tracing::info!(project = %project.name, "Project created");

        Ok(ProjectMutationResponse {
            message: "Proyek berhasil ditambahkan!".to_string(),
            project: project.to_client(),
        })
    }

    /// Rewrites the project stored under `original_name`, which may rename it
    pub async fn update_project(
        &self,
        original_name: &str,
        request: UpdateProjectRequest,
    ) -> Result<ProjectMutationResponse, AppError> {
        request
            .validate()
            .map_err(|e| AppError::missing_fields(UPDATE_FIELDS_REQUIRED, &e))?;

        let project = ProjectUpdate::try_from(request)?;

        let affected = self
            .project_repo
            .update_project(original_name, &project)
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => AppError::Conflict(format!(
                    "Nama proyek \"{}\" mungkin sudah digunakan atau ada konflik kunci.",
                    project.name
                )),
                other => other.context(UPDATE_FAILED),
            })?;

        if affected == 0 {
            return Err(AppError::NotFound(
                "Proyek tidak ditemukan untuk diperbarui.".into(),
            ));
        }

        tracing::info!(from = %original_name, to = %project.name, "Project updated");

        Ok(ProjectMutationResponse {
            message: "Proyek berhasil diperbarui!".to_string(),
            project: project.to_client(),
        })
    }

    /// Deletes a project by its name
    pub async fn delete_project(&self, name: &str) -> Result<MessageResponse, AppError> {
        let affected = self
            .project_repo
            .delete_project(name)
            .await
            .map_err(|e| e.context(DELETE_FAILED))?;

        if affected == 0 {
            return Err(AppError::NotFound(
                "Proyek tidak ditemukan untuk dihapus.".into(),
            ));
        }

        tracing::info!(project = %name, "Project deleted");

        Ok(MessageResponse {
            message: format!("Proyek \"{}\" berhasil dihapus.", name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entities::project::{ProjectRow, TechStack},
        repositories::project::MockProjectRepository,
    };
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    fn create_request(name: &str) -> NewProjectRequest {
        NewProjectRequest {
            name: Some(name.into()),
            start: Some("2024-01-01".into()),
            end: Some("2024-04-01".into()),
            desc: Some("x".into()),
            techs: Some(TechStack { node: true, react: true, ..Default::default() }),
            img: Some("data:image/png;base64,iVBORw==".into()),
        }
    }

    fn update_request(name: &str, img: Option<&str>) -> UpdateProjectRequest {
        UpdateProjectRequest {
            name: Some(name.into()),
            start: Some("2024-01-01".into()),
            end: Some("2024-03-01".into()),
            desc: Some("updated".into()),
            techs: Some(TechStack::default()),
            img: img.map(str::to_string),
        }
    }

    fn stored_row(name: &str) -> ProjectRow {
        ProjectRow {
            name: name.into(),
            start: NaiveDate::from_ymd_opt(2024, 1, 1),
            end: NaiveDate::from_ymd_opt(2024, 4, 1),
            desc: "x".into(),
            teknologi: true,
            image: Some(vec![1, 2, 3]),
        }
    }

    #[tokio::test]
    async fn create_stores_lossy_flag_and_returns_duration() {
        let mut repo = MockProjectRepository::new();
        repo.expect_create_project()
            .withf(|p| p.name == "Portfolio" && p.teknologi() && p.image == vec![0x89, 0x50, 0x4E, 0x47])
            .times(1)
            .returning(|_| Ok(()));

        let handler = ProjectHandler::new(repo);
        let response = handler.create_project(create_request("Portfolio")).await.unwrap();

        assert_eq!(response.message, "Proyek berhasil ditambahkan!");
        assert_eq!(response.project.duration, 3);
        assert_eq!(response.project.id, "Portfolio");
    }

    #[tokio::test]
    async fn create_checks_presence_before_touching_the_repository() {
        let mut repo = MockProjectRepository::new();
        repo.expect_create_project().never();

        let handler = ProjectHandler::new(repo);
        let request = NewProjectRequest { img: None, ..create_request("Portfolio") };
        let err = handler.create_project(request).await.unwrap_err();

        assert_eq!(err.to_string(), CREATE_FIELDS_REQUIRED);
        assert_eq!(err.detail(), Some("img"));
    }

    #[tokio::test]
    async fn create_maps_duplicate_to_conflict() {
        let mut repo = MockProjectRepository::new();
        repo.expect_create_project()
            .returning(|_| Err(AppError::Conflict("Database conflict occurred".into())));

        let handler = ProjectHandler::new(repo);
        let err = handler.create_project(create_request("Portfolio")).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(ref m) if m == "Proyek dengan nama \"Portfolio\" sudah ada."));
    }

    #[tokio::test]
    async fn create_keeps_database_detail_on_internal_error() {
        let mut repo = MockProjectRepository::new();
        repo.expect_create_project()
            .returning(|_| Err(AppError::internal("db", "relation \"project\" does not exist")));

        let handler = ProjectHandler::new(repo);
        let err = handler.create_project(create_request("Portfolio")).await.unwrap_err();

        assert_eq!(err.to_string(), CREATE_FAILED);
        assert_eq!(err.detail(), Some("relation \"project\" does not exist"));
    }

    #[tokio::test]
    async fn get_reports_missing_project() {
        let mut repo = MockProjectRepository::new();
        repo.expect_get_project_by_name()
            .with(eq("Nonexistent"))
            .returning(|_| Ok(None));

        let handler = ProjectHandler::new(repo);
        let err = handler.get_project("Nonexistent").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref m) if m == PROJECT_NOT_FOUND));
    }

    #[tokio::test]
    async fn list_transforms_every_row() {
        let mut repo = MockProjectRepository::new();
        repo.expect_list_projects()
            .returning(|| Ok(vec![stored_row("Alpha"), stored_row("Beta")]));

        let handler = ProjectHandler::new(repo);
        let projects = handler.list_projects().await.unwrap();

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].techs, TechStack { node: true, ..Default::default() });
        assert_eq!(projects[1].img.as_deref(), Some("data:image/jpeg;base64,AQID"));
    }

    #[tokio::test]
    async fn update_matches_on_original_name() {
        let mut repo = MockProjectRepository::new();
        repo.expect_update_project()
            .withf(|original, p| original == "Old" && p.name == "New" && p.image.is_none())
            .times(1)
            .returning(|_, _| Ok(1));

        let handler = ProjectHandler::new(repo);
        let response = handler.update_project("Old", update_request("New", None)).await.unwrap();

        assert_eq!(response.project.id, "New");
        assert_eq!(response.project.img, None);
        assert_eq!(response.project.duration, 2);
    }

    #[tokio::test]
    async fn update_of_unknown_project_is_not_found() {
        let mut repo = MockProjectRepository::new();
        repo.expect_update_project().returning(|_, _| Ok(0));

        let handler = ProjectHandler::new(repo);
        let err = handler
            .update_project("Ghost", update_request("Ghost", Some("data:image/gif;base64,R0lG")))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_requires_core_fields() {
        let mut repo = MockProjectRepository::new();
        repo.expect_update_project().never();

        let handler = ProjectHandler::new(repo);
        let request = UpdateProjectRequest { techs: None, ..update_request("New", None) };
        let err = handler.update_project("Old", request).await.unwrap_err();

        assert_eq!(err.to_string(), UPDATE_FIELDS_REQUIRED);
    }

    #[tokio::test]
    async fn delete_reports_affected_rows() {
        let mut repo = MockProjectRepository::new();
        repo.expect_delete_project().with(eq("Alpha")).returning(|_| Ok(1));
        repo.expect_delete_project().with(eq("Ghost")).returning(|_| Ok(0));

        let handler = ProjectHandler::new(repo);

        let response = handler.delete_project("Alpha").await.unwrap();
        assert_eq!(response.message, "Proyek \"Alpha\" berhasil dihapus.");

        let err = handler.delete_project("Ghost").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
