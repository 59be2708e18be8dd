use actix_web::web;

use crate::handlers::projects;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/projects")
            .route(web::get().to(projects::list_projects))
    )
    .service(
        web::resource("/projects/{project_name}")
            .route(web::put().to(projects::update_project))
            .route(web::delete().to(projects::delete_project))
    )
    .service(
        web::resource("/project-detail/{project_name}")
            .route(web::get().to(projects::get_project_detail))
    )
    .service(
        web::resource("/add-project")
            .route(web::post().to(projects::create_project))
    );
}
