use actix_web::web;

use crate::handlers::system::health_check;

mod contact;
mod json_error;
mod projects;

/// Registers every route plus the payload extractors' size limits.
pub fn configure_routes(cfg: &mut web::ServiceConfig, body_limit: usize) {
    cfg.service(health_check);

    cfg.service(
        web::scope("/api")
            .configure(projects::config_routes)
    );

    cfg.configure(contact::config_routes);
    cfg.configure(|cfg| json_error::config_routes(cfg, body_limit));
}
