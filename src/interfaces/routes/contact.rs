use actix_web::web;

use crate::handlers::contact;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/contact")
            .route(web::get().to(contact::contact_form))
            .route(web::post().to(contact::submit_contact))
    )
    .service(
        web::resource("/contact-after")
            .route(web::get().to(contact::contact_after))
    );
}
