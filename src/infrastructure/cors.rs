use actix_cors::Cors;
use actix_web::http::header;

const PREFLIGHT_MAX_AGE: usize = 3600;

/// Builds the CORS middleware from the configured origin list.
/// A `*` entry opens the API to any origin.
pub fn build_cors(origins: &[String]) -> Cors {
    let base = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(PREFLIGHT_MAX_AGE);

    if origins.iter().any(|o| o == "*") {
        return base.allow_any_origin();
    }

    origins
        .iter()
        .fold(base, |cors, origin| cors.allowed_origin(origin))
}
