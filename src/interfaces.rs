pub mod handlers;
pub mod repositories;
pub mod routes;
pub mod views;
