// catalog_app/src/web/mod.rs

pub mod handlers;
pub mod multipart;
pub mod routes;
pub mod templates;
pub mod views;

pub use routes::configure_app_routes;
