// catalog_app/src/web/routes.rs

use crate::errors::AppError;
use crate::web::handlers::{
  categoria_handlers, functional_handlers, health_check_handler, page_handlers, product_handlers,
};
use actix_web::web;

// Unreadable JSON bodies answer through `AppError` like every other failure.
fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// The whole route table: pages, REST controller, functional router, categories and health.
///
/// Literal segments (`/v2`, `/upload/{id}`) are registered before `/{id}` so they win the match.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(json_config())
    .route("/", web::get().to(page_handlers::index_redirect))
    .route("/health", web::get().to(health_check_handler))
    // Server-rendered pages
    .service(
      web::scope("/productos")
        .route("", web::get().to(page_handlers::listar_handler))
        .route("/listar-delay", web::get().to(page_handlers::listar_delay_handler))
        .route("/listar-full", web::get().to(page_handlers::listar_full_handler))
        .route("/listar-chunked", web::get().to(page_handlers::listar_chunked_handler))
        .route("/ver/{id}", web::get().to(page_handlers::ver_handler))
        .route("/form", web::get().to(page_handlers::crear_form_handler))
        .route("/form", web::post().to(page_handlers::guardar_handler))
        .route("/form/{id}", web::get().to(page_handlers::editar_form_handler))
        .route("/eliminar/{id}", web::get().to(page_handlers::eliminar_handler))
        .route("/uploads/img/{nombre}", web::get().to(page_handlers::ver_foto_handler)),
    )
    // REST controller
    .service(
      web::scope(product_handlers::BASE_PATH)
        .route("", web::get().to(product_handlers::list_productos_handler))
        .route("", web::post().to(product_handlers::create_producto_handler))
        .route("/v2", web::post().to(product_handlers::create_producto_with_foto_handler))
        .route("/upload/{id}", web::post().to(product_handlers::upload_foto_handler))
        .route("/{id}", web::get().to(product_handlers::get_producto_handler))
        .route("/{id}", web::put().to(product_handlers::update_producto_handler))
        .route("/{id}", web::delete().to(product_handlers::delete_producto_handler)),
    )
    // Functional router
    .route("/api/v3/productos", web::get().to(functional_handlers::list_handler))
    .service(
      web::scope(functional_handlers::BASE_PATH)
        .route("", web::get().to(functional_handlers::list_handler))
        .route("", web::post().to(functional_handlers::create_handler))
        .route("/save-with-image", web::post().to(functional_handlers::save_with_image_handler))
        .route("/upload/{id}", web::post().to(functional_handlers::upload_handler))
        .route("/{id}", web::get().to(functional_handlers::get_handler))
        .route("/{id}", web::put().to(functional_handlers::update_handler))
        .route("/{id}", web::delete().to(functional_handlers::delete_handler)),
    )
    .service(
      web::scope("/api/categorias")
        .route("", web::get().to(categoria_handlers::list_categorias_handler))
        .route("", web::post().to(categoria_handlers::create_categoria_handler))
        .route("/{id}", web::get().to(categoria_handlers::get_categoria_handler)),
    );
}
