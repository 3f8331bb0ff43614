// catalog_app/src/web/handlers/mod.rs

pub mod categoria_handlers;
pub mod functional_handlers;
pub mod page_handlers;
pub mod product_handlers;

use actix_web::HttpResponse;
use serde_json::json;

pub async fn health_check_handler(app_state: actix_web::web::Data<crate::state::AppState>) -> HttpResponse {
  HttpResponse::Ok().json(json!({ "status": "ok", "store": app_state.catalog.backend() }))
}
