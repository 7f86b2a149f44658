pub mod catalog;
pub mod contact;
pub mod customers;
pub mod orders;
pub mod sales;
pub mod status;

use actix_files::NamedFile;
use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::validation::ValidationError;

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Routes mounted under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/customers", web::post().to(customers::register))
        .route("/customers", web::get().to(customers::list))
        .route("/contact", web::post().to(contact::submit))
        .route("/contact-messages", web::get().to(contact::list))
        .route("/orders", web::post().to(orders::create))
        .route("/orders", web::get().to(orders::list))
        .route("/orders/quote", web::post().to(orders::quote))
        .route("/sales-requests", web::post().to(sales::create))
        .route("/sales-requests", web::get().to(sales::list))
        .route("/status", web::get().to(status::status))
        .route("/catalog", web::get().to(catalog::list_catalogs))
        .route("/catalog/{id}", web::get().to(catalog::get_catalog))
        .route("/services", web::get().to(catalog::list_services));
}

/// Body decoding failures answer with the same JSON error shape as validation.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected request body");
        ApiError::from(ValidationError::MalformedPayload).into()
    })
}

/// Serves the landing document for any route nothing else claimed.
pub async fn spa_fallback(state: web::Data<AppState>) -> ApiResult<NamedFile> {
    Ok(NamedFile::open_async(state.public_dir.join("index.html")).await?)
}
