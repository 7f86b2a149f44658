use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::{ApiError, ApiResult};
use crate::shop::catalog::{self, CATALOGS, SERVICES};

pub async fn list_catalogs() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "catalogs": CATALOGS
    }))
}

pub async fn get_catalog(path: web::Path<String>) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let catalog = catalog::find(&id).ok_or(ApiError::NotFound("catalog"))?;
    Ok(HttpResponse::Ok().json(catalog))
}

pub async fn list_services() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "services": SERVICES
    }))
}
