use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::models::sales::DEFAULT_STATUS;
use crate::models::{NewSalesRequest, SalesRequest};
use crate::state::AppState;

pub async fn create(
    data: web::Json<NewSalesRequest>,
    state: web::Data<AppState>,
) -> ApiResult<HttpResponse> {
    let request = data.into_inner().validate()?;
    let items = serde_json::to_string(&request.items)?;

    let result = sqlx::query(
        "INSERT INTO sales_requests (customer_name, customer_phone, customer_email, items, status) \
         VALUES (?, ?, ?, ?, ?)"
    )
    .bind(request.customer_name)
    .bind(request.customer_phone)
    .bind(request.customer_email)
    .bind(items)
    .bind(DEFAULT_STATUS)
    .execute(&state.pool)
    .await
    .map_err(ApiError::persistence("failed to process sales request"))?;

    let id = result.last_insert_rowid();
    info!(id, items = request.items.len(), "sales request received");

    Ok(HttpResponse::Created().json(json!({
        "message": "Sales request received",
        "id": id
    })))
}

pub async fn list(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let rows = sqlx::query(
        "SELECT id, customer_name, customer_phone, customer_email, items, status, created_at \
         FROM sales_requests ORDER BY created_at DESC, id DESC"
    )
    .fetch_all(&state.pool)
    .await
    .map_err(ApiError::persistence("failed to load sales requests"))?;

    let requests = rows
        .iter()
        .map(SalesRequest::from_row)
        .collect::<Result<Vec<_>, _>>()
        .map_err(ApiError::persistence("failed to load sales requests"))?;

    Ok(HttpResponse::Ok().json(requests))
}
