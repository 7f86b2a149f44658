use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::models::{FoodOrder, NewOrder, QuoteRequest};
use crate::shop::weekday_name;
use crate::state::AppState;
use crate::validation::ValidationError;

pub async fn create(
    data: web::Json<NewOrder>,
    state: web::Data<AppState>,
) -> ApiResult<HttpResponse> {
    let order = data.into_inner().validate()?;

    let window = state.rules.order_window;
    if state.rules.enforce_order_day && !window.is_open_at(state.clock.now()) {
        return Err(ValidationError::OrderingClosed(weekday_name(window.order_day())).into());
    }

    let result = sqlx::query(
        "INSERT INTO food_orders \
         (name, phone, address, dish, quantity, notes, delivery_type, unit_price, total_price) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"
    )
    .bind(order.name)
    .bind(order.phone)
    .bind(order.address)
    .bind(order.dish)
    .bind(order.quantity)
    .bind(order.notes)
    .bind(order.delivery_type)
    .bind(order.unit_price)
    .bind(order.total_price)
    .execute(&state.pool)
    .await
    .map_err(ApiError::persistence("failed to create order"))?;

    let id = result.last_insert_rowid();
    info!(id, total = order.total_price, "order received");

    Ok(HttpResponse::Created().json(json!({
        "message": "Order received",
        "id": id
    })))
}

pub async fn list(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let rows = sqlx::query(
        "SELECT id, name, phone, address, dish, quantity, notes, delivery_type, unit_price, total_price, created_at \
         FROM food_orders ORDER BY created_at DESC, id DESC"
    )
    .fetch_all(&state.pool)
    .await
    .map_err(ApiError::persistence("failed to load orders"))?;

    let orders = rows
        .iter()
        .map(FoodOrder::from_row)
        .collect::<Result<Vec<_>, _>>()
        .map_err(ApiError::persistence("failed to load orders"))?;

    Ok(HttpResponse::Ok().json(orders))
}

/// Price estimate for the order form, including the side-dish surcharge.
pub async fn quote(data: web::Json<QuoteRequest>) -> HttpResponse {
    HttpResponse::Ok().json(data.into_inner().into_draft().quote())
}
