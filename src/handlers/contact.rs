use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::models::{ContactMessage, NewContactMessage};
use crate::state::AppState;

pub async fn submit(
    data: web::Json<NewContactMessage>,
    state: web::Data<AppState>,
) -> ApiResult<HttpResponse> {
    let message = data.into_inner().validate()?;

    let result = sqlx::query(
        "INSERT INTO contact_messages (name, phone, email, service, message) VALUES (?, ?, ?, ?, ?)"
    )
    .bind(message.name)
    .bind(message.phone)
    .bind(message.email)
    .bind(message.service)
    .bind(message.message)
    .execute(&state.pool)
    .await
    .map_err(ApiError::persistence("failed to send message"))?;

    let id = result.last_insert_rowid();
    info!(id, "contact message stored");

    Ok(HttpResponse::Created().json(json!({
        "message": "Message sent successfully",
        "id": id
    })))
}

pub async fn list(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let rows = sqlx::query(
        "SELECT id, name, phone, email, service, message, sent_at \
         FROM contact_messages ORDER BY sent_at DESC, id DESC"
    )
    .fetch_all(&state.pool)
    .await
    .map_err(ApiError::persistence("failed to load messages"))?;

    let messages = rows
        .iter()
        .map(ContactMessage::from_row)
        .collect::<Result<Vec<_>, _>>()
        .map_err(ApiError::persistence("failed to load messages"))?;

    Ok(HttpResponse::Ok().json(messages))
}
