use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::models::{Customer, NewCustomer};
use crate::state::AppState;

pub async fn register(
    data: web::Json<NewCustomer>,
    state: web::Data<AppState>,
) -> ApiResult<HttpResponse> {
    let customer = data.into_inner().validate()?;

    let result = sqlx::query(
        "INSERT INTO customers (name, email, phone, address, service_choice) VALUES (?, ?, ?, ?, ?)"
    )
    .bind(customer.name)
    .bind(customer.email)
    .bind(customer.phone)
    .bind(customer.address)
    .bind(customer.service_choice)
    .execute(&state.pool)
    .await
    .map_err(ApiError::persistence("failed to register customer"))?;

    let id = result.last_insert_rowid();
    info!(id, "customer registered");

    Ok(HttpResponse::Created().json(json!({
        "message": "Customer registered successfully",
        "id": id
    })))
}

pub async fn list(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let rows = sqlx::query(
        "SELECT id, name, email, phone, address, service_choice, registered_at \
         FROM customers ORDER BY registered_at DESC, id DESC"
    )
    .fetch_all(&state.pool)
    .await
    .map_err(ApiError::persistence("failed to load customers"))?;

    let customers = rows
        .iter()
        .map(Customer::from_row)
        .collect::<Result<Vec<_>, _>>()
        .map_err(ApiError::persistence("failed to load customers"))?;

    Ok(HttpResponse::Ok().json(customers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{api_app, saturday_state};
    use actix_web::{http::StatusCode, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn register_returns_generated_id() {
        let app = test::init_service(api_app(saturday_state().await)).await;

        let req = test::TestRequest::post()
            .uri("/api/customers")
            .set_json(json!({ "name": "Ana", "email": "ana@correo.mx", "phone": "555-0101" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["message"], "Customer registered successfully");
    }

    #[actix_web::test]
    async fn newest_customer_lists_first() {
        let app = test::init_service(api_app(saturday_state().await)).await;

        for name in ["Ana", "Luis", "Marta"] {
            let req = test::TestRequest::post()
                .uri("/api/customers")
                .set_json(json!({ "name": name, "email": "x@y.z" }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        }

        let first: Vec<Customer> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/customers").to_request(),
        )
        .await;
        let second: Vec<Customer> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/customers").to_request(),
        )
        .await;

        let names: Vec<&str> = first.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Marta", "Luis", "Ana"]);
        assert_eq!(first, second);
        assert_eq!(first[0].phone, None);
    }

    #[actix_web::test]
    async fn invalid_payloads_insert_nothing() {
        let app = test::init_service(api_app(saturday_state().await)).await;

        for (body, message) in [
            (json!({ "email": "x@y.z" }), "name and email are required"),
            (json!({ "name": "Ana", "email": "  " }), "name and email are required"),
            (json!({ "name": "Ana", "email": "ana@correo" }), "email format is not valid"),
            (json!({ "name": 7, "email": "x@y.z" }), "invalid JSON payload"),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/customers")
                .set_json(body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], message);
        }

        let customers: Vec<Customer> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/customers").to_request(),
        )
        .await;
        assert!(customers.is_empty());
    }

    #[actix_web::test]
    async fn store_failure_is_reported_generically() {
        let state = saturday_state().await;
        let pool = state.pool.clone();
        let app = test::init_service(api_app(state)).await;
        pool.close().await;

        let req = test::TestRequest::post()
            .uri("/api/customers")
            .set_json(json!({ "name": "Ana", "email": "ana@correo.mx" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "failed to register customer" }));

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/customers").to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
