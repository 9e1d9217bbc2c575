//! Customer route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use tracing::instrument;

use bookstore_core::CustomerId;

use super::{AppJson, AppPath, AppQuery};
use crate::error::{AppError, Result};
use crate::models::{CreateCustomerRequest, Customer, UserIdQuery};
use crate::state::AppState;

/// Create the customer routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(find_by_user_id).post(create))
        .route("/customers/{id}", get(show))
}

/// `POST /customers`
#[instrument(skip(state, request))]
async fn create(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateCustomerRequest>,
) -> Result<impl IntoResponse> {
    let candidate = request.validate()?;
    let customer = state.customer_service().create(candidate).await?;
    let location = format!("/customers/{}", customer.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(customer),
    ))
}

/// `GET /customers/{id}`
#[instrument(skip(state))]
async fn show(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> Result<Json<Customer>> {
    let id: CustomerId = id
        .parse()
        .map_err(|e| AppError::BadRequest(format!("Validation failed ({e})")))?;
    Ok(Json(state.customer_service().find_by_id(id).await?))
}

/// `GET /customers?userId=...`
#[instrument(skip(state))]
async fn find_by_user_id(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<UserIdQuery>,
) -> Result<Json<Customer>> {
    let user_id = query.validate()?;
    Ok(Json(
        state.customer_service().find_by_user_id(&user_id).await?,
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::routes::app;

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn create_request() -> Request<Body> {
        let body = json!({
            "userId": "starlord2002@gmail.com",
            "name": "Star Lord",
            "phone": "+14155555555",
            "address": "48 Galaxy Rd",
            "address2": "suite 4",
            "city": "Fakeville",
            "state": "WI",
            "zipcode": "54321"
        });
        Request::builder()
            .method("POST")
            .uri("/customers")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_returns_created_with_location() {
        let response = app(AppState::in_memory())
            .oneshot(create_request())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/customers/1");
        let body = body_json(response).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["userId"], "starlord2002@gmail.com");
        assert_eq!(body["address2"], "suite 4");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_bad_request() {
        let response = app(AppState::in_memory())
            .oneshot(get("/customers/abc"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Validation failed (numeric string is expected)");
    }

    #[tokio::test]
    async fn test_lookup_by_user_id() {
        let router = app(AppState::in_memory());
        router.clone().oneshot(create_request()).await.unwrap();

        let response = router
            .oneshot(get("/customers?userId=starlord2002%40gmail.com"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["name"], "Star Lord");
    }

    #[tokio::test]
    async fn test_missing_user_id_query_is_bad_request() {
        let response = app(AppState::in_memory())
            .oneshot(get("/customers"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], json!(["userId should not be empty"]));
    }
}
