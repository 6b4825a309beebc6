use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use chainguard_core::ProductId;
use chainguard_store::ProductRegistration;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route("/:id", get(get_product))
        .route("/:id/status", post(update_status))
        .route("/:id/pay", post(pay))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    let id = match body.id {
        Some(raw) => match ProductId::new(raw) {
            Ok(id) => Some(id),
            Err(e) => return errors::domain_error_to_response(e),
        },
        None => None,
    };

    let registration = ProductRegistration {
        id,
        name: body.name,
        manufacturer: body.manufacturer,
        origin: body.origin,
        price: body.price,
        hash: body.hash,
    };

    match services.store().add_product(registration) {
        Ok(product) => {
            (StatusCode::CREATED, Json(dto::product_to_json(&product))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateStatusRequest>,
) -> axum::response::Response {
    let product_id = match ProductId::new(id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services
        .store()
        .request_transition(&product_id, body.acting_role, body.new_status)
    {
        Ok(product) => (StatusCode::OK, Json(dto::product_to_json(&product))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn pay(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let product_id = match ProductId::new(id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    // The store treats payment for an unknown id as a silent no-op; the HTTP
    // surface still answers 404 so callers can tell a typo from success.
    if services.store().get_product(&product_id).is_none() {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found");
    }

    services.store().mark_as_paid(&product_id);

    match services.store().get_product(&product_id) {
        Some(product) => (StatusCode::OK, Json(dto::product_to_json(&product))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let product_id = match ProductId::new(id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store().get_product(&product_id) {
        Some(product) => (StatusCode::OK, Json(dto::product_to_json(&product))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
    }
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services
        .store()
        .list_products()
        .iter()
        .map(dto::product_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}
