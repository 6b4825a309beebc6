use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::dto;
use crate::app::services::AppServices;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn current_role(
    Extension(services): Extension<Arc<AppServices>>,
) -> impl IntoResponse {
    Json(serde_json::json!({ "role": services.store().current_role() }))
}

pub async fn set_role(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::SetRoleRequest>,
) -> impl IntoResponse {
    services.store().set_role(body.role);
    Json(serde_json::json!({ "role": body.role }))
}
