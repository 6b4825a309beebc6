use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use chainguard_core::DomainError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        DomainError::InvalidTransition { .. } => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invalid_transition", err.to_string())
        }
        DomainError::PaymentRequired => {
            json_error(StatusCode::PAYMENT_REQUIRED, "payment_required", err.to_string())
        }
        DomainError::Unauthorized => json_error(
            StatusCode::FORBIDDEN,
            "unauthorized",
            "role not permitted to request this status",
        ),
        DomainError::DuplicateId(_) => {
            json_error(StatusCode::CONFLICT, "duplicate_id", err.to_string())
        }
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
