use serde::Deserialize;

use chainguard_core::AggregateRoot;
use chainguard_tracking::{Product, ProductStatus, Role};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    /// Optional caller-supplied id; generated (`PROD-…`) when omitted.
    pub id: Option<String>,
    pub name: String,
    pub manufacturer: String,
    pub origin: String,
    /// Price in smallest currency unit (e.g., cents).
    pub price: u64,
    /// Optional opaque label hash; generated when omitted.
    pub hash: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub new_status: ProductStatus,
    pub acting_role: Role,
}

#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: Role,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn product_to_json(product: &Product) -> serde_json::Value {
    serde_json::json!({
        "id": product.id().as_str(),
        "name": product.name(),
        "manufacturer": product.manufacturer(),
        "origin": product.origin(),
        "price": product.price(),
        "current_status": product.current_status(),
        "next_status": product.next_status(),
        "status_history": product.status_history(),
        "hash": product.hash(),
        "paid": product.paid(),
        "qr_payload": product.qr_payload(),
    })
}
