//! Transition policy: who may request which status, and in what order.
//!
//! All lookups are total functions over closed enumerations.
//!
//! - No IO
//! - No panics
//! - No business state (pure policy checks)

use chainguard_core::{DomainError, DomainResult};

use crate::role::Role;
use crate::status::ProductStatus;

/// Statuses a role is permitted to move a product into.
pub fn allowed_targets(role: Role) -> &'static [ProductStatus] {
    match role {
        Role::Manufacturer => &[ProductStatus::Packed],
        Role::Logistics => &[
            ProductStatus::Packed,
            ProductStatus::Shipped,
            ProductStatus::OutForDelivery,
        ],
        Role::Consumer => &[ProductStatus::Delivered],
    }
}

/// The single status a product must currently hold for a transition into
/// `status` to be valid.
///
/// `manufactured` has no valid previous status: it is only reachable at
/// registration, never through a transition.
pub fn required_previous(status: ProductStatus) -> Option<ProductStatus> {
    match status {
        ProductStatus::Manufactured => None,
        ProductStatus::Packed => Some(ProductStatus::Manufactured),
        ProductStatus::Shipped => Some(ProductStatus::Packed),
        ProductStatus::OutForDelivery => Some(ProductStatus::Shipped),
        ProductStatus::Delivered => Some(ProductStatus::OutForDelivery),
    }
}

/// Next status in the lifecycle sequence, `None` once terminal.
pub fn next_status(current: ProductStatus) -> Option<ProductStatus> {
    let idx = ProductStatus::SEQUENCE.iter().position(|s| *s == current)?;
    ProductStatus::SEQUENCE.get(idx + 1).copied()
}

/// Check that `role` may request a transition into `target`.
pub fn authorize(role: Role, target: ProductStatus) -> DomainResult<()> {
    if allowed_targets(role).contains(&target) {
        Ok(())
    } else {
        Err(DomainError::Unauthorized)
    }
}
