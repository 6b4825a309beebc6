//! The tracker's application service: command execution over in-memory state.
//!
//! Every mutation runs the same pipeline: look up the aggregate, let pure
//! `handle` decide, `apply` the emitted events, store the evolved aggregate
//! back. Errors surface before any `apply`, so failed operations leave state
//! untouched.

use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use chainguard_core::{Aggregate, AggregateRoot, DomainError, DomainResult, ProductId};
use chainguard_tracking::{
    AdvanceStatus, Product, ProductCommand, ProductStatus, RecordPayment, RegisterProduct, Role,
    policy,
};

/// Input for registering a new product.
///
/// `id` and `hash` may be omitted; the store generates them (`PROD-…` /
/// `hash-…`).
#[derive(Debug, Clone)]
pub struct ProductRegistration {
    pub id: Option<ProductId>,
    pub name: String,
    pub manufacturer: String,
    pub origin: String,
    /// Price in smallest currency unit (e.g., cents).
    pub price: u64,
    pub hash: Option<String>,
}

#[derive(Debug)]
struct TrackerState {
    current_role: Role,
    /// Creation order is preserved; listings render in this order.
    products: Vec<Product>,
}

/// Explicit service object owning the product list and the selected role.
///
/// Constructed once and shared by handle (`Arc<TrackerStore>`); there is no
/// ambient global instance. Operations are synchronous and atomic with
/// respect to store state.
#[derive(Debug)]
pub struct TrackerStore {
    inner: RwLock<TrackerState>,
}

impl TrackerStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(TrackerState {
                // Tracking sessions start in the manufacturer role.
                current_role: Role::Manufacturer,
                products: Vec::new(),
            }),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, TrackerState> {
        self.inner.read().expect("tracker state lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, TrackerState> {
        self.inner.write().expect("tracker state lock poisoned")
    }

    /// Replace the currently selected role unconditionally.
    pub fn set_role(&self, role: Role) {
        self.write().current_role = role;
        tracing::debug!(role = %role, "role selected");
    }

    pub fn current_role(&self) -> Role {
        self.read().current_role
    }

    /// Register a new product and append it to the list.
    ///
    /// Creation invariants (initial `manufactured` status, single-entry
    /// history) are established by the aggregate's registration command, not
    /// trusted to the caller. Duplicate ids are rejected.
    pub fn add_product(&self, registration: ProductRegistration) -> DomainResult<Product> {
        let id = registration.id.unwrap_or_else(ProductId::generate);
        let hash = registration
            .hash
            .unwrap_or_else(|| format!("hash-{}", Uuid::now_v7().simple()));

        let mut state = self.write();
        if state.products.iter().any(|p| p.id() == &id) {
            return Err(DomainError::duplicate_id(id.as_str()));
        }

        let mut product = Product::empty(id.clone());
        let cmd = ProductCommand::RegisterProduct(RegisterProduct {
            product_id: id,
            name: registration.name,
            manufacturer: registration.manufacturer,
            origin: registration.origin,
            price: registration.price,
            hash,
            occurred_at: Utc::now(),
        });

        let events = product.handle(&cmd)?;
        for event in &events {
            product.apply(event);
        }

        tracing::info!(product_id = %product.id(), "product registered");
        state.products.push(product.clone());
        Ok(product)
    }

    /// Advance a product's status, acting as the store's current role.
    ///
    /// Validates sequencing and the consumer payment gate, but NOT role
    /// permission: callers of this operation are expected to pre-filter
    /// targets via [`policy::allowed_targets`]. For the fully guarded
    /// operation, use [`TrackerStore::request_transition`].
    pub fn update_product_status(
        &self,
        product_id: &ProductId,
        new_status: ProductStatus,
    ) -> DomainResult<Product> {
        let mut state = self.write();
        let role = state.current_role;
        Self::dispatch_advance(&mut state, product_id, role, new_status)
    }

    /// Advance a product's status with unified checks: role permission,
    /// sequencing, and the consumer payment gate, in one operation.
    pub fn request_transition(
        &self,
        product_id: &ProductId,
        role: Role,
        new_status: ProductStatus,
    ) -> DomainResult<Product> {
        policy::authorize(role, new_status)?;
        let mut state = self.write();
        Self::dispatch_advance(&mut state, product_id, role, new_status)
    }

    fn dispatch_advance(
        state: &mut TrackerState,
        product_id: &ProductId,
        role: Role,
        new_status: ProductStatus,
    ) -> DomainResult<Product> {
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id() == product_id)
            .ok_or(DomainError::NotFound)?;

        let cmd = ProductCommand::AdvanceStatus(AdvanceStatus {
            product_id: product_id.clone(),
            new_status,
            acting_role: role,
            occurred_at: Utc::now(),
        });

        let events = match product.handle(&cmd) {
            Ok(events) => events,
            Err(e) => {
                tracing::debug!(product_id = %product_id, error = %e, "status update rejected");
                return Err(e);
            }
        };

        for event in &events {
            product.apply(event);
        }

        tracing::info!(product_id = %product_id, status = %new_status, "status advanced");
        Ok(product.clone())
    }

    /// Record payment for a product. Idempotent; a silent no-op when no
    /// product matches.
    pub fn mark_as_paid(&self, product_id: &ProductId) {
        let mut state = self.write();
        let Some(product) = state.products.iter_mut().find(|p| p.id() == product_id) else {
            return;
        };

        let cmd = ProductCommand::RecordPayment(RecordPayment {
            product_id: product_id.clone(),
            occurred_at: Utc::now(),
        });

        if let Ok(events) = product.handle(&cmd) {
            for event in &events {
                product.apply(event);
            }
            if !events.is_empty() {
                tracing::info!(product_id = %product_id, "payment recorded");
            }
        }
    }

    /// Owned snapshot of a single product.
    pub fn get_product(&self, product_id: &ProductId) -> Option<Product> {
        self.read()
            .products
            .iter()
            .find(|p| p.id() == product_id)
            .cloned()
    }

    /// Owned snapshots of all products, in creation order.
    pub fn list_products(&self) -> Vec<Product> {
        self.read().products.clone()
    }
}

impl Default for TrackerStore {
    fn default() -> Self {
        Self::new()
    }
}
