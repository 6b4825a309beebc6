use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chainguard_core::{Aggregate, AggregateRoot, DomainError, ProductId};
use chainguard_events::Event;

use crate::policy;
use crate::role::Role;
use crate::status::ProductStatus;

/// One historical transition: which status, when, by whom.
///
/// History entries are append-only; they are never reordered or truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: ProductStatus,
    pub occurred_at: DateTime<Utc>,
    pub updated_by: Role,
}

/// Aggregate root: a tracked product.
///
/// `current_status` always equals the status of the most recent
/// `status_history` entry; the first entry is always `manufactured`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: String,
    manufacturer: String,
    origin: String,
    /// Price in smallest currency unit (e.g., cents).
    price: u64,
    current_status: ProductStatus,
    status_history: Vec<StatusUpdate>,
    /// Opaque display identifier encoded into the QR payload. No integrity
    /// semantics.
    hash: String,
    paid: bool,
    version: u64,
    created: bool,
}

impl Product {
    /// Create an empty, not-yet-registered aggregate instance.
    pub fn empty(id: ProductId) -> Self {
        Self {
            id,
            name: String::new(),
            manufacturer: String::new(),
            origin: String::new(),
            price: 0,
            current_status: ProductStatus::INITIAL,
            status_history: Vec::new(),
            hash: String::new(),
            paid: false,
            version: 0,
            created: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn current_status(&self) -> ProductStatus {
        self.current_status
    }

    pub fn status_history(&self) -> &[StatusUpdate] {
        &self.status_history
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn paid(&self) -> bool {
        self.paid
    }

    pub fn is_registered(&self) -> bool {
        self.created
    }

    /// Next status in the lifecycle, `None` once delivered.
    pub fn next_status(&self) -> Option<ProductStatus> {
        policy::next_status(self.current_status)
    }

    /// Payload encoded into the product QR code (`"{id}:{hash}"`).
    pub fn qr_payload(&self) -> String {
        format!("{}:{}", self.id, self.hash)
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: RegisterProduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterProduct {
    pub product_id: ProductId,
    pub name: String,
    pub manufacturer: String,
    pub origin: String,
    pub price: u64,
    pub hash: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AdvanceStatus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceStatus {
    pub product_id: ProductId,
    pub new_status: ProductStatus,
    pub acting_role: Role,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RecordPayment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPayment {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCommand {
    RegisterProduct(RegisterProduct),
    AdvanceStatus(AdvanceStatus),
    RecordPayment(RecordPayment),
}

/// Event: ProductRegistered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRegistered {
    pub product_id: ProductId,
    pub name: String,
    pub manufacturer: String,
    pub origin: String,
    pub price: u64,
    pub hash: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StatusAdvanced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusAdvanced {
    pub product_id: ProductId,
    pub status: ProductStatus,
    pub updated_by: Role,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PaymentRecorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecorded {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductEvent {
    ProductRegistered(ProductRegistered),
    StatusAdvanced(StatusAdvanced),
    PaymentRecorded(PaymentRecorded),
}

impl Event for ProductEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::ProductRegistered(_) => "tracking.product.registered",
            ProductEvent::StatusAdvanced(_) => "tracking.product.status_advanced",
            ProductEvent::PaymentRecorded(_) => "tracking.product.payment_recorded",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ProductEvent::ProductRegistered(e) => e.occurred_at,
            ProductEvent::StatusAdvanced(e) => e.occurred_at,
            ProductEvent::PaymentRecorded(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Product {
    type Command = ProductCommand;
    type Event = ProductEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ProductEvent::ProductRegistered(e) => {
                self.id = e.product_id.clone();
                self.name = e.name.clone();
                self.manufacturer = e.manufacturer.clone();
                self.origin = e.origin.clone();
                self.price = e.price;
                self.hash = e.hash.clone();
                self.current_status = ProductStatus::INITIAL;
                self.status_history = vec![StatusUpdate {
                    status: ProductStatus::INITIAL,
                    occurred_at: e.occurred_at,
                    updated_by: Role::Manufacturer,
                }];
                self.paid = false;
                self.created = true;
            }
            ProductEvent::StatusAdvanced(e) => {
                self.current_status = e.status;
                self.status_history.push(StatusUpdate {
                    status: e.status,
                    occurred_at: e.occurred_at,
                    updated_by: e.updated_by,
                });
            }
            ProductEvent::PaymentRecorded(_) => {
                self.paid = true;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ProductCommand::RegisterProduct(cmd) => self.handle_register(cmd),
            ProductCommand::AdvanceStatus(cmd) => self.handle_advance(cmd),
            ProductCommand::RecordPayment(cmd) => self.handle_record_payment(cmd),
        }
    }
}

impl Product {
    fn ensure_product_id(&self, product_id: &ProductId) -> Result<(), DomainError> {
        if self.id != *product_id {
            return Err(DomainError::invariant("product_id mismatch"));
        }
        Ok(())
    }

    fn handle_register(&self, cmd: &RegisterProduct) -> Result<Vec<ProductEvent>, DomainError> {
        if self.created {
            return Err(DomainError::duplicate_id(cmd.product_id.as_str()));
        }

        if cmd.name.trim().is_empty() {
            return Err(DomainError::validation("name must not be empty"));
        }

        Ok(vec![ProductEvent::ProductRegistered(ProductRegistered {
            product_id: cmd.product_id.clone(),
            name: cmd.name.clone(),
            manufacturer: cmd.manufacturer.clone(),
            origin: cmd.origin.clone(),
            price: cmd.price,
            hash: cmd.hash.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_advance(&self, cmd: &AdvanceStatus) -> Result<Vec<ProductEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_product_id(&cmd.product_id)?;

        // Strictly forward, one step at a time. `manufactured` has no valid
        // previous status, so it is unreachable through a transition.
        match policy::required_previous(cmd.new_status) {
            Some(required) if required == self.current_status => {}
            _ => {
                return Err(DomainError::invalid_transition(
                    self.current_status.as_str(),
                    cmd.new_status.as_str(),
                ));
            }
        }

        // Payment gate: a consumer confirming delivery must have paid first.
        // Role permission is checked at the operation boundary, not here.
        if cmd.acting_role == Role::Consumer
            && cmd.new_status == ProductStatus::Delivered
            && !self.paid
        {
            return Err(DomainError::PaymentRequired);
        }

        Ok(vec![ProductEvent::StatusAdvanced(StatusAdvanced {
            product_id: cmd.product_id.clone(),
            status: cmd.new_status,
            updated_by: cmd.acting_role,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_record_payment(&self, cmd: &RecordPayment) -> Result<Vec<ProductEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_product_id(&cmd.product_id)?;

        // Idempotent: paying twice emits nothing, and `paid` is never unset.
        if self.paid {
            return Ok(Vec::new());
        }

        Ok(vec![ProductEvent::PaymentRecorded(PaymentRecorded {
            product_id: cmd.product_id.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }
}
