//! Product tracking domain (event-sourced).
//!
//! Business rules for tracked products: the lifecycle state machine, the
//! role/transition policy, and the `Product` aggregate. Pure deterministic
//! domain logic (no IO, no HTTP, no storage).

pub mod policy;
pub mod product;
pub mod role;
pub mod status;

pub use product::{
    AdvanceStatus, PaymentRecorded, Product, ProductCommand, ProductEvent, ProductRegistered,
    RecordPayment, RegisterProduct, StatusAdvanced, StatusUpdate,
};
pub use role::Role;
pub use status::ProductStatus;
