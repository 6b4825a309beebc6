//! In-memory product store.
//!
//! The store is the sole owner of tracker state: the product list and the
//! currently selected role. All access goes through its operations, and
//! reads hand out owned snapshots, never references into the store.

pub mod tracker;

pub use tracker::{ProductRegistration, TrackerStore};
