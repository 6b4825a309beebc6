use core::str::FromStr;

use serde::{Deserialize, Serialize};

use chainguard_core::DomainError;

/// Product lifecycle status.
///
/// Statuses are totally ordered by the fixed lifecycle sequence; the derived
/// `Ord` follows declaration order. `manufactured` is only reachable at
/// registration, `delivered` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Manufactured,
    Packed,
    Shipped,
    OutForDelivery,
    Delivered,
}

impl ProductStatus {
    /// The fixed sequence every product moves through, one step at a time.
    pub const SEQUENCE: [ProductStatus; 5] = [
        ProductStatus::Manufactured,
        ProductStatus::Packed,
        ProductStatus::Shipped,
        ProductStatus::OutForDelivery,
        ProductStatus::Delivered,
    ];

    /// Status every product starts in.
    pub const INITIAL: ProductStatus = ProductStatus::Manufactured;

    pub fn is_terminal(self) -> bool {
        matches!(self, ProductStatus::Delivered)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProductStatus::Manufactured => "manufactured",
            ProductStatus::Packed => "packed",
            ProductStatus::Shipped => "shipped",
            ProductStatus::OutForDelivery => "out_for_delivery",
            ProductStatus::Delivered => "delivered",
        }
    }
}

impl core::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manufactured" => Ok(ProductStatus::Manufactured),
            "packed" => Ok(ProductStatus::Packed),
            "shipped" => Ok(ProductStatus::Shipped),
            "out_for_delivery" => Ok(ProductStatus::OutForDelivery),
            "delivered" => Ok(ProductStatus::Delivered),
            other => Err(DomainError::validation(format!("unknown status: {other}"))),
        }
    }
}
