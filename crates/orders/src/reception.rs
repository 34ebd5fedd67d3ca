//! Reception status derivation.
//!
//! The aggregate reception status of an order is never stored independently;
//! it is a pure function of the order's item list, recomputed after every
//! item mutation. This module is the single source of truth for that mapping.

use serde::{Deserialize, Serialize};

use crate::order::OrderItem;

/// Three-valued aggregate reception state of an order (the "status pill").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceptionStatus {
    /// No items yet, or none received.
    Pending,
    /// Some but not all items received.
    Partial,
    /// At least one item, all received.
    Complete,
}

impl core::fmt::Display for ReceptionStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            ReceptionStatus::Pending => "pending",
            ReceptionStatus::Partial => "partial",
            ReceptionStatus::Complete => "complete",
        };
        f.write_str(s)
    }
}

/// Derive the aggregate reception status from an item list.
///
/// Deterministic and stateless: the result depends only on the item count and
/// the received count.
pub fn derive_status(items: &[OrderItem]) -> ReceptionStatus {
    let received = items.iter().filter(|item| item.received).count();

    if items.is_empty() || received == 0 {
        ReceptionStatus::Pending
    } else if received == items.len() {
        ReceptionStatus::Complete
    } else {
        ReceptionStatus::Partial
    }
}
