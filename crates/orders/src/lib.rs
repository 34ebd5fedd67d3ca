//! Orders domain module (goods reception tracking).
//!
//! This crate contains the Order/OrderItem entities, the item ledger rules
//! and the pure reception status deriver, implemented as deterministic domain
//! logic (no IO, no HTTP, no storage).

pub mod order;
pub mod reception;

pub use order::{Order, OrderId, OrderItem, OrderItemId};
pub use reception::{ReceptionStatus, derive_status};
