//! Budgets domain module (quotes awaiting or having received approval).
//!
//! This crate contains the Budget entity and its lifecycle rules, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod budget;

pub use budget::{Budget, BudgetId, BudgetStatus, NewBudget};
