use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use farber_budgets::{Budget, BudgetId};
use farber_core::{Entity, EntityId, Money, WorkflowError, WorkflowResult, impl_entity_id};

use crate::reception::{ReceptionStatus, derive_status};

/// Order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub EntityId);

impl_entity_id!(OrderId);

/// Order item identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderItemId(pub EntityId);

impl_entity_id!(OrderItemId);

/// One line of physical goods within an order, individually markable as
/// received. Owned exclusively by its order; mutate only through the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub description: String,
    /// Always positive; non-positive input is coerced to 1 at the ledger edge.
    pub quantity: i64,
    pub received: bool,
}

/// Entity: Order, a unit of work created from an approved budget and tracked
/// through physical goods reception.
///
/// `status` is derived: it always equals `derive_status(&items)` and is
/// recomputed after every item mutation. It is never settable by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    number: String,
    budget_id: BudgetId,
    client_name: String,
    created_date: NaiveDate,
    expected_date: Option<NaiveDate>,
    total: Money,
    status: ReceptionStatus,
    items: Vec<OrderItem>,
}

impl Order {
    /// Factory: synthesize an order from an approved budget.
    ///
    /// `sequence` comes from the caller's monotonic counter and produces the
    /// zero-padded order number (`O-0001`, `O-0002`, …). The new order starts
    /// with no items and therefore `Pending` reception status.
    pub fn from_budget(budget: &Budget, sequence: u64, today: NaiveDate) -> WorkflowResult<Self> {
        if !budget.is_approved() {
            return Err(WorkflowError::invariant(
                "orders can only be created from an approved budget",
            ));
        }

        Ok(Self {
            id: OrderId::new(),
            number: format!("O-{sequence:04}"),
            budget_id: budget.id_typed(),
            client_name: budget.client_name().to_string(),
            created_date: today,
            expected_date: None,
            total: budget.total(),
            status: ReceptionStatus::Pending,
            items: Vec::new(),
        })
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    /// Back-reference to the budget this order was created from (lookup only,
    /// not an ownership edge).
    pub fn budget_id(&self) -> BudgetId {
        self.budget_id
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn created_date(&self) -> NaiveDate {
        self.created_date
    }

    pub fn expected_date(&self) -> Option<NaiveDate> {
        self.expected_date
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn status(&self) -> ReceptionStatus {
        self.status
    }

    /// Items in insertion order (display order, no semantic ranking).
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn item(&self, item_id: OrderItemId) -> Option<&OrderItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Append a line item.
    ///
    /// `description` must be non-blank after trimming; non-positive
    /// `quantity` is coerced to 1. The new item starts not-received and the
    /// aggregate status is recomputed. Returns the new item's id.
    pub fn add_item(&mut self, description: &str, quantity: i64) -> WorkflowResult<OrderItemId> {
        let description = description.trim();
        if description.is_empty() {
            return Err(WorkflowError::validation(
                "item description must not be blank",
            ));
        }

        let item = OrderItem {
            id: OrderItemId::new(),
            description: description.to_string(),
            quantity: if quantity <= 0 { 1 } else { quantity },
            received: false,
        };
        let item_id = item.id;

        self.items.push(item);
        self.refresh_status();
        Ok(item_id)
    }

    /// Flip one item's `received` flag and recompute the aggregate status.
    ///
    /// Applying this twice in succession restores both the item state and the
    /// status (involution).
    pub fn toggle_received(&mut self, item_id: OrderItemId) -> WorkflowResult<()> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(WorkflowError::not_found)?;

        item.received = !item.received;
        self.refresh_status();
        Ok(())
    }

    /// Mark every item received.
    ///
    /// Idempotent; an order with no items stays `Pending`.
    pub fn mark_all_received(&mut self) {
        for item in &mut self.items {
            item.received = true;
        }
        self.refresh_status();
    }

    /// Re-derive the aggregate status from the item list.
    ///
    /// Called internally after every item mutation; also used when restoring
    /// an order from an external snapshot, so stored status can never drift
    /// from the items.
    pub fn refresh_status(&mut self) {
        self.status = derive_status(&self.items);
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
