//! The workflow state snapshot.

use serde::{Deserialize, Serialize};

use farber_budgets::{Budget, BudgetId};
use farber_orders::{Order, OrderId};

/// Full state of the budget→order→reception workflow.
///
/// One combined snapshot: budget collection, order collection, the monotonic
/// order-number counter and the reception selection. Serialized as a whole
/// after every mutation and restored as a whole on engine start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
    budgets: Vec<Budget>,
    orders: Vec<Order>,
    /// Next order sequence number. Monotonic and persisted, so order numbers
    /// stay unique even if orders are ever removed from the collection.
    next_order_seq: u64,
    /// Which order the reception surface is focused on.
    selected_order_id: Option<OrderId>,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self {
            budgets: Vec::new(),
            orders: Vec::new(),
            next_order_seq: 1,
            selected_order_id: None,
        }
    }
}

impl WorkflowState {
    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn next_order_seq(&self) -> u64 {
        self.next_order_seq
    }

    pub fn selected_order_id(&self) -> Option<OrderId> {
        self.selected_order_id
    }

    pub fn budget(&self, budget_id: BudgetId) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.id_typed() == budget_id)
    }

    pub fn order(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id_typed() == order_id)
    }

    /// Resolve an order by its budget back-reference.
    pub fn order_for_budget(&self, budget_id: BudgetId) -> Option<&Order> {
        self.orders.iter().find(|o| o.budget_id() == budget_id)
    }

    pub(crate) fn budget_position(&self, budget_id: BudgetId) -> Option<usize> {
        self.budgets.iter().position(|b| b.id_typed() == budget_id)
    }

    pub(crate) fn budgets_mut(&mut self) -> &mut Vec<Budget> {
        &mut self.budgets
    }

    pub(crate) fn order_mut(&mut self, order_id: OrderId) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.id_typed() == order_id)
    }

    pub(crate) fn push_order(&mut self, order: Order) {
        self.orders.push(order);
        self.next_order_seq += 1;
    }

    pub(crate) fn set_selection(&mut self, order_id: Option<OrderId>) {
        self.selected_order_id = order_id;
    }

    /// Apply the selection coordinator's fallback rules.
    ///
    /// Empty order collection resets the selection; a missing selection while
    /// orders exist falls back to the first order. An explicitly selected id
    /// that is not (or no longer) in the collection is left alone — readers
    /// resolve it to "no order found".
    pub(crate) fn normalize_selection(&mut self) {
        if self.orders.is_empty() {
            self.selected_order_id = None;
        } else if self.selected_order_id.is_none() {
            self.selected_order_id = Some(self.orders[0].id_typed());
        }
    }

    /// Re-establish derived invariants after deserializing a snapshot.
    ///
    /// Snapshots come from a best-effort external store, so the stored order
    /// status is treated as untrusted and re-derived from the items.
    pub(crate) fn restore_invariants(&mut self) {
        for order in &mut self.orders {
            order.refresh_status();
        }
        self.normalize_selection();
    }
}
