//! The workflow engine: complete, synchronous state transitions.

use chrono::{NaiveDate, Utc};

use farber_budgets::{Budget, BudgetId, NewBudget};
use farber_core::{WorkflowError, WorkflowResult};
use farber_orders::{Order, OrderId, OrderItemId};

use crate::ports::{Navigator, Notice, Notifier, SnapshotStore};
use crate::state::WorkflowState;

/// Snapshot store key under which the engine persists its state.
pub const STATE_KEY: &str = "farber_workflow_state";

/// Outcome of [`WorkflowEngine::approve_budget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Approval {
    /// The budget was approved by this call and its order was created.
    Approved { budget: Budget, order: Order },
    /// The budget was already approved; nothing changed. The linked order is
    /// resolved by back-reference and may be absent if it was deleted outside
    /// the workflow.
    AlreadyApproved {
        budget: Budget,
        order: Option<Order>,
    },
}

/// Single-actor workflow engine.
///
/// Owns the in-memory [`WorkflowState`] and drives every transition to
/// completion before returning: validate, mutate, re-derive, persist
/// (best-effort), notify. There is no concurrent writer, so there is no
/// locking.
pub struct WorkflowEngine {
    state: WorkflowState,
    store: Box<dyn SnapshotStore>,
    notifier: Box<dyn Notifier>,
    navigator: Box<dyn Navigator>,
}

impl WorkflowEngine {
    /// Engine over an empty state.
    pub fn new(
        store: Box<dyn SnapshotStore>,
        notifier: Box<dyn Notifier>,
        navigator: Box<dyn Navigator>,
    ) -> Self {
        Self {
            state: WorkflowState::default(),
            store,
            notifier,
            navigator,
        }
    }

    /// Engine restored from the store's previous snapshot.
    ///
    /// A missing or unreadable snapshot falls back to the empty state; the
    /// engine must come up regardless of what the store holds. Restored
    /// orders get their status re-derived and the selection normalized.
    pub fn load(
        store: Box<dyn SnapshotStore>,
        notifier: Box<dyn Notifier>,
        navigator: Box<dyn Navigator>,
    ) -> Self {
        let state = match store.load(STATE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<WorkflowState>(&raw) {
                Ok(mut state) => {
                    state.restore_invariants();
                    state
                }
                Err(err) => {
                    tracing::warn!(error = %err, "workflow snapshot unreadable, starting empty");
                    WorkflowState::default()
                }
            },
            Ok(None) => WorkflowState::default(),
            Err(err) => {
                tracing::warn!(error = %err, "workflow snapshot load failed, starting empty");
                WorkflowState::default()
            }
        };

        Self {
            state,
            store,
            notifier,
            navigator,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn budgets(&self) -> &[Budget] {
        self.state.budgets()
    }

    pub fn orders(&self) -> &[Order] {
        self.state.orders()
    }

    /// Create a Pending budget.
    ///
    /// Blank number or client name is rejected with a validation error and
    /// mutates nothing.
    pub fn create_budget(&mut self, input: NewBudget) -> WorkflowResult<Budget> {
        let budget = match Budget::create(BudgetId::new(), input, today()) {
            Ok(budget) => budget,
            Err(err) => return self.reject(err),
        };

        self.state.budgets_mut().push(budget.clone());
        self.commit();

        tracing::info!(budget_id = %budget.id_typed(), number = budget.number(), "budget created");
        self.notifier
            .notify(Notice::success(format!("budget {} created", budget.number())));
        Ok(budget)
    }

    /// Approve a budget and create its order.
    ///
    /// Approving an already-approved budget is an informational no-op, not an
    /// error; exactly one order ever exists per budget.
    pub fn approve_budget(&mut self, budget_id: BudgetId) -> WorkflowResult<Approval> {
        let Some(idx) = self.state.budget_position(budget_id) else {
            return self.reject(WorkflowError::not_found());
        };

        if self.state.budgets()[idx].is_approved() {
            let budget = self.state.budgets()[idx].clone();
            let order = self.state.order_for_budget(budget_id).cloned();

            tracing::info!(budget_id = %budget_id, "budget already approved, no-op");
            self.notifier.notify(Notice::info(format!(
                "budget {} is already approved",
                budget.number()
            )));
            return Ok(Approval::AlreadyApproved { budget, order });
        }

        // Stage the transition fully before touching the state, so a factory
        // rejection leaves no partially approved budget behind.
        let mut approved = self.state.budgets()[idx].clone();
        approved.approve();
        let order = match Order::from_budget(&approved, self.state.next_order_seq(), today()) {
            Ok(order) => order,
            Err(err) => return self.reject(err),
        };

        self.state.budgets_mut()[idx] = approved.clone();
        self.state.push_order(order.clone());
        // Leave the reception surface focused on the fresh order.
        self.state.set_selection(Some(order.id_typed()));
        self.commit();

        tracing::info!(
            budget_id = %budget_id,
            order_id = %order.id_typed(),
            order_number = order.number(),
            "budget approved, order created"
        );
        self.notifier.notify(Notice::success(format!(
            "budget {} approved, order {} sent to reception",
            approved.number(),
            order.number()
        )));
        self.navigator.focus_reception(order.id_typed());

        Ok(Approval::Approved {
            budget: approved,
            order,
        })
    }

    /// Append a line item to an order and return the updated order snapshot.
    pub fn add_item(
        &mut self,
        order_id: OrderId,
        description: &str,
        quantity: i64,
    ) -> WorkflowResult<Order> {
        let Some(order) = self.state.order_mut(order_id) else {
            return self.reject(WorkflowError::not_found());
        };

        if let Err(err) = order.add_item(description, quantity) {
            return self.reject(err);
        }
        let snapshot = order.clone();
        self.commit();

        tracing::info!(order_id = %order_id, status = %snapshot.status(), "item added");
        self.notifier.notify(Notice::success(format!(
            "item added to order {} for reception",
            snapshot.number()
        )));
        Ok(snapshot)
    }

    /// Flip one item's received flag and return the updated order snapshot.
    pub fn toggle_received(
        &mut self,
        order_id: OrderId,
        item_id: OrderItemId,
    ) -> WorkflowResult<Order> {
        let Some(order) = self.state.order_mut(order_id) else {
            return self.reject(WorkflowError::not_found());
        };

        if let Err(err) = order.toggle_received(item_id) {
            return self.reject(err);
        }
        let snapshot = order.clone();
        self.commit();

        tracing::info!(order_id = %order_id, status = %snapshot.status(), "item receipt toggled");
        Ok(snapshot)
    }

    /// Mark every item of an order received and return the updated snapshot.
    pub fn mark_all_received(&mut self, order_id: OrderId) -> WorkflowResult<Order> {
        let Some(order) = self.state.order_mut(order_id) else {
            return self.reject(WorkflowError::not_found());
        };

        order.mark_all_received();
        let snapshot = order.clone();
        self.commit();

        tracing::info!(order_id = %order_id, status = %snapshot.status(), "all items received");
        self.notifier.notify(Notice::success(format!(
            "all items of order {} marked received",
            snapshot.number()
        )));
        Ok(snapshot)
    }

    /// Explicitly focus the reception surface on an order id.
    ///
    /// Pure assignment, no existence check: the id may not (yet) be in the
    /// collection; readers resolve dangling selections to `None`.
    pub fn select_order(&mut self, order_id: OrderId) {
        self.state.set_selection(Some(order_id));
        self.commit();
    }

    /// The order the reception surface is focused on, if it resolves.
    ///
    /// A missing selection falls back to the first order; a dangling selected
    /// id resolves to `None` (this reader, not the selection setter, handles
    /// "no order found").
    pub fn selected_order(&self) -> Option<&Order> {
        match self.state.selected_order_id() {
            Some(id) => self.state.order(id),
            None => self.state.orders().first(),
        }
    }

    /// Persist the full snapshot, best-effort.
    ///
    /// The in-memory transition has already succeeded; failures here are
    /// logged and otherwise ignored.
    fn commit(&mut self) {
        self.state.normalize_selection();

        let serialized = match serde_json::to_string(&self.state) {
            Ok(serialized) => serialized,
            Err(err) => {
                tracing::warn!(error = %err, "workflow snapshot serialization failed");
                return;
            }
        };
        if let Err(err) = self.store.save(STATE_KEY, &serialized) {
            tracing::warn!(error = %err, "workflow snapshot save failed");
        }
    }

    /// Reject an operation: report the outcome, mutate nothing.
    fn reject<T>(&self, err: WorkflowError) -> WorkflowResult<T> {
        tracing::warn!(error = %err, "workflow operation rejected");
        self.notifier.notify(Notice::error(err.to_string()));
        Err(err)
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
