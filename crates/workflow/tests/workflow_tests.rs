//! End-to-end workflow tests: budget → order → reception.

use std::sync::{Arc, Mutex};

use farber_budgets::{BudgetId, BudgetStatus, NewBudget};
use farber_core::{Money, WorkflowError};
use farber_orders::{OrderId, ReceptionStatus};
use farber_storage::MemoryStore;
use farber_workflow::{
    Approval, Navigator, Notice, NoticeKind, Notifier, NullNavigator, NullNotifier, STATE_KEY,
    SnapshotStore, StorageError, WorkflowEngine,
};

/// Notifier that records every notice for inspection.
#[derive(Debug, Default, Clone)]
struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    fn kinds(&self) -> Vec<NoticeKind> {
        self.notices.lock().unwrap().iter().map(|n| n.kind).collect()
    }

    fn last(&self) -> Option<Notice> {
        self.notices.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// Navigator that records reception focus hints.
#[derive(Debug, Default, Clone)]
struct RecordingNavigator {
    hints: Arc<Mutex<Vec<OrderId>>>,
}

impl RecordingNavigator {
    fn hints(&self) -> Vec<OrderId> {
        self.hints.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn focus_reception(&self, order_id: OrderId) {
        self.hints.lock().unwrap().push(order_id);
    }
}

/// Store whose saves always fail; loads find nothing.
#[derive(Debug, Default)]
struct FailingStore;

impl SnapshotStore for FailingStore {
    fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn save(&self, _key: &str, _state: &str) -> Result<(), StorageError> {
        Err(StorageError::Io("disk on fire".to_string()))
    }
}

fn engine() -> WorkflowEngine {
    // Idempotent; lets RUST_LOG surface engine logs while debugging tests.
    farber_observability::init();

    WorkflowEngine::new(
        Box::new(MemoryStore::new()),
        Box::new(NullNotifier),
        Box::new(NullNavigator),
    )
}

fn budget_input() -> NewBudget {
    NewBudget {
        number: "P-0001".to_string(),
        client_name: "Acme".to_string(),
        date: None,
        total: Some(Money::from_cents(1000)),
    }
}

/// Shortcut: create and approve one budget, return the new order's id.
fn approved_order(engine: &mut WorkflowEngine) -> OrderId {
    let budget = engine.create_budget(budget_input()).unwrap();
    match engine.approve_budget(budget.id_typed()).unwrap() {
        Approval::Approved { order, .. } => order.id_typed(),
        other => panic!("expected fresh approval, got {other:?}"),
    }
}

#[test]
fn approving_a_budget_creates_its_order() {
    let mut engine = engine();
    let budget = engine.create_budget(budget_input()).unwrap();
    assert_eq!(budget.status(), BudgetStatus::Pending);

    let approval = engine.approve_budget(budget.id_typed()).unwrap();
    let Approval::Approved {
        budget: approved,
        order,
    } = approval
    else {
        panic!("expected fresh approval");
    };

    assert_eq!(approved.status(), BudgetStatus::Approved);
    assert_eq!(order.budget_id(), budget.id_typed());
    assert_eq!(order.total(), Money::from_cents(1000));
    assert_eq!(order.client_name(), "Acme");
    assert_eq!(order.number(), "O-0001");
    assert!(order.items().is_empty());
    assert_eq!(order.status(), ReceptionStatus::Pending);
}

#[test]
fn re_approving_is_an_informational_no_op() {
    let notifier = RecordingNotifier::default();
    let mut engine = WorkflowEngine::new(
        Box::new(MemoryStore::new()),
        Box::new(notifier.clone()),
        Box::new(NullNavigator),
    );

    let budget = engine.create_budget(budget_input()).unwrap();
    engine.approve_budget(budget.id_typed()).unwrap();

    let second = engine.approve_budget(budget.id_typed()).unwrap();
    let Approval::AlreadyApproved {
        budget: unchanged,
        order,
    } = second
    else {
        panic!("expected idempotent outcome");
    };

    assert_eq!(unchanged.status(), BudgetStatus::Approved);
    assert!(order.is_some(), "existing order resolves by back-reference");
    // Exactly one order, no duplicates.
    assert_eq!(engine.orders().len(), 1);
    assert_eq!(notifier.last().unwrap().kind, NoticeKind::Info);
}

#[test]
fn approving_an_unknown_budget_is_not_found() {
    let mut engine = engine();
    engine.create_budget(budget_input()).unwrap();

    let err = engine.approve_budget(BudgetId::new()).unwrap_err();
    assert_eq!(err, WorkflowError::NotFound);
    assert!(engine.orders().is_empty());
    assert_eq!(engine.budgets()[0].status(), BudgetStatus::Pending);
}

#[test]
fn blank_budget_fields_are_rejected_without_mutation() {
    let notifier = RecordingNotifier::default();
    let mut engine = WorkflowEngine::new(
        Box::new(MemoryStore::new()),
        Box::new(notifier.clone()),
        Box::new(NullNavigator),
    );

    let err = engine
        .create_budget(NewBudget {
            number: "  ".to_string(),
            client_name: "Acme".to_string(),
            date: None,
            total: None,
        })
        .unwrap_err();

    assert!(matches!(err, WorkflowError::Validation(_)));
    assert!(engine.budgets().is_empty());
    assert_eq!(notifier.kinds(), vec![NoticeKind::Error]);
}

#[test]
fn reception_walks_pending_partial_complete() {
    let mut engine = engine();
    let order_id = approved_order(&mut engine);

    // Scenario A: no items yet.
    assert_eq!(
        engine.orders()[0].status(),
        ReceptionStatus::Pending
    );

    // Scenario B: two unreceived items.
    engine.add_item(order_id, "Silla de roble", 2).unwrap();
    let order = engine.add_item(order_id, "Mesa baja", 1).unwrap();
    assert_eq!(order.status(), ReceptionStatus::Pending);

    // Scenario C: one of two received.
    let first = order.items()[0].id;
    let order = engine.toggle_received(order_id, first).unwrap();
    assert_eq!(order.status(), ReceptionStatus::Partial);

    // Scenario D: the remaining one.
    let second = order.items()[1].id;
    let order = engine.toggle_received(order_id, second).unwrap();
    assert_eq!(order.status(), ReceptionStatus::Complete);
}

#[test]
fn toggle_twice_restores_item_and_status() {
    let mut engine = engine();
    let order_id = approved_order(&mut engine);
    engine.add_item(order_id, "Silla de roble", 2).unwrap();
    let order = engine.add_item(order_id, "Mesa baja", 1).unwrap();

    let item = order.items()[0].id;
    let before = engine.orders()[0].clone();
    engine.toggle_received(order_id, item).unwrap();
    let after = engine.toggle_received(order_id, item).unwrap();

    assert_eq!(after, before);
}

#[test]
fn add_item_with_blank_description_mutates_nothing() {
    let mut engine = engine();
    let order_id = approved_order(&mut engine);
    engine.add_item(order_id, "Silla de roble", 2).unwrap();
    let before = engine.orders()[0].clone();

    let err = engine.add_item(order_id, "   ", 3).unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));
    assert_eq!(engine.orders()[0], before);
}

#[test]
fn mark_all_received_completes_and_is_idempotent() {
    let mut engine = engine();
    let order_id = approved_order(&mut engine);
    engine.add_item(order_id, "Silla de roble", 2).unwrap();
    engine.add_item(order_id, "Mesa baja", 1).unwrap();
    let order = engine.add_item(order_id, "Perchero", 1).unwrap();

    // Scenario F: 3 items, 1 already received.
    engine.toggle_received(order_id, order.items()[0].id).unwrap();

    let order = engine.mark_all_received(order_id).unwrap();
    assert!(order.items().iter().all(|item| item.received));
    assert_eq!(order.status(), ReceptionStatus::Complete);

    let again = engine.mark_all_received(order_id).unwrap();
    assert_eq!(again, order);
}

#[test]
fn order_numbers_are_sequential_across_approvals() {
    let mut engine = engine();

    for i in 1..=3 {
        let budget = engine
            .create_budget(NewBudget {
                number: format!("P-{i:04}"),
                client_name: "Acme".to_string(),
                date: None,
                total: None,
            })
            .unwrap();
        engine.approve_budget(budget.id_typed()).unwrap();
    }

    let numbers: Vec<&str> = engine.orders().iter().map(|o| o.number()).collect();
    assert_eq!(numbers, vec!["O-0001", "O-0002", "O-0003"]);
}

#[test]
fn approval_focuses_reception_on_the_new_order() {
    let navigator = RecordingNavigator::default();
    let mut engine = WorkflowEngine::new(
        Box::new(MemoryStore::new()),
        Box::new(NullNotifier),
        Box::new(navigator.clone()),
    );

    let order_id = approved_order(&mut engine);
    assert_eq!(navigator.hints(), vec![order_id]);
    assert_eq!(engine.selected_order().map(|o| o.id_typed()), Some(order_id));
}

#[test]
fn selection_defaults_and_dangling_ids_resolve_to_none() {
    let mut engine = engine();
    assert!(engine.selected_order().is_none(), "no orders, no selection");

    let order_id = approved_order(&mut engine);

    // Explicit selection of an id that is not in the collection is allowed;
    // the reader resolves it to "no order found".
    let elsewhere = OrderId::new();
    engine.select_order(elsewhere);
    assert!(engine.selected_order().is_none());

    // Re-selecting the real order resolves again.
    engine.select_order(order_id);
    assert_eq!(engine.selected_order().map(|o| o.id_typed()), Some(order_id));
}

#[test]
fn every_mutation_commits_a_snapshot() {
    let store = MemoryStore::new();
    let mut engine = WorkflowEngine::new(
        Box::new(store.clone()),
        Box::new(NullNotifier),
        Box::new(NullNavigator),
    );

    assert_eq!(store.load(STATE_KEY).unwrap(), None);

    let budget = engine.create_budget(budget_input()).unwrap();
    let after_create = store.load(STATE_KEY).unwrap().expect("snapshot saved");

    engine.approve_budget(budget.id_typed()).unwrap();
    let after_approve = store.load(STATE_KEY).unwrap().expect("snapshot saved");
    assert_ne!(after_create, after_approve);
}

#[test]
fn engine_restores_from_a_saved_snapshot() {
    let store = MemoryStore::new();
    let mut engine = WorkflowEngine::new(
        Box::new(store.clone()),
        Box::new(NullNotifier),
        Box::new(NullNavigator),
    );
    let order_id = approved_order(&mut engine);
    engine.add_item(order_id, "Silla de roble", 2).unwrap();
    drop(engine);

    let mut restored = WorkflowEngine::load(
        Box::new(store),
        Box::new(NullNotifier),
        Box::new(NullNavigator),
    );

    assert_eq!(restored.budgets().len(), 1);
    assert_eq!(restored.orders().len(), 1);
    assert_eq!(restored.orders()[0].items().len(), 1);
    assert_eq!(
        restored.selected_order().map(|o| o.id_typed()),
        Some(order_id)
    );

    // The persisted counter keeps numbering monotonic after a restart.
    let budget = restored
        .create_budget(NewBudget {
            number: "P-0002".to_string(),
            client_name: "Muebles Sur".to_string(),
            date: None,
            total: None,
        })
        .unwrap();
    let Approval::Approved { order, .. } = restored.approve_budget(budget.id_typed()).unwrap()
    else {
        panic!("expected fresh approval");
    };
    assert_eq!(order.number(), "O-0002");
}

#[test]
fn restore_re_derives_order_status_from_items() {
    let store = MemoryStore::new();
    let mut engine = WorkflowEngine::new(
        Box::new(store.clone()),
        Box::new(NullNotifier),
        Box::new(NullNavigator),
    );
    let order_id = approved_order(&mut engine);
    engine.add_item(order_id, "Silla de roble", 2).unwrap();
    let order = engine.add_item(order_id, "Mesa baja", 1).unwrap();
    engine.toggle_received(order_id, order.items()[0].id).unwrap();
    drop(engine);

    // Tamper with the stored status; items still say one-of-two received.
    let raw = store.load(STATE_KEY).unwrap().unwrap();
    store
        .save(STATE_KEY, &raw.replace("\"partial\"", "\"complete\""))
        .unwrap();

    let restored = WorkflowEngine::load(
        Box::new(store),
        Box::new(NullNotifier),
        Box::new(NullNavigator),
    );
    assert_eq!(restored.orders()[0].status(), ReceptionStatus::Partial);
}

#[test]
fn unreadable_snapshot_falls_back_to_empty_state() {
    let store = MemoryStore::new();
    store.save(STATE_KEY, "definitely not json").unwrap();

    let engine = WorkflowEngine::load(
        Box::new(store),
        Box::new(NullNotifier),
        Box::new(NullNavigator),
    );
    assert!(engine.budgets().is_empty());
    assert!(engine.orders().is_empty());
}

#[test]
fn failed_saves_never_block_mutations() {
    let mut engine = WorkflowEngine::new(
        Box::new(FailingStore),
        Box::new(NullNotifier),
        Box::new(NullNavigator),
    );

    let budget = engine.create_budget(budget_input()).unwrap();
    let order_id = match engine.approve_budget(budget.id_typed()).unwrap() {
        Approval::Approved { order, .. } => order.id_typed(),
        other => panic!("expected fresh approval, got {other:?}"),
    };
    let order = engine.add_item(order_id, "Silla de roble", 2).unwrap();

    assert_eq!(engine.budgets().len(), 1);
    assert_eq!(order.items().len(), 1);
}
