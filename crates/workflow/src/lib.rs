//! Budget→Order→Reception workflow engine.
//!
//! The engine owns one in-memory [`state::WorkflowState`] snapshot and
//! exposes the workflow operations as complete, synchronous transitions:
//! create/approve budgets, accumulate order items, toggle per-item receipt,
//! and track which order the reception surface is focused on. After every
//! mutation the full snapshot is handed to the persistence port best-effort;
//! a failed save never rolls back the in-memory transition.
//!
//! Rendering, routing and storage live behind the ports in [`ports`]; the
//! engine never depends on any of them succeeding.

pub mod engine;
pub mod ports;
pub mod state;

pub use engine::{Approval, STATE_KEY, WorkflowEngine};
pub use ports::{
    Navigator, Notice, NoticeKind, Notifier, NullNavigator, NullNotifier, SnapshotStore,
    StorageError,
};
pub use state::WorkflowState;
