//! Collaborator ports consumed by the workflow engine.
//!
//! The engine is decoupled from the surrounding application through these
//! traits: a key-value snapshot store (best-effort persistence), a notifier
//! (purely observational outcome reporting, e.g. toasts) and a navigator
//! (view-selection hints). Null implementations are provided for hosts that
//! do not care.

use thiserror::Error;

use farber_orders::OrderId;

/// Snapshot store operation error.
///
/// Infrastructure failures only; the engine logs these and carries on — a
/// failed save never rolls back an in-memory transition.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io: {0}")]
    Io(String),

    #[error("storage serialization: {0}")]
    Serialization(String),
}

/// Key-value persistence port (get/set of serialized state).
pub trait SnapshotStore {
    /// Load the previously saved state for `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Persist `state` under `key`.
    fn save(&self, key: &str, state: &str) -> Result<(), StorageError>;
}

/// Outcome category carried by a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// A mutation succeeded.
    Success,
    /// An idempotent no-op (e.g. re-approving an approved budget).
    Info,
    /// An operation was rejected (validation / not-found).
    Error,
}

/// User-facing outcome report. Observational only; never influences the
/// engine's behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Notification port (toast display and the like).
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Navigation port. The engine may hint that the reception surface should
/// focus a given order; it never renders or routes itself.
pub trait Navigator {
    fn focus_reception(&self, order_id: OrderId);
}

/// Notifier that drops every notice.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notice: Notice) {}
}

/// Navigator that ignores every hint.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNavigator;

impl Navigator for NullNavigator {
    fn focus_reception(&self, _order_id: OrderId) {}
}
