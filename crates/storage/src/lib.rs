//! Snapshot store implementations for the workflow engine.
//!
//! The engine only knows the `SnapshotStore` port; this crate provides the
//! concrete stores: an in-memory map (tests/dev) and a JSON-file store for a
//! local, single-actor deployment.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
