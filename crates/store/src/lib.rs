//! `flocktrack-store` — the in-memory entity store and its persistence
//! contract.
//!
//! All entities live in six named collections; the store as a whole is the
//! unit of persistence. Mutation happens through explicit methods so the
//! core stays testable without any UI harness.

pub mod snapshot;
pub mod store;

pub use snapshot::{Backup, InMemorySnapshotStore, SnapshotError, SnapshotStore};
pub use store::EntityStore;
