//! `flocktrack-engine` — the service facade the presentation layer talks to.
//!
//! Single-threaded, synchronous: every operation runs to completion before
//! the next is accepted, and each successful mutation pushes a full snapshot
//! to the persistence collaborator.

pub mod farm;

pub use farm::Farm;
