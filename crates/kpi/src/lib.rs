//! `flocktrack-kpi` — pure zootechnical and financial KPI derivation.
//!
//! Everything here is a deterministic function of the batch and its
//! log/sale/expense slices. Wall-clock time enters only through the
//! caller-supplied `today`, and only matters for the age of an active batch.

pub mod band;
pub mod calculator;

pub use band::PerformanceBand;
pub use calculator::{BatchKpis, calculate};
