//! `flocktrack-health` — vaccination/medication records and the default
//! schedule generated at batch start.

pub mod record;
pub mod schedule;

pub use record::{
    AdministrationRoute, HealthCategory, NewVaccination, VaccinationRecord, VaccinationStatus,
};
pub use schedule::default_schedule;
