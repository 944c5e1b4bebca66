//! Default vaccination schedule.
//!
//! A fixed template, not user-configurable; the surrounding UI adds ad-hoc
//! entries through the plain CRUD path instead.

use chrono::{Days, NaiveDate};

use flocktrack_core::BatchId;

use crate::record::{AdministrationRoute, VaccinationRecord};

struct TemplateEntry {
    day_offset: u64,
    name: &'static str,
    route: AdministrationRoute,
    target_disease: &'static str,
}

const TEMPLATE: [TemplateEntry; 4] = [
    TemplateEntry {
        day_offset: 7,
        name: "Hatchery + Newcastle",
        route: AdministrationRoute::EyeDrop,
        target_disease: "Newcastle disease",
    },
    TemplateEntry {
        day_offset: 10,
        name: "Influenza",
        route: AdministrationRoute::Injection,
        target_disease: "Avian influenza",
    },
    TemplateEntry {
        day_offset: 12,
        name: "Gumboro",
        route: AdministrationRoute::DrinkingWater,
        target_disease: "Infectious bursal disease",
    },
    TemplateEntry {
        day_offset: 18,
        name: "Lasota",
        route: AdministrationRoute::DrinkingWater,
        target_disease: "Newcastle disease",
    },
];

/// Materialize the template for one batch: each entry becomes a pending
/// vaccine record dated `start_date + day_offset`.
pub fn default_schedule(batch_id: BatchId, start_date: NaiveDate) -> Vec<VaccinationRecord> {
    TEMPLATE
        .iter()
        .map(|entry| {
            VaccinationRecord::scheduled(
                batch_id,
                entry.name,
                entry.route,
                start_date + Days::new(entry.day_offset),
                entry.target_disease,
            )
        })
        .collect()
}
