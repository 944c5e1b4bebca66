use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use flocktrack_core::{BatchId, DomainResult, Entity, Violations};

use crate::breed::{BreedCategory, breed_by_id};

/// Batch status lifecycle. At most one batch is `Active` at any time; the
/// invariant is enforced by the lifecycle manager, not by this entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Active,
    Closed,
}

/// One rearing cycle, tracked from start date to close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    id: BatchId,
    pub name: String,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    initial_count: u32,
    breed_id: String,
    breed_category: BreedCategory,
    pub batch_type: String,
    status: BatchStatus,
    /// Frozen by `close`; None while the batch is active.
    days_active: Option<i64>,
    pub notes: Option<String>,
}

/// Input for batch creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBatch {
    pub name: String,
    pub breed_id: String,
    pub initial_count: u32,
    pub batch_type: String,
    pub start_date: NaiveDate,
    pub notes: Option<String>,
}

impl Batch {
    /// Validate the input and build a new `Active` batch.
    ///
    /// Reports every violated field at once: empty name, non-positive
    /// initial count, missing/unknown breed.
    pub fn create(input: NewBatch) -> DomainResult<Self> {
        let mut violations = Violations::new();
        violations.push_if(input.name.trim().is_empty(), "name", "must not be empty");
        violations.push_if(
            input.initial_count == 0,
            "initial_count",
            "must be a positive integer",
        );

        let breed = if input.breed_id.trim().is_empty() {
            violations.push("breed_id", "a breed must be selected");
            None
        } else {
            let found = breed_by_id(&input.breed_id);
            violations.push_if(
                found.is_none(),
                "breed_id",
                format!("unknown breed '{}'", input.breed_id),
            );
            found
        };

        violations.into_result()?;

        // Violations were empty, so the lookup succeeded.
        let breed_category = breed.map(|b| b.category).unwrap_or(BreedCategory::Dual);

        Ok(Self {
            id: BatchId::new(),
            name: input.name.trim().to_string(),
            start_date: input.start_date,
            end_date: None,
            initial_count: input.initial_count,
            breed_id: input.breed_id,
            breed_category,
            batch_type: input.batch_type,
            status: BatchStatus::Active,
            days_active: None,
            notes: input.notes,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn initial_count(&self) -> u32 {
        self.initial_count
    }

    pub fn breed_id(&self) -> &str {
        &self.breed_id
    }

    pub fn breed_category(&self) -> BreedCategory {
        self.breed_category
    }

    pub fn status(&self) -> BatchStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, BatchStatus::Active)
    }

    /// Frozen days-active snapshot; None while the batch is still active.
    pub fn days_active(&self) -> Option<i64> {
        self.days_active
    }

    /// Age in whole days: start to end date for a closed batch, start to
    /// `today` for an active one (the only time-varying input in the core).
    pub fn age_days(&self, today: NaiveDate) -> i64 {
        let until = self.end_date.unwrap_or(today);
        (until - self.start_date).num_days()
    }

    /// Close the batch: status, end date, and the frozen age snapshot.
    /// Idempotent; closing a closed batch keeps its original end date.
    pub fn close(&mut self, today: NaiveDate) {
        if !self.is_active() {
            return;
        }
        self.status = BatchStatus::Closed;
        self.end_date = Some(today);
        self.days_active = Some((today - self.start_date).num_days());
    }

    /// Reopen the batch. Clears the end date and the frozen age snapshot so
    /// an active batch never reports a stale age.
    pub fn activate(&mut self) {
        self.status = BatchStatus::Active;
        self.end_date = None;
        self.days_active = None;
    }
}

impl Entity for Batch {
    type Id = BatchId;

    fn id(&self) -> BatchId {
        self.id
    }
}
