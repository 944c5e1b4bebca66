//! `flocktrack-logbook` — one day's field observation per batch.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use flocktrack_core::{BatchId, DailyLogId, DomainResult, Entity, Violations};

/// One day's observation for a batch.
///
/// `feed_cost` is a point-in-time snapshot priced at consumption time by the
/// recorder; it is never recomputed from the ledger later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    id: DailyLogId,
    pub batch_id: BatchId,
    pub date: NaiveDate,
    /// Whole days since the batch start date.
    pub day_number: i64,
    pub dead_count: u32,
    pub death_cause: Option<String>,
    pub feed_amount_kg: f64,
    pub feed_type: String,
    pub avg_weight_grams: Option<f64>,
    pub temperature_c: Option<f64>,
    pub feed_cost: f64,
    pub notes: Option<String>,
}

/// Input for the daily-log recorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogInput {
    pub date: NaiveDate,
    pub dead_count: u32,
    pub death_cause: Option<String>,
    pub feed_amount_kg: f64,
    pub feed_type: String,
    pub avg_weight_grams: Option<f64>,
    pub temperature_c: Option<f64>,
    pub notes: Option<String>,
}

impl LogInput {
    /// Field-accumulating validation against a batch start date.
    pub fn validate(&self, batch_start: NaiveDate) -> DomainResult<()> {
        let mut violations = Violations::new();
        violations.push_if(
            !(self.feed_amount_kg >= 0.0) || !self.feed_amount_kg.is_finite(),
            "feed_amount_kg",
            "must be a non-negative number",
        );
        violations.push_if(
            self.feed_amount_kg > 0.0 && self.feed_type.trim().is_empty(),
            "feed_type",
            "required when feed was given",
        );
        if let Some(w) = self.avg_weight_grams {
            violations.push_if(
                !(w >= 0.0) || !w.is_finite(),
                "avg_weight_grams",
                "must be a non-negative number",
            );
        }
        if let Some(t) = self.temperature_c {
            violations.push_if(
                !(t >= 0.0) || !t.is_finite(),
                "temperature_c",
                "must be a non-negative number",
            );
        }
        violations.push_if(
            self.date < batch_start,
            "date",
            "must not be before the batch start date",
        );
        violations.into_result()
    }
}

impl DailyLog {
    /// Build a log from validated input. `feed_cost` is the priced
    /// consumption the recorder staged for this entry (0 when no feed was
    /// given).
    pub fn from_input(batch_id: BatchId, batch_start: NaiveDate, input: LogInput, feed_cost: f64) -> Self {
        Self {
            id: DailyLogId::new(),
            batch_id,
            date: input.date,
            day_number: day_number(batch_start, input.date),
            dead_count: input.dead_count,
            death_cause: input.death_cause,
            feed_amount_kg: input.feed_amount_kg,
            feed_type: input.feed_type,
            avg_weight_grams: input.avg_weight_grams,
            temperature_c: input.temperature_c,
            feed_cost,
            notes: input.notes,
        }
    }

    /// Re-apply edited input onto an existing log, keeping id and batch.
    pub fn apply_input(&mut self, batch_start: NaiveDate, input: LogInput, feed_cost: f64) {
        self.date = input.date;
        self.day_number = day_number(batch_start, input.date);
        self.dead_count = input.dead_count;
        self.death_cause = input.death_cause;
        self.feed_amount_kg = input.feed_amount_kg;
        self.feed_type = input.feed_type;
        self.avg_weight_grams = input.avg_weight_grams;
        self.temperature_c = input.temperature_c;
        self.feed_cost = feed_cost;
        self.notes = input.notes;
    }
}

/// Whole days between the batch start and the observation date.
pub fn day_number(batch_start: NaiveDate, date: NaiveDate) -> i64 {
    (date - batch_start).num_days()
}

impl Entity for DailyLog {
    type Id = DailyLogId;

    fn id(&self) -> DailyLogId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flocktrack_core::DomainError;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn input() -> LogInput {
        LogInput {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            dead_count: 3,
            death_cause: None,
            feed_amount_kg: 120.0,
            feed_type: "Starter feed".into(),
            avg_weight_grams: Some(450.0),
            temperature_c: Some(31.0),
            notes: None,
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(input().validate(start()).is_ok());
    }

    #[test]
    fn invalid_fields_are_all_reported() {
        let bad = LogInput {
            date: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            feed_amount_kg: -1.0,
            avg_weight_grams: Some(-10.0),
            temperature_c: Some(f64::NAN),
            ..input()
        };
        let err = bad.validate(start()).unwrap_err();
        match err {
            DomainError::Validation(fields) => {
                let names: Vec<_> = fields.fields().collect();
                assert_eq!(
                    names,
                    vec!["feed_amount_kg", "avg_weight_grams", "temperature_c", "date"]
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn feed_type_required_only_when_feed_given() {
        let mut no_feed = input();
        no_feed.feed_amount_kg = 0.0;
        no_feed.feed_type = String::new();
        assert!(no_feed.validate(start()).is_ok());

        let mut fed = input();
        fed.feed_type = String::new();
        assert!(fed.validate(start()).is_err());
    }

    #[test]
    fn day_number_counts_whole_days() {
        assert_eq!(day_number(start(), start()), 0);
        assert_eq!(
            day_number(start(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
            14
        );
    }

    #[test]
    fn from_input_snapshots_the_feed_cost() {
        let log = DailyLog::from_input(BatchId::new(), start(), input(), 360.0);
        assert_eq!(log.day_number, 14);
        assert_eq!(log.feed_cost, 360.0);
    }
}
