use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use flocktrack_core::{BatchId, DomainResult, Entity, VaccinationId, Violations};

/// What kind of health action this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthCategory {
    Vaccine,
    Medicine,
    Vitamin,
    Disinfectant,
    Other,
}

/// Administration route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdministrationRoute {
    EyeDrop,
    Injection,
    DrinkingWater,
    Spray,
    Feed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VaccinationStatus {
    Pending,
    Done,
}

/// A scheduled or ad-hoc health action for one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationRecord {
    id: VaccinationId,
    pub batch_id: BatchId,
    pub name: String,
    pub route: AdministrationRoute,
    pub date: NaiveDate,
    pub category: HealthCategory,
    pub dosage: Option<String>,
    pub target_disease: Option<String>,
    pub withdrawal_period_days: Option<u32>,
    pub protection_duration_days: Option<u32>,
    status: VaccinationStatus,
    pub notes: Option<String>,
}

/// Input for the ad-hoc creation path (the generator builds records
/// directly from its template).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVaccination {
    pub batch_id: BatchId,
    pub name: String,
    pub route: AdministrationRoute,
    pub date: NaiveDate,
    pub category: HealthCategory,
    pub dosage: Option<String>,
    pub target_disease: Option<String>,
    pub withdrawal_period_days: Option<u32>,
    pub protection_duration_days: Option<u32>,
    pub notes: Option<String>,
}

impl VaccinationRecord {
    pub fn create(input: NewVaccination) -> DomainResult<Self> {
        let mut violations = Violations::new();
        violations.push_if(input.name.trim().is_empty(), "name", "must not be empty");
        violations.into_result()?;

        Ok(Self {
            id: VaccinationId::new(),
            batch_id: input.batch_id,
            name: input.name.trim().to_string(),
            route: input.route,
            date: input.date,
            category: input.category,
            dosage: input.dosage,
            target_disease: input.target_disease,
            withdrawal_period_days: input.withdrawal_period_days,
            protection_duration_days: input.protection_duration_days,
            status: VaccinationStatus::Pending,
            notes: input.notes,
        })
    }

    pub(crate) fn scheduled(
        batch_id: BatchId,
        name: &str,
        route: AdministrationRoute,
        date: NaiveDate,
        target_disease: &str,
    ) -> Self {
        Self {
            id: VaccinationId::new(),
            batch_id,
            name: name.to_string(),
            route,
            date,
            category: HealthCategory::Vaccine,
            dosage: None,
            target_disease: Some(target_disease.to_string()),
            withdrawal_period_days: None,
            protection_duration_days: None,
            status: VaccinationStatus::Pending,
            notes: None,
        }
    }

    pub fn status(&self) -> VaccinationStatus {
        self.status
    }

    pub fn set_status(&mut self, status: VaccinationStatus) {
        self.status = status;
    }
}

impl Entity for VaccinationRecord {
    type Id = VaccinationId;

    fn id(&self) -> VaccinationId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ad_hoc_records_start_pending() {
        let mut record = VaccinationRecord::create(NewVaccination {
            batch_id: BatchId::new(),
            name: "ND booster".into(),
            route: AdministrationRoute::DrinkingWater,
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            category: HealthCategory::Vaccine,
            dosage: Some("1 dose/bird".into()),
            target_disease: Some("Newcastle disease".into()),
            withdrawal_period_days: None,
            protection_duration_days: Some(60),
            notes: None,
        })
        .unwrap();

        assert_eq!(record.status(), VaccinationStatus::Pending);
        record.set_status(VaccinationStatus::Done);
        assert_eq!(record.status(), VaccinationStatus::Done);
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = VaccinationRecord::create(NewVaccination {
            batch_id: BatchId::new(),
            name: " ".into(),
            route: AdministrationRoute::Spray,
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            category: HealthCategory::Disinfectant,
            dosage: None,
            target_disease: None,
            withdrawal_period_days: None,
            protection_duration_days: None,
            notes: None,
        })
        .unwrap_err();
        assert!(matches!(err, flocktrack_core::DomainError::Validation(_)));
    }
}
