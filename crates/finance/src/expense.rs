use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use flocktrack_core::{BatchId, DomainResult, Entity, ExpenseId, Violations};

/// Expense grouping used by the category breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Chicks,
    Feed,
    Medicine,
    Equipment,
    Labor,
    Utilities,
    Other,
}

/// One expense, scoped to a batch. Append-only like `Sale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    id: ExpenseId,
    pub batch_id: BatchId,
    pub item: String,
    pub cost: f64,
    pub category: ExpenseCategory,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub supplier: Option<String>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub batch_id: BatchId,
    pub item: String,
    pub cost: f64,
    pub category: ExpenseCategory,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub supplier: Option<String>,
    pub date: NaiveDate,
}

impl Expense {
    pub fn create(input: NewExpense) -> DomainResult<Self> {
        let mut violations = Violations::new();
        violations.push_if(input.item.trim().is_empty(), "item", "must not be empty");
        violations.push_if(!(input.cost >= 0.0), "cost", "must be a non-negative number");
        violations.into_result()?;

        Ok(Self {
            id: ExpenseId::new(),
            batch_id: input.batch_id,
            item: input.item.trim().to_string(),
            cost: input.cost,
            category: input.category,
            quantity: input.quantity,
            unit: input.unit,
            supplier: input.supplier,
            date: input.date,
        })
    }
}

impl Entity for Expense {
    type Id = ExpenseId;

    fn id(&self) -> ExpenseId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_validates_item_and_cost() {
        let err = Expense::create(NewExpense {
            batch_id: BatchId::new(),
            item: "".into(),
            cost: -1.0,
            category: ExpenseCategory::Feed,
            quantity: None,
            unit: None,
            supplier: None,
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        })
        .unwrap_err();

        match err {
            flocktrack_core::DomainError::Validation(fields) => {
                assert_eq!(fields.violations().len(), 2);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
