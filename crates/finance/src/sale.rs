use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use flocktrack_core::{BatchId, DomainResult, Entity, SaleId, Violations};

/// What was sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleKind {
    Live,
    Carcass,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Transfer,
    Credit,
}

/// Business approximation used when a sale records only a head count or
/// only a weight: 1.5 kg per bird. Not a measured value.
pub const EST_WEIGHT_PER_BIRD_KG: f64 = 1.5;

/// One sale transaction, scoped to a batch. Append-only; edited or deleted
/// only by explicit user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    id: SaleId,
    pub batch_id: BatchId,
    pub buyer: String,
    pub count: u32,
    pub weight_kg: f64,
    pub unit_price: f64,
    /// weight_kg x unit_price, fixed at creation.
    pub total: f64,
    pub kind: SaleKind,
    pub payment_method: PaymentMethod,
    pub date: NaiveDate,
}

/// Input for sale creation. `count` and `weight_kg` may each be omitted;
/// the missing one is inferred from the other via the 1.5 kg/bird estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub batch_id: BatchId,
    pub buyer: String,
    pub count: Option<u32>,
    pub weight_kg: Option<f64>,
    pub unit_price: f64,
    pub kind: SaleKind,
    pub payment_method: PaymentMethod,
    pub date: NaiveDate,
}

impl Sale {
    pub fn create(input: NewSale) -> DomainResult<Self> {
        let mut violations = Violations::new();
        violations.push_if(input.buyer.trim().is_empty(), "buyer", "must not be empty");
        violations.push_if(
            !(input.unit_price >= 0.0),
            "unit_price",
            "must be a non-negative number",
        );
        if let Some(w) = input.weight_kg {
            violations.push_if(!(w >= 0.0), "weight_kg", "must be a non-negative number");
        }
        violations.push_if(
            input.count.is_none() && input.weight_kg.is_none(),
            "count",
            "either count or weight must be provided",
        );
        violations.into_result()?;

        let (count, weight_kg) = match (input.count, input.weight_kg) {
            (Some(count), Some(weight)) => (count, weight),
            (Some(count), None) => (count, f64::from(count) * EST_WEIGHT_PER_BIRD_KG),
            (None, Some(weight)) => ((weight / EST_WEIGHT_PER_BIRD_KG).round() as u32, weight),
            (None, None) => unreachable!("rejected by validation"),
        };

        Ok(Self {
            id: SaleId::new(),
            batch_id: input.batch_id,
            buyer: input.buyer.trim().to_string(),
            count,
            weight_kg,
            unit_price: input.unit_price,
            total: weight_kg * input.unit_price,
            kind: input.kind,
            payment_method: input.payment_method,
            date: input.date,
        })
    }
}

impl Entity for Sale {
    type Id = SaleId;

    fn id(&self) -> SaleId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flocktrack_core::DomainError;
    use proptest::prelude::*;

    fn input() -> NewSale {
        NewSale {
            batch_id: BatchId::new(),
            buyer: "Pak Budi".into(),
            count: Some(100),
            weight_kg: None,
            unit_price: 20.0,
            kind: SaleKind::Live,
            payment_method: PaymentMethod::Cash,
            date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
        }
    }

    #[test]
    fn weight_is_inferred_from_count() {
        let sale = Sale::create(input()).unwrap();
        assert_eq!(sale.weight_kg, 150.0);
        assert_eq!(sale.total, 3000.0);
    }

    #[test]
    fn count_is_inferred_from_weight() {
        let sale = Sale::create(NewSale {
            count: None,
            weight_kg: Some(151.0),
            ..input()
        })
        .unwrap();
        assert_eq!(sale.count, 101); // 151 / 1.5 = 100.67, rounded
    }

    #[test]
    fn explicit_count_and_weight_are_kept_verbatim() {
        let sale = Sale::create(NewSale {
            count: Some(100),
            weight_kg: Some(180.0),
            ..input()
        })
        .unwrap();
        assert_eq!(sale.count, 100);
        assert_eq!(sale.weight_kg, 180.0);
    }

    #[test]
    fn both_missing_is_a_validation_error() {
        let err = Sale::create(NewSale {
            count: None,
            weight_kg: None,
            ..input()
        })
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    proptest! {
        /// total always equals weight x unit price.
        #[test]
        fn total_is_weight_times_price(
            count in 1u32..10_000,
            unit_price in 0.0f64..1_000.0,
        ) {
            let sale = Sale::create(NewSale {
                count: Some(count),
                weight_kg: None,
                unit_price,
                ..input()
            }).unwrap();
            prop_assert_eq!(sale.total, sale.weight_kg * unit_price);
        }
    }
}
