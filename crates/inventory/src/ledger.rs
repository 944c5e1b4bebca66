//! Feed ledger: scope-aware lookup, staged consumption, restock.
//!
//! Consumption is split into a pure decision step (`stage_consume`) and a
//! mutation step (`commit`) so a caller pairing the decrement with a second
//! write (the daily-log recorder) can validate everything first and commit
//! both in one state transition. Nothing is mutated on any failure path.

use chrono::{DateTime, Utc};

use flocktrack_core::{BatchId, DomainError, DomainResult, Entity, InventoryItemId};

use crate::item::InventoryItem;

/// A staged stock decrement, priced at the unit cost in effect when it was
/// planned. `cost` is the point-in-time value the caller stores on its side
/// of the transaction; it is never recomputed later.
#[derive(Debug, Clone, PartialEq)]
pub struct Consumption {
    pub item_id: InventoryItemId,
    pub item_name: String,
    pub amount: f64,
    pub unit_cost: f64,
    pub cost: f64,
}

/// Mutable view over an inventory collection.
pub struct Ledger<'a> {
    items: &'a mut Vec<InventoryItem>,
}

impl<'a> Ledger<'a> {
    pub fn new(items: &'a mut Vec<InventoryItem>) -> Self {
        Self { items }
    }

    /// Find the feed item matching `name` visible from `scope`.
    ///
    /// Visible means batch-scoped to `scope` or shared (`batch_id` = None).
    /// A batch-scoped item shadows a shared item of the same name; within a
    /// scope class the first match wins.
    pub fn find_stock(&self, name: &str, scope: Option<BatchId>) -> Option<&InventoryItem> {
        let feed = |item: &&InventoryItem| item.is_feed() && item.name == name;

        self.items
            .iter()
            .filter(feed)
            .find(|item| scope.is_some() && item.batch_id == scope)
            .or_else(|| {
                self.items
                    .iter()
                    .filter(feed)
                    .find(|item| item.batch_id.is_none())
            })
    }

    /// Plan a consumption without mutating anything.
    ///
    /// Fails with `NotFound` when no visible feed item matches, and with
    /// `InsufficientStock` (carrying requested/available) when the amount
    /// exceeds the current stock. The caller must not clamp.
    pub fn stage_consume(
        &self,
        name: &str,
        scope: Option<BatchId>,
        amount: f64,
    ) -> DomainResult<Consumption> {
        // Contract violation, not a business condition.
        assert!(
            amount >= 0.0 && amount.is_finite(),
            "consumption amount must be a non-negative number"
        );

        let item = self
            .find_stock(name, scope)
            .ok_or_else(|| DomainError::not_found("feed stock", name))?;

        if amount > item.current_stock() {
            return Err(DomainError::InsufficientStock {
                item: item.name.clone(),
                requested: amount,
                available: item.current_stock(),
            });
        }

        Ok(Consumption {
            item_id: item.id(),
            item_name: item.name.clone(),
            amount,
            unit_cost: item.cost_per_unit,
            cost: amount * item.cost_per_unit,
        })
    }

    /// Apply a staged consumption.
    pub fn commit(&mut self, staged: &Consumption, now: DateTime<Utc>) -> DomainResult<()> {
        let item = self.item_mut(staged.item_id)?;
        item.apply_delta(-staged.amount, now);
        Ok(())
    }

    /// Stage + commit in one call, for callers with no second write to pair.
    pub fn consume(
        &mut self,
        name: &str,
        scope: Option<BatchId>,
        amount: f64,
        now: DateTime<Utc>,
    ) -> DomainResult<Consumption> {
        let staged = self.stage_consume(name, scope, amount)?;
        self.commit(&staged, now)?;
        Ok(staged)
    }

    /// Put stock back on the shelf. `amount` must be strictly positive.
    pub fn restock(
        &mut self,
        item_id: InventoryItemId,
        amount: f64,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if !(amount > 0.0) || !amount.is_finite() {
            return Err(DomainError::validation(
                "amount",
                "restock amount must be positive",
            ));
        }
        let item = self.item_mut(item_id)?;
        item.apply_delta(amount, now);
        Ok(())
    }

    /// Reverse a previously committed consumption (daily-log edits).
    pub fn reverse(&mut self, staged: &Consumption, now: DateTime<Utc>) -> DomainResult<()> {
        let item = self.item_mut(staged.item_id)?;
        item.apply_delta(staged.amount, now);
        Ok(())
    }

    fn item_mut(&mut self, id: InventoryItemId) -> DomainResult<&mut InventoryItem> {
        self.items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| DomainError::not_found("inventory item", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemCategory, NewItem};
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn feed(name: &str, scope: Option<BatchId>, stock: f64, cost: f64) -> InventoryItem {
        InventoryItem::create(
            NewItem {
                batch_id: scope,
                name: name.into(),
                category: ItemCategory::Feed,
                unit: "kg".into(),
                current_stock: stock,
                min_stock: 200.0,
                cost_per_unit: cost,
                supplier: None,
                expiry_date: None,
            },
            now(),
        )
        .unwrap()
    }

    #[test]
    fn consume_decrements_and_prices_the_draw() {
        let mut items = vec![feed("Starter feed", None, 1000.0, 3.0)];
        let mut ledger = Ledger::new(&mut items);

        let consumption = ledger.consume("Starter feed", None, 100.0, now()).unwrap();
        assert_eq!(consumption.cost, 300.0);
        assert_eq!(consumption.unit_cost, 3.0);
        assert_eq!(items[0].current_stock(), 900.0);
    }

    #[test]
    fn over_consume_is_rejected_without_mutation() {
        let mut items = vec![feed("Starter feed", None, 80.0, 3.0)];
        let mut ledger = Ledger::new(&mut items);

        let err = ledger.consume("Starter feed", None, 120.0, now()).unwrap_err();
        match err {
            DomainError::InsufficientStock {
                requested,
                available,
                ..
            } => {
                assert_eq!(requested, 120.0);
                assert_eq!(available, 80.0);
            }
            other => panic!("expected insufficient stock, got {other:?}"),
        }
        assert_eq!(items[0].current_stock(), 80.0);
    }

    #[test]
    fn unknown_feed_is_not_found() {
        let mut items = vec![feed("Starter feed", None, 80.0, 3.0)];
        let ledger = Ledger::new(&mut items);
        let err = ledger.stage_consume("Layer mash", None, 10.0).unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[test]
    fn batch_scoped_item_shadows_shared_item() {
        let scope = Some(BatchId::new());
        let mut items = vec![
            feed("Starter feed", None, 500.0, 2.0),
            feed("Starter feed", scope, 1500.0, 3.5),
        ];
        let ledger = Ledger::new(&mut items);

        let hit = ledger.find_stock("Starter feed", scope).unwrap();
        assert_eq!(hit.cost_per_unit, 3.5);

        // Without a scope only the shared item is visible.
        let shared = ledger.find_stock("Starter feed", None).unwrap();
        assert_eq!(shared.cost_per_unit, 2.0);
    }

    #[test]
    fn scoped_lookup_falls_back_to_shared_stock() {
        let mut items = vec![feed("Starter feed", None, 500.0, 2.0)];
        let ledger = Ledger::new(&mut items);
        assert!(ledger.find_stock("Starter feed", Some(BatchId::new())).is_some());
    }

    #[test]
    fn restock_requires_positive_amount() {
        let mut items = vec![feed("Starter feed", None, 100.0, 3.0)];
        let id = items[0].id();
        let mut ledger = Ledger::new(&mut items);

        assert!(ledger.restock(id, 0.0, now()).is_err());
        assert!(ledger.restock(id, -5.0, now()).is_err());
        ledger.restock(id, 50.0, now()).unwrap();
        assert_eq!(items[0].current_stock(), 150.0);
    }

    proptest! {
        /// Consume then restock of the same amount leaves the stock unchanged.
        #[test]
        fn consume_then_restock_round_trips(
            stock in 1.0f64..10_000.0,
            fraction in 0.0f64..1.0,
        ) {
            let amount = stock * fraction;
            let mut items = vec![feed("Grower feed", None, stock, 3.0)];
            let id = items[0].id();
            let mut ledger = Ledger::new(&mut items);

            ledger.consume("Grower feed", None, amount, now()).unwrap();
            if amount > 0.0 {
                ledger.restock(id, amount, now()).unwrap();
            }
            prop_assert!((items[0].current_stock() - stock).abs() < 1e-9);
        }

        /// A failed consume never changes the stock level.
        #[test]
        fn failed_consume_never_mutates(
            stock in 0.0f64..1_000.0,
            excess in 0.001f64..1_000.0,
        ) {
            let mut items = vec![feed("Grower feed", None, stock, 3.0)];
            let mut ledger = Ledger::new(&mut items);

            let res = ledger.consume("Grower feed", None, stock + excess, now());
            prop_assert!(res.is_err());
            prop_assert_eq!(items[0].current_stock(), stock);
        }
    }
}
