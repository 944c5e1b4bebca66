use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use flocktrack_batch::{Batch, NewBatch};
use flocktrack_core::{
    BatchId, DailyLogId, DomainError, DomainResult, Entity, ExpenseId, InventoryItemId, SaleId,
    VaccinationId,
};
use flocktrack_finance::{
    Expense, FinanceSummary, NewExpense, NewSale, Sale, summarize,
};
use flocktrack_health::{NewVaccination, VaccinationRecord, VaccinationStatus, default_schedule};
use flocktrack_inventory::{
    Consumption, InventoryItem, Ledger, NewItem, StockAlert, generate_alerts, provision_feed,
};
use flocktrack_kpi::BatchKpis;
use flocktrack_logbook::{DailyLog, LogInput};
use flocktrack_store::{Backup, EntityStore, SnapshotError, SnapshotStore};

/// The engine. Owns the entity store and coordinates every cross-entity
/// rule: the single-active-batch invariant, batch bootstrap (schedule +
/// feed provisioning), and the atomic daily-log/inventory write.
pub struct Farm<S: SnapshotStore> {
    store: EntityStore,
    snapshots: S,
}

impl<S: SnapshotStore> Farm<S> {
    /// Load the last snapshot from the collaborator, or start empty.
    pub fn open(snapshots: S) -> Result<Self, SnapshotError> {
        let store = snapshots.load()?.unwrap_or_default();
        Ok(Self { store, snapshots })
    }

    /// Build over an existing store (imports, tests).
    pub fn with_store(store: EntityStore, snapshots: S) -> Self {
        Self { store, snapshots }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Save-on-mutation side effect. The sink sits outside the consistency
    /// boundary: failures are logged and never unwind the in-memory state.
    fn persist(&self) {
        if let Err(err) = self.snapshots.save(&self.store) {
            warn!(error = %err, "snapshot save failed; in-memory state kept");
        }
    }

    // ----- batch lifecycle -----

    /// Create and activate a new batch. Closes the currently active batch
    /// first, then bootstraps the vaccination schedule and the batch-scoped
    /// feed tiers.
    pub fn start_batch(&mut self, input: NewBatch, today: NaiveDate) -> DomainResult<BatchId> {
        let batch = Batch::create(input)?;
        let batch_id = batch.id();
        let category = batch.breed_category();
        let start_date = batch.start_date();

        for other in self.store.batches_mut() {
            if other.is_active() {
                info!(batch = %other.id(), "closing previous active batch");
                other.close(today);
            }
        }

        self.store.insert_batch(batch);
        self.store
            .extend_vaccinations(default_schedule(batch_id, start_date));
        self.store
            .extend_inventory(provision_feed(batch_id, category, Utc::now())?);

        info!(batch = %batch_id, ?category, "batch started");
        self.persist();
        Ok(batch_id)
    }

    /// Make `batch_id` the active batch and close every other one. Only the
    /// batch that *was* active gets an end date; already-closed batches are
    /// untouched. No-op-safe when the target is already active.
    pub fn activate_batch(&mut self, batch_id: BatchId, today: NaiveDate) -> DomainResult<()> {
        if self.store.batch(batch_id).is_none() {
            return Err(DomainError::not_found("batch", batch_id));
        }

        for batch in self.store.batches_mut() {
            if batch.id() == batch_id {
                batch.activate();
            } else {
                batch.close(today);
            }
        }

        info!(batch = %batch_id, "batch activated");
        self.persist();
        Ok(())
    }

    pub fn close_batch(&mut self, batch_id: BatchId, today: NaiveDate) -> DomainResult<()> {
        let batch = self
            .store
            .batch_mut(batch_id)
            .ok_or_else(|| DomainError::not_found("batch", batch_id))?;
        batch.close(today);

        info!(batch = %batch_id, "batch closed");
        self.persist();
        Ok(())
    }

    /// Delete a batch and its vaccination records. Daily logs, sales,
    /// expenses, and inventory referencing it remain, orphaned.
    pub fn delete_batch(&mut self, batch_id: BatchId) -> DomainResult<()> {
        self.store
            .remove_batch(batch_id)
            .ok_or_else(|| DomainError::not_found("batch", batch_id))?;

        info!(batch = %batch_id, "batch deleted");
        self.persist();
        Ok(())
    }

    // ----- daily log recorder -----

    /// Record one day's observation.
    ///
    /// Inventory consumption and the log insert are one transition: the
    /// consumption is staged first, everything is validated, and only then
    /// are both committed. Any failure leaves the store untouched.
    pub fn save_log(&mut self, batch_id: BatchId, input: LogInput) -> DomainResult<DailyLogId> {
        let batch = self
            .store
            .batch(batch_id)
            .ok_or_else(|| DomainError::not_found("batch", batch_id))?;
        let start_date = batch.start_date();

        input.validate(start_date)?;

        let staged = if input.feed_amount_kg > 0.0 {
            let ledger = Ledger::new(self.store.inventory_mut());
            Some(ledger.stage_consume(&input.feed_type, Some(batch_id), input.feed_amount_kg)?)
        } else {
            None
        };

        let feed_cost = staged.as_ref().map(|c| c.cost).unwrap_or(0.0);
        let log = DailyLog::from_input(batch_id, start_date, input, feed_cost);
        let log_id = log.id();

        if let Some(consumption) = &staged {
            Ledger::new(self.store.inventory_mut()).commit(consumption, Utc::now())?;
        }
        self.store.insert_daily_log(log);

        info!(batch = %batch_id, log = %log_id, feed_cost, "daily log saved");
        self.persist();
        Ok(log_id)
    }

    /// Edit a saved log. The prior consumption is reversed before the new
    /// one is applied; if the new consumption cannot be covered, the
    /// reversal is undone and nothing changes.
    pub fn update_log(&mut self, log_id: DailyLogId, input: LogInput) -> DomainResult<()> {
        let (batch_id, prior) = {
            let log = self
                .store
                .daily_logs()
                .iter()
                .find(|l| l.id() == log_id)
                .ok_or_else(|| DomainError::not_found("daily log", log_id))?;
            (log.batch_id, prior_consumption(log, &self.store))
        };

        let batch = self
            .store
            .batch(batch_id)
            .ok_or_else(|| DomainError::not_found("batch", batch_id))?;
        let start_date = batch.start_date();

        input.validate(start_date)?;

        let now = Utc::now();
        if let Some(prior) = &prior {
            Ledger::new(self.store.inventory_mut()).reverse(prior, now)?;
        }

        let staged = if input.feed_amount_kg > 0.0 {
            let ledger = Ledger::new(self.store.inventory_mut());
            match ledger.stage_consume(&input.feed_type, Some(batch_id), input.feed_amount_kg) {
                Ok(staged) => Some(staged),
                Err(err) => {
                    // Put the reversed stock back before surfacing the error.
                    if let Some(prior) = &prior {
                        Ledger::new(self.store.inventory_mut()).commit(prior, now)?;
                    }
                    return Err(err);
                }
            }
        } else {
            None
        };

        if let Some(consumption) = &staged {
            Ledger::new(self.store.inventory_mut()).commit(consumption, now)?;
        }
        let feed_cost = staged.as_ref().map(|c| c.cost).unwrap_or(0.0);
        let log = self
            .store
            .daily_log_mut(log_id)
            .ok_or_else(|| DomainError::not_found("daily log", log_id))?;
        log.apply_input(start_date, input, feed_cost);

        info!(log = %log_id, "daily log updated");
        self.persist();
        Ok(())
    }

    pub fn delete_log(&mut self, log_id: DailyLogId) -> DomainResult<()> {
        self.store
            .remove_daily_log(log_id)
            .ok_or_else(|| DomainError::not_found("daily log", log_id))?;
        self.persist();
        Ok(())
    }

    // ----- inventory -----

    pub fn add_inventory_item(&mut self, input: NewItem) -> DomainResult<InventoryItemId> {
        let item = InventoryItem::create(input, Utc::now())?;
        let item_id = item.id();
        self.store.insert_inventory_item(item);
        self.persist();
        Ok(item_id)
    }

    pub fn restock(&mut self, item_id: InventoryItemId, amount: f64) -> DomainResult<()> {
        Ledger::new(self.store.inventory_mut()).restock(item_id, amount, Utc::now())?;
        info!(item = %item_id, amount, "restocked");
        self.persist();
        Ok(())
    }

    pub fn delete_inventory_item(&mut self, item_id: InventoryItemId) -> DomainResult<()> {
        self.store
            .remove_inventory_item(item_id)
            .ok_or_else(|| DomainError::not_found("inventory item", item_id))?;
        self.persist();
        Ok(())
    }

    /// Low-stock and expiry warnings, computed on demand.
    pub fn stock_alerts(&self, today: NaiveDate) -> Vec<StockAlert> {
        generate_alerts(self.store.inventory(), today)
    }

    // ----- finances -----

    pub fn record_sale(&mut self, input: NewSale) -> DomainResult<SaleId> {
        if self.store.batch(input.batch_id).is_none() {
            return Err(DomainError::not_found("batch", input.batch_id));
        }
        let sale = Sale::create(input)?;
        let sale_id = sale.id();
        self.store.insert_sale(sale);
        self.persist();
        Ok(sale_id)
    }

    pub fn delete_sale(&mut self, sale_id: SaleId) -> DomainResult<()> {
        self.store
            .remove_sale(sale_id)
            .ok_or_else(|| DomainError::not_found("sale", sale_id))?;
        self.persist();
        Ok(())
    }

    pub fn record_expense(&mut self, input: NewExpense) -> DomainResult<ExpenseId> {
        if self.store.batch(input.batch_id).is_none() {
            return Err(DomainError::not_found("batch", input.batch_id));
        }
        let expense = Expense::create(input)?;
        let expense_id = expense.id();
        self.store.insert_expense(expense);
        self.persist();
        Ok(expense_id)
    }

    pub fn delete_expense(&mut self, expense_id: ExpenseId) -> DomainResult<()> {
        self.store
            .remove_expense(expense_id)
            .ok_or_else(|| DomainError::not_found("expense", expense_id))?;
        self.persist();
        Ok(())
    }

    // ----- vaccinations (ad-hoc path) -----

    pub fn add_vaccination(&mut self, input: NewVaccination) -> DomainResult<VaccinationId> {
        if self.store.batch(input.batch_id).is_none() {
            return Err(DomainError::not_found("batch", input.batch_id));
        }
        let record = VaccinationRecord::create(input)?;
        let record_id = record.id();
        self.store.insert_vaccination(record);
        self.persist();
        Ok(record_id)
    }

    pub fn set_vaccination_status(
        &mut self,
        record_id: VaccinationId,
        status: VaccinationStatus,
    ) -> DomainResult<()> {
        let record = self
            .store
            .vaccination_mut(record_id)
            .ok_or_else(|| DomainError::not_found("vaccination", record_id))?;
        record.set_status(status);
        self.persist();
        Ok(())
    }

    pub fn delete_vaccination(&mut self, record_id: VaccinationId) -> DomainResult<()> {
        self.store
            .remove_vaccination(record_id)
            .ok_or_else(|| DomainError::not_found("vaccination", record_id))?;
        self.persist();
        Ok(())
    }

    // ----- reports -----

    pub fn batch_kpis(&self, batch_id: BatchId, today: NaiveDate) -> DomainResult<BatchKpis> {
        let batch = self
            .store
            .batch(batch_id)
            .ok_or_else(|| DomainError::not_found("batch", batch_id))?;

        let logs: Vec<DailyLog> = self
            .store
            .logs_for(batch_id)
            .into_iter()
            .cloned()
            .collect();
        let sales: Vec<Sale> = self.store.sales_for(batch_id).into_iter().cloned().collect();
        let expenses: Vec<Expense> = self
            .store
            .expenses_for(batch_id)
            .into_iter()
            .cloned()
            .collect();

        Ok(flocktrack_kpi::calculate(
            batch, &logs, &sales, &expenses, today,
        ))
    }

    pub fn finance_summary(&self, batch_id: BatchId) -> DomainResult<FinanceSummary> {
        if self.store.batch(batch_id).is_none() {
            return Err(DomainError::not_found("batch", batch_id));
        }
        let sales: Vec<Sale> = self.store.sales_for(batch_id).into_iter().cloned().collect();
        let expenses: Vec<Expense> = self
            .store
            .expenses_for(batch_id)
            .into_iter()
            .cloned()
            .collect();
        Ok(summarize(&sales, &expenses))
    }

    // ----- backup -----

    pub fn export_backup(&self) -> Backup {
        self.store.export_backup()
    }

    /// Replace present collections with the backup's arrays verbatim.
    pub fn import_backup(&mut self, backup: Backup) {
        self.store.import_backup(backup);
        info!("backup imported");
        self.persist();
    }
}

/// Rebuild the consumption a saved log committed, if its feed item is still
/// around. Deleted items simply make the prior draw irrecoverable.
fn prior_consumption(log: &DailyLog, store: &EntityStore) -> Option<Consumption> {
    if log.feed_amount_kg <= 0.0 {
        return None;
    }
    let item = store
        .inventory()
        .iter()
        .find(|i| i.is_feed() && i.name == log.feed_type && i.batch_id == Some(log.batch_id))
        .or_else(|| {
            store
                .inventory()
                .iter()
                .find(|i| i.is_feed() && i.name == log.feed_type && i.batch_id.is_none())
        })?;
    let unit_cost = log.feed_cost / log.feed_amount_kg;
    Some(Consumption {
        item_id: item.id(),
        item_name: item.name.clone(),
        amount: log.feed_amount_kg,
        unit_cost,
        cost: log.feed_cost,
    })
}
