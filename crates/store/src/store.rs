use serde::{Deserialize, Serialize};

use flocktrack_batch::Batch;
use flocktrack_core::{
    BatchId, DailyLogId, Entity, ExpenseId, InventoryItemId, SaleId, VaccinationId,
};
use flocktrack_finance::{Expense, Sale};
use flocktrack_health::VaccinationRecord;
use flocktrack_inventory::InventoryItem;
use flocktrack_logbook::DailyLog;

/// The six entity collections. Field names match the persisted snapshot
/// keys via the camelCase rename.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityStore {
    batches: Vec<Batch>,
    daily_logs: Vec<DailyLog>,
    sales: Vec<Sale>,
    expenses: Vec<Expense>,
    vaccinations: Vec<VaccinationRecord>,
    inventory: Vec<InventoryItem>,
}

fn remove_by_id<E: Entity>(collection: &mut Vec<E>, id: E::Id) -> Option<E> {
    let index = collection.iter().position(|e| e.id() == id)?;
    Some(collection.remove(index))
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ----- batches -----

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn batch(&self, id: BatchId) -> Option<&Batch> {
        self.batches.iter().find(|b| b.id() == id)
    }

    pub fn batch_mut(&mut self, id: BatchId) -> Option<&mut Batch> {
        self.batches.iter_mut().find(|b| b.id() == id)
    }

    pub fn batches_mut(&mut self) -> impl Iterator<Item = &mut Batch> {
        self.batches.iter_mut()
    }

    pub fn active_batch(&self) -> Option<&Batch> {
        self.batches.iter().find(|b| b.is_active())
    }

    pub fn insert_batch(&mut self, batch: Batch) {
        self.batches.push(batch);
    }

    /// Remove the batch and cascade to its vaccination records. Daily logs,
    /// sales, expenses, and inventory rows referencing the batch are left in
    /// place, orphaned.
    pub fn remove_batch(&mut self, id: BatchId) -> Option<Batch> {
        let batch = remove_by_id(&mut self.batches, id)?;
        self.vaccinations.retain(|v| v.batch_id != id);
        Some(batch)
    }

    // ----- daily logs -----

    pub fn daily_logs(&self) -> &[DailyLog] {
        &self.daily_logs
    }

    pub fn daily_log_mut(&mut self, id: DailyLogId) -> Option<&mut DailyLog> {
        self.daily_logs.iter_mut().find(|l| l.id() == id)
    }

    pub fn logs_for(&self, batch_id: BatchId) -> Vec<&DailyLog> {
        self.daily_logs
            .iter()
            .filter(|l| l.batch_id == batch_id)
            .collect()
    }

    pub fn insert_daily_log(&mut self, log: DailyLog) {
        self.daily_logs.push(log);
    }

    pub fn remove_daily_log(&mut self, id: DailyLogId) -> Option<DailyLog> {
        remove_by_id(&mut self.daily_logs, id)
    }

    // ----- sales / expenses -----

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn sales_for(&self, batch_id: BatchId) -> Vec<&Sale> {
        self.sales.iter().filter(|s| s.batch_id == batch_id).collect()
    }

    pub fn insert_sale(&mut self, sale: Sale) {
        self.sales.push(sale);
    }

    pub fn remove_sale(&mut self, id: SaleId) -> Option<Sale> {
        remove_by_id(&mut self.sales, id)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn expenses_for(&self, batch_id: BatchId) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|e| e.batch_id == batch_id)
            .collect()
    }

    pub fn insert_expense(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    pub fn remove_expense(&mut self, id: ExpenseId) -> Option<Expense> {
        remove_by_id(&mut self.expenses, id)
    }

    // ----- vaccinations -----

    pub fn vaccinations(&self) -> &[VaccinationRecord] {
        &self.vaccinations
    }

    pub fn vaccinations_for(&self, batch_id: BatchId) -> Vec<&VaccinationRecord> {
        self.vaccinations
            .iter()
            .filter(|v| v.batch_id == batch_id)
            .collect()
    }

    pub fn vaccination_mut(&mut self, id: VaccinationId) -> Option<&mut VaccinationRecord> {
        self.vaccinations.iter_mut().find(|v| v.id() == id)
    }

    pub fn insert_vaccination(&mut self, record: VaccinationRecord) {
        self.vaccinations.push(record);
    }

    pub fn extend_vaccinations(&mut self, records: impl IntoIterator<Item = VaccinationRecord>) {
        self.vaccinations.extend(records);
    }

    pub fn remove_vaccination(&mut self, id: VaccinationId) -> Option<VaccinationRecord> {
        remove_by_id(&mut self.vaccinations, id)
    }

    // ----- inventory -----

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Vec<InventoryItem> {
        &mut self.inventory
    }

    pub fn inventory_item(&self, id: InventoryItemId) -> Option<&InventoryItem> {
        self.inventory.iter().find(|i| i.id() == id)
    }

    pub fn insert_inventory_item(&mut self, item: InventoryItem) {
        self.inventory.push(item);
    }

    pub fn extend_inventory(&mut self, items: impl IntoIterator<Item = InventoryItem>) {
        self.inventory.extend(items);
    }

    pub fn remove_inventory_item(&mut self, id: InventoryItemId) -> Option<InventoryItem> {
        remove_by_id(&mut self.inventory, id)
    }

    // ----- backup plumbing -----

    /// Decompose into the six collections, in snapshot order.
    #[allow(clippy::type_complexity)]
    pub fn into_parts(
        self,
    ) -> (
        Vec<Batch>,
        Vec<DailyLog>,
        Vec<Sale>,
        Vec<Expense>,
        Vec<VaccinationRecord>,
        Vec<InventoryItem>,
    ) {
        (
            self.batches,
            self.daily_logs,
            self.sales,
            self.expenses,
            self.vaccinations,
            self.inventory,
        )
    }

    pub fn replace_batches(&mut self, batches: Vec<Batch>) {
        self.batches = batches;
    }

    pub fn replace_daily_logs(&mut self, logs: Vec<DailyLog>) {
        self.daily_logs = logs;
    }

    pub fn replace_sales(&mut self, sales: Vec<Sale>) {
        self.sales = sales;
    }

    pub fn replace_expenses(&mut self, expenses: Vec<Expense>) {
        self.expenses = expenses;
    }

    pub fn replace_vaccinations(&mut self, vaccinations: Vec<VaccinationRecord>) {
        self.vaccinations = vaccinations;
    }

    pub fn replace_inventory(&mut self, inventory: Vec<InventoryItem>) {
        self.inventory = inventory;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use flocktrack_batch::NewBatch;
    use flocktrack_health::default_schedule;

    fn batch() -> Batch {
        Batch::create(NewBatch {
            name: "Kandang A".into(),
            breed_id: "cobb500".into(),
            initial_count: 500,
            batch_type: "meat".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            notes: None,
        })
        .unwrap()
    }

    #[test]
    fn remove_batch_cascades_to_vaccinations_only() {
        let mut store = EntityStore::new();
        let a = batch();
        let b = batch();
        let a_id = a.id();
        let b_id = b.id();
        store.insert_batch(a);
        store.insert_batch(b);
        store.extend_vaccinations(default_schedule(a_id, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        store.extend_vaccinations(default_schedule(b_id, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));

        store.remove_batch(a_id).unwrap();

        assert!(store.batch(a_id).is_none());
        assert!(store.vaccinations_for(a_id).is_empty());
        assert_eq!(store.vaccinations_for(b_id).len(), 4);
    }

    #[test]
    fn active_batch_lookup() {
        let mut store = EntityStore::new();
        assert!(store.active_batch().is_none());

        let mut closed = batch();
        closed.close(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        let open = batch();
        let open_id = open.id();
        store.insert_batch(closed);
        store.insert_batch(open);

        assert_eq!(store.active_batch().unwrap().id(), open_id);
    }
}
