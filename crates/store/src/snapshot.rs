//! Backup model and the persistence collaborator contract.
//!
//! Persistence is a synchronous full-snapshot save after every mutation,
//! treated as a side effect outside the engine's consistency boundary: a
//! failing sink never rolls the in-memory state back.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use flocktrack_batch::Batch;
use flocktrack_finance::{Expense, Sale};
use flocktrack_health::VaccinationRecord;
use flocktrack_inventory::InventoryItem;
use flocktrack_logbook::DailyLog;

use crate::store::EntityStore;

/// Version tag written into exports; imports are accepted regardless of tag
/// (there is no schema versioning beyond this marker).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Full-snapshot backup. Every collection is optional on the wire: an array
/// absent from an import file leaves the corresponding store collection
/// untouched, it does not clear it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub app_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batches: Option<Vec<Batch>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_logs: Option<Vec<DailyLog>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales: Option<Vec<Sale>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenses: Option<Vec<Expense>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vaccinations: Option<Vec<VaccinationRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Vec<InventoryItem>>,
}

impl EntityStore {
    /// Export the full store as a backup.
    pub fn export_backup(&self) -> Backup {
        let clone = self.clone();
        let (batches, daily_logs, sales, expenses, vaccinations, inventory) = clone.into_parts();
        Backup {
            app_version: APP_VERSION.to_string(),
            batches: Some(batches),
            daily_logs: Some(daily_logs),
            sales: Some(sales),
            expenses: Some(expenses),
            vaccinations: Some(vaccinations),
            inventory: Some(inventory),
        }
    }

    /// Import a backup: each present collection replaces the current one
    /// verbatim; absent collections are left as they are.
    pub fn import_backup(&mut self, backup: Backup) {
        if let Some(batches) = backup.batches {
            self.replace_batches(batches);
        }
        if let Some(logs) = backup.daily_logs {
            self.replace_daily_logs(logs);
        }
        if let Some(sales) = backup.sales {
            self.replace_sales(sales);
        }
        if let Some(expenses) = backup.expenses {
            self.replace_expenses(expenses);
        }
        if let Some(vaccinations) = backup.vaccinations {
            self.replace_vaccinations(vaccinations);
        }
        if let Some(inventory) = backup.inventory {
            self.replace_inventory(inventory);
        }
    }
}

/// Persistence failure. The engine logs these; it never propagates them to
/// the caller of a business operation.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("snapshot backend failed: {0}")]
    Backend(String),
}

/// Key-value snapshot collaborator the store persists through.
pub trait SnapshotStore: Send + Sync {
    fn save(&self, store: &EntityStore) -> Result<(), SnapshotError>;
    fn load(&self) -> Result<Option<EntityStore>, SnapshotError>;
}

/// In-memory snapshot sink for tests/dev. Serializes for real so format
/// problems surface in tests, not in the field.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    slot: RwLock<Option<String>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.read().ok().and_then(|s| s.clone())
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn save(&self, store: &EntityStore) -> Result<(), SnapshotError> {
        let json = serde_json::to_string(store)?;
        let mut slot = self
            .slot
            .write()
            .map_err(|_| SnapshotError::Backend("snapshot slot poisoned".into()))?;
        *slot = Some(json);
        Ok(())
    }

    fn load(&self) -> Result<Option<EntityStore>, SnapshotError> {
        let slot = self
            .slot
            .read()
            .map_err(|_| SnapshotError::Backend("snapshot slot poisoned".into()))?;
        match slot.as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use flocktrack_batch::NewBatch;
    use flocktrack_health::default_schedule;

    fn seeded_store() -> EntityStore {
        let mut store = EntityStore::new();
        let batch = Batch::create(NewBatch {
            name: "Kandang A".into(),
            breed_id: "lohmann-brown".into(),
            initial_count: 300,
            batch_type: "egg".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            notes: Some("first cycle".into()),
        })
        .unwrap();
        let id = flocktrack_core::Entity::id(&batch);
        store.insert_batch(batch);
        store.extend_vaccinations(default_schedule(id, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        store
    }

    #[test]
    fn export_import_round_trips_deep_equal() {
        let store = seeded_store();
        let backup = store.export_backup();

        // Through the wire format and back.
        let json = serde_json::to_string(&backup).unwrap();
        let parsed: Backup = serde_json::from_str(&json).unwrap();

        let mut restored = EntityStore::new();
        restored.import_backup(parsed);
        assert_eq!(restored, store);
    }

    #[test]
    fn absent_collections_are_left_untouched() {
        let mut store = seeded_store();
        let vaccinations_before = store.vaccinations().to_vec();

        // A backup carrying only batches.
        let backup: Backup =
            serde_json::from_str(r#"{"appVersion":"0.1.0","batches":[]}"#).unwrap();
        store.import_backup(backup);

        assert!(store.batches().is_empty());
        assert_eq!(store.vaccinations(), vaccinations_before.as_slice());
    }

    #[test]
    fn snapshot_store_round_trips() {
        let sink = InMemorySnapshotStore::new();
        assert!(sink.load().unwrap().is_none());

        let store = seeded_store();
        sink.save(&store).unwrap();
        let loaded = sink.load().unwrap().unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn snapshot_keys_are_camel_case() {
        let sink = InMemorySnapshotStore::new();
        sink.save(&seeded_store()).unwrap();
        let raw = sink.raw().unwrap();
        assert!(raw.contains("\"dailyLogs\""));
        assert!(raw.contains("\"startDate\""));
    }
}
