use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use flocktrack_core::{BatchId, DomainResult, Entity, InventoryItemId, Violations};

/// Stock-keeping category. Feed consumption and provisioning operate on the
/// `Feed` slice only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Feed,
    Medicine,
    Vitamin,
    Equipment,
    Other,
}

/// A stock-keeping unit, either shared (`batch_id` = None) or scoped to one
/// batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    id: InventoryItemId,
    pub batch_id: Option<BatchId>,
    pub name: String,
    pub category: ItemCategory,
    pub unit: String,
    current_stock: f64,
    pub min_stock: f64,
    pub cost_per_unit: f64,
    pub supplier: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    last_updated: DateTime<Utc>,
}

/// Input for manual item creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub batch_id: Option<BatchId>,
    pub name: String,
    pub category: ItemCategory,
    pub unit: String,
    pub current_stock: f64,
    pub min_stock: f64,
    pub cost_per_unit: f64,
    pub supplier: Option<String>,
    pub expiry_date: Option<NaiveDate>,
}

impl InventoryItem {
    /// Validate and build a new item. Stock levels, threshold, and unit cost
    /// must be non-negative; the name must not be empty.
    pub fn create(input: NewItem, now: DateTime<Utc>) -> DomainResult<Self> {
        let mut violations = Violations::new();
        violations.push_if(input.name.trim().is_empty(), "name", "must not be empty");
        violations.push_if(
            !(input.current_stock >= 0.0),
            "current_stock",
            "must be a non-negative number",
        );
        violations.push_if(
            !(input.min_stock >= 0.0),
            "min_stock",
            "must be a non-negative number",
        );
        violations.push_if(
            !(input.cost_per_unit >= 0.0),
            "cost_per_unit",
            "must be a non-negative number",
        );
        violations.into_result()?;

        Ok(Self {
            id: InventoryItemId::new(),
            batch_id: input.batch_id,
            name: input.name.trim().to_string(),
            category: input.category,
            unit: input.unit,
            current_stock: input.current_stock,
            min_stock: input.min_stock,
            cost_per_unit: input.cost_per_unit,
            supplier: input.supplier,
            expiry_date: input.expiry_date,
            last_updated: now,
        })
    }

    pub fn current_stock(&self) -> f64 {
        self.current_stock
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    pub fn is_feed(&self) -> bool {
        matches!(self.category, ItemCategory::Feed)
    }

    /// Whole days until expiry; None for items without an expiry date.
    pub fn days_to_expiry(&self, today: NaiveDate) -> Option<i64> {
        self.expiry_date.map(|d| (d - today).num_days())
    }

    pub(crate) fn apply_delta(&mut self, delta: f64, now: DateTime<Utc>) {
        self.current_stock += delta;
        self.last_updated = now;
    }
}

impl Entity for InventoryItem {
    type Id = InventoryItemId;

    fn id(&self) -> InventoryItemId {
        self.id
    }
}
