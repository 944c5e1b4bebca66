//! Batch-start feed provisioning.
//!
//! Starting a batch stocks three batch-scoped feed tiers. Broilers are
//! front-loaded with more feed than layer/dual-purpose flocks; every tier
//! shares one fixed reorder threshold.

use chrono::{DateTime, Utc};

use flocktrack_batch::BreedCategory;
use flocktrack_core::{BatchId, DomainResult};

use crate::item::{InventoryItem, ItemCategory, NewItem};

/// Reorder threshold applied to every provisioned feed tier, in kg.
pub const REORDER_THRESHOLD_KG: f64 = 200.0;

struct FeedTier {
    name: &'static str,
    broiler_kg: f64,
    default_kg: f64,
}

const FEED_TIERS: [FeedTier; 3] = [
    FeedTier {
        name: "Starter feed",
        broiler_kg: 1500.0,
        default_kg: 1000.0,
    },
    FeedTier {
        name: "Grower feed",
        broiler_kg: 2000.0,
        default_kg: 1500.0,
    },
    FeedTier {
        name: "Finisher feed",
        broiler_kg: 2000.0,
        default_kg: 1000.0,
    },
];

/// Build the three feed-tier items scoped to a new batch.
pub fn provision_feed(
    batch_id: BatchId,
    category: BreedCategory,
    now: DateTime<Utc>,
) -> DomainResult<Vec<InventoryItem>> {
    FEED_TIERS
        .iter()
        .map(|tier| {
            let stock = match category {
                BreedCategory::Broiler => tier.broiler_kg,
                BreedCategory::Layer | BreedCategory::Dual => tier.default_kg,
            };
            InventoryItem::create(
                NewItem {
                    batch_id: Some(batch_id),
                    name: tier.name.into(),
                    category: ItemCategory::Feed,
                    unit: "kg".into(),
                    current_stock: stock,
                    min_stock: REORDER_THRESHOLD_KG,
                    cost_per_unit: 0.0,
                    supplier: None,
                    expiry_date: None,
                },
                now,
            )
        })
        .collect()
}
