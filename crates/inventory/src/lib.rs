//! `flocktrack-inventory` — stock-keeping units and the feed ledger.

pub mod alerts;
pub mod item;
pub mod ledger;
pub mod provision;

pub use alerts::{AlertSeverity, StockAlert, generate_alerts};
pub use item::{InventoryItem, ItemCategory, NewItem};
pub use ledger::{Consumption, Ledger};
pub use provision::{REORDER_THRESHOLD_KG, provision_feed};
