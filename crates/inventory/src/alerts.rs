//! On-demand stock alerting. Alerts are derived from the current collection
//! every time they are requested; nothing is stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use flocktrack_core::{Entity, InventoryItemId};

use crate::item::InventoryItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

/// One alert line for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum StockAlert {
    /// Stock at or below 1.5x the reorder threshold; critical at or below
    /// the threshold itself.
    LowStock {
        item_id: InventoryItemId,
        item_name: String,
        current_stock: f64,
        min_stock: f64,
        severity: AlertSeverity,
    },
    /// Expiry date within the next 7 days.
    ExpiringSoon {
        item_id: InventoryItemId,
        item_name: String,
        days_left: i64,
    },
    /// Expiry date reached or passed.
    Expired {
        item_id: InventoryItemId,
        item_name: String,
        days_past: i64,
    },
}

impl StockAlert {
    pub fn severity(&self) -> AlertSeverity {
        match self {
            StockAlert::LowStock { severity, .. } => *severity,
            StockAlert::ExpiringSoon { .. } => AlertSeverity::Warning,
            StockAlert::Expired { .. } => AlertSeverity::Critical,
        }
    }
}

const LOW_STOCK_FACTOR: f64 = 1.5;
const EXPIRY_WINDOW_DAYS: i64 = 7;

/// Scan the whole collection and emit every active alert.
pub fn generate_alerts(items: &[InventoryItem], today: NaiveDate) -> Vec<StockAlert> {
    let mut alerts = Vec::new();

    for item in items {
        if item.current_stock() <= item.min_stock * LOW_STOCK_FACTOR {
            let severity = if item.current_stock() <= item.min_stock {
                AlertSeverity::Critical
            } else {
                AlertSeverity::Warning
            };
            alerts.push(StockAlert::LowStock {
                item_id: item.id(),
                item_name: item.name.clone(),
                current_stock: item.current_stock(),
                min_stock: item.min_stock,
                severity,
            });
        }

        if let Some(days) = item.days_to_expiry(today) {
            if days <= 0 {
                alerts.push(StockAlert::Expired {
                    item_id: item.id(),
                    item_name: item.name.clone(),
                    days_past: -days,
                });
            } else if days <= EXPIRY_WINDOW_DAYS {
                alerts.push(StockAlert::ExpiringSoon {
                    item_id: item.id(),
                    item_name: item.name.clone(),
                    days_left: days,
                });
            }
        }
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemCategory, NewItem};
    use chrono::Utc;

    fn item(stock: f64, min: f64, expiry: Option<NaiveDate>) -> InventoryItem {
        InventoryItem::create(
            NewItem {
                batch_id: None,
                name: "Starter feed".into(),
                category: ItemCategory::Feed,
                unit: "kg".into(),
                current_stock: stock,
                min_stock: min,
                cost_per_unit: 3.0,
                supplier: None,
                expiry_date: expiry,
            },
            Utc::now(),
        )
        .unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn healthy_stock_is_silent() {
        let items = vec![item(1000.0, 200.0, None)];
        assert!(generate_alerts(&items, today()).is_empty());
    }

    #[test]
    fn low_stock_warns_then_escalates() {
        let items = vec![item(300.0, 200.0, None)];
        let alerts = generate_alerts(&items, today());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity(), AlertSeverity::Warning);

        let items = vec![item(200.0, 200.0, None)];
        let alerts = generate_alerts(&items, today());
        assert_eq!(alerts[0].severity(), AlertSeverity::Critical);
    }

    #[test]
    fn expiry_window_is_seven_days() {
        let expiring = item(1000.0, 200.0, NaiveDate::from_ymd_opt(2024, 6, 8));
        let fine = item(1000.0, 200.0, NaiveDate::from_ymd_opt(2024, 6, 9));
        let expired = item(1000.0, 200.0, NaiveDate::from_ymd_opt(2024, 6, 1));

        let alerts = generate_alerts(&[expiring, fine, expired], today());
        assert_eq!(alerts.len(), 2);
        assert!(matches!(alerts[0], StockAlert::ExpiringSoon { days_left: 7, .. }));
        assert!(matches!(alerts[1], StockAlert::Expired { days_past: 0, .. }));
    }

    #[test]
    fn one_item_can_raise_both_alert_kinds() {
        let items = vec![item(100.0, 200.0, NaiveDate::from_ymd_opt(2024, 5, 20))];
        let alerts = generate_alerts(&items, today());
        assert_eq!(alerts.len(), 2);
    }
}
