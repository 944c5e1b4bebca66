//! Financial rollup over one batch's sale/expense slices.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::expense::{Expense, ExpenseCategory};
use crate::sale::Sale;

/// Cost share of one expense category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: ExpenseCategory,
    pub cost: f64,
    /// Percentage of the total cost; 0 when there is no cost at all.
    pub share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummary {
    pub total_revenue: f64,
    pub total_cost: f64,
    pub profit: f64,
    /// Profit as a percentage of revenue; 0 when revenue is 0.
    pub profit_margin: f64,
    /// Mean unit price over sales with a positive head count; 0 if none.
    pub avg_sell_price: f64,
    /// Total cost per kg of live weight sold; 0 when nothing was weighed out.
    pub cost_per_kg_sold: f64,
    pub by_category: Vec<CategoryBreakdown>,
}

/// Roll a batch's sales and expenses up into the report figures.
pub fn summarize(sales: &[Sale], expenses: &[Expense]) -> FinanceSummary {
    let total_revenue: f64 = sales.iter().map(|s| s.total).sum();
    let total_cost: f64 = expenses.iter().map(|e| e.cost).sum();
    let profit = total_revenue - total_cost;
    let profit_margin = if total_revenue > 0.0 {
        profit / total_revenue * 100.0
    } else {
        0.0
    };

    let priced: Vec<f64> = sales
        .iter()
        .filter(|s| s.count > 0)
        .map(|s| s.unit_price)
        .collect();
    let avg_sell_price = if priced.is_empty() {
        0.0
    } else {
        priced.iter().sum::<f64>() / priced.len() as f64
    };

    let total_weight_sold: f64 = sales.iter().map(|s| s.weight_kg).sum();
    let cost_per_kg_sold = if total_weight_sold > 0.0 {
        total_cost / total_weight_sold
    } else {
        0.0
    };

    let mut grouped: BTreeMap<ExpenseCategory, f64> = BTreeMap::new();
    for expense in expenses {
        *grouped.entry(expense.category).or_insert(0.0) += expense.cost;
    }
    let by_category = grouped
        .into_iter()
        .map(|(category, cost)| CategoryBreakdown {
            category,
            cost,
            share_pct: if total_cost > 0.0 {
                cost / total_cost * 100.0
            } else {
                0.0
            },
        })
        .collect();

    FinanceSummary {
        total_revenue,
        total_cost,
        profit,
        profit_margin,
        avg_sell_price,
        cost_per_kg_sold,
        by_category,
    }
}
