use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use flocktrack_batch::Batch;
use flocktrack_finance::{Expense, Sale};
use flocktrack_logbook::DailyLog;

use crate::band::PerformanceBand;

/// Derived metrics for one batch. Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchKpis {
    pub total_dead: u32,
    /// Percent of the initial flock lost; 0 when the flock started empty.
    pub mortality_rate: f64,
    /// 100 - mortality_rate, exactly.
    pub livability: f64,
    /// May go negative: cumulative deaths are deliberately unchecked
    /// against the initial count, see `over_mortality`.
    pub current_count: i64,
    pub total_feed_kg: f64,
    /// Latest recorded average weight (by log date); 0 if never weighed.
    pub last_avg_weight_grams: f64,
    pub total_biomass_kg: f64,
    /// Feed conversion ratio, rounded to 2 decimals; 0 without biomass.
    pub fcr: f64,
    pub age_days: i64,
    /// European production efficiency factor, integer-rounded; 0 when age
    /// or FCR make the formula undefined.
    pub epef: i64,
    pub band: PerformanceBand,
    pub bird_cost: f64,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub profit: f64,
    pub profit_margin: f64,
    /// Raised when cumulative deaths exceed the initial count. Reported,
    /// not rejected.
    pub over_mortality: bool,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Derive every KPI for one batch from its associated slices.
pub fn calculate(
    batch: &Batch,
    logs: &[DailyLog],
    sales: &[Sale],
    expenses: &[Expense],
    today: NaiveDate,
) -> BatchKpis {
    let initial = batch.initial_count();

    let total_dead: u32 = logs.iter().map(|l| l.dead_count).sum();
    let mortality_rate = if initial > 0 {
        f64::from(total_dead) / f64::from(initial) * 100.0
    } else {
        0.0
    };
    let livability = 100.0 - mortality_rate;
    let current_count = i64::from(initial) - i64::from(total_dead);

    let total_feed_kg: f64 = logs.iter().map(|l| l.feed_amount_kg).sum();

    let last_avg_weight_grams = logs
        .iter()
        .filter(|l| l.avg_weight_grams.is_some())
        .max_by_key(|l| l.date)
        .and_then(|l| l.avg_weight_grams)
        .unwrap_or(0.0);

    let total_biomass_kg = current_count as f64 * (last_avg_weight_grams / 1000.0);
    let fcr = if total_biomass_kg > 0.0 {
        round2(total_feed_kg / total_biomass_kg)
    } else {
        0.0
    };

    let age_days = batch.age_days(today);
    let epef = if age_days > 0 && fcr > 0.0 {
        ((last_avg_weight_grams * livability) / (fcr * age_days as f64 * 10.0)).round() as i64
    } else {
        0
    };

    let total_revenue: f64 = sales.iter().map(|s| s.total).sum();
    let total_expenses: f64 = expenses.iter().map(|e| e.cost).sum();
    let bird_cost = if initial > 0 {
        total_expenses / f64::from(initial)
    } else {
        0.0
    };
    let profit = total_revenue - total_expenses;
    let profit_margin = if total_revenue > 0.0 {
        profit / total_revenue * 100.0
    } else {
        0.0
    };

    BatchKpis {
        total_dead,
        mortality_rate,
        livability,
        current_count,
        total_feed_kg,
        last_avg_weight_grams,
        total_biomass_kg,
        fcr,
        age_days,
        epef,
        band: PerformanceBand::from_epef(epef),
        bird_cost,
        total_revenue,
        total_expenses,
        profit,
        profit_margin,
        over_mortality: i64::from(total_dead) > i64::from(initial),
    }
}
