//! Waste and cost aggregation
//!
//! Read-side rollups over a batch snapshot: category distribution, weekly
//! trend, cost impact, and per-item waste analysis. Every ratio floors its
//! denominator or special-cases to zero, so the report is always defined.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{normalize_category, score_freshness, InventoryBatch, NormalizedCategory};

/// Weekday labels for the trend series, Monday first
pub const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Tunable aggregation policy. Defaults are documented in DESIGN.md; the
/// backend exposes them through its `analytics` configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WastePolicy {
    /// Fraction of the total wasted cost considered recoverable
    pub savings_recovery_rate: Decimal,
    /// Daily waste target baseline, in units
    pub daily_waste_target: Decimal,
    /// Item waste percentage at or above which the waste level is High
    pub high_waste_threshold: Decimal,
    /// Item waste percentage at or above which the waste level is Medium
    pub medium_waste_threshold: Decimal,
    /// Days-remaining cutoff for the expiring-items alert list
    pub expiry_alert_days: i64,
}

impl Default for WastePolicy {
    fn default() -> Self {
        Self {
            savings_recovery_rate: Decimal::new(25, 2),
            daily_waste_target: Decimal::from(11),
            high_waste_threshold: Decimal::from(40),
            medium_waste_threshold: Decimal::from(15),
            expiry_alert_days: 3,
        }
    }
}

/// Per-item waste severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WasteLevel {
    High,
    Medium,
    Low,
}

/// Share of total waste attributable to one category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWaste {
    pub category: NormalizedCategory,
    /// Percentage of total wasted units, one decimal place
    pub value_percent: Decimal,
    pub units: Decimal,
    pub total_cost_wasted: Decimal,
}

/// One day of the weekly waste trend
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyTrendPoint {
    pub day: String,
    pub value: Decimal,
    pub target: Decimal,
}

/// Financial impact of waste across the snapshot
#[derive(Debug, Clone, Serialize)]
pub struct CostSummary {
    pub total_cost_wasted: Decimal,
    pub potential_savings: Decimal,
    /// `100 * total_cost_wasted / total_inventory_value`, clamped to [0, 100]
    pub waste_cost_percentage: Decimal,
    pub total_inventory_value: Decimal,
}

/// Waste metrics for one item name, aggregated across its batches
#[derive(Debug, Clone, Serialize)]
pub struct ItemWasteAnalysis {
    pub item_name: String,
    pub category: NormalizedCategory,
    pub waste_percentage: Decimal,
    pub waste_quantity: Decimal,
    pub cost_wasted: Decimal,
    /// `max_lifespan_days * waste_percentage / max(freshness_percent, 1)`
    pub risk_score: Decimal,
    pub waste_level: WasteLevel,
    pub freshness_percent: u8,
}

/// Headline metrics for the analytics overview
#[derive(Debug, Clone, Serialize)]
pub struct WasteSummary {
    pub total_items_analyzed: usize,
    pub total_waste_quantity: Decimal,
    pub average_waste_percentage: Decimal,
    pub highest_waste_category: Option<NormalizedCategory>,
    pub total_cost_wasted: Decimal,
}

/// Full waste report over one batch snapshot
#[derive(Debug, Clone, Serialize)]
pub struct WasteReport {
    pub distribution: Vec<CategoryWaste>,
    pub weekly_trends: Vec<WeeklyTrendPoint>,
    pub cost_summary: CostSummary,
    pub item_analysis: Vec<ItemWasteAnalysis>,
    pub summary: WasteSummary,
}

/// Aggregate a batch snapshot into the full waste report
pub fn aggregate_waste(
    batches: &[InventoryBatch],
    now: DateTime<Utc>,
    policy: &WastePolicy,
) -> WasteReport {
    let distribution = waste_distribution(batches);
    let weekly_trends = weekly_trend(batches, now, policy);
    let cost_summary = cost_summary(batches, policy);
    let item_analysis = item_analysis(batches, now, policy);
    let summary = summary_metrics(batches, &distribution, &item_analysis);

    WasteReport { distribution, weekly_trends, cost_summary, item_analysis, summary }
}

/// Waste share per normalized category, sorted by share descending
fn waste_distribution(batches: &[InventoryBatch]) -> Vec<CategoryWaste> {
    let mut per_category: HashMap<NormalizedCategory, (Decimal, Decimal)> = HashMap::new();
    let mut total_wasted = Decimal::ZERO;

    for batch in batches {
        let category = normalize_category(&batch.category, &batch.item_name);
        let entry = per_category.entry(category).or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 += batch.quantity_wasted;
        entry.1 += batch.cost_wasted();
        total_wasted += batch.quantity_wasted;
    }

    let mut distribution: Vec<CategoryWaste> = per_category
        .into_iter()
        .map(|(category, (units, cost))| CategoryWaste {
            category,
            value_percent: if total_wasted > Decimal::ZERO {
                (units / total_wasted * Decimal::from(100)).round_dp(1)
            } else {
                Decimal::ZERO
            },
            units: units.round_dp(1),
            total_cost_wasted: cost.round_dp(2),
        })
        .collect();

    distribution.sort_by(|a, b| {
        b.value_percent
            .cmp(&a.value_percent)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });
    distribution
}

/// Wasted units bucketed by the weekday their batch expired, over the
/// trailing 7-day window ending at `now`. Waste is realized at expiry,
/// which is when spoiled stock leaves the kitchen.
fn weekly_trend(
    batches: &[InventoryBatch],
    now: DateTime<Utc>,
    policy: &WastePolicy,
) -> Vec<WeeklyTrendPoint> {
    let window_start = (now - Duration::days(6)).date_naive();
    let today = now.date_naive();
    let mut by_day = [Decimal::ZERO; 7];

    for batch in batches {
        if batch.quantity_wasted <= Decimal::ZERO {
            continue;
        }
        let Some(expiry) = batch.expiry_date else { continue };
        let expiry_day = expiry.date_naive();
        if expiry_day < window_start || expiry_day > today {
            continue;
        }
        by_day[expiry.weekday().num_days_from_monday() as usize] += batch.quantity_wasted;
    }

    DAY_LABELS
        .iter()
        .zip(by_day)
        .map(|(day, value)| WeeklyTrendPoint {
            day: day.to_string(),
            value: value.round_dp(1),
            target: policy.daily_waste_target,
        })
        .collect()
}

fn cost_summary(batches: &[InventoryBatch], policy: &WastePolicy) -> CostSummary {
    let total_cost_wasted: Decimal = batches.iter().map(|b| b.cost_wasted()).sum();
    let total_inventory_value: Decimal = batches.iter().map(|b| b.purchase_value()).sum();

    let waste_cost_percentage = if total_inventory_value > Decimal::ZERO {
        (total_cost_wasted / total_inventory_value * Decimal::from(100))
            .min(Decimal::from(100))
            .round_dp(1)
    } else {
        Decimal::ZERO
    };

    CostSummary {
        total_cost_wasted: total_cost_wasted.round_dp(2),
        potential_savings: (total_cost_wasted * policy.savings_recovery_rate).round_dp(2),
        waste_cost_percentage,
        total_inventory_value: total_inventory_value.round_dp(2),
    }
}

struct ItemAccumulator {
    display_name: String,
    category: NormalizedCategory,
    purchased: Decimal,
    wasted: Decimal,
    cost_wasted: Decimal,
    min_freshness: u8,
    max_lifespan: i64,
}

/// Per-item-name waste metrics, sorted by waste percentage descending
fn item_analysis(
    batches: &[InventoryBatch],
    now: DateTime<Utc>,
    policy: &WastePolicy,
) -> Vec<ItemWasteAnalysis> {
    let mut order: Vec<String> = Vec::new();
    let mut items: HashMap<String, ItemAccumulator> = HashMap::new();

    for batch in batches {
        let key = batch.item_name.trim().to_lowercase();
        let assessment = score_freshness(batch.purchase_date, batch.expiry_date, now);
        let acc = items.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            ItemAccumulator {
                display_name: batch.item_name.trim().to_string(),
                category: normalize_category(&batch.category, &batch.item_name),
                purchased: Decimal::ZERO,
                wasted: Decimal::ZERO,
                cost_wasted: Decimal::ZERO,
                min_freshness: 100,
                max_lifespan: 0,
            }
        });
        acc.purchased += batch.quantity_purchased;
        acc.wasted += batch.quantity_wasted;
        acc.cost_wasted += batch.cost_wasted();
        acc.min_freshness = acc.min_freshness.min(assessment.freshness_percent);
        acc.max_lifespan = acc.max_lifespan.max(assessment.max_lifespan_days);
    }

    let mut analysis: Vec<ItemWasteAnalysis> = order
        .into_iter()
        .filter_map(|key| items.remove(&key))
        .map(|acc| {
            let waste_percentage =
                (acc.wasted / acc.purchased.max(Decimal::ONE) * Decimal::from(100)).round_dp(1);
            let waste_level = if waste_percentage >= policy.high_waste_threshold {
                WasteLevel::High
            } else if waste_percentage >= policy.medium_waste_threshold {
                WasteLevel::Medium
            } else {
                WasteLevel::Low
            };
            let risk_score = (Decimal::from(acc.max_lifespan) * waste_percentage
                / Decimal::from(acc.min_freshness.max(1)))
            .round_dp(2);

            ItemWasteAnalysis {
                item_name: acc.display_name,
                category: acc.category,
                waste_percentage,
                waste_quantity: acc.wasted,
                cost_wasted: acc.cost_wasted.round_dp(2),
                risk_score,
                waste_level,
                freshness_percent: acc.min_freshness,
            }
        })
        .collect();

    analysis.sort_by(|a, b| {
        b.waste_percentage
            .cmp(&a.waste_percentage)
            .then_with(|| a.item_name.cmp(&b.item_name))
    });
    analysis
}

fn summary_metrics(
    batches: &[InventoryBatch],
    distribution: &[CategoryWaste],
    item_analysis: &[ItemWasteAnalysis],
) -> WasteSummary {
    let total_waste_quantity: Decimal = batches.iter().map(|b| b.quantity_wasted).sum();
    let total_purchased: Decimal = batches.iter().map(|b| b.quantity_purchased).sum();
    let total_cost_wasted: Decimal = batches.iter().map(|b| b.cost_wasted()).sum();

    let average_waste_percentage = if total_purchased > Decimal::ZERO {
        (total_waste_quantity / total_purchased * Decimal::from(100)).round_dp(1)
    } else {
        Decimal::ZERO
    };

    let highest_waste_category = if total_waste_quantity > Decimal::ZERO {
        distribution.first().map(|c| c.category)
    } else {
        None
    };

    WasteSummary {
        total_items_analyzed: item_analysis.len(),
        total_waste_quantity: total_waste_quantity.round_dp(1),
        average_waste_percentage,
        highest_waste_category,
        total_cost_wasted: total_cost_wasted.round_dp(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(offset: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap() + Duration::days(offset)
    }

    fn batch(
        name: &str,
        category: &str,
        purchased: i64,
        wasted: i64,
        cost_cents: i64,
        expiry: i64,
    ) -> InventoryBatch {
        InventoryBatch {
            item_name: name.to_string(),
            category: category.to_string(),
            purchase_date: Some(day(expiry - 5)),
            expiry_date: Some(day(expiry)),
            quantity_purchased: Decimal::from(purchased),
            quantity_used: Decimal::ZERO,
            quantity_wasted: Decimal::from(wasted),
            cost_per_unit: Decimal::new(cost_cents, 2),
            storage_temperature: Decimal::ZERO,
            humidity: Decimal::ZERO,
        }
    }

    #[test]
    fn distribution_shares_sum_to_100() {
        let batches = vec![
            batch("Beef", "Meat", 20, 6, 500, 2),
            batch("Milk", "Dairy", 10, 3, 120, 3),
            batch("Apple", "Fruit", 30, 1, 80, 6),
        ];
        let distribution = waste_distribution(&batches);
        let total: Decimal = distribution.iter().map(|c| c.value_percent).sum();
        assert!((total - Decimal::from(100)).abs() <= Decimal::new(2, 1));
        assert_eq!(distribution[0].category, NormalizedCategory::Meat);
    }

    #[test]
    fn distribution_is_all_zero_without_waste() {
        let batches = vec![batch("Beef", "Meat", 20, 0, 500, 2)];
        let distribution = waste_distribution(&batches);
        assert_eq!(distribution.len(), 1);
        assert_eq!(distribution[0].value_percent, Decimal::ZERO);
        assert_eq!(distribution[0].units, Decimal::ZERO);
    }

    #[test]
    fn cost_summary_formulas() {
        let policy = WastePolicy::default();
        let batches = vec![
            // 6 wasted of 20 at $5.00 => $30 wasted of $100 purchased
            batch("Beef", "Meat", 20, 6, 500, 2),
        ];
        let summary = cost_summary(&batches, &policy);
        assert_eq!(summary.total_cost_wasted, Decimal::from(30));
        assert_eq!(summary.total_inventory_value, Decimal::from(100));
        assert_eq!(summary.waste_cost_percentage, Decimal::from(30));
        assert_eq!(summary.potential_savings, Decimal::new(750, 2));
    }

    #[test]
    fn cost_summary_handles_empty_snapshot() {
        let summary = cost_summary(&[], &WastePolicy::default());
        assert_eq!(summary.total_cost_wasted, Decimal::ZERO);
        assert_eq!(summary.waste_cost_percentage, Decimal::ZERO);
    }

    #[test]
    fn item_analysis_levels_and_ranking() {
        let policy = WastePolicy::default();
        let batches = vec![
            batch("Beef", "Meat", 20, 10, 500, 2),  // 50% => High
            batch("Milk", "Dairy", 20, 4, 120, 3),  // 20% => Medium
            batch("Apple", "Fruit", 30, 1, 80, 6),  // 3.3% => Low
        ];
        let analysis = item_analysis(&batches, day(0), &policy);
        assert_eq!(analysis[0].item_name, "Beef");
        assert_eq!(analysis[0].waste_level, WasteLevel::High);
        assert_eq!(analysis[1].waste_level, WasteLevel::Medium);
        assert_eq!(analysis[2].waste_level, WasteLevel::Low);
        assert!(analysis[0].waste_percentage > analysis[1].waste_percentage);
    }

    #[test]
    fn item_analysis_merges_batches_by_name() {
        let policy = WastePolicy::default();
        let batches = vec![
            batch("Egg", "Dairy", 10, 2, 30, 2),
            batch("egg", "Dairy", 10, 4, 30, 8),
        ];
        let analysis = item_analysis(&batches, day(0), &policy);
        assert_eq!(analysis.len(), 1);
        assert_eq!(analysis[0].waste_quantity, Decimal::from(6));
        // 6 of 20 purchased
        assert_eq!(analysis[0].waste_percentage, Decimal::from(30));
    }

    #[test]
    fn zero_purchased_floors_denominator() {
        let policy = WastePolicy::default();
        let batches = vec![batch("Scrap", "Other", 0, 3, 100, 2)];
        let analysis = item_analysis(&batches, day(0), &policy);
        // denominator floors to 1: 3 / 1 * 100
        assert_eq!(analysis[0].waste_percentage, Decimal::from(300));
    }

    #[test]
    fn weekly_trend_buckets_by_expiry_weekday() {
        let policy = WastePolicy::default();
        // `day(0)` is Monday 2024-06-03
        let batches = vec![
            batch("Beef", "Meat", 20, 6, 500, 0),   // expires Monday
            batch("Milk", "Dairy", 10, 3, 120, -2), // expired Saturday
            batch("Old", "Other", 10, 9, 100, -30), // outside the window
        ];
        let trend = weekly_trend(&batches, day(0), &policy);
        assert_eq!(trend.len(), 7);
        assert_eq!(trend[0].day, "Mon");
        assert_eq!(trend[0].value, Decimal::from(6));
        assert_eq!(trend[5].day, "Sat");
        assert_eq!(trend[5].value, Decimal::from(3));
        let total: Decimal = trend.iter().map(|p| p.value).sum();
        assert_eq!(total, Decimal::from(9));
        assert!(trend.iter().all(|p| p.target == policy.daily_waste_target));
    }

    #[test]
    fn summary_names_highest_waste_category() {
        let policy = WastePolicy::default();
        let batches = vec![
            batch("Beef", "Meat", 20, 6, 500, 2),
            batch("Milk", "Dairy", 10, 3, 120, 3),
        ];
        let report = aggregate_waste(&batches, day(0), &policy);
        assert_eq!(report.summary.highest_waste_category, Some(NormalizedCategory::Meat));
        assert_eq!(report.summary.total_items_analyzed, 2);
        assert_eq!(report.summary.total_waste_quantity, Decimal::from(9));
        // 9 wasted of 30 purchased
        assert_eq!(report.summary.average_waste_percentage, Decimal::from(30));
    }
}
