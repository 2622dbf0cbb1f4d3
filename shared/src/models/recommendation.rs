//! Recommendation synthesis
//!
//! Turns the current freshness classification and waste analysis into
//! ranked, human-readable action items. Deterministic for a given input;
//! no randomness, no external calls.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ItemView, ItemWasteAnalysis, WasteLevel};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    High,
    Medium,
    Low,
}

/// One actionable suggestion for the analytics view
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub priority: RecommendationPriority,
}

/// Names of the first `n` items, joined for template insertion
fn top_names(items: &[ItemView], n: usize) -> String {
    items
        .iter()
        .take(n)
        .map(|item| item.item_name.as_str())
        .collect::<Vec<_>>()
        .join(" and ")
}

/// Synthesize at most three recommendations: an urgent action driven by
/// critical-tier items, a freshness alert driven by warning-tier items,
/// and an optimization note driven by the healthy remainder (enriched
/// with a savings estimate when the waste analysis flags a High item).
pub fn synthesize_recommendations(
    item_analysis: &[ItemWasteAnalysis],
    critical: &[ItemView],
    warning: &[ItemView],
    good: &[ItemView],
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if !critical.is_empty() {
        let (need, verb) =
            if critical.len() == 1 { ("item needs", "is") } else { ("items need", "are") };
        recommendations.push(Recommendation {
            title: "Urgent Action Required".to_string(),
            description: format!(
                "{count} {need} immediate attention. {names} {verb} predicted to spoil \
                 within 24 hours. Consider creating daily specials or processing these items \
                 immediately.",
                count = critical.len(),
                need = need,
                names = top_names(critical, 2),
                verb = verb,
            ),
            priority: RecommendationPriority::High,
        });
    }

    if !warning.is_empty() {
        recommendations.push(Recommendation {
            title: "Freshness Alert".to_string(),
            description: format!(
                "{} showing declining freshness. Optimal usage window: next 2-3 days. Consider \
                 incorporating into tomorrow's menu planning.",
                top_names(warning, 2),
            ),
            priority: RecommendationPriority::Medium,
        });
    }

    if !good.is_empty() {
        let mut description = format!(
            "{} maintain excellent freshness levels. These items can be used for longer-term \
             menu planning and bulk preparation strategies.",
            top_names(good, 2),
        );
        if let Some(worst) = item_analysis.iter().find(|i| i.waste_level == WasteLevel::High) {
            let savings = (worst.cost_wasted * Decimal::new(15, 2)).round_dp(2);
            description.push_str(&format!(
                " Reducing {} waste by 15% would save an estimated ${}/week.",
                worst.item_name, savings,
            ));
        }
        recommendations.push(Recommendation {
            title: "Optimization Opportunity".to_string(),
            description,
            priority: RecommendationPriority::Low,
        });
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FreshnessTier, NormalizedCategory, StockStatus};

    fn view(name: &str, status: FreshnessTier) -> ItemView {
        ItemView {
            item_name: name.to_string(),
            category: NormalizedCategory::Other,
            quantity: Decimal::ONE,
            freshness_percent: 50,
            status,
            days_remaining: 5,
            stock_status: StockStatus::InStock,
            purchase_date: None,
            expiry_date: None,
        }
    }

    fn high_waste_item(name: &str, cost_wasted: i64) -> ItemWasteAnalysis {
        ItemWasteAnalysis {
            item_name: name.to_string(),
            category: NormalizedCategory::Meat,
            waste_percentage: Decimal::from(50),
            waste_quantity: Decimal::from(10),
            cost_wasted: Decimal::from(cost_wasted),
            risk_score: Decimal::from(5),
            waste_level: WasteLevel::High,
            freshness_percent: 40,
        }
    }

    #[test]
    fn empty_input_produces_no_recommendations() {
        assert!(synthesize_recommendations(&[], &[], &[], &[]).is_empty());
    }

    #[test]
    fn urgent_names_top_two_critical_items() {
        let critical = vec![
            view("Beef", FreshnessTier::Critical),
            view("Milk", FreshnessTier::Critical),
            view("Cod", FreshnessTier::Critical),
        ];
        let recommendations = synthesize_recommendations(&[], &critical, &[], &[]);
        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0].title, "Urgent Action Required");
        assert_eq!(recommendations[0].priority, RecommendationPriority::High);
        assert!(recommendations[0].description.starts_with("3 items need"));
        assert!(recommendations[0].description.contains("Beef and Milk"));
        assert!(!recommendations[0].description.contains("Cod"));
    }

    #[test]
    fn singular_grammar_for_one_item() {
        let critical = vec![view("Beef", FreshnessTier::Critical)];
        let recommendations = synthesize_recommendations(&[], &critical, &[], &[]);
        assert!(recommendations[0].description.starts_with("1 item needs"));
        assert!(recommendations[0].description.contains("Beef is predicted"));
    }

    #[test]
    fn one_recommendation_per_populated_tier() {
        let critical = vec![view("Beef", FreshnessTier::Critical)];
        let warning = vec![view("Milk", FreshnessTier::Warning)];
        let good = vec![view("Apple", FreshnessTier::Excellent)];
        let recommendations = synthesize_recommendations(&[], &critical, &warning, &good);
        assert_eq!(recommendations.len(), 3);
        assert_eq!(recommendations[1].title, "Freshness Alert");
        assert_eq!(recommendations[2].title, "Optimization Opportunity");
    }

    #[test]
    fn optimization_adds_savings_estimate_for_high_waste() {
        let good = vec![view("Apple", FreshnessTier::Good)];
        let analysis = vec![high_waste_item("Beef", 40)];
        let recommendations = synthesize_recommendations(&analysis, &[], &[], &good);
        assert_eq!(recommendations.len(), 1);
        assert!(recommendations[0].description.contains("Reducing Beef waste by 15%"));
        assert!(recommendations[0].description.contains("$6.00/week"));
    }
}
