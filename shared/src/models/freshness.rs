//! Freshness scoring
//!
//! Derives a 0-100 freshness percentage and a display tier from a batch's
//! purchase/expiry window, evaluated at a caller-supplied instant.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Days-remaining cutoff at or below which an item is high risk,
/// regardless of its freshness percentage
pub const HIGH_RISK_DAYS: i64 = 2;

/// Freshness display tier, most urgent first
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FreshnessTier {
    Critical,
    Warning,
    Good,
    Excellent,
}

impl FreshnessTier {
    /// Lowercase key used in API payloads and filters
    pub fn as_str(&self) -> &'static str {
        match self {
            FreshnessTier::Critical => "critical",
            FreshnessTier::Warning => "warning",
            FreshnessTier::Good => "good",
            FreshnessTier::Excellent => "excellent",
        }
    }
}

impl std::fmt::Display for FreshnessTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time freshness assessment of a batch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FreshnessAssessment {
    pub days_elapsed: i64,
    pub max_lifespan_days: i64,
    pub days_remaining: i64,
    pub freshness_percent: u8,
    pub tier: FreshnessTier,
}

impl FreshnessAssessment {
    /// Sentinel for records whose dates could not be parsed upstream.
    /// A bad record scores as spoiled rather than aborting aggregation.
    pub fn invalid() -> Self {
        Self {
            days_elapsed: 0,
            max_lifespan_days: 0,
            days_remaining: 0,
            freshness_percent: 0,
            tier: FreshnessTier::Critical,
        }
    }
}

/// Assessment recorded once when a purchase is entered, never recomputed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseAssessment {
    pub freshness_percent: u8,
    pub max_lifespan_days: i64,
    pub days_remaining: i64,
    /// `(100 - freshness_percent) / 100`, two decimal places
    pub spoilage_rate: Decimal,
    pub high_risk: bool,
}

/// Whole days from `from` to `to`, rounded up, floored at zero
fn days_ceil(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let seconds = (to - from).num_seconds();
    if seconds <= 0 {
        0
    } else {
        (seconds + 86_399) / 86_400
    }
}

/// Classify a freshness percentage and days-remaining pair into a tier.
///
/// The days-remaining rule takes precedence: an item within
/// [`HIGH_RISK_DAYS`] of expiry is critical even when its percentage alone
/// would place it higher.
pub fn classify_freshness(freshness_percent: u8, days_remaining: i64) -> FreshnessTier {
    if days_remaining <= HIGH_RISK_DAYS || freshness_percent <= 20 {
        FreshnessTier::Critical
    } else if freshness_percent <= 40 {
        FreshnessTier::Warning
    } else if freshness_percent <= 70 {
        FreshnessTier::Good
    } else {
        FreshnessTier::Excellent
    }
}

/// Score the freshness of a batch at `now`.
///
/// The percentage is `round(days_remaining / max(max_lifespan, 1) * 100)`
/// clamped to `[0, 100]`, so it is non-increasing as `now` advances and
/// reaches 0 at or after expiry. Missing dates yield the invalid sentinel.
pub fn score_freshness(
    purchase_date: Option<DateTime<Utc>>,
    expiry_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> FreshnessAssessment {
    let (Some(purchase), Some(expiry)) = (purchase_date, expiry_date) else {
        return FreshnessAssessment::invalid();
    };

    let max_lifespan_days = days_ceil(purchase, expiry);
    let days_remaining = days_ceil(now, expiry);
    let days_elapsed = (now - purchase).num_days().max(0);

    let ratio = days_remaining as f64 / max_lifespan_days.max(1) as f64;
    let freshness_percent = (ratio * 100.0).round().clamp(0.0, 100.0) as u8;

    FreshnessAssessment {
        days_elapsed,
        max_lifespan_days,
        days_remaining,
        freshness_percent,
        tier: classify_freshness(freshness_percent, days_remaining),
    }
}

/// Derive the entry-time assessment for a newly recorded purchase
pub fn assess_purchase(
    purchase_date: DateTime<Utc>,
    expiry_date: DateTime<Utc>,
    now: DateTime<Utc>,
) -> PurchaseAssessment {
    let assessment = score_freshness(Some(purchase_date), Some(expiry_date), now);
    PurchaseAssessment {
        freshness_percent: assessment.freshness_percent,
        max_lifespan_days: assessment.max_lifespan_days,
        days_remaining: assessment.days_remaining,
        spoilage_rate: Decimal::new(100 - assessment.freshness_percent as i64, 2),
        high_risk: assessment.days_remaining <= HIGH_RISK_DAYS,
    }
}
