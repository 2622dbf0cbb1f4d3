//! Category normalization
//!
//! Maps free-text category and item-name strings onto a closed set of
//! kitchen categories. The rule table is ordered and the order is part of
//! the contract: meat keywords are checked first so that overlapping terms
//! (e.g. "turkey") never fall through to a broader bucket.

use serde::{Deserialize, Serialize};

/// Closed set of display categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NormalizedCategory {
    Meat,
    Vegetable,
    Dairy,
    Fruit,
    Seafood,
    Other,
}

impl NormalizedCategory {
    /// Lowercase key used in API payloads and filters
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizedCategory::Meat => "meat",
            NormalizedCategory::Vegetable => "vegetable",
            NormalizedCategory::Dairy => "dairy",
            NormalizedCategory::Fruit => "fruit",
            NormalizedCategory::Seafood => "seafood",
            NormalizedCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for NormalizedCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizedCategory::Meat => write!(f, "Meat"),
            NormalizedCategory::Vegetable => write!(f, "Vegetable"),
            NormalizedCategory::Dairy => write!(f, "Dairy"),
            NormalizedCategory::Fruit => write!(f, "Fruit"),
            NormalizedCategory::Seafood => write!(f, "Seafood"),
            NormalizedCategory::Other => write!(f, "Other"),
        }
    }
}

/// Ordered rule table: (category keywords, item-name keywords, result).
/// First match wins. Keywords match as case-folded substrings.
static CATEGORY_RULES: &[(&[&str], &[&str], NormalizedCategory)] = &[
    (
        &["meat", "poultry", "mutton", "beef", "pork", "lamb", "turkey", "duck"],
        &["chicken", "beef", "pork", "lamb"],
        NormalizedCategory::Meat,
    ),
    (
        &["veg", "vegetable", "vegetables"],
        &["broccoli", "tomato", "capsicum", "onion", "lettuce", "carrot", "potato", "cauliflower"],
        NormalizedCategory::Vegetable,
    ),
    (
        &["dair", "milk", "cheese", "yogurt", "butter", "curd"],
        &["milk", "cheese", "yogurt", "butter"],
        NormalizedCategory::Dairy,
    ),
    (
        &["fruit", "fruits"],
        &["banana", "apple", "orange", "mango", "grape"],
        NormalizedCategory::Fruit,
    ),
    (
        &["sea food", "seafood", "fish", "prawn", "shrimp", "cod", "salmon", "tuna"],
        &["fish", "prawn", "shrimp", "cod", "salmon", "tuna"],
        NormalizedCategory::Seafood,
    ),
];

/// Exact legacy spellings kept as a final fallback
static CATEGORY_ALIASES: &[(&str, NormalizedCategory)] = &[
    ("veg", NormalizedCategory::Vegetable),
    ("veggies", NormalizedCategory::Vegetable),
    ("sea food", NormalizedCategory::Seafood),
];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Normalize a raw category string and item name to a display category.
///
/// Total: empty or unrecognized input degrades to
/// [`NormalizedCategory::Other`], which is always a valid bucket.
pub fn normalize_category(raw_category: &str, item_name: &str) -> NormalizedCategory {
    let category = raw_category.trim().to_lowercase();
    let name = item_name.trim().to_lowercase();

    if category.is_empty() && name.is_empty() {
        return NormalizedCategory::Other;
    }

    for (category_keywords, name_keywords, normalized) in CATEGORY_RULES {
        if contains_any(&category, category_keywords) || contains_any(&name, name_keywords) {
            return *normalized;
        }
    }

    for (alias, normalized) in CATEGORY_ALIASES {
        if category == *alias {
            return *normalized;
        }
    }

    NormalizedCategory::Other
}
