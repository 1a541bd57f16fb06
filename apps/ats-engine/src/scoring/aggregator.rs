//! Composite Score Aggregator: weighted sum of category coverage with a hard
//! gate on critical coverage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::models::score::CategoryScore;
use crate::models::terms::Category;
use crate::scoring::round_to;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub total_score: f64,
    pub penalty_applied: bool,
}

/// Combines category coverage into one 0–100 score.
///
/// Categories missing from `category_scores` count as 0 % coverage. When any
/// critical term is missing and core coverage is below the configured
/// threshold, the total is capped (65 by default). At or above the threshold
/// the cap never applies.
pub fn aggregate(
    category_scores: &BTreeMap<Category, CategoryScore>,
    missing_critical: &[String],
    config: &EngineConfig,
) -> Aggregate {
    let coverage = |category: Category| {
        category_scores
            .get(&category)
            .map_or(0.0, |s| s.coverage_percent)
    };

    let mut total: f64 = config
        .category_weights
        .iter()
        .map(|(&category, &weight)| coverage(category) * weight)
        .sum();

    let penalty_applied = !missing_critical.is_empty()
        && coverage(Category::CoreTech) < config.penalty_coverage_threshold;
    if penalty_applied {
        total = total.min(config.penalty_score_cap);
    }

    Aggregate {
        total_score: round_to(total, 1),
        penalty_applied,
    }
}
