//! Section-Weighted Scorer: turns located matches into per-term points and a
//! per-category coverage percentage.
//!
//! Points per term: for each of the first `occurrence_cap` occurrences,
//! `tier_weight × section_weight`. An exact Skills hit earns 1.5, so a term can
//! be worth more than 1.0; coverage is clamped at 100 %.

use tracing::debug;

use crate::config::EngineConfig;
use crate::models::score::{CategoryScore, MatchDetail};
use crate::models::terms::Category;
use crate::scoring::locator::locate;
use crate::scoring::sections::{section_of, SectionRange};
use crate::scoring::{round_to, VACUOUS_COVERAGE};

/// Everything one category contributes to the final result.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryOutcome {
    pub score: CategoryScore,
    /// One entry per term that was found, in term order.
    pub details: Vec<MatchDetail>,
    /// Missing terms, only filled for critical categories.
    pub missing_critical: Vec<String>,
}

/// Scores one category of terms against a normalized document.
///
/// `terms` is expected to be clean (trimmed, non-empty, de-duplicated); blank
/// entries are skipped anyway. A category with no terms is fully covered.
pub fn score_category(
    category: Category,
    terms: &[&str],
    document: &str,
    ranges: &[SectionRange],
    config: &EngineConfig,
) -> CategoryOutcome {
    let terms: Vec<&str> = terms
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();

    if terms.is_empty() {
        return CategoryOutcome {
            score: CategoryScore {
                category,
                coverage_percent: VACUOUS_COVERAGE,
            },
            details: Vec::new(),
            missing_critical: Vec::new(),
        };
    }

    let mut details = Vec::new();
    let mut missing_critical = Vec::new();
    let mut total_points = 0.0_f64;

    for term in &terms {
        let hits = locate(term, document);
        if hits.is_missing() {
            if category.is_critical() {
                missing_critical.push(term.to_string());
            }
            continue;
        }

        let tier_weight = config.tier_weight(hits.tier);
        let points: f64 = hits
            .matches
            .iter()
            .take(config.occurrence_cap)
            .map(|m| tier_weight * config.section_weight(section_of(m.offset, ranges)))
            .sum();
        total_points += points;

        details.push(MatchDetail {
            term: term.to_string(),
            category,
            tier: hits.tier,
            occurrence_count: hits.matches.len(),
            points: round_to(points, 2),
        });
    }

    let raw = total_points / terms.len().max(1) as f64;
    let coverage_percent = round_to(raw.min(1.0) * 100.0, 1);

    debug!(
        %category,
        terms = terms.len(),
        matched = details.len(),
        raw,
        coverage_percent,
        "Scored category"
    );

    CategoryOutcome {
        score: CategoryScore {
            category,
            coverage_percent,
        },
        details,
        missing_critical,
    }
}
