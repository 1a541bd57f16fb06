//! Blended alignment report. Keyword coverage is folded together with an
//! externally supplied semantic similarity and a format check into one 0–1 score.
//!
//! Semantic similarity (embeddings) is computed elsewhere and passed in.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analysis::fallback::{harvest_terms, top_requirements, DEFAULT_MAX_TERMS};
use crate::analysis::format::format_score;
use crate::models::score::ScoreResult;
use crate::models::terms::{Category, TermMap};
use crate::scoring::engine::AlignmentScorer;
use crate::scoring::round_to;

const KEYWORD_SHARE: f64 = 0.45;
const SEMANTIC_SHARE: f64 = 0.45;
const FORMAT_SHARE: f64 = 0.10;

/// Longest missing/matched lists carried in a report.
pub const DISPLAY_LIMIT: usize = 30;
const REQUIREMENT_LINES: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub jd_text: String,
    /// Categorized terms from the extractor; harvested from the JD when absent or empty.
    pub terms: Option<TermMap>,
    /// Embedding similarity, 0.0 – 1.0. Counts as 0.0 when unavailable.
    pub semantic_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub keyword_score: f64,
    pub semantic_score: f64,
    pub format_score: f64,
    pub total_score: f64,
    pub missing_keywords: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub requirements: Vec<String>,
    /// True when terms were harvested from the JD instead of supplied.
    pub used_fallback_terms: bool,
    pub scorer_backend: String,
    pub detail: ScoreResult,
}

/// Coverage of a flat keyword list, all treated as critical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatCoverage {
    pub score: f64, // 0.0 – 1.0
    pub missing: Vec<String>,
    pub matched: Vec<String>,
}

/// Scores a flat keyword list as a single `core_tech` bucket.
///
/// The score is the bucket's coverage rather than the weighted total, which
/// would top out at the `core_tech` weight.
pub fn flat_keyword_coverage(
    scorer: &dyn AlignmentScorer,
    resume_text: &str,
    jd_text: &str,
    keywords: &[String],
) -> FlatCoverage {
    let terms = TermMap::single(Category::CoreTech, keywords.iter().cloned());
    let result = scorer.score(resume_text, jd_text, &terms);
    let (matched, missing) = split_terms(&terms, &result);

    FlatCoverage {
        score: keyword_fraction(&result, true),
        missing,
        matched,
    }
}

/// Runs the full blend for one résumé / job description pair.
pub fn analyze(scorer: &dyn AlignmentScorer, request: &AnalysisRequest) -> AnalysisReport {
    let (terms, used_fallback_terms) = match &request.terms {
        Some(terms) if !terms.is_empty() => (terms.clone(), false),
        _ => {
            warn!("No categorized terms supplied; harvesting terms from the job description");
            (harvest_terms(&request.jd_text, DEFAULT_MAX_TERMS), true)
        }
    };

    let detail = scorer.score(&request.resume_text, &request.jd_text, &terms);
    let keyword_score = keyword_fraction(&detail, used_fallback_terms);
    let semantic_score = request.semantic_score.unwrap_or(0.0).clamp(0.0, 1.0);
    let format_score = format_score(&request.resume_text);

    let total_score = round_to(
        KEYWORD_SHARE * keyword_score + SEMANTIC_SHARE * semantic_score + FORMAT_SHARE * format_score,
        4,
    );

    let (mut matched_keywords, mut missing_keywords) = split_terms(&terms, &detail);
    matched_keywords.truncate(DISPLAY_LIMIT);
    missing_keywords.truncate(DISPLAY_LIMIT);

    AnalysisReport {
        keyword_score: round_to(keyword_score, 4),
        semantic_score: round_to(semantic_score, 4),
        format_score: round_to(format_score, 4),
        total_score,
        missing_keywords,
        matched_keywords,
        requirements: top_requirements(&request.jd_text, REQUIREMENT_LINES),
        used_fallback_terms,
        scorer_backend: scorer.backend().to_string(),
        detail,
    }
}

/// Keyword score on 0–1. A single flat bucket reports its own coverage.
fn keyword_fraction(result: &ScoreResult, flat: bool) -> f64 {
    if flat {
        result.coverage(Category::CoreTech).unwrap_or(0.0) / 100.0
    } else {
        result.total_score / 100.0
    }
}

/// (matched, missing) terms across all categories, in term order.
fn split_terms(terms: &TermMap, result: &ScoreResult) -> (Vec<String>, Vec<String>) {
    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for category in terms.categories() {
        for term in terms.terms(category) {
            let found = result
                .matched_details
                .iter()
                .any(|d| d.category == category && d.term == term);
            if found {
                matched.push(term.to_string());
            } else {
                missing.push(term.to_string());
            }
        }
    }
    (matched, missing)
}
