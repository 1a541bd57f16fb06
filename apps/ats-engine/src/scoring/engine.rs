//! The scoring entry point.
//!
//! `AtsEngine` owns the compiled configuration (alias table, heading matchers,
//! weights). It is immutable after construction, so one instance can be shared
//! behind an `Arc` by any number of concurrent callers.

use std::collections::BTreeMap;

use tracing::info;

use crate::config::EngineConfig;
use crate::errors::ConfigError;
use crate::models::score::ScoreResult;
use crate::models::terms::TermMap;
use crate::scoring::aggregator::aggregate;
use crate::scoring::normalizer::AliasTable;
use crate::scoring::scorer::score_category;
use crate::scoring::sections::SectionMapper;

/// A keyword alignment backend. Implement this to swap scorers without
/// touching callers.
pub trait AlignmentScorer: Send + Sync {
    fn score(&self, document: &str, source_text: &str, terms: &TermMap) -> ScoreResult;

    /// Label for transparency in reports.
    fn backend(&self) -> &'static str;
}

#[derive(Debug, Clone)]
pub struct AtsEngine {
    config: EngineConfig,
    aliases: AliasTable,
    sections: SectionMapper,
}

impl AtsEngine {
    /// Validates `config` and compiles the built-in alias and heading tables.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_alias_table(config, AliasTable::builtin()?)
    }

    pub fn with_alias_table(config: EngineConfig, aliases: AliasTable) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            aliases,
            sections: SectionMapper::new()?,
        })
    }

    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::new(EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Scores `document` (the résumé) against `terms` extracted from
    /// `source_text` (the job description).
    ///
    /// Never fails: empty terms are ignored, an empty document covers nothing,
    /// a category without terms is fully covered.
    pub fn score(&self, document: &str, source_text: &str, terms: &TermMap) -> ScoreResult {
        let normalized = self.aliases.normalize(document, source_text);
        let ranges = self.sections.map_sections(&normalized);

        let mut category_scores = BTreeMap::new();
        let mut matched_details = Vec::new();
        let mut missing_critical_terms = Vec::new();

        for category in terms.categories() {
            let outcome = score_category(
                category,
                &terms.terms(category),
                &normalized,
                &ranges,
                &self.config,
            );
            category_scores.insert(category, outcome.score);
            matched_details.extend(outcome.details);
            for term in outcome.missing_critical {
                if !missing_critical_terms.contains(&term) {
                    missing_critical_terms.push(term);
                }
            }
        }

        let totals = aggregate(&category_scores, &missing_critical_terms, &self.config);

        info!(
            total_score = totals.total_score,
            penalty_applied = totals.penalty_applied,
            categories = category_scores.len(),
            matched = matched_details.len(),
            missing_critical = missing_critical_terms.len(),
            "Scored document"
        );

        ScoreResult {
            total_score: totals.total_score,
            category_scores,
            missing_critical_terms,
            matched_details,
            penalty_applied: totals.penalty_applied,
        }
    }
}

impl AlignmentScorer for AtsEngine {
    fn score(&self, document: &str, source_text: &str, terms: &TermMap) -> ScoreResult {
        AtsEngine::score(self, document, source_text, terms)
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}
