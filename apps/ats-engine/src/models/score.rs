use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::terms::Category;

/// How well a term matched the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchTier {
    /// Same spelling and casing as the target term.
    Exact,
    /// Same spelling, different casing.
    Alias,
    Missing,
}

/// One occurrence of a term in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub term: String,
    pub tier: MatchTier,
    /// Byte offset of the occurrence in the (normalized) document.
    pub offset: usize,
}

/// Per-term evidence, one entry for every term that was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetail {
    pub term: String,
    pub category: Category,
    pub tier: MatchTier,
    /// All occurrences found, not only the capped ones that earned points.
    pub occurrence_count: usize,
    pub points: f64, // rounded to 2 decimals
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub coverage_percent: f64, // 0 – 100, one decimal
}

/// Full result of one scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total_score: f64, // 0 – 100, one decimal
    pub category_scores: BTreeMap<Category, CategoryScore>,
    pub missing_critical_terms: Vec<String>,
    pub matched_details: Vec<MatchDetail>,
    /// True when the critical-coverage gate engaged and capped the total.
    pub penalty_applied: bool,
}

impl ScoreResult {
    pub fn coverage(&self, category: Category) -> Option<f64> {
        self.category_scores
            .get(&category)
            .map(|s| s.coverage_percent)
    }

    pub fn detail(&self, term: &str) -> Option<&MatchDetail> {
        self.matched_details.iter().find(|d| d.term == term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_match_tier_serializes_upper_case() {
        assert_eq!(serde_json::to_value(MatchTier::Exact).unwrap(), json!("EXACT"));
        assert_eq!(serde_json::to_value(MatchTier::Alias).unwrap(), json!("ALIAS"));
        assert_eq!(serde_json::to_value(MatchTier::Missing).unwrap(), json!("MISSING"));
    }

    #[test]
    fn test_score_result_shape() {
        let mut category_scores = BTreeMap::new();
        category_scores.insert(
            Category::CoreTech,
            CategoryScore {
                category: Category::CoreTech,
                coverage_percent: 40.0,
            },
        );
        let result = ScoreResult {
            total_score: 14.0,
            category_scores,
            missing_critical_terms: vec!["Kafka".to_string()],
            matched_details: vec![MatchDetail {
                term: "Rust".to_string(),
                category: Category::CoreTech,
                tier: MatchTier::Alias,
                occurrence_count: 1,
                points: 0.85,
            }],
            penalty_applied: false,
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["category_scores"]["core_tech"]["coverage_percent"], json!(40.0));
        assert_eq!(value["matched_details"][0]["tier"], json!("ALIAS"));
        assert_eq!(value["missing_critical_terms"], json!(["Kafka"]));
        assert_eq!(result.coverage(Category::CoreTech), Some(40.0));
        assert_eq!(result.coverage(Category::Cloud), None);
        assert!(result.detail("Rust").is_some());
    }
}
