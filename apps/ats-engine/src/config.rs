use std::collections::BTreeMap;

use anyhow::{Context, Result};

use crate::errors::ConfigError;
use crate::models::score::MatchTier;
use crate::models::terms::Category;
use crate::scoring::sections::SectionKind;

/// Tolerance when checking that category weights sum to 1.0.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Scoring configuration. Built once at startup, validated, then shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Share of the total score per category. Must sum to 1.0.
    pub category_weights: BTreeMap<Category, f64>,
    /// Multiplier per document section. Unlisted kinds count 1.0.
    pub section_weights: BTreeMap<SectionKind, f64>,
    pub exact_weight: f64,
    pub alias_weight: f64,
    /// Occurrences per term that earn points.
    pub occurrence_cap: usize,
    /// Critical coverage (percent) below which the total is capped.
    pub penalty_coverage_threshold: f64,
    pub penalty_score_cap: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let category_weights = BTreeMap::from([
            (Category::CoreTech, 0.35),
            (Category::Frameworks, 0.25),
            (Category::Architecture, 0.20),
            (Category::Cloud, 0.0),
            (Category::Domain, 0.15),
            (Category::SoftSkills, 0.05),
        ]);
        let section_weights = BTreeMap::from([
            (SectionKind::Skills, 1.5),
            (SectionKind::Experience, 1.2),
            (SectionKind::Projects, 1.1),
            (SectionKind::Summary, 1.0),
            (SectionKind::Unknown, 1.0),
        ]);

        Self {
            category_weights,
            section_weights,
            exact_weight: 1.0,
            alias_weight: 0.85,
            occurrence_cap: 3,
            penalty_coverage_threshold: 50.0,
            penalty_score_cap: 65.0,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
            .context("Invalid scoring configuration in environment")
    }

    /// Applies overrides read through `lookup` on top of the defaults.
    ///
    /// - `ATS_CATEGORY_WEIGHTS` replaces the whole category table (`core_tech=0.4,...`)
    /// - `ATS_SECTION_WEIGHTS` merges into the section table (`skills=2.0,...`)
    /// - `ATS_OCCURRENCE_CAP`, `ATS_PENALTY_COVERAGE_THRESHOLD`, `ATS_PENALTY_SCORE_CAP`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("ATS_CATEGORY_WEIGHTS") {
            let mut weights = BTreeMap::new();
            for (name, value) in parse_weight_list("ATS_CATEGORY_WEIGHTS", &raw)? {
                let category = name.parse::<Category>().map_err(|reason| {
                    ConfigError::InvalidOverride {
                        key: "ATS_CATEGORY_WEIGHTS".to_string(),
                        reason,
                    }
                })?;
                weights.insert(category, value);
            }
            config.category_weights = weights;
        }

        if let Some(raw) = lookup("ATS_SECTION_WEIGHTS") {
            for (name, value) in parse_weight_list("ATS_SECTION_WEIGHTS", &raw)? {
                let kind = name.parse::<SectionKind>().map_err(|reason| {
                    ConfigError::InvalidOverride {
                        key: "ATS_SECTION_WEIGHTS".to_string(),
                        reason,
                    }
                })?;
                config.section_weights.insert(kind, value);
            }
        }

        if let Some(raw) = lookup("ATS_OCCURRENCE_CAP") {
            config.occurrence_cap = parse_number("ATS_OCCURRENCE_CAP", &raw)?;
        }
        if let Some(raw) = lookup("ATS_PENALTY_COVERAGE_THRESHOLD") {
            config.penalty_coverage_threshold = parse_number("ATS_PENALTY_COVERAGE_THRESHOLD", &raw)?;
        }
        if let Some(raw) = lookup("ATS_PENALTY_SCORE_CAP") {
            config.penalty_score_cap = parse_number("ATS_PENALTY_SCORE_CAP", &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations that would make scores meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (category, &value) in &self.category_weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    name: category.to_string(),
                    value,
                });
            }
        }
        let sum: f64 = self.category_weights.values().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum { sum });
        }

        let multipliers = self
            .section_weights
            .iter()
            .map(|(kind, &value)| (kind.to_string(), value))
            .chain([
                ("exact".to_string(), self.exact_weight),
                ("alias".to_string(), self.alias_weight),
            ]);
        for (name, value) in multipliers {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositiveMultiplier { name, value });
            }
        }

        if self.occurrence_cap == 0 {
            return Err(ConfigError::ZeroOccurrenceCap);
        }
        for (name, value) in [
            ("coverage threshold", self.penalty_coverage_threshold),
            ("score cap", self.penalty_score_cap),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::PenaltyOutOfRange { name, value });
            }
        }
        Ok(())
    }

    pub fn category_weight(&self, category: Category) -> f64 {
        self.category_weights.get(&category).copied().unwrap_or(0.0)
    }

    pub fn section_weight(&self, kind: SectionKind) -> f64 {
        self.section_weights.get(&kind).copied().unwrap_or(1.0)
    }

    pub fn tier_weight(&self, tier: MatchTier) -> f64 {
        match tier {
            MatchTier::Exact => self.exact_weight,
            MatchTier::Alias => self.alias_weight,
            MatchTier::Missing => 0.0,
        }
    }
}

fn parse_weight_list(key: &str, raw: &str) -> Result<Vec<(String, f64)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| -> Result<(String, f64), ConfigError> {
            let (name, value) = pair.split_once('=').ok_or_else(|| ConfigError::InvalidOverride {
                key: key.to_string(),
                reason: format!("expected name=value, got '{pair}'"),
            })?;
            Ok((name.trim().to_string(), parse_number(key, value)?))
        })
        .collect()
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidOverride {
            key: key.to_string(),
            reason: format!("'{}' is not a valid number", raw.trim()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_category_weights_sum_to_one() {
        let sum: f64 = EngineConfig::default().category_weights.values().sum();
        assert!((sum - 1.0).abs() < 1e-9, "Sum was {sum}");
    }

    #[test]
    fn test_lookups_fall_back_to_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.section_weight(SectionKind::Skills), 1.5);
        assert_eq!(config.section_weight(SectionKind::Education), 1.0);
        assert_eq!(config.category_weight(Category::Cloud), 0.0);
        assert_eq!(config.tier_weight(MatchTier::Alias), 0.85);
        assert_eq!(config.tier_weight(MatchTier::Missing), 0.0);
    }

    #[test]
    fn test_no_overrides_yields_defaults() {
        let config = EngineConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_category_override_replaces_table() {
        let config = EngineConfig::from_lookup(lookup_from(&[(
            "ATS_CATEGORY_WEIGHTS",
            "core_tech=0.5, frameworks=0.5",
        )]))
        .unwrap();
        assert_eq!(config.category_weight(Category::CoreTech), 0.5);
        assert_eq!(config.category_weight(Category::Architecture), 0.0);
    }

    #[test]
    fn test_section_override_merges() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("ATS_SECTION_WEIGHTS", "education=0.9"),
            ("ATS_OCCURRENCE_CAP", "5"),
        ]))
        .unwrap();
        assert_eq!(config.section_weight(SectionKind::Education), 0.9);
        assert_eq!(config.section_weight(SectionKind::Skills), 1.5);
        assert_eq!(config.occurrence_cap, 5);
    }

    #[test]
    fn test_weights_not_summing_to_one_rejected() {
        let err = EngineConfig::from_lookup(lookup_from(&[(
            "ATS_CATEGORY_WEIGHTS",
            "core_tech=0.5,frameworks=0.2",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::WeightSum { .. }));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut config = EngineConfig::default();
        config.category_weights.insert(Category::Cloud, -0.1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_zero_multiplier_rejected() {
        let config = EngineConfig {
            alias_weight: 0.0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveMultiplier { .. })
        ));
    }

    #[test]
    fn test_zero_cap_and_bad_penalty_rejected() {
        let config = EngineConfig {
            occurrence_cap: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroOccurrenceCap)));

        let config = EngineConfig {
            penalty_score_cap: 120.0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PenaltyOutOfRange { .. })
        ));
    }

    #[test]
    fn test_malformed_overrides_rejected() {
        for (key, value) in [
            ("ATS_CATEGORY_WEIGHTS", "core_tech"),
            ("ATS_CATEGORY_WEIGHTS", "tooling=1.0"),
            ("ATS_SECTION_WEIGHTS", "skills=lots"),
            ("ATS_OCCURRENCE_CAP", "-1"),
        ] {
            let err = EngineConfig::from_lookup(lookup_from(&[(key, value)])).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidOverride { .. }),
                "{key}={value} gave {err:?}"
            );
        }
    }
}
