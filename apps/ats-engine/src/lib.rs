//! Weighted keyword-coverage scoring of a résumé against job-description terms.
//!
//! ```no_run
//! use ats_engine::{AtsEngine, Category, TermMap};
//!
//! let engine = AtsEngine::with_defaults()?;
//! let terms = TermMap::single(Category::CoreTech, ["Rust", "Kafka"]);
//! let result = engine.score("SKILLS\nRust, Kafka", "Rust and Kafka required", &terms);
//! assert!(result.total_score <= 100.0);
//! # Ok::<(), ats_engine::ConfigError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod errors;
pub mod models;
pub mod scoring;
pub mod telemetry;

pub use analysis::blend::{analyze, flat_keyword_coverage, AnalysisReport, AnalysisRequest, FlatCoverage};
pub use config::EngineConfig;
pub use errors::ConfigError;
pub use models::score::{CategoryScore, Match, MatchDetail, MatchTier, ScoreResult};
pub use models::terms::{Category, TermMap};
pub use scoring::engine::{AlignmentScorer, AtsEngine};
