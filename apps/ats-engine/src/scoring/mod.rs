// Keyword alignment scoring: normalize → map sections → locate → score → aggregate.
// Pure and deterministic; nothing here performs I/O or keeps state between calls.

pub mod aggregator;
pub mod engine;
pub mod locator;
pub mod matcher;
pub mod normalizer;
pub mod scorer;
pub mod sections;

/// Coverage of a category that declares no terms.
pub(crate) const VACUOUS_COVERAGE: f64 = 100.0;

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
