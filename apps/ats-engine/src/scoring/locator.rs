//! Match Locator: finds whole-word occurrences of one term and grades them.

use tracing::warn;

use crate::models::score::{Match, MatchTier};
use crate::scoring::matcher::PhraseMatcher;

/// Every occurrence of one term, all at the same tier.
#[derive(Debug, Clone, PartialEq)]
pub struct TermHits {
    pub term: String,
    pub tier: MatchTier,
    /// Empty when `tier` is `Missing`. Document order.
    pub matches: Vec<Match>,
}

impl TermHits {
    fn missing(term: &str) -> Self {
        Self {
            term: term.to_string(),
            tier: MatchTier::Missing,
            matches: Vec::new(),
        }
    }

    pub fn is_missing(&self) -> bool {
        self.tier == MatchTier::Missing
    }
}

/// Locates `term` in `document`.
///
/// Case-sensitive hits make the tier `Exact`; failing that, case-insensitive
/// hits make it `Alias`; otherwise the term is `Missing`. Only hits of the
/// winning tier are returned.
pub fn locate(term: &str, document: &str) -> TermHits {
    let term = term.trim();
    if term.is_empty() || document.is_empty() {
        return TermHits::missing(term);
    }

    for (tier, case_insensitive) in [(MatchTier::Exact, false), (MatchTier::Alias, true)] {
        let matcher = match PhraseMatcher::literal(term, case_insensitive) {
            Ok(matcher) => matcher,
            Err(e) => {
                warn!("Term '{term}' could not be searched: {e}");
                return TermHits::missing(term);
            }
        };
        let hits = matcher.find_all(document);
        if !hits.is_empty() {
            return TermHits {
                term: term.to_string(),
                tier,
                matches: hits
                    .into_iter()
                    .map(|hit| Match {
                        term: term.to_string(),
                        tier,
                        offset: hit.start,
                    })
                    .collect(),
            };
        }
    }

    TermHits::missing(term)
}
