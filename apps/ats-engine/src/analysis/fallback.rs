//! Regex-harvested terms for when structured term extraction is unavailable.
//!
//! Everything harvested lands in a single `core_tech` bucket.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::terms::{Category, TermMap};

pub const DEFAULT_MAX_TERMS: usize = 40;

static TOKEN: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9+.\-#]+"));

const STOP_WORDS: &[&str] = &[
    "and", "or", "the", "a", "an", "to", "for", "with", "in", "on", "of", "at", "by", "from", "is",
    "are", "be", "as", "this", "that", "will", "you", "we", "our", "your",
];

/// Stems that mark a token as technology rather than prose.
const TECH_STEMS: &[&str] = &[
    "java", "spring", "kafka", "aws", "azure", "gcp", "docker", "kubernetes", "sql", "postgres",
    "redis", "mongodb", "react", "node", "oauth", "jwt", "grpc", "rest", "graphql", "linux",
    "terraform", "jenkins",
];

const REQUIREMENT_CUES: &[&str] = &[
    "must",
    "required",
    "requirements",
    "responsibilities",
    "you will",
    "we are seeking",
    "experience with",
];

/// Minimum cue-bearing lines before falling back to the leading lines.
const MIN_REQUIREMENT_LINES: usize = 3;

struct Candidate<'a> {
    surface: &'a str,
    first_seen: usize,
    frequency: u32,
    acronym: bool,
}

/// Harvests up to `max` likely terms from a job description.
///
/// Tokens are ranked by frequency, +3 when they contain a known technology
/// stem, +1 when written as an acronym, +1 when they carry a symbol
/// (`C++`, `Node.js`, `C#`). Ties keep first-appearance order; each term keeps
/// the spelling of its first appearance.
pub fn harvest_terms(jd_text: &str, max: usize) -> TermMap {
    let Ok(token_pattern) = TOKEN.as_ref() else {
        return TermMap::single(Category::CoreTech, Vec::<String>::new());
    };
    let mut candidates: HashMap<String, Candidate> = HashMap::new();

    for (position, token) in token_pattern
        .find_iter(jd_text)
        .map(|m| m.as_str().trim_end_matches(['.', '-']))
        .enumerate()
    {
        let lower = token.to_lowercase();
        if lower.len() < 2 || STOP_WORDS.contains(&lower.as_str()) {
            continue;
        }
        let acronym = token.chars().any(|c| c.is_ascii_alphabetic())
            && token.chars().all(|c| !c.is_ascii_lowercase());
        let entry = candidates.entry(lower).or_insert(Candidate {
            surface: token,
            first_seen: position,
            frequency: 0,
            acronym: false,
        });
        entry.frequency += 1;
        entry.acronym |= acronym;
    }

    let mut ranked: Vec<(&String, &Candidate)> = candidates.iter().collect();
    ranked.sort_by(|(a_key, a), (b_key, b)| {
        tech_weight(b_key, b)
            .cmp(&tech_weight(a_key, a))
            .then(a.first_seen.cmp(&b.first_seen))
    });

    TermMap::single(
        Category::CoreTech,
        ranked.into_iter().take(max).map(|(_, c)| c.surface),
    )
}

fn tech_weight(lower: &str, candidate: &Candidate) -> u32 {
    let mut weight = candidate.frequency;
    if TECH_STEMS.iter().any(|stem| lower.contains(stem)) {
        weight += 3;
    }
    if candidate.acronym {
        weight += 1;
    }
    if lower.contains(['+', '.', '#', '-']) {
        weight += 1;
    }
    weight
}

/// Requirement-like lines of a job description, at most `n`.
/// With fewer than three cue lines, the first `n` non-empty lines are used.
pub fn top_requirements(jd_text: &str, n: usize) -> Vec<String> {
    let lines: Vec<&str> = jd_text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let cued: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| {
            let lower = line.to_lowercase();
            REQUIREMENT_CUES.iter().any(|cue| lower.contains(cue))
        })
        .collect();

    let chosen = if cued.len() < MIN_REQUIREMENT_LINES {
        lines
    } else {
        cued
    };
    chosen.into_iter().take(n).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const JD: &str = "Senior Backend Engineer\n\
        You will build services in Java and Spring Boot on AWS.\n\
        Requirements: Java 17, Kafka, Docker, C++ a plus.\n\
        Must have experience with REST APIs and Node.js.\n\
        We are seeking someone who loves Java.";

    #[test]
    fn test_harvest_ranks_tech_first() {
        let map = harvest_terms(JD, 5);
        let terms = map.terms(Category::CoreTech);
        assert_eq!(terms.len(), 5);
        // java: 3 hits + stem 3 = 6
        assert_eq!(terms[0], "Java");
        assert!(terms.contains(&"AWS"));
        assert!(terms.contains(&"Spring"));
    }

    #[test]
    fn test_harvest_keeps_symbol_terms_and_drops_trailing_dots() {
        let map = harvest_terms(JD, DEFAULT_MAX_TERMS);
        let terms = map.terms(Category::CoreTech);
        assert!(terms.contains(&"C++"));
        assert!(terms.contains(&"Node.js"));
        assert!(!terms.iter().any(|t| t.ends_with('.')));
    }

    #[test]
    fn test_harvest_skips_stop_words_and_single_letters() {
        let map = harvest_terms("The a and X of Rust", DEFAULT_MAX_TERMS);
        assert_eq!(map.terms(Category::CoreTech), vec!["Rust"]);
    }

    #[test]
    fn test_harvest_empty_text() {
        let map = harvest_terms("", DEFAULT_MAX_TERMS);
        assert!(map.terms(Category::CoreTech).is_empty());
    }

    #[test]
    fn test_top_requirements_prefers_cue_lines() {
        let reqs = top_requirements(JD, 8);
        assert_eq!(reqs.len(), 4);
        assert!(reqs[0].starts_with("You will"));
        assert!(reqs.iter().all(|r| r != "Senior Backend Engineer"));
    }

    #[test]
    fn test_top_requirements_falls_back_to_leading_lines() {
        let jd = "Platform Engineer\n\nWe build tools.\nRequired: Go\nRemote friendly";
        let reqs = top_requirements(jd, 3);
        assert_eq!(reqs, vec!["Platform Engineer", "We build tools.", "Required: Go"]);
    }
}
