//! Boundary-safe phrase matching shared by alias normalization and term location.
//!
//! `\b` cannot anchor terms that begin or end with a symbol (`C++`, `C#`, `.NET`):
//! the boundary sits on the wrong side of the symbol, so the term silently fails
//! to match at string edges or next to punctuation. Instead each candidate hit is
//! checked explicitly: the characters on either side must not be word characters.

use std::ops::Range;

use regex::{Regex, RegexBuilder};

/// Matches any of a set of literal phrases as whole words.
///
/// Internal whitespace in a phrase matches any whitespace run, so
/// "spring boot" also finds "Spring\nBoot".
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    /// One pattern per phrase, longest phrase first.
    patterns: Vec<Regex>,
}

impl PhraseMatcher {
    pub fn new<I, S>(phrases: I, case_insensitive: bool) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut phrases: Vec<String> = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        phrases.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        phrases.dedup();

        let patterns = phrases
            .iter()
            .map(|phrase| {
                RegexBuilder::new(&phrase_pattern(phrase))
                    .case_insensitive(case_insensitive)
                    .build()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    pub fn literal(phrase: &str, case_insensitive: bool) -> Result<Self, regex::Error> {
        Self::new([phrase], case_insensitive)
    }

    /// All whole-word hits in document order, without overlaps.
    /// Where two phrases hit at the same offset the longer one wins.
    pub fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        let mut hits: Vec<Range<usize>> = Vec::new();
        for pattern in &self.patterns {
            let mut pos = 0;
            while pos <= text.len() {
                let Some(m) = pattern.find_at(text, pos) else {
                    break;
                };
                if m.start() == m.end() {
                    break;
                }
                if is_bounded(text, m.start(), m.end()) {
                    hits.push(m.range());
                    pos = m.end();
                } else {
                    // Retry one character later so a bounded hit overlapping
                    // the rejected one is still found.
                    pos = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
                }
            }
        }

        hits.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
        let mut accepted: Vec<Range<usize>> = Vec::with_capacity(hits.len());
        for hit in hits {
            if accepted.last().map_or(true, |last| hit.start >= last.end) {
                accepted.push(hit);
            }
        }
        accepted
    }

    /// The earliest whole-word hit, if any.
    pub fn find_first(&self, text: &str) -> Option<Range<usize>> {
        self.find_all(text).into_iter().next()
    }
}

fn phrase_pattern(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}
