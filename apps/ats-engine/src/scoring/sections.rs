//! Section mapping: splits a résumé into heading-anchored ranges so a match
//! can be weighted by where it appears.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scoring::matcher::PhraseMatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Skills,
    Experience,
    Projects,
    Summary,
    Education,
    /// Text before the first heading, or a document without headings.
    Unknown,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Skills => "skills",
            SectionKind::Experience => "experience",
            SectionKind::Projects => "projects",
            SectionKind::Summary => "summary",
            SectionKind::Education => "education",
            SectionKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skills" => Ok(SectionKind::Skills),
            "experience" => Ok(SectionKind::Experience),
            "projects" => Ok(SectionKind::Projects),
            "summary" => Ok(SectionKind::Summary),
            "education" => Ok(SectionKind::Education),
            "unknown" => Ok(SectionKind::Unknown),
            other => Err(format!("unknown section '{other}'")),
        }
    }
}

/// A labelled span of the document: `start..end` in byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRange {
    pub kind: SectionKind,
    pub start: usize,
    pub end: usize,
}

impl SectionRange {
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Heading synonyms per section kind.
const HEADINGS: &[(SectionKind, &[&str])] = &[
    (SectionKind::Skills, &["skills", "technical skills", "technologies"]),
    (SectionKind::Experience, &["experience", "work history", "employment"]),
    (SectionKind::Projects, &["projects", "key projects"]),
    (SectionKind::Summary, &["summary", "profile", "objective"]),
    (SectionKind::Education, &["education", "academic"]),
];

static DEFAULT_MAPPER: Lazy<Result<SectionMapper, regex::Error>> = Lazy::new(SectionMapper::new);

/// Compiled heading matchers. Built once and shared read-only.
#[derive(Debug, Clone)]
pub struct SectionMapper {
    headings: Vec<(SectionKind, PhraseMatcher)>,
}

impl SectionMapper {
    pub fn new() -> Result<Self, regex::Error> {
        let headings = HEADINGS
            .iter()
            .map(|(kind, synonyms)| -> Result<_, regex::Error> {
                Ok((*kind, PhraseMatcher::new(synonyms.iter(), true)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { headings })
    }

    /// Finds every heading occurrence and turns consecutive anchors into ranges.
    ///
    /// Each anchor opens a range that runs to the next anchor (or end of text).
    /// Repeated headings of one kind each open their own range.
    pub fn map_sections(&self, document: &str) -> Vec<SectionRange> {
        let mut anchors: Vec<(usize, SectionKind)> = self
            .headings
            .iter()
            .flat_map(|(kind, matcher)| {
                matcher
                    .find_all(document)
                    .into_iter()
                    .map(move |hit| (hit.start, *kind))
            })
            .collect();

        anchors.sort();
        // Two kinds anchored on one offset would yield an empty range; keep the first.
        anchors.dedup_by_key(|(offset, _)| *offset);

        let ranges: Vec<SectionRange> = anchors
            .iter()
            .enumerate()
            .map(|(i, &(start, kind))| SectionRange {
                kind,
                start,
                end: anchors.get(i + 1).map_or(document.len(), |next| next.0),
            })
            .collect();

        debug!(sections = ranges.len(), "Mapped document sections");
        ranges
    }
}

/// Maps sections with the default heading set.
/// Without a usable heading set every offset falls back to `Unknown`.
pub fn map_sections(document: &str) -> Vec<SectionRange> {
    match DEFAULT_MAPPER.as_ref() {
        Ok(mapper) => mapper.map_sections(document),
        Err(_) => Vec::new(),
    }
}

/// The kind of the range containing `offset`, or `Unknown`.
/// `ranges` must be ordered by start, as produced by [`map_sections`].
pub fn section_of(offset: usize, ranges: &[SectionRange]) -> SectionKind {
    let idx = ranges.partition_point(|r| r.start <= offset);
    match idx.checked_sub(1).map(|i| &ranges[i]) {
        Some(range) if range.contains(offset) => range.kind,
        _ => SectionKind::Unknown,
    }
}
