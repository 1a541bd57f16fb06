//! Term Normalizer: rewrites spelling variants in a résumé to the spelling the
//! job description uses, so matching is not defeated by "React.js" vs "ReactJS".
//!
//! The canonical form is whatever literal text the job description contains,
//! not a fixed dictionary spelling. Groups the job description never mentions
//! are left untouched.

use std::collections::HashSet;
use std::ops::Range;

use tracing::debug;

use crate::errors::ConfigError;
use crate::scoring::matcher::PhraseMatcher;

/// Built-in alias groups: `(key, variants)`. Variants are matched case-insensitively.
pub const DEFAULT_ALIAS_GROUPS: &[(&str, &[&str])] = &[
    ("react", &["react", "reactjs", "react.js", "react js"]),
    ("node", &["node", "nodejs", "node.js", "node js"]),
    ("aws", &["aws", "amazon web services"]),
    ("dotnet", &["dotnet", ".net", "dot net"]),
    ("csharp", &["c#", "csharp", "c sharp"]),
    ("golang", &["golang", "go", "go lang"]),
    ("postgresql", &["postgresql", "postgres"]),
    ("mongodb", &["mongodb", "mongo"]),
    ("typescript", &["typescript", "ts"]),
    ("javascript", &["javascript", "js", "es6"]),
    ("springboot", &["springboot", "spring boot", "spring-boot"]),
    ("kubernetes", &["kubernetes", "k8s"]),
    ("docker", &["docker", "containerization"]),
    ("gcp", &["gcp", "google cloud platform", "google cloud"]),
    ("azure", &["azure", "microsoft azure"]),
    ("rest", &["rest api", "restful api", "rest", "restful"]),
    ("graphql", &["graphql", "graph ql"]),
    ("nextjs", &["nextjs", "next.js", "next js"]),
    ("vuejs", &["vuejs", "vue.js", "vue"]),
    ("angular", &["angular", "angularjs"]),
    ("expressjs", &["expressjs", "express.js", "express"]),
    ("django", &["django", "python django"]),
    ("flask", &["flask", "python flask"]),
    ("rails", &["ruby on rails", "rails", "ror"]),
    ("cicd", &["ci/cd", "cicd", "continuous integration"]),
    ("jenkins", &["jenkins", "jenkins ci"]),
    ("github_actions", &["github actions", "gh actions"]),
    ("terraform", &["terraform", "hashicorp terraform"]),
];

/// A set of spellings treated as one term.
#[derive(Debug, Clone)]
pub struct AliasGroup {
    pub key: String,
    pub variants: Vec<String>,
    matcher: PhraseMatcher,
}

impl AliasGroup {
    /// The group member the source text uses first, as literally written there.
    pub fn canonical_in<'s>(&self, source_text: &'s str) -> Option<&'s str> {
        self.matcher
            .find_first(source_text)
            .map(|hit| &source_text[hit])
    }
}

/// Data-driven alias table. Built once, shared read-only.
#[derive(Debug, Clone)]
pub struct AliasTable {
    groups: Vec<AliasGroup>,
}

impl AliasTable {
    /// Compiles a table, rejecting variants listed in more than one group.
    pub fn new<I, K, V, S>(groups: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut compiled = Vec::new();

        for (key, variants) in groups {
            let mut members: Vec<String> = Vec::new();
            for variant in variants {
                let variant = variant.as_ref().trim().to_lowercase();
                if variant.is_empty() || members.contains(&variant) {
                    continue;
                }
                if !seen.insert(variant.clone()) {
                    return Err(ConfigError::DuplicateAlias { variant });
                }
                members.push(variant);
            }
            if members.is_empty() {
                continue;
            }
            let matcher = PhraseMatcher::new(&members, true)?;
            compiled.push(AliasGroup {
                key: key.into(),
                variants: members,
                matcher,
            });
        }

        Ok(Self { groups: compiled })
    }

    pub fn builtin() -> Result<Self, ConfigError> {
        Self::new(DEFAULT_ALIAS_GROUPS.iter().map(|(k, v)| (*k, v.iter())))
    }

    pub fn groups(&self) -> &[AliasGroup] {
        &self.groups
    }

    /// Rewrites every variant of every group the source text mentions to that
    /// group's canonical form.
    ///
    /// Each pass resolves all groups at once, so a replacement is never split
    /// by another group; overlapping hits resolve to the earliest, then longest.
    /// A written canonical can join its neighbour into a longer variant
    /// ("Google Cloud" + " platform"), so passes repeat until the text settles.
    /// Running it twice gives the same text.
    pub fn normalize(&self, document: &str, source_text: &str) -> String {
        let active: Vec<(&AliasGroup, &str)> = self
            .groups
            .iter()
            .filter_map(|group| group.canonical_in(source_text).map(|c| (group, c)))
            .collect();

        let mut text = rewrite_pass(&active, document);
        // Every extra pass needs a join across a rewritten span; bounded by the groups.
        for _ in 0..=active.len() {
            let next = rewrite_pass(&active, &text);
            if next == text {
                return text;
            }
            text = next;
        }
        debug!(groups = active.len(), "Alias normalization did not settle");
        text
    }
}

/// One rewrite of all active groups over `document`.
fn rewrite_pass(active: &[(&AliasGroup, &str)], document: &str) -> String {
    let mut hits: Vec<(Range<usize>, &str)> = Vec::new();

    for (group, canonical) in active {
        let group_hits = group.matcher.find_all(document);
        let changed = group_hits
            .iter()
            .filter(|hit| &document[hit.start..hit.end] != *canonical)
            .count();
        if changed > 0 {
            debug!(
                group = %group.key,
                canonical,
                replacements = changed,
                "Normalizing alias group"
            );
        }
        hits.extend(group_hits.into_iter().map(|hit| (hit, *canonical)));
    }

    if hits.is_empty() {
        return document.to_string();
    }

    hits.sort_by(|(a, _), (b, _)| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut out = String::with_capacity(document.len());
    let mut cursor = 0;
    for (hit, canonical) in hits {
        if hit.start < cursor {
            continue;
        }
        out.push_str(&document[cursor..hit.start]);
        out.push_str(canonical);
        cursor = hit.end;
    }
    out.push_str(&document[cursor..]);
    out
}
