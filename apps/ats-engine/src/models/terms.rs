//! Categorized term input: the target terms extracted from a job description.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Bucket a target term belongs to. Drives the weighted aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    CoreTech,
    Frameworks,
    Architecture,
    Cloud,
    Domain,
    SoftSkills,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::CoreTech,
        Category::Frameworks,
        Category::Architecture,
        Category::Cloud,
        Category::Domain,
        Category::SoftSkills,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::CoreTech => "core_tech",
            Category::Frameworks => "frameworks",
            Category::Architecture => "architecture",
            Category::Cloud => "cloud",
            Category::Domain => "domain",
            Category::SoftSkills => "soft_skills",
        }
    }

    /// Terms of a critical category are reported when missing and gate the penalty.
    pub fn is_critical(&self) -> bool {
        matches!(self, Category::CoreTech)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == key)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

/// Target terms grouped by category.
///
/// Insertion keeps the caller's term order and drops blanks; exact duplicates
/// are removed when terms are read back through [`TermMap::terms`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermMap(BTreeMap<Category, Vec<String>>);

impl TermMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map with one bucket, e.g. the `core_tech` fallback of harvested terms.
    pub fn single<I, S>(category: Category, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut map = Self::new();
        map.insert(category, terms);
        map
    }

    /// Builds a map from extractor output keyed by category name.
    /// Unknown category names are dropped.
    pub fn from_raw(raw: HashMap<String, Vec<String>>) -> Self {
        let mut map = Self::new();
        for (name, terms) in raw {
            match name.parse::<Category>() {
                Ok(category) => map.insert(category, terms),
                Err(reason) => warn!("Dropping {} terms: {reason}", terms.len()),
            }
        }
        map
    }

    /// Appends terms to a category, creating the bucket if needed.
    /// Blank terms are dropped.
    pub fn insert<I, S>(&mut self, category: Category, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let bucket = self.0.entry(category).or_default();
        let mut blanks = 0;
        for term in terms {
            let term: String = term.into();
            if term.trim().is_empty() {
                blanks += 1;
            } else {
                bucket.push(term);
            }
        }
        if blanks > 0 {
            warn!(%category, dropped = blanks, "Ignoring blank terms");
        }
    }

    /// Trimmed, non-empty, de-duplicated terms of a category in first-seen order.
    pub fn terms(&self, category: Category) -> Vec<&str> {
        let Some(raw) = self.0.get(&category) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        raw.iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .filter(|t| seen.insert(*t))
            .collect()
    }

    /// Categories present in the map, including those declared with no terms.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.0.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<Category, Vec<String>>> for TermMap {
    fn from(map: BTreeMap<Category, Vec<String>>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    /// Collects formatted log output for assertions.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_category_parses_loose_names() {
        assert_eq!("core_tech".parse::<Category>().unwrap(), Category::CoreTech);
        assert_eq!("Soft Skills".parse::<Category>().unwrap(), Category::SoftSkills);
        assert_eq!("soft-skills".parse::<Category>().unwrap(), Category::SoftSkills);
        assert!("tooling".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_snake_case() {
        let json = serde_json::to_string(&Category::CoreTech).unwrap();
        assert_eq!(json, r#""core_tech""#);
        let back: Category = serde_json::from_str(r#""soft_skills""#).unwrap();
        assert_eq!(back, Category::SoftSkills);
    }

    #[test]
    fn test_only_core_tech_is_critical() {
        let critical: Vec<_> = Category::ALL.into_iter().filter(|c| c.is_critical()).collect();
        assert_eq!(critical, vec![Category::CoreTech]);
    }

    #[test]
    fn test_terms_are_trimmed_and_deduplicated() {
        let map = TermMap::single(
            Category::CoreTech,
            vec!["Java", " Java ", "", "   ", "AWS", "java"],
        );
        assert_eq!(map.terms(Category::CoreTech), vec!["Java", "AWS", "java"]);
        assert!(map.terms(Category::Frameworks).is_empty());
    }

    #[test]
    fn test_blank_terms_dropped_with_warning() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();

        let map = tracing::subscriber::with_default(subscriber, || {
            TermMap::single(Category::CoreTech, ["Rust", "", "  \t"])
        });

        assert_eq!(map.terms(Category::CoreTech), vec!["Rust"]);
        let stored = BTreeMap::from([(Category::CoreTech, vec!["Rust".to_string()])]);
        assert_eq!(map, TermMap::from(stored));
        let output = logs.contents();
        assert!(output.contains("WARN"), "Logs were {output}");
        assert!(output.contains("Ignoring blank terms"), "Logs were {output}");
        assert!(output.contains("dropped=2"), "Logs were {output}");
    }

    #[test]
    fn test_from_raw_drops_unknown_categories() {
        let mut raw = HashMap::new();
        raw.insert("frameworks".to_string(), vec!["Spring Boot".to_string()]);
        raw.insert("vibes".to_string(), vec!["rockstar".to_string()]);

        let map = TermMap::from_raw(raw);
        let categories: Vec<_> = map.categories().collect();
        assert_eq!(categories, vec![Category::Frameworks]);
        assert_eq!(map.terms(Category::Frameworks), vec!["Spring Boot"]);
    }

    #[test]
    fn test_empty_bucket_is_still_declared() {
        let map = TermMap::single(Category::Domain, Vec::<String>::new());
        assert!(!map.is_empty());
        assert_eq!(map.categories().collect::<Vec<_>>(), vec![Category::Domain]);
    }

    #[test]
    fn test_deserializes_from_json_object() {
        let map: TermMap =
            serde_json::from_str(r#"{"core_tech": ["Rust"], "cloud": ["GCP"]}"#).unwrap();
        assert_eq!(map.terms(Category::CoreTech), vec!["Rust"]);
        assert_eq!(map.terms(Category::Cloud), vec!["GCP"]);
    }
}
