//! ATS-friendliness heuristics for résumé text.

const TABLE_PENALTY: f64 = 0.15;
const MOJIBAKE_PENALTY: f64 = 0.05;
const MISSING_HEADING_PENALTY: f64 = 0.15;
const LONG_LINE_PENALTY: f64 = 0.10;

const REQUIRED_HEADINGS: &[&str] = &["summary", "skills", "experience", "education"];
const LONG_LINE_CHARS: usize = 140;
const LONG_LINE_ALLOWANCE: usize = 5;

/// Scores how safely `text` survives ATS parsing, 0.0 – 1.0.
///
/// Penalizes table-like layout, mis-encoded bullets, each missing standard
/// heading, and many over-long lines.
pub fn format_score(text: &str) -> f64 {
    let mut score = 1.0;

    if text.contains('|') && text.contains("----") {
        score -= TABLE_PENALTY;
    }
    // UTF-8 bullet decoded as cp1252
    if text.contains("â€¢") {
        score -= MOJIBAKE_PENALTY;
    }

    let lower = text.to_lowercase();
    let missing = REQUIRED_HEADINGS
        .iter()
        .filter(|h| !lower.contains(*h))
        .count();
    score -= MISSING_HEADING_PENALTY * missing as f64;

    let long_lines = text
        .lines()
        .filter(|l| l.chars().count() > LONG_LINE_CHARS)
        .count();
    if long_lines > LONG_LINE_ALLOWANCE {
        score -= LONG_LINE_PENALTY;
    }

    f64::clamp(score, 0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAN: &str = "Summary\nBackend engineer\nSkills\nRust\nExperience\nAcme\nEducation\nBSc";

    #[test]
    fn test_clean_resume_scores_full() {
        assert_eq!(format_score(CLEAN), 1.0);
    }

    #[test]
    fn test_missing_headings_penalized() {
        // skills + education missing
        let score = format_score("Summary\nExperience\nAcme");
        assert!((score - 0.7).abs() < 1e-9, "Score was {score}");
    }

    #[test]
    fn test_table_and_mojibake_penalized() {
        let text = format!("{CLEAN}\n| Tool | Years |\n|------|-------|\nâ€¢ Rust");
        let score = format_score(&text);
        assert!((score - 0.8).abs() < 1e-9, "Score was {score}");
    }

    #[test]
    fn test_many_long_lines_penalized() {
        let long = "x".repeat(LONG_LINE_CHARS + 1);
        let six = vec![long.as_str(); 6].join("\n");
        let score = format_score(&format!("{CLEAN}\n{six}"));
        assert!((score - 0.9).abs() < 1e-9, "Score was {score}");

        let five = vec![long.as_str(); 5].join("\n");
        assert_eq!(format_score(&format!("{CLEAN}\n{five}")), 1.0);
    }

    #[test]
    fn test_worst_case_stays_in_range() {
        let text = format!("| a |\n----\nâ€¢\n{}", vec!["y".repeat(200); 6].join("\n"));
        let score = format_score(&text);
        // 1.0 - 0.15 - 0.05 - 4 × 0.15 - 0.10
        assert!((score - 0.1).abs() < 1e-9, "Score was {score}");
        assert!((format_score("") - 0.4).abs() < 1e-9);
    }
}
