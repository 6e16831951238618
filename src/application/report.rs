//! Report rendering
//!
//! Fixed-width table plus the mismatch section, rendered as plain strings.
//! Rendering is deterministic: the same outcomes always produce the same
//! bytes, so two runs over identical pages diff clean.

use crate::domain::verification::{mismatches, EntryOutcome};

const TITLE_WIDTH: usize = 45;
const CURRENT_WIDTH: usize = 8;
const RATING_WIDTH: usize = 8;
const META_WIDTH: usize = 6;
const RULE_WIDTH: usize = 75;

/// Column header row plus the rule under it
pub fn render_header() -> String {
    format!(
        "{:<title$} {:>current$} {:>rating$} {:>meta$}\n{}",
        "Title",
        "Current",
        "IMDb",
        "Meta",
        "-".repeat(RULE_WIDTH),
        title = TITLE_WIDTH,
        current = CURRENT_WIDTH,
        rating = RATING_WIDTH,
        meta = META_WIDTH,
    )
}

/// One table row: expected, fetched, metascore, verdict marker
///
/// Over-long titles overflow their column instead of being truncated.
pub fn render_row(outcome: &EntryOutcome) -> String {
    format!(
        "{:<title$} {:>current$} {:>rating$} {:>meta$} {}",
        outcome.entry.title,
        outcome.entry.expected_rating,
        outcome.scores.rating,
        outcome.scores.metascore,
        outcome.verdict.marker(),
        title = TITLE_WIDTH,
        current = CURRENT_WIDTH,
        rating = RATING_WIDTH,
        meta = META_WIDTH,
    )
}

/// Full table: header, rule, one row per outcome in order
pub fn render_table(outcomes: &[EntryOutcome]) -> String {
    let mut table = render_header();
    for outcome in outcomes {
        table.push('\n');
        table.push_str(&render_row(outcome));
    }
    table
}

/// Mismatch section, or `None` when nothing drifted
///
/// The caller separates the section from the table with a blank line.
pub fn render_mismatch_section(outcomes: &[EntryOutcome]) -> Option<String> {
    let drifted = mismatches(outcomes);
    if drifted.is_empty() {
        return None;
    }
    let mut section = format!("{}\nMISMATCHES FOUND:", "=".repeat(RULE_WIDTH));
    for mismatch in &drifted {
        section.push_str(&format!(
            "\n  {}: {} -> {} (Meta: {})",
            mismatch.title, mismatch.expected, mismatch.actual, mismatch.metascore
        ));
    }
    Some(section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::CatalogEntry;
    use crate::domain::verification::{EntryOutcome, FetchedScores};

    fn outcome(title: &str, expected: &str, rating: &str, metascore: &str) -> EntryOutcome {
        EntryOutcome::evaluate(
            CatalogEntry::new(title, "tt0000001", expected),
            FetchedScores::new(rating, metascore),
        )
    }

    #[test]
    fn header_has_the_fixed_layout() {
        let header = render_header();
        let mut lines = header.lines();

        let columns = lines.next().expect("column row");
        assert!(columns.starts_with("Title"));
        assert!(columns.ends_with("Meta"));
        assert_eq!(columns.chars().count(), 70);

        let rule = lines.next().expect("rule row");
        assert_eq!(rule, "-".repeat(75));
        assert!(lines.next().is_none());
    }

    #[test]
    fn rows_align_and_carry_the_marker() {
        let matched = render_row(&outcome("The Wire", "9.3", "9.3", "66"));
        assert!(matched.starts_with("The Wire "));
        assert!(matched.ends_with(" ✓"));
        assert_eq!(matched.chars().count(), 72);

        let drifted = render_row(&outcome("The Wire", "9.3", "9.2", "66"));
        assert!(drifted.ends_with(" ✗"));

        let unavailable = render_row(&outcome("The Wire", "9.3", "N/A", "N/A"));
        assert!(unavailable.ends_with(" ?"));
    }

    #[test]
    fn long_titles_overflow_without_truncation() {
        let long_title = "An Unusually Verbose Title That Exceeds The Column Width";
        let row = render_row(&outcome(long_title, "8.0", "8.0", "70"));

        assert!(row.starts_with(long_title));
        assert!(row.chars().count() > 72);
    }

    #[test]
    fn table_preserves_outcome_order_and_is_deterministic() {
        let outcomes = vec![
            outcome("First", "9.0", "9.0", "80"),
            outcome("Second", "8.0", "8.1", "70"),
            outcome("Third", "7.0", "N/A", "N/A"),
        ];

        let table = render_table(&outcomes);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[2].starts_with("First"));
        assert!(lines[3].starts_with("Second"));
        assert!(lines[4].starts_with("Third"));

        assert_eq!(table, render_table(&outcomes));
    }

    #[test]
    fn mismatch_section_lists_only_drifted_entries() {
        let outcomes = vec![
            outcome("Matched", "9.0", "9.0", "80"),
            outcome("Drifted", "8.0", "8.2", "71"),
            outcome("Gone", "7.0", "N/A", "N/A"),
        ];

        let section = render_mismatch_section(&outcomes).expect("has mismatches");
        let lines: Vec<&str> = section.lines().collect();
        assert_eq!(lines[0], "=".repeat(75));
        assert_eq!(lines[1], "MISMATCHES FOUND:");
        assert_eq!(lines[2], "  Drifted: 8.0 -> 8.2 (Meta: 71)");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn mismatch_section_is_absent_when_nothing_drifted() {
        let outcomes = vec![
            outcome("Matched", "9.0", "9.0", "80"),
            outcome("Gone", "7.0", "N/A", "N/A"),
        ];
        assert!(render_mismatch_section(&outcomes).is_none());
    }
}
