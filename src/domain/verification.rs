//! Verification outcomes
//!
//! Pure comparison logic: fetched scores against expected scores, one
//! verdict per entry, then run-level counts and the process exit status.
//! Nothing in this module touches the network.

use crate::domain::catalog::CatalogEntry;

/// Sentinel for a score that could not be fetched
pub const UNAVAILABLE: &str = "N/A";

/// Scores read off one title page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedScores {
    pub rating: String,
    pub metascore: String,
}

impl FetchedScores {
    pub fn new(rating: &str, metascore: &str) -> Self {
        Self {
            rating: rating.to_string(),
            metascore: metascore.to_string(),
        }
    }

    /// Both fields degraded, used when the page itself failed
    pub fn unavailable() -> Self {
        Self {
            rating: UNAVAILABLE.to_string(),
            metascore: UNAVAILABLE.to_string(),
        }
    }

    pub fn is_rating_available(&self) -> bool {
        self.rating != UNAVAILABLE
    }
}

/// Comparison verdict for one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Matched,
    Mismatched,
    Unavailable,
}

impl Verdict {
    /// Marker printed in the report's last column
    pub fn marker(&self) -> &'static str {
        match self {
            Verdict::Matched => "✓",
            Verdict::Mismatched => "✗",
            Verdict::Unavailable => "?",
        }
    }
}

/// One entry's fetched scores and its verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOutcome {
    pub entry: CatalogEntry,
    pub scores: FetchedScores,
    pub verdict: Verdict,
}

impl EntryOutcome {
    /// Compare fetched scores against the entry's expected rating
    ///
    /// The comparison is an exact string match, no numeric parsing. An
    /// unavailable rating is its own verdict and never counts as a
    /// mismatch.
    pub fn evaluate(entry: CatalogEntry, scores: FetchedScores) -> Self {
        let verdict = if !scores.is_rating_available() {
            Verdict::Unavailable
        } else if scores.rating == entry.expected_rating {
            Verdict::Matched
        } else {
            Verdict::Mismatched
        };
        Self {
            entry,
            scores,
            verdict,
        }
    }
}

/// One confirmed drift between the catalog and the live page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub title: String,
    pub expected: String,
    pub actual: String,
    pub metascore: String,
}

/// Mismatched outcomes in run order; unavailable entries are excluded
pub fn mismatches(outcomes: &[EntryOutcome]) -> Vec<Mismatch> {
    outcomes
        .iter()
        .filter(|outcome| outcome.verdict == Verdict::Mismatched)
        .map(|outcome| Mismatch {
            title: outcome.entry.title.clone(),
            expected: outcome.entry.expected_rating.clone(),
            actual: outcome.scores.rating.clone(),
            metascore: outcome.scores.metascore.clone(),
        })
        .collect()
}

/// Counts for one full verification run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub total: usize,
    pub matched: usize,
    pub mismatched: usize,
    pub unavailable: usize,
}

impl RunSummary {
    pub fn from_outcomes(outcomes: &[EntryOutcome]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Self::default()
        };
        for outcome in outcomes {
            match outcome.verdict {
                Verdict::Matched => summary.matched += 1,
                Verdict::Mismatched => summary.mismatched += 1,
                Verdict::Unavailable => summary.unavailable += 1,
            }
        }
        summary
    }

    /// Mismatches take precedence over fetch failures
    pub fn status(&self) -> RunStatus {
        if self.mismatched > 0 {
            RunStatus::MismatchesFound
        } else if self.unavailable > 0 {
            RunStatus::FetchErrorsOnly
        } else {
            RunStatus::AllMatched
        }
    }
}

/// Process-level outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    AllMatched,
    MismatchesFound,
    FetchErrorsOnly,
}

impl RunStatus {
    /// Exit code reported to the shell
    pub fn exit_code(&self) -> i32 {
        match self {
            RunStatus::AllMatched => 0,
            RunStatus::MismatchesFound => 2,
            RunStatus::FetchErrorsOnly => 3,
        }
    }
}
