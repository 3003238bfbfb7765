//! Coarse code quality verdict.
//!
//! The verdict depends only on the total line count and the share of comment
//! lines. It says nothing about the code itself.

use std::fmt;

use crate::walker::StatsTable;

/// Categorical result of [`evaluate`], from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verdict {
    /// No lines were counted at all.
    NoCode,
    /// Little code or few comments.
    NeedsImprovement,
    /// Acceptable amount of code with some comments.
    Fair,
    /// Decent amount of code with adequate comments.
    Good,
    /// Large amount of code with good comments.
    Excellent,
}

impl Verdict {
    /// Short label, e.g. `"Needs Improvement"`.
    pub fn label(self) -> &'static str {
        match self {
            Self::NoCode => "No Code",
            Self::NeedsImprovement => "Needs Improvement",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }

    /// One-sentence explanation of the verdict.
    pub fn description(self) -> &'static str {
        match self {
            Self::NoCode => "No code lines detected.",
            Self::NeedsImprovement => "Low code volume or few comments.",
            Self::Fair => "Acceptable code but could benefit from more comments.",
            Self::Good => "Decent amount of code with adequate comments.",
            Self::Excellent => "Large amount of code with good comments.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.description())
    }
}

/// Share of comment lines, or 0 when there are no lines.
pub fn comment_ratio(total_lines: usize, total_comments: usize) -> f64 {
    if total_lines == 0 {
        0.0
    } else {
        total_comments as f64 / total_lines as f64
    }
}

/// Applies the verdict thresholds to raw totals.
///
/// Rules are checked in order and the first match wins; all comparisons are
/// strict.
///
/// | lines  | comment ratio | verdict            |
/// |--------|---------------|--------------------|
/// | 0      | any           | `NoCode`           |
/// | > 1000 | > 0.2         | `Excellent`        |
/// | > 500  | > 0.1         | `Good`             |
/// | > 100  | > 0.05        | `Fair`             |
/// | other  | any           | `NeedsImprovement` |
pub fn evaluate_totals(total_lines: usize, total_comments: usize) -> Verdict {
    if total_lines == 0 {
        return Verdict::NoCode;
    }

    let ratio = comment_ratio(total_lines, total_comments);

    if total_lines > 1000 && ratio > 0.2 {
        Verdict::Excellent
    } else if total_lines > 500 && ratio > 0.1 {
        Verdict::Good
    } else if total_lines > 100 && ratio > 0.05 {
        Verdict::Fair
    } else {
        Verdict::NeedsImprovement
    }
}

/// Evaluates a whole stats table.
pub fn evaluate(stats: &StatsTable) -> Verdict {
    evaluate_totals(stats.total_lines(), stats.total_comments())
}
