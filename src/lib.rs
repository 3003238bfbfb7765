//! # gitinfo - Repository Language Statistics
//!
//! `gitinfo` walks a source tree and reports, per language, how many lines
//! and comment lines it contains, together with the size of the tree on disk
//! and a coarse quality verdict derived from the comment ratio.
//!
//! ## Features
//!
//! - Suffix-based language detection over a fixed registry
//! - Parallel file scanning on a bounded rayon pool
//! - Shallow cloning of remote repositories into a temporary directory
//!
//! ## Example Usage
//!
//! ```no_run
//! use gitinfo::{AnalyzeOptions, analyze_path};
//!
//! let analysis = analyze_path(".", &AnalyzeOptions::default()).unwrap();
//! for (language, stats) in analysis.stats.sorted() {
//!     println!("{language}: {} lines", stats.lines);
//! }
//! println!("{}", analysis.verdict);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types for the crate
//! - [`registry`] - Suffix to language mapping
//! - [`scanner`] - Per-file line and comment counting
//! - [`walker`] - Tree traversal and aggregation
//! - [`size`] - Repository size on disk
//! - [`quality`] - Quality verdict
//! - [`git`] - Cloning remote repositories
//! - [`report`] - Terminal output
//! - [`logging`] - Diagnostic output setup

pub mod error;
pub mod git;
pub mod logging;
pub mod quality;
pub mod registry;
pub mod report;
pub mod scanner;
pub mod size;
pub mod walker;

use std::path::Path;

use tracing::info;

pub use error::{GitinfoError, Result};
pub use quality::Verdict;
pub use scanner::FileResult;
pub use walker::{DEFAULT_JOBS, LanguageStats, StatsTable, Walker};

/// Options for [`analyze_path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Number of files scanned concurrently.
    pub jobs: usize,
    /// Whether symlinked directories are descended into.
    pub follow_links: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            jobs: DEFAULT_JOBS,
            follow_links: false,
        }
    }
}

impl AnalyzeOptions {
    fn walker(&self) -> Walker {
        Walker::new()
            .jobs(self.jobs)
            .follow_links(self.follow_links)
    }
}

/// Everything reported about one tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Per-language line and comment totals.
    pub stats: StatsTable,
    /// Size of every file under the root, in bytes.
    pub total_size: u64,
    /// Verdict derived from `stats`.
    pub verdict: Verdict,
}

/// Stage of [`analyze_path_with`] that is about to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Walking the tree and counting lines per language.
    Counting,
    /// Summing file sizes.
    Sizing,
}

/// Analyzes the directory tree at `root`.
///
/// Runs the language walk, then the size pass, then evaluates the verdict.
///
/// # Errors
///
/// Returns an error if `root` is not a readable directory or the scan
/// worker pool cannot be started.
pub fn analyze_path(root: impl AsRef<Path>, options: &AnalyzeOptions) -> Result<Analysis> {
    analyze_path_with(root, options, |_| {})
}

/// Like [`analyze_path`], calling `on_phase` before each stage starts.
///
/// # Errors
///
/// See [`analyze_path`].
pub fn analyze_path_with(
    root: impl AsRef<Path>,
    options: &AnalyzeOptions,
    mut on_phase: impl FnMut(Phase),
) -> Result<Analysis> {
    let root = root.as_ref();

    on_phase(Phase::Counting);
    let stats = options.walker().walk(root)?;
    info!(
        "counted {} lines in {} languages",
        stats.total_lines(),
        stats.len()
    );

    on_phase(Phase::Sizing);
    let total_size = size::total_size(root)?;
    let verdict = quality::evaluate(&stats);

    Ok(Analysis {
        stats,
        total_size,
        verdict,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_analyze_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path();
        fs::write(path.join("a.py"), "# one\n# two\n# three\nx\ny\nz\n1\n2\n3\n4\n").unwrap();
        fs::write(path.join("b.md"), "1\n2\n3\n4\n5\n").unwrap();
        fs::write(path.join("c.unknownext"), "ignored\n").unwrap();

        let analysis = analyze_path(path, &AnalyzeOptions::default()).unwrap();

        assert_eq!(analysis.stats.len(), 2);
        assert_eq!(analysis.stats.get("Python").unwrap().lines, 10);
        assert_eq!(analysis.stats.get("Python").unwrap().comments, 3);
        assert_eq!(analysis.stats.get("Markdown").unwrap().lines, 5);
        assert!(analysis.stats.get("c.unknownext").is_none());
        // Size covers every file, recognized or not.
        assert_eq!(analysis.total_size, 34 + 10 + 8);
        assert_eq!(analysis.verdict, Verdict::NeedsImprovement);
    }

    #[test]
    fn test_analyze_path_reports_phases_in_order() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("main.rs"), "fn main() {}\n").unwrap();

        let mut phases = Vec::new();
        analyze_path_with(temp_dir.path(), &AnalyzeOptions::default(), |p| {
            phases.push(p)
        })
        .unwrap();

        assert_eq!(phases, vec![Phase::Counting, Phase::Sizing]);
    }

    #[test]
    fn test_analyze_path_not_a_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = analyze_path(temp_dir.path().join("nope"), &AnalyzeOptions::default());
        assert!(matches!(result, Err(GitinfoError::NotADirectory { .. })));
    }
}
