//! Repository walking module.
//!
//! Enumerates a directory tree, resolves each file through the extension
//! registry, scans recognized files on a bounded worker pool, and folds the
//! per-file results into per-language totals.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{GitinfoError, Result};
use crate::registry;
use crate::scanner::{self, FileResult};

/// Number of files scanned concurrently unless configured otherwise.
pub const DEFAULT_JOBS: usize = 10;

/// Aggregated counts for one language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LanguageStats {
    /// Total lines across all files of the language.
    pub lines: usize,
    /// Total comment lines across all files of the language.
    pub comments: usize,
}

impl LanguageStats {
    /// Adds one file's counts.
    pub fn add(&mut self, result: FileResult) {
        self.lines += result.lines;
        self.comments += result.comments;
    }
}

/// Per-language statistics for a whole tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsTable {
    languages: HashMap<&'static str, LanguageStats>,
}

impl StatsTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one file's result into the totals for `language`.
    pub fn record(&mut self, language: &'static str, result: FileResult) {
        self.languages.entry(language).or_default().add(result);
    }

    /// Returns the totals for a language, if any file of it was seen.
    pub fn get(&self, language: &str) -> Option<&LanguageStats> {
        self.languages.get(language)
    }

    /// Number of languages in the table.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Returns `true` when no recognized file was seen.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Iterates over the table in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &LanguageStats)> {
        self.languages.iter().map(|(name, stats)| (*name, stats))
    }

    /// Sum of lines over all languages.
    pub fn total_lines(&self) -> usize {
        self.languages.values().map(|s| s.lines).sum()
    }

    /// Sum of comment lines over all languages.
    pub fn total_comments(&self) -> usize {
        self.languages.values().map(|s| s.comments).sum()
    }

    /// Returns the languages ordered by line count, largest first.
    ///
    /// Ties are ordered by language name so output is stable.
    pub fn sorted(&self) -> Vec<(&'static str, LanguageStats)> {
        let mut rows: Vec<_> = self.languages.iter().map(|(n, s)| (*n, *s)).collect();
        rows.sort_by(|a, b| b.1.lines.cmp(&a.1.lines).then_with(|| a.0.cmp(b.0)));
        rows
    }
}

impl FromIterator<(&'static str, FileResult)> for StatsTable {
    fn from_iter<I: IntoIterator<Item = (&'static str, FileResult)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (language, result) in iter {
            table.record(language, result);
        }
        table
    }
}

/// Folds tagged per-file results into a table.
///
/// Addition is commutative, so the order of `results` does not matter.
pub fn merge_results<I>(results: I) -> StatsTable
where
    I: IntoIterator<Item = (&'static str, FileResult)>,
{
    results.into_iter().collect()
}

/// A recognized file waiting to be scanned.
#[derive(Debug, Clone)]
struct ScanJob {
    path: PathBuf,
    language: &'static str,
    comment_prefix: Option<&'static str>,
}

/// Checks that `root` exists and is a directory.
pub(crate) fn ensure_directory(root: &Path) -> Result<()> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(GitinfoError::not_a_directory(root)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(GitinfoError::not_a_directory(root))
        }
        Err(e) => Err(GitinfoError::io(root, e)),
    }
}

/// Configurable repository walker.
///
/// By default ten files are scanned at once and symlinked directories are
/// not descended into. Symlinks to files are always scanned through the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walker {
    jobs: usize,
    follow_links: bool,
}

impl Default for Walker {
    fn default() -> Self {
        Self {
            jobs: DEFAULT_JOBS,
            follow_links: false,
        }
    }
}

impl Walker {
    /// Creates a walker with default settings.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gitinfo::walker::Walker;
    ///
    /// let stats = Walker::new().jobs(4).walk(".").unwrap();
    /// println!("{} lines", stats.total_lines());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of concurrent scans. Zero is treated as one.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Sets whether symlinked directories are descended into.
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Walks `root` and returns per-language totals.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not a readable directory or the worker
    /// pool cannot be created. Failures below the root are logged and
    /// skipped.
    pub fn walk(&self, root: impl AsRef<Path>) -> Result<StatsTable> {
        let root = root.as_ref();
        ensure_directory(root)?;

        let jobs = self.collect_jobs(root)?;
        info!(
            "scanning {} files under {} with {} workers",
            jobs.len(),
            root.display(),
            self.jobs
        );

        let pool = ThreadPoolBuilder::new().num_threads(self.jobs).build()?;
        let results: Vec<(&'static str, FileResult)> = pool.install(|| {
            jobs.par_iter()
                .map(|job| (job.language, scanner::scan(&job.path, job.comment_prefix)))
                .collect()
        });

        Ok(merge_results(results))
    }

    fn collect_jobs(&self, root: &Path) -> Result<Vec<ScanJob>> {
        let mut jobs = Vec::new();

        for entry in WalkDir::new(root).follow_links(self.follow_links) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(GitinfoError::walk(root, e)),
                Err(e) => {
                    warn!("skipping entry: {e}");
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }
            // Unfollowed links to directories are not files.
            if entry.path_is_symlink() && entry.path().is_dir() {
                continue;
            }

            let Some(found) = registry::lookup_path(entry.path()) else {
                continue;
            };

            debug!("{} -> {}", entry.path().display(), found.language);
            jobs.push(ScanJob {
                path: entry.into_path(),
                language: found.language,
                comment_prefix: found.comment_prefix,
            });
        }

        Ok(jobs)
    }
}

/// Walks `root` with default settings.
///
/// # Errors
///
/// See [`Walker::walk`].
pub fn walk(root: impl AsRef<Path>) -> Result<StatsTable> {
    Walker::new().walk(root)
}
