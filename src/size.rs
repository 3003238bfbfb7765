//! Repository size calculation.

use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{GitinfoError, Result};
use crate::walker::ensure_directory;

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Sums the size in bytes of every file under `root`.
///
/// No extension filter is applied. Sizes are taken through symlinks; files
/// that vanish or cannot be stat'ed during the walk contribute nothing.
///
/// # Errors
///
/// Returns an error if `root` is not a readable directory.
///
/// # Example
///
/// ```no_run
/// use gitinfo::size::{format_size, total_size};
///
/// let bytes = total_size(".").unwrap();
/// println!("{}", format_size(bytes));
/// ```
pub fn total_size(root: impl AsRef<Path>) -> Result<u64> {
    let root = root.as_ref();
    ensure_directory(root)?;

    let mut total = 0u64;
    for entry in WalkDir::new(root) {
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

        match std::fs::metadata(entry.path()) {
            Ok(meta) if meta.is_file() => total += meta.len(),
            Ok(_) => {}
            Err(e) => debug!("no size for {}: {e}", entry.path().display()),
        }
    }

    Ok(total)
}

/// Formats a byte count with binary units and two decimals.
///
/// # Example
///
/// ```
/// use gitinfo::size::format_size;
///
/// assert_eq!(format_size(512), "512 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1536 * 1024), "1.50 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    }
}
