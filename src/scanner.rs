//! File scanning module.
//!
//! Counts the physical lines of a file and how many of them look like
//! single-line comments. Comment detection is a prefix check on the trimmed
//! line: block comments, trailing comments, and comment markers inside
//! strings are not recognized.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use memchr::memchr2;
use memmap2::Mmap;
use tracing::{debug, trace};

use crate::error::{GitinfoError, Result};

/// Threshold for using mmap vs buffered reading (1MB).
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Line and comment counts for a single file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileResult {
    /// Number of physical lines.
    pub lines: usize,
    /// Number of lines whose trimmed text starts with the comment prefix.
    pub comments: usize,
}

impl FileResult {
    /// Creates a new file result.
    pub fn new(lines: usize, comments: usize) -> Self {
        Self { lines, comments }
    }

    fn record(&mut self, line: &[u8], comment_prefix: Option<&str>) {
        self.lines += 1;

        if let Some(prefix) = comment_prefix
            && String::from_utf8_lossy(line).trim().starts_with(prefix)
        {
            self.comments += 1;
        }
    }
}

/// Counts lines and comment lines in an in-memory buffer.
///
/// `\n`, `\r\n`, and a lone `\r` each end one line, and a final line
/// without a terminator also counts. Invalid UTF-8 is replaced before the
/// prefix check, so binary content is counted rather than rejected.
///
/// # Example
///
/// ```
/// use gitinfo::scanner::{count_bytes, FileResult};
///
/// let result = count_bytes(b"# header\nx = 1\n  # indented\n", Some("#"));
/// assert_eq!(result, FileResult::new(3, 2));
/// ```
pub fn count_bytes(bytes: &[u8], comment_prefix: Option<&str>) -> FileResult {
    let mut result = FileResult::default();
    let mut start = 0;

    while let Some(offset) = memchr2(b'\n', b'\r', &bytes[start..]) {
        let end = start + offset;
        result.record(&bytes[start..end], comment_prefix);
        start = end + 1;

        if bytes[end] == b'\r' && bytes.get(start) == Some(&b'\n') {
            start += 1;
        }
    }

    // Final line without a terminator
    if start < bytes.len() {
        result.record(&bytes[start..], comment_prefix);
    }

    result
}

/// Scans a file using memory mapping.
///
/// # Safety
///
/// The mapped region is only read, and the map is dropped before the
/// function returns. A file truncated by another process while mapped is
/// outside what this tool guards against.
fn scan_mmap(file: &File, path: &Path, comment_prefix: Option<&str>) -> Result<FileResult> {
    // SAFETY: We only read from the mapped region and don't modify the file
    let mmap = unsafe { Mmap::map(file).map_err(|e| GitinfoError::io(path, e))? };

    Ok(count_bytes(&mmap, comment_prefix))
}

/// Scans a file by reading it fully into memory.
fn scan_buffered(
    mut file: File,
    path: &Path,
    size: u64,
    comment_prefix: Option<&str>,
) -> Result<FileResult> {
    let mut buffer = Vec::with_capacity(usize::try_from(size).unwrap_or(0));
    file.read_to_end(&mut buffer)
        .map_err(|e| GitinfoError::io(path, e))?;

    Ok(count_bytes(&buffer, comment_prefix))
}

/// Scans a file, reporting any I/O failure to the caller.
///
/// Files larger than 1MB are memory mapped; smaller ones are read into a
/// buffer.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn try_scan(path: impl AsRef<Path>, comment_prefix: Option<&str>) -> Result<FileResult> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| GitinfoError::io(path, e))?;
    let size = file
        .metadata()
        .map_err(|e| GitinfoError::io(path, e))?
        .len();

    if size > MMAP_THRESHOLD {
        scan_mmap(&file, path, comment_prefix)
    } else {
        scan_buffered(file, path, size, comment_prefix)
    }
}

/// Scans a file, treating any failure as an empty file.
///
/// Unreadable files, broken symlinks, and directories all yield
/// `FileResult { lines: 0, comments: 0 }`.
///
/// # Example
///
/// ```no_run
/// use gitinfo::scanner::scan;
///
/// let result = scan("src/main.rs", Some("//"));
/// println!("{} lines, {} comments", result.lines, result.comments);
/// ```
pub fn scan(path: impl AsRef<Path>, comment_prefix: Option<&str>) -> FileResult {
    let path = path.as_ref();

    match try_scan(path, comment_prefix) {
        Ok(result) => {
            trace!(
                path = %path.display(),
                lines = result.lines,
                comments = result.comments,
                "scanned"
            );
            result
        }
        Err(e) => {
            debug!("counting {} as empty: {e}", path.display());
            FileResult::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup_test_files() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path();

        fs::write(path.join("empty.py"), "").unwrap();
        fs::write(path.join("no_newline.py"), "x = 1").unwrap();
        fs::write(
            path.join("mixed.py"),
            "# header\nimport os\n\n    # indented comment\nx = 1  # trailing\n",
        )
        .unwrap();
        fs::write(path.join("all_comments.rs"), "// a\n// b\n  // c\n").unwrap();
        fs::write(path.join("crlf.py"), "# one\r\ncode\r\n").unwrap();

        temp_dir
    }

    #[test]
    fn test_scan_empty_file() {
        let temp_dir = setup_test_files();
        let result = scan(temp_dir.path().join("empty.py"), Some("#"));
        assert_eq!(result, FileResult::new(0, 0));
    }

    #[test]
    fn test_scan_no_trailing_newline() {
        let temp_dir = setup_test_files();
        let result = scan(temp_dir.path().join("no_newline.py"), Some("#"));
        assert_eq!(result, FileResult::new(1, 0));
    }

    #[test]
    fn test_scan_counts_only_leading_comments() {
        let temp_dir = setup_test_files();
        let result = scan(temp_dir.path().join("mixed.py"), Some("#"));

        // The blank line counts as a line; the trailing comment does not
        // count as a comment line.
        assert_eq!(result, FileResult::new(5, 2));
    }

    #[test]
    fn test_scan_all_comment_lines() {
        let temp_dir = setup_test_files();
        let result = scan(temp_dir.path().join("all_comments.rs"), Some("//"));
        assert_eq!(result.lines, 3);
        assert_eq!(result.comments, result.lines);
    }

    #[test]
    fn test_scan_without_prefix_never_counts_comments() {
        let temp_dir = setup_test_files();
        let result = scan(temp_dir.path().join("all_comments.rs"), None);
        assert_eq!(result, FileResult::new(3, 0));
    }

    #[test]
    fn test_scan_crlf_lines() {
        let temp_dir = setup_test_files();
        let result = scan(temp_dir.path().join("crlf.py"), Some("#"));
        assert_eq!(result, FileResult::new(2, 1));
    }

    #[test]
    fn test_scan_missing_file_is_empty() {
        let temp_dir = setup_test_files();
        let result = scan(temp_dir.path().join("nonexistent.py"), Some("#"));
        assert_eq!(result, FileResult::default());
    }

    #[test]
    fn test_try_scan_missing_file_errors() {
        let temp_dir = setup_test_files();
        let result = try_scan(temp_dir.path().join("nonexistent.py"), Some("#"));
        assert!(matches!(result, Err(GitinfoError::Io { .. })));
    }

    #[test]
    fn test_scan_directory_is_empty() {
        let temp_dir = setup_test_files();
        let result = scan(temp_dir.path(), Some("#"));
        assert_eq!(result, FileResult::default());
    }

    #[test]
    fn test_scan_invalid_utf8_is_counted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("binary.py");
        fs::write(&path, [0xff, 0xfe, b'\n', b'#', 0xc3, b'\n', 0x00]).unwrap();

        let result = scan(&path, Some("#"));
        assert_eq!(result, FileResult::new(3, 1));
    }

    #[test]
    fn test_scan_large_file_uses_same_counts() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("big.py");

        let block = "# comment line padded to make the file large enough\nvalue = 1\n";
        let repeats = (MMAP_THRESHOLD as usize / block.len()) + 10;
        fs::write(&path, block.repeat(repeats)).unwrap();

        let result = scan(&path, Some("#"));
        assert_eq!(result, FileResult::new(repeats * 2, repeats));
    }

    #[test]
    fn test_count_bytes_comment_prefix_requires_line_start() {
        let result = count_bytes(b"let x = 1; // note\n// real\n", Some("//"));
        assert_eq!(result, FileResult::new(2, 1));
    }

    #[test]
    fn test_count_bytes_carriage_return_lines() {
        assert_eq!(count_bytes(b"a\rb\r", None), FileResult::new(2, 0));
        assert_eq!(
            count_bytes(b"# a\rx = 1\r# b\r", Some("#")),
            FileResult::new(3, 2)
        );
    }

    #[test]
    fn test_count_bytes_mixed_line_endings() {
        let result = count_bytes(b"# a\r\nb\r# c\nd\r\n\r\ne", Some("#"));
        assert_eq!(result, FileResult::new(6, 2));
    }

    #[test]
    fn test_scan_carriage_return_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("classic.rb");
        fs::write(&path, "# one\rputs 1\r# two\r").unwrap();

        let result = scan(&path, Some("#"));
        assert_eq!(result, FileResult::new(3, 2));
    }

    #[test]
    fn test_count_bytes_blank_lines() {
        let result = count_bytes(b"\n\n\n", Some("#"));
        assert_eq!(result, FileResult::new(3, 0));
    }
}
