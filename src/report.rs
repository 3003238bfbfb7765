//! Terminal report rendering.
//!
//! Everything writes to a caller-supplied `io::Write` so the CLI can target
//! stdout and tests can target a buffer. Colors come from `colored` and are
//! dropped automatically when the output is not a terminal.

use std::io::{self, Write};

use colored::Colorize;

use crate::Analysis;
use crate::size::format_size;

/// Share of `part` in `total` as a percentage, 0 when `total` is 0.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Writes the language table, or a notice when nothing was counted.
pub fn write_languages(out: &mut impl Write, analysis: &Analysis) -> io::Result<()> {
    let total_lines = analysis.stats.total_lines();
    if total_lines == 0 {
        writeln!(out, "{}", "No code lines detected.".red().bold())?;
        return Ok(());
    }

    writeln!(out, "{}", "Language Usage:".yellow().bold())?;
    for (language, stats) in analysis.stats.sorted() {
        writeln!(
            out,
            "{}: {} lines, {} comments ({:.2}%)",
            language.green().bold(),
            stats.lines,
            stats.comments,
            percentage(stats.lines, total_lines)
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "{}",
        format!("Total lines of code: {total_lines}").cyan().bold()
    )
}

/// Writes the full report for one analyzed source.
pub fn write_report(out: &mut impl Write, source: &str, analysis: &Analysis) -> io::Result<()> {
    writeln!(out, "{} {source}", "Repository:".yellow().bold())?;
    writeln!(out)?;
    write_languages(out, analysis)?;
    writeln!(out)?;
    writeln!(
        out,
        "{} {}",
        "Repository size:".yellow().bold(),
        format_size(analysis.total_size)
    )?;
    writeln!(
        out,
        "{} {}",
        "Code quality evaluation:".yellow().bold(),
        analysis.verdict
    )
}

/// Writes only the total line count.
pub fn write_total(out: &mut impl Write, analysis: &Analysis) -> io::Result<()> {
    writeln!(out, "{}", analysis.stats.total_lines())
}
