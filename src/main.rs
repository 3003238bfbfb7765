//! gitinfo - per-language statistics for Git repositories.
//!
//! This is the CLI entry point for the gitinfo tool.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use colored::Colorize;
use tracing::info;

use gitinfo::logging::{self, Verbosity};
use gitinfo::{
    AnalyzeOptions, Analysis, DEFAULT_JOBS, GitinfoError, Phase, Result, analyze_path_with, git,
    registry, report,
};

/// Analyze code statistics in a Git repository.
///
/// Counts lines and comment lines per language, measures the repository
/// size, and gives a rough verdict on how well commented the code is.
#[derive(Parser, Debug)]
#[command(name = "gitinfo")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Git repository URL, or a directory path when --local is used
    #[arg(required_unless_present = "list_languages")]
    source: Option<String>,

    /// Analyze a local directory instead of cloning a remote repository
    #[arg(short, long)]
    local: bool,

    /// Number of files to scan concurrently
    #[arg(short, long, default_value_t = DEFAULT_JOBS)]
    jobs: usize,

    /// Descend into symlinked directories
    #[arg(long)]
    follow_links: bool,

    /// Only print the total line count
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Increase diagnostic output (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// List recognized languages and their suffixes, then exit
    #[arg(long)]
    list_languages: bool,
}

impl Args {
    fn options(&self) -> AnalyzeOptions {
        AnalyzeOptions {
            jobs: self.jobs,
            follow_links: self.follow_links,
        }
    }

    /// Prints a progress line to stderr unless in quiet mode.
    fn status(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message.dimmed());
        }
    }

    fn analyze(&self, root: &Path) -> Result<Analysis> {
        analyze_path_with(root, &self.options(), |phase| {
            self.status(phase_message(phase))
        })
    }
}

fn phase_message(phase: Phase) -> &'static str {
    match phase {
        Phase::Counting => "Counting lines of code, analyzing languages, and counting comments...",
        Phase::Sizing => "Calculating repository size...",
    }
}

fn analyze_local(args: &Args, source: &str) -> Result<Analysis> {
    let root = Path::new(source)
        .canonicalize()
        .map_err(|_| GitinfoError::not_a_directory(source))?;

    if !git::is_git_repository(&root) {
        info!("{} is not inside a Git work tree", root.display());
    }

    args.analyze(&root)
}

fn analyze_remote(args: &Args, source: &str) -> Result<Analysis> {
    args.status("Cloning the repository, this may take a while...");
    let checkout = git::clone_shallow(source)?;

    args.analyze(checkout.path())
}

fn print_languages(out: &mut impl Write) -> io::Result<()> {
    for language in registry::languages() {
        let suffixes: Vec<&str> = registry::entries()
            .filter(|e| e.language == language)
            .filter(|e| registry::lookup(e.extension).is_some_and(|w| w.language == language))
            .map(|e| e.extension)
            .collect();
        writeln!(out, "{}: {}", language.green().bold(), suffixes.join(" "))?;
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let stdout_err = |e: io::Error| GitinfoError::io("<stdout>", e);
    let mut out = io::stdout().lock();

    if args.list_languages {
        return print_languages(&mut out).map_err(stdout_err);
    }

    let source = args.source.as_deref().unwrap_or(".");
    let analysis = if args.local {
        analyze_local(args, source)?
    } else {
        analyze_remote(args, source)?
    };

    if args.quiet {
        report::write_total(&mut out, &analysis).map_err(stdout_err)
    } else {
        report::write_report(&mut out, source, &analysis).map_err(stdout_err)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(Verbosity::from_flags(args.verbose, args.quiet));

    if args.no_color {
        colored::control::set_override(false);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
