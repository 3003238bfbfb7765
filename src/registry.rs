//! Extension registry.
//!
//! Maps file name suffixes to a language and the prefix that marks a
//! single-line comment in that language. The table is plain static data,
//! grouped by language in registration order.

use std::path::Path;

/// A language and the suffixes that identify its files.
struct LanguageDef {
    name: &'static str,
    comment_prefix: Option<&'static str>,
    extensions: &'static [&'static str],
}

const fn lang(
    name: &'static str,
    comment_prefix: Option<&'static str>,
    extensions: &'static [&'static str],
) -> LanguageDef {
    LanguageDef {
        name,
        comment_prefix,
        extensions,
    }
}

/// Registration order matters: when two languages claim the same suffix,
/// the one listed first wins (`.pl` is Perl, not Prolog).
static LANGUAGES: &[LanguageDef] = &[
    lang("Python", Some("#"), &[".py", ".pyc", ".pyo", ".pyw", ".pyx", ".pxd", ".pxi"]),
    lang("JavaScript", Some("//"), &[".js", ".mjs", ".cjs"]),
    lang("TypeScript", Some("//"), &[".ts", ".tsx"]),
    lang("Java", Some("//"), &[".java", ".class", ".jar", ".jad"]),
    lang("C/C++", Some("//"), &[".c", ".h", ".cpp", ".hpp", ".cc", ".cxx", ".hh", ".hxx"]),
    lang("C#", Some("//"), &[".cs"]),
    lang("HTML", Some("<!--"), &[".html", ".htm", ".xhtml", ".jhtml"]),
    lang("CSS", Some("/*"), &[".css", ".scss", ".sass", ".less"]),
    lang("Markdown", None, &[".md", ".markdown", ".mkd"]),
    lang(
        "PHP",
        Some("//"),
        &[".php", ".phtml", ".php3", ".php4", ".php5", ".php7", ".phps"],
    ),
    lang("Ruby", Some("#"), &[".rb", ".erb", ".rake"]),
    lang("Perl", Some("#"), &[".pl", ".pm", ".pod", ".t", ".psgi"]),
    lang("Shell", Some("#"), &[".sh", ".bash", ".zsh", ".ksh", ".csh", ".tcsh"]),
    lang("PowerShell", Some("#"), &[".ps1", ".psm1", ".psd1"]),
    lang("Go", Some("//"), &[".go"]),
    lang("Rust", Some("//"), &[".rs"]),
    lang("Kotlin", Some("//"), &[".kt", ".kts"]),
    lang("Swift", Some("//"), &[".swift"]),
    lang("Dart", Some("//"), &[".dart"]),
    lang("SQL", Some("--"), &[".sql"]),
    lang("YAML", Some("#"), &[".yml", ".yaml"]),
    lang("JSON", None, &[".json"]),
    lang("XML", Some("<!--"), &[".xml", ".xsl", ".xsd", ".kml"]),
    lang("Lua", Some("--"), &[".lua"]),
    lang("R", Some("#"), &[".r", ".rdata", ".rds"]),
    lang("MATLAB", Some("%"), &[".m", ".mat", ".fig"]),
    lang("Haskell", Some("--"), &[".hs", ".lhs"]),
    lang("Scala", Some("//"), &[".scala", ".sc"]),
    lang("Lisp", Some(";"), &[".lisp", ".lsp", ".cl"]),
    lang("Scheme", Some(";"), &[".scm"]),
    lang("Prolog", Some("%"), &[".pl", ".pro", ".p"]),
    lang("Assembly", Some(";"), &[".asm", ".s", ".a"]),
    lang("Fortran", Some("C"), &[".f", ".for", ".f90", ".f95"]),
    lang("COBOL", Some("*"), &[".cob", ".cbl", ".cpy"]),
    lang("Pascal", Some("//"), &[".pas", ".pp", ".inc"]),
    lang("Groovy", Some("//"), &[".groovy", ".gvy", ".gy", ".gsh"]),
    lang("Julia", Some("#"), &[".jl"]),
    lang("Crystal", Some("#"), &[".cr"]),
    lang("Batch", Some("REM"), &[".bat", ".cmd"]),
    lang(
        "Scripting",
        Some("#"),
        &[".awk", ".sed", ".tcl", ".vbs", ".jscript", ".wsf", ".wsh"],
    ),
    lang(
        "Configuration",
        Some("#"),
        &[".make", ".mk", ".cmake", ".ini", ".cfg", ".conf"],
    ),
    lang("Elixir", Some("#"), &[".ex", ".exs"]),
    lang("OCaml", Some("(*"), &[".ml", ".mli"]),
    lang("Ada", Some("--"), &[".adb", ".ads"]),
];

/// One registered suffix and what it resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionEntry {
    /// The suffix, including its leading dot (`".py"`).
    pub extension: &'static str,
    /// Display name of the language.
    pub language: &'static str,
    /// Single-line comment marker, or `None` when the format has none.
    pub comment_prefix: Option<&'static str>,
}

/// Returns every registered suffix in registration order.
pub fn entries() -> impl Iterator<Item = ExtensionEntry> {
    LANGUAGES.iter().flat_map(|def| {
        def.extensions.iter().map(move |&extension| ExtensionEntry {
            extension,
            language: def.name,
            comment_prefix: def.comment_prefix,
        })
    })
}

/// Returns the distinct language names in registration order.
pub fn languages() -> impl Iterator<Item = &'static str> {
    LANGUAGES.iter().map(|def| def.name)
}

/// Resolves a file name to its registry entry.
///
/// A file matches every entry whose suffix its name ends with. The longest
/// matching suffix wins; between suffixes of equal length the first
/// registered one is kept. Matching is case-sensitive.
///
/// # Example
///
/// ```
/// use gitinfo::registry::lookup;
///
/// assert_eq!(lookup("main.rs").unwrap().language, "Rust");
/// assert_eq!(lookup("script.pl").unwrap().language, "Perl");
/// assert!(lookup("notes.unknownext").is_none());
/// ```
pub fn lookup(file_name: &str) -> Option<ExtensionEntry> {
    let mut best: Option<ExtensionEntry> = None;

    for entry in entries() {
        if file_name.ends_with(entry.extension)
            && best.is_none_or(|b| entry.extension.len() > b.extension.len())
        {
            best = Some(entry);
        }
    }

    best
}

/// Resolves a path by its final component.
pub fn lookup_path(path: impl AsRef<Path>) -> Option<ExtensionEntry> {
    let name = path.as_ref().file_name()?.to_string_lossy();
    lookup(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_common_languages() {
        assert_eq!(lookup("main.py").unwrap().language, "Python");
        assert_eq!(lookup("index.js").unwrap().language, "JavaScript");
        assert_eq!(lookup("app.tsx").unwrap().language, "TypeScript");
        assert_eq!(lookup("lib.rs").unwrap().language, "Rust");
        assert_eq!(lookup("server.go").unwrap().language, "Go");
        assert_eq!(lookup("query.sql").unwrap().language, "SQL");
    }

    #[test]
    fn test_lookup_comment_prefixes() {
        assert_eq!(lookup("a.py").unwrap().comment_prefix, Some("#"));
        assert_eq!(lookup("a.rs").unwrap().comment_prefix, Some("//"));
        assert_eq!(lookup("a.lua").unwrap().comment_prefix, Some("--"));
        assert_eq!(lookup("a.ml").unwrap().comment_prefix, Some("(*"));
        assert_eq!(lookup("a.bat").unwrap().comment_prefix, Some("REM"));
    }

    #[test]
    fn test_formats_without_comment_syntax() {
        assert_eq!(lookup("README.md").unwrap().comment_prefix, None);
        assert_eq!(lookup("package.json").unwrap().comment_prefix, None);
    }

    #[test]
    fn test_unrecognized_names() {
        assert!(lookup("c.unknownext").is_none());
        assert!(lookup("Makefile").is_none());
        assert!(lookup("LICENSE").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(lookup("MAIN.PY").is_none());
        assert_eq!(lookup("analysis.r").unwrap().language, "R");
        assert!(lookup("analysis.R").is_none());
    }

    #[test]
    fn test_ambiguous_pl_resolves_to_perl() {
        let entry = lookup("rules.pl").unwrap();
        assert_eq!(entry.language, "Perl");
        assert_eq!(entry.comment_prefix, Some("#"));

        // Prolog still owns its unambiguous suffixes.
        assert_eq!(lookup("rules.pro").unwrap().language, "Prolog");
    }

    #[test]
    fn test_compound_names_match_trailing_suffix() {
        assert_eq!(lookup("name.test.ts").unwrap().language, "TypeScript");
        assert_eq!(lookup("archive.tar.json").unwrap().language, "JSON");
    }

    #[test]
    fn test_matched_suffix_is_reported() {
        assert_eq!(lookup("style.scss").unwrap().extension, ".scss");
        assert_eq!(lookup("page.xhtml").unwrap().extension, ".xhtml");
        assert_eq!(lookup("main.cc").unwrap().extension, ".cc");
    }

    #[test]
    fn test_lookup_path_uses_file_name() {
        assert_eq!(lookup_path("src/lib/util.rb").unwrap().language, "Ruby");
        assert!(lookup_path("src.py/README").is_none());
    }

    #[test]
    fn test_languages_are_distinct() {
        let names: Vec<_> = languages().collect();
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(names.len(), unique.len());
        assert_eq!(names.first(), Some(&"Python"));
    }

    #[test]
    fn test_every_suffix_starts_with_dot() {
        assert!(entries().all(|e| e.extension.starts_with('.')));
        assert!(entries().count() > 60);
    }
}
