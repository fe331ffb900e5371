// Parsing of RuboCop's emacs-format diagnostic output
//
// One offense per line: `path:line:col: severity: message`. Banners,
// summaries and blank lines do not match the pattern and are dropped.
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::PathBuf;

static DIAGNOSTIC_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*):(\d+):(\d+): (.): (.*)$").expect("diagnostic pattern"));

/// A single offense reported by RuboCop.
///
/// The line index is 0-based; RuboCop reports 1-based lines and the
/// conversion happens at parse time because consumers address lines 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: String,
    pub line: usize,
    pub column: usize,
    pub severity: char,
    pub message: String,
}

/// Parse one raw output line; `None` when the line is not a diagnostic.
pub fn parse_line(line: &str) -> Option<Diagnostic> {
    let captures = DIAGNOSTIC_LINE.captures(line)?;

    let raw_line: u64 = captures[2].parse().ok()?;
    if raw_line == 0 {
        // The format is 1-based; a zero here is not a valid diagnostic.
        return None;
    }
    let column: usize = captures[3].parse().ok()?;
    let severity = captures[4].chars().next()?;

    Some(Diagnostic {
        path: captures[1].to_string(),
        line: (raw_line - 1) as usize,
        column,
        severity,
        message: captures[5].trim().to_string(),
    })
}

/// Per-line annotations for one file: 0-based line index to message.
///
/// Rebuilt from scratch on every check. When several offenses land on the
/// same line the last one wins, matching the emacs formatter's one-line-per-
/// offense contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileAnnotations {
    messages: BTreeMap<usize, String>,
}

impl FileAnnotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, line: usize, message: String) {
        self.messages.insert(line, message);
    }

    pub fn message_at(&self, line: usize) -> Option<&str> {
        self.messages.get(&line).map(String::as_str)
    }

    /// Annotated line indices in ascending order.
    pub fn lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.messages.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.messages.iter().map(|(line, msg)| (*line, msg.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

/// Convert captured stdout into per-line annotations.
pub fn parse_output(output: &str) -> FileAnnotations {
    let mut annotations = FileAnnotations::new();
    for line in output.lines() {
        if let Some(diagnostic) = parse_line(line) {
            annotations.insert(diagnostic.line, diagnostic.message);
        }
    }
    annotations
}

/// Parse the `--format files` output: one offending path per line.
pub fn parse_file_list(output: &str) -> Vec<PathBuf> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}
