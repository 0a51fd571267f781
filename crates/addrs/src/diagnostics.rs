//! parse diagnostics
//!
//! The parser never fails with a panic or a plain error. Instead it returns
//! [Diagnostics]: a list of [Diagnostic]s, each with a severity, a message and
//! (when known) the [SourceRange] it refers to.
use std::fmt::Formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A position in source text
///
/// `line` and `column` are 1-based (column counts characters), `byte` is the
/// 0-based byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePos {
    pub line: usize,
    pub column: usize,
    pub byte: usize,
}

impl SourcePos {
    /// Position of byte offset `byte` within `source`
    ///
    /// Offsets past the end (or inside a multi-byte character) are moved back
    /// to the nearest valid one.
    pub fn at(source: &str, byte: usize) -> Self {
        let mut byte = byte.min(source.len());
        while !source.is_char_boundary(byte) {
            byte -= 1;
        }

        let before = &source[..byte];
        let line_start = before.rfind('\n').map(|idx| idx + 1).unwrap_or(0);

        Self {
            line: before.matches('\n').count() + 1,
            column: before[line_start..].chars().count() + 1,
            byte,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRange {
    pub start: SourcePos,
    pub end: SourcePos,
}

impl SourceRange {
    pub fn from_bytes(source: &str, bytes: std::ops::Range<usize>) -> Self {
        Self {
            start: SourcePos::at(source, bytes.start),
            end: SourcePos::at(source, bytes.end),
        }
    }
}

impl std::fmt::Display for SourceRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.start.line, self.start.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    pub subject: Option<SourceRange>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
            subject: None,
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(summary, detail)
        }
    }

    pub fn with_subject(mut self, subject: impl Into<Option<SourceRange>>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Renders the source line the subject points at with a caret underline
    ///
    /// Returns `None` without a subject or when it does not point into `source`.
    pub fn snippet(&self, source: &str) -> Option<String> {
        let subject = self.subject.as_ref()?;
        let line = source.lines().nth(subject.start.line.checked_sub(1)?)?;

        let width = if subject.end.line == subject.start.line {
            subject.end.column.saturating_sub(subject.start.column)
        } else {
            (line.chars().count() + 1).saturating_sub(subject.start.column)
        };

        Some(format!(
            "{line}\n{}{}",
            " ".repeat(subject.start.column - 1),
            "^".repeat(width.max(1))
        ))
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary)?;
        if !self.detail.is_empty() {
            write!(f, ": {}", self.detail)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::trace!(?diagnostic, "diagnostic recorded");
        self.0.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        for diagnostic in other.0 {
            self.push(diagnostic);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.iter().any(|diag| diag.severity == Severity::Error)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.iter().filter(move |diag| diag.severity == severity)
    }

    /// Errors only, `None` when there are none
    pub fn err(&self) -> Option<DiagnosticsError> {
        DiagnosticsError::new(self.with_severity(Severity::Error).cloned().collect())
    }

    /// All errors followed by all warnings, `None` when empty
    pub fn err_with_warnings(&self) -> Option<DiagnosticsError> {
        DiagnosticsError::new(
            self.with_severity(Severity::Error)
                .chain(self.with_severity(Severity::Warning))
                .cloned()
                .collect(),
        )
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(value: Diagnostic) -> Self {
        Self(vec![value])
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Combined report of one or more diagnostics
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticsError(Vec<Diagnostic>);

impl DiagnosticsError {
    fn new(diagnostics: Vec<Diagnostic>) -> Option<Self> {
        (!diagnostics.is_empty()).then_some(Self(diagnostics))
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.0
    }
}

impl std::fmt::Display for DiagnosticsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let [single] = self.0.as_slice() {
            return write!(f, "{single}");
        }

        writeln!(f, "{} problems:", self.0.len())?;
        for diagnostic in &self.0 {
            write!(f, "\n- {diagnostic}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn source_pos() {
        let source = "one\ntwö three";

        assert_eq!(SourcePos::at(source, 0), SourcePos { line: 1, column: 1, byte: 0 });
        assert_eq!(SourcePos::at(source, 4), SourcePos { line: 2, column: 1, byte: 4 });
        // "ö" is two bytes wide
        assert_eq!(SourcePos::at(source, 8), SourcePos { line: 2, column: 4, byte: 8 });
        // inside "ö", moved back
        assert_eq!(SourcePos::at(source, 7), SourcePos { line: 2, column: 3, byte: 6 });
        assert_eq!(SourcePos::at(source, 100).byte, source.len());
    }

    #[test]
    fn errors_before_warnings() {
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic::warning("Careful", "first warning"));
        diags.push(Diagnostic::error("Broken", "first error"));
        diags.push(Diagnostic::error("Also broken", ""));

        let report = diags.err_with_warnings().expect("has diagnostics");
        insta::assert_snapshot!(report, @r###"
        3 problems:

        - Broken: first error
        - Also broken
        - Careful: first warning
        "###);

        assert_eq!(diags.err().map(|err| err.diagnostics().len()), Some(2));
    }

    #[test]
    fn single_diagnostic_report() {
        let diags = Diagnostics::from(Diagnostic::error("Invalid address", "something"));
        assert_eq!(
            diags.err_with_warnings().map(|err| err.to_string()),
            Some("Invalid address: something".to_string())
        );
    }

    #[test]
    fn warnings_only() {
        let diags = Diagnostics::from(Diagnostic::warning("Careful", ""));

        assert!(!diags.has_errors());
        assert_eq!(diags.err(), None);
        assert!(diags.err_with_warnings().is_some());
        assert_eq!(Diagnostics::new().err_with_warnings(), None);
    }

    #[test]
    fn snippet() {
        let source = "module.foo[x]";
        let diag = Diagnostic::error("Invalid index", "")
            .with_subject(SourceRange::from_bytes(source, 10..13));

        assert_eq!(
            diag.snippet(source).as_deref(),
            Some("module.foo[x]\n          ^^^")
        );
        assert_eq!(Diagnostic::error("no subject", "").snippet(source), None);
    }
}
