//! Problems in a class string that a scan can see without knowing any class names.

use crate::line_index::LineIndex;
use classlex::{ClassInfo, ScanOptions, Scanner};
use lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::ops::Range;
use tracing::debug;

/// Value of the `source` field on protocol diagnostics.
pub const DIAGNOSTIC_SOURCE: &str = "classlex";

/// Which diagnostics to report. Every check is on unless switched off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticSettings {
    pub empty_class: bool,
    pub empty_group: bool,
    pub unmatched_bracket: bool,
    pub duplicate_class: bool,
}

impl Default for DiagnosticSettings {
    fn default() -> Self {
        Self {
            empty_class: true,
            empty_group: true,
            unmatched_bracket: true,
            duplicate_class: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    EmptyClass,
    EmptyGroup,
    UnmatchedBracket,
    DuplicateClass,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::EmptyClass => "empty-class",
            DiagnosticKind::EmptyGroup => "empty-group",
            DiagnosticKind::UnmatchedBracket => "unmatched-bracket",
            DiagnosticKind::DuplicateClass => "duplicate-class",
        }
    }

    fn severity(self) -> DiagnosticSeverity {
        match self {
            DiagnosticKind::UnmatchedBracket => DiagnosticSeverity::ERROR,
            _ => DiagnosticSeverity::WARNING,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassDiagnostic {
    pub kind: DiagnosticKind,
    pub span: Range<usize>,
    pub message: String,
}

impl ClassDiagnostic {
    fn new(kind: DiagnosticKind, span: Range<usize>, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    pub fn to_lsp_diagnostic(&self, index: &LineIndex) -> Diagnostic {
        Diagnostic {
            range: index.range(self.span.clone()),
            severity: Some(self.kind.severity()),
            code: Some(NumberOrString::String(self.kind.as_str().to_string())),
            source: Some(DIAGNOSTIC_SOURCE.to_string()),
            message: self.message.clone(),
            ..Default::default()
        }
    }
}

/// Check every class in `text[window]`, ordered by position.
pub fn collect_diagnostics(
    scanner: &Scanner,
    text: &str,
    window: Range<usize>,
    settings: &DiagnosticSettings,
) -> Vec<ClassDiagnostic> {
    let options = scanner.options();
    let result = scanner
        .with_query(false, true)
        .scan(text, window.clone(), None);
    let mut diagnostics = Vec::new();

    if settings.empty_class {
        for class in result.classes.iter().filter(|class| class.token.is_empty()) {
            let message = if class.variants.is_empty() {
                "important marker without a class".to_string()
            } else {
                format!(
                    "missing class after `{}{}`",
                    class.variant_chain(&options.separator),
                    options.separator
                )
            };
            diagnostics.push(ClassDiagnostic::new(
                DiagnosticKind::EmptyClass,
                class_extent(class, options),
                message,
            ));
        }
    }

    if settings.empty_group {
        for group in result.groups.iter().filter(|group| group.class_count == 0) {
            let end = group.close.map_or(window.end.min(text.len()), |close| {
                close + text[close..].chars().next().map_or(1, char::len_utf8)
            });
            diagnostics.push(ClassDiagnostic::new(
                DiagnosticKind::EmptyGroup,
                group.open..end,
                "group contains no classes",
            ));
        }
    }

    if settings.unmatched_bracket && options.handle_brackets {
        let range = window.start.min(text.len())..window.end.min(text.len());
        for bracket in scanner.brackets().unbalanced(text, range) {
            diagnostics.push(ClassDiagnostic::new(
                DiagnosticKind::UnmatchedBracket,
                bracket.offset..bracket.offset + bracket.ch.len_utf8(),
                format!("unmatched `{}`", bracket.ch),
            ));
        }
    }

    if settings.duplicate_class {
        let mut seen = HashSet::new();
        for class in result.classes.iter().filter(|class| !class.token.is_empty()) {
            let key = (
                class
                    .variants
                    .iter()
                    .map(|variant| variant.text.as_str())
                    .collect::<Vec<_>>(),
                class.token.text.as_str(),
                class.important,
            );
            if !seen.insert(key) {
                let mut name = class.variant_chain(&options.separator);
                if !name.is_empty() {
                    name.push_str(&options.separator);
                }
                name.push_str(&class.token.text);
                diagnostics.push(ClassDiagnostic::new(
                    DiagnosticKind::DuplicateClass,
                    class_extent(class, options),
                    format!("duplicate class `{}`", name),
                ));
            }
        }
    }

    diagnostics.sort_by_key(|diagnostic| (diagnostic.span.start, diagnostic.span.end));
    debug!(count = diagnostics.len(), "collected diagnostics");
    diagnostics
}

/// Span of a class as written: its own variant chain, the base and the marker. Variants
/// inherited from an enclosing group head are not adjacent and are left out.
fn class_extent(class: &ClassInfo, options: &ScanOptions) -> Range<usize> {
    let mut start = class.token.start;
    for variant in class.variants.iter().rev() {
        if variant.end + options.separator.len() != start {
            break;
        }
        start = variant.start;
    }
    let mut end = class.token.end;
    if class.important {
        end += options.important_marker.len_utf8();
    }
    start..end
}
