//! Plain text output.

use classlex::{ClassInfo, ScanResult, Token};
use classlex_analysis::{ClassDiagnostic, ClassSemanticToken, LineIndex};

/// One line per class, then the selection.
pub fn scan_text(result: &ScanResult) -> String {
    let mut lines: Vec<String> = result.classes.iter().map(class_line).collect();
    let selection = &result.selection;
    let mut line = match &selection.selected {
        Some(token) => format!("selection: {}", token),
        None => "selection: none".to_string(),
    };
    push_details(
        &mut line,
        &selection.variants,
        selection.important,
        selection.in_group,
    );
    lines.push(line);
    lines.join("\n")
}

fn class_line(class: &ClassInfo) -> String {
    let mut line = class.token.to_string();
    push_details(&mut line, &class.variants, class.important, class.in_group);
    line
}

fn push_details(line: &mut String, variants: &[Token], important: bool, in_group: bool) {
    if !variants.is_empty() {
        let names: Vec<&str> = variants.iter().map(|v| v.text.as_str()).collect();
        line.push_str(&format!(" variants=[{}]", names.join(", ")));
    }
    if important {
        line.push_str(" important");
    }
    if in_group {
        line.push_str(" group");
    }
}

/// `line:col kind message`, both 1-based.
pub fn diagnostic_line(diagnostic: &ClassDiagnostic, index: &LineIndex) -> String {
    let position = index.position(diagnostic.span.start);
    format!(
        "{}:{} {} {}",
        position.line + 1,
        position.character + 1,
        diagnostic.kind,
        diagnostic.message
    )
}

pub fn semantic_line(token: &ClassSemanticToken, text: &str) -> String {
    format!(
        "{}..{}\t{:?}\t{}",
        token.span.start,
        token.span.end,
        token.kind,
        text.get(token.span.clone()).unwrap_or_default()
    )
}
