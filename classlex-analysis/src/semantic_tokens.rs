use crate::line_index::LineIndex;
use classlex::Scanner;
use lsp_types::SemanticToken;
use std::collections::BTreeMap;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClassSemanticTokenKind {
    Variant,
    Class,
    ImportantMarker,
    Bracket,
}

impl ClassSemanticTokenKind {
    /// Standard protocol token type used for the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ClassSemanticTokenKind::Variant => "keyword",
            ClassSemanticTokenKind::Class => "variable",
            ClassSemanticTokenKind::ImportantMarker => "modifier",
            ClassSemanticTokenKind::Bracket => "operator",
        }
    }
}

/// Legend order; encoded token types index into this slice.
pub const SEMANTIC_TOKEN_KINDS: &[ClassSemanticTokenKind] = &[
    ClassSemanticTokenKind::Variant,
    ClassSemanticTokenKind::Class,
    ClassSemanticTokenKind::ImportantMarker,
    ClassSemanticTokenKind::Bracket,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSemanticToken {
    pub kind: ClassSemanticTokenKind,
    pub span: Range<usize>,
}

/// Every variant, class, marker and group bracket in `text[window]`, ordered by offset.
///
/// A group head's variants are shared by all classes of the group; each is emitted once.
pub fn collect_semantic_tokens(
    scanner: &Scanner,
    text: &str,
    window: Range<usize>,
) -> Vec<ClassSemanticToken> {
    let marker = scanner.options().important_marker;
    let result = scanner.with_query(false, true).scan(text, window, None);
    let mut spans: BTreeMap<(usize, usize), ClassSemanticTokenKind> = BTreeMap::new();

    for class in &result.classes {
        for variant in &class.variants {
            spans.insert(
                (variant.start, variant.end),
                ClassSemanticTokenKind::Variant,
            );
        }
        if !class.token.is_empty() {
            spans.insert(
                (class.token.start, class.token.end),
                ClassSemanticTokenKind::Class,
            );
        }
        if class.important {
            let end = class.token.end + marker.len_utf8();
            spans.insert(
                (class.token.end, end),
                ClassSemanticTokenKind::ImportantMarker,
            );
        }
    }
    for group in &result.groups {
        // group heads without classes still show their chain
        for variant in &group.variants {
            spans.insert(
                (variant.start, variant.end),
                ClassSemanticTokenKind::Variant,
            );
        }
        for bracket in std::iter::once(group.open).chain(group.close) {
            let len = text[bracket..].chars().next().map_or(1, char::len_utf8);
            spans.insert((bracket, bracket + len), ClassSemanticTokenKind::Bracket);
        }
    }

    spans
        .into_iter()
        .map(|((start, end), kind)| ClassSemanticToken {
            kind,
            span: start..end,
        })
        .collect()
}

/// Delta-encode tokens for the protocol. Tokens must be ordered by offset.
pub fn encode_semantic_tokens(tokens: &[ClassSemanticToken], text: &str) -> Vec<SemanticToken> {
    let index = LineIndex::new(text);
    let mut data = Vec::new();
    let mut prev_line = 0u32;
    let mut prev_start = 0u32;

    for token in tokens {
        let token_type = SEMANTIC_TOKEN_KINDS
            .iter()
            .position(|kind| *kind == token.kind)
            .unwrap_or(0) as u32;
        for (line, start, length) in split_on_lines(&index, text, token.span.clone()) {
            if length == 0 {
                continue;
            }
            let delta_line = line.saturating_sub(prev_line);
            let delta_start = if delta_line == 0 {
                start.saturating_sub(prev_start)
            } else {
                start
            };
            data.push(SemanticToken {
                delta_line,
                delta_start,
                length,
                token_type,
                token_modifiers_bitset: 0,
            });
            prev_line = line;
            prev_start = start;
        }
    }

    data
}

/// Single-line `(line, start column, length)` segments of a span.
fn split_on_lines(index: &LineIndex, text: &str, span: Range<usize>) -> Vec<(u32, u32, u32)> {
    let Some(slice) = text.get(span.clone()) else {
        return Vec::new();
    };
    let mut segments = Vec::new();
    let mut segment_start = span.start;
    for (offset, ch) in slice.char_indices() {
        if ch == '\n' {
            let position = index.position(segment_start);
            let end = span.start + offset;
            segments.push((
                position.line,
                position.character,
                index.utf16_len(segment_start..end),
            ));
            segment_start = end + 1;
        }
    }
    let position = index.position(segment_start);
    segments.push((
        position.line,
        position.character,
        index.utf16_len(segment_start..span.end),
    ));
    segments
}
