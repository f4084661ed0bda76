use crate::hover::marked_important;
use classlex::Scanner;
use lsp_types::CompletionItemKind;
use std::ops::Range;

/// Characters after which a client should ask for class completions.
pub const TRIGGER_CHARACTERS: &[char] = &['"', '\'', '`', ' ', '('];

/// What is being typed at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    /// A base class (possibly still empty, e.g. right after `hover:`).
    Class,
    /// A variant inside a chain.
    Variant,
    /// Nothing under the cursor: a fresh class starts here.
    Empty,
}

/// High level context for completion suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionContext {
    pub kind: CompletionKind,
    /// Text of the token under edit, up to the cursor.
    pub prefix: String,
    /// Span a chosen item replaces.
    pub replace: Range<usize>,
    /// Variants already applied in front of the cursor, outer groups first.
    pub variants: Vec<String>,
    pub in_group: bool,
    pub important: bool,
    pub separator: String,
}

/// Describes a completion candidate that can be translated into protocol specific items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCandidate {
    pub label: String,
    pub detail: Option<String>,
    pub kind: CompletionItemKind,
    pub insert_text: Option<String>,
}

impl CompletionCandidate {
    fn new(label: impl Into<String>, kind: CompletionItemKind) -> Self {
        Self {
            label: label.into(),
            detail: None,
            kind,
            insert_text: None,
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    fn with_insert_text(mut self, text: impl Into<String>) -> Self {
        self.insert_text = Some(text.into());
        self
    }
}

/// Work out what the user is typing at `offset`.
pub fn completion_context(
    scanner: &Scanner,
    text: &str,
    window: Range<usize>,
    offset: usize,
) -> CompletionContext {
    let result = scanner
        .with_query(false, false)
        .scan(text, window, Some(offset));
    let selection = result.selection;
    let classes = result.classes;
    let separator = scanner.options().separator.clone();

    let Some(token) = selection.selected else {
        return CompletionContext {
            kind: CompletionKind::Empty,
            prefix: String::new(),
            replace: offset..offset,
            variants: selection.variants.into_iter().map(|v| v.text).collect(),
            in_group: selection.in_group,
            important: false,
            separator,
        };
    };

    let kind = if selection.variants.contains(&token) {
        CompletionKind::Variant
    } else {
        CompletionKind::Class
    };
    let typed_end = offset.clamp(token.start, token.end);
    let prefix = text
        .get(token.start..typed_end)
        .unwrap_or_default()
        .to_string();
    let variants = selection
        .variants
        .into_iter()
        .filter(|variant| variant.end <= token.start)
        .map(|variant| variant.text)
        .collect();

    CompletionContext {
        kind,
        prefix,
        replace: token.span(),
        variants,
        in_group: selection.in_group,
        important: kind == CompletionKind::Class && marked_important(&classes, &token),
        separator,
    }
}

/// Filter caller supplied class and variant names against a context.
///
/// Variants already applied are not offered again. Outside a variant position, variants
/// are offered with the separator appended so that typing can continue.
pub fn complete(
    context: &CompletionContext,
    classes: &[&str],
    variants: &[&str],
) -> Vec<CompletionCandidate> {
    let fresh_variants = variants
        .iter()
        .filter(|name| name.starts_with(context.prefix.as_str()))
        .filter(|name| !context.variants.iter().any(|applied| applied == *name));

    if context.kind == CompletionKind::Variant {
        return fresh_variants
            .map(|name| {
                CompletionCandidate::new(*name, CompletionItemKind::KEYWORD).with_detail("variant")
            })
            .collect();
    }

    let mut items: Vec<CompletionCandidate> = fresh_variants
        .map(|name| {
            CompletionCandidate::new(*name, CompletionItemKind::KEYWORD)
                .with_detail("variant")
                .with_insert_text(format!("{}{}", name, context.separator))
        })
        .collect();
    items.extend(
        classes
            .iter()
            .filter(|name| name.starts_with(context.prefix.as_str()))
            .map(|name| {
                CompletionCandidate::new(*name, CompletionItemKind::CONSTANT).with_detail("class")
            }),
    );
    items
}
