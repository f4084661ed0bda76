use crate::line_index::LineIndex;
use classlex::{ClassInfo, Scanner, Token};
use lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverKind {
    Class,
    Variant,
}

/// The token under a pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverTarget {
    pub kind: HoverKind,
    pub token: Token,
    /// Variants applied to the token, outer groups first. For a hovered variant, the
    /// ones written before it.
    pub variants: Vec<Token>,
    pub important: bool,
    pub in_group: bool,
}

impl HoverTarget {
    /// The class as it would be written without groups, e.g. `md:hover:p-4!`.
    pub fn qualified_name(&self, separator: &str, marker: char) -> String {
        let mut name = String::new();
        for variant in &self.variants {
            name.push_str(&variant.text);
            name.push_str(separator);
        }
        name.push_str(&self.token.text);
        if self.important {
            name.push(marker);
        }
        name
    }

    pub fn to_lsp_hover(&self, index: &LineIndex, separator: &str, marker: char) -> Hover {
        let label = match self.kind {
            HoverKind::Class => "class",
            HoverKind::Variant => "variant",
        };
        let mut value = format!(
            "{} `{}`",
            label,
            self.qualified_name(separator, marker)
        );
        if self.in_group {
            value.push_str(" (in group)");
        }
        Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value,
            }),
            range: Some(index.range(self.token.span())),
        }
    }
}

/// Resolve the class or variant strictly under `offset`.
pub fn hover_at(
    scanner: &Scanner,
    text: &str,
    window: Range<usize>,
    offset: usize,
) -> Option<HoverTarget> {
    let result = scanner
        .with_query(true, false)
        .scan(text, window, Some(offset));
    let selection = result.selection;
    let token = selection.selected?;
    let important = marked_important(&result.classes, &token);
    let kind = if selection.variants.contains(&token) {
        HoverKind::Variant
    } else {
        HoverKind::Class
    };
    let variants = selection
        .variants
        .into_iter()
        .filter(|variant| variant.end <= token.start)
        .collect();
    Some(HoverTarget {
        kind,
        important: kind == HoverKind::Class && important,
        in_group: selection.in_group,
        token,
        variants,
    })
}

/// Whether the class whose base is `token` carries the important marker. The selection's
/// own flag is not carried out of groups.
pub(crate) fn marked_important(classes: &[ClassInfo], token: &Token) -> bool {
    classes
        .iter()
        .any(|class| class.token == *token && class.important)
}
