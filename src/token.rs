//! Values produced by a scan.
//!
//! Every offset is a byte offset into the text handed to the scanner, never relative to
//! the window or group being scanned, and always lands on a `char` boundary.

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// A lexical unit: its exact span and literal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Token {
    /// Build a token for `source[start..end]`.
    pub fn slice(source: &str, start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            text: source[start..end].to_string(),
        }
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// `start <= offset < end`.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}..{}", self.text, self.start, self.end)
    }
}

/// One class occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassInfo {
    /// The base class name, without variants, brackets or important marker.
    pub token: Token,
    /// Outer group variants first, then the token's own, in source order.
    pub variants: Vec<Token>,
    pub in_group: bool,
    pub important: bool,
}

impl ClassInfo {
    /// Variant names joined with `separator`, the way they were written.
    pub fn variant_chain(&self, separator: &str) -> String {
        self.variants
            .iter()
            .map(|variant| variant.text.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// What the cursor of a scan points at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionInfo {
    /// The class or variant token containing (or, when editing, touching) the cursor.
    pub selected: Option<Token>,
    pub in_group: bool,
    pub important: bool,
    /// The variant chain active at the cursor.
    pub variants: Vec<Token>,
}

/// A bracket group met during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupInfo {
    /// The full chain applied to the group's members, outer groups included.
    pub variants: Vec<Token>,
    /// Offset of the opening bracket.
    pub open: usize,
    /// Offset of the matching closing bracket, `None` for an unterminated group.
    pub close: Option<usize>,
    /// Classes reported inside the group, nested groups included.
    pub class_count: usize,
    /// Nesting level, 0 for a group written at the top of the window.
    pub depth: usize,
}

/// Everything one scan produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    /// Classes in document order, nested entries at their structural position.
    pub classes: Vec<ClassInfo>,
    pub selection: SelectionInfo,
    /// Groups in order of their opening bracket.
    pub groups: Vec<GroupInfo>,
}
