//! Bracket matching for class groups.
//!
//! Groups nest, so the matcher counts depth instead of looking for the next closing
//! character. Any character of the open class opens a level and any character of the
//! close class closes one; `(` and `[` are not told apart.

use serde::Serialize;
use std::ops::Range;

/// A set of single characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClass {
    chars: Vec<char>,
}

impl CharClass {
    pub fn new(chars: &str) -> Self {
        let mut chars: Vec<char> = chars.chars().collect();
        chars.sort_unstable();
        chars.dedup();
        Self { chars }
    }

    pub fn contains(&self, ch: char) -> bool {
        self.chars.binary_search(&ch).is_ok()
    }
}

/// Which way a stray bracket points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BracketKind {
    Open,
    Close,
}

/// A bracket with no partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnbalancedBracket {
    pub offset: usize,
    pub ch: char,
    pub kind: BracketKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketMatcher {
    open: CharClass,
    close: CharClass,
}

impl BracketMatcher {
    pub fn new(open: &str, close: &str) -> Self {
        Self {
            open: CharClass::new(open),
            close: CharClass::new(close),
        }
    }

    pub fn is_open(&self, ch: char) -> bool {
        self.open.contains(ch)
    }

    pub fn is_close(&self, ch: char) -> bool {
        self.close.contains(ch)
    }

    pub fn is_bracket(&self, ch: char) -> bool {
        self.is_open(ch) || self.is_close(ch)
    }

    /// Offset of the bracket closing a group whose opening bracket was consumed right
    /// before `start`.
    pub fn find_closing(&self, text: &str, start: usize) -> Option<usize> {
        self.find_closing_at_depth(text, start, 1)
    }

    /// Scan forward from `start` with `depth` groups already open and return the offset
    /// where the depth drops to zero.
    pub fn find_closing_at_depth(&self, text: &str, start: usize, depth: usize) -> Option<usize> {
        let mut depth = depth;
        for (offset, ch) in text.get(start..)?.char_indices() {
            if self.is_open(ch) {
                depth += 1;
            } else if self.is_close(ch) {
                if depth == 0 {
                    return None;
                }
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
        }
        None
    }

    /// Every bracket in `range` that has no partner inside the same range: closers met at
    /// depth zero, then openers still pending at the end.
    pub fn unbalanced(&self, text: &str, range: Range<usize>) -> Vec<UnbalancedBracket> {
        let Some(slice) = text.get(range.clone()) else {
            return Vec::new();
        };
        let mut pending: Vec<(usize, char)> = Vec::new();
        let mut stray = Vec::new();
        for (offset, ch) in slice.char_indices() {
            let offset = range.start + offset;
            if self.is_open(ch) {
                pending.push((offset, ch));
            } else if self.is_close(ch) && pending.pop().is_none() {
                stray.push(UnbalancedBracket {
                    offset,
                    ch,
                    kind: BracketKind::Close,
                });
            }
        }
        stray.extend(pending.into_iter().map(|(offset, ch)| UnbalancedBracket {
            offset,
            ch,
            kind: BracketKind::Open,
        }));
        stray.sort_by_key(|bracket| bracket.offset);
        stray
    }
}

impl Default for BracketMatcher {
    fn default() -> Self {
        Self::new("(", ")")
    }
}
