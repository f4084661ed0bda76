//! The class scanner.
//!
//! Scanning walks the window left to right looking for the next candidate:
//!
//! - a group head (`md:hover:(`), only with bracket handling on. Its variant chain is
//!   split off, the matching bracket is located, and the inside of the group is scanned
//!   recursively with the same cursor. Classes found inside get the group's chain
//!   prepended.
//! - a bare token, the maximal run of non-whitespace. It is split into its variants and
//!   its base class, and the important marker is stripped when enabled.
//!
//! The cursor is resolved during the same pass. In edit mode a cursor right after a
//! token still belongs to it, so completion can fire after a typed class name; in hover
//! mode only the characters of the token count.
//!
//! An opening bracket without a partner swallows the rest of the window and ends the
//! scan. The scanner never fails on input; only options can be rejected, once, when the
//! [`Scanner`] is built.

mod candidates;

use crate::brackets::BracketMatcher;
use crate::error::ConfigError;
use crate::options::ScanOptions;
use crate::token::{ClassInfo, GroupInfo, ScanResult, Token};
use candidates::Candidate;
use std::ops::Range;
use tracing::{debug, trace, warn};

/// A validated, reusable scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanner {
    options: ScanOptions,
    brackets: BracketMatcher,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        let brackets = BracketMatcher::new(&options.open_chars, &options.close_chars);
        Ok(Self { options, brackets })
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    pub fn brackets(&self) -> &BracketMatcher {
        &self.brackets
    }

    /// The same class syntax, queried in another mode.
    pub fn with_query(&self, hover: bool, greedy: bool) -> Self {
        let mut scanner = self.clone();
        scanner.options.hover = hover;
        scanner.options.greedy = greedy;
        scanner
    }

    /// Scan `text[window]` and resolve `cursor`.
    ///
    /// The window is clamped to the text and snapped to character boundaries. Offsets in
    /// the result are offsets into `text`.
    pub fn scan(&self, text: &str, window: Range<usize>, cursor: Option<usize>) -> ScanResult {
        let end = floor_char_boundary(text, window.end);
        if window.start > end {
            return ScanResult::default();
        }
        let start = floor_char_boundary(text, window.start);
        self.scan_level(&text[..end], start, cursor, 0)
    }

    /// Scan the whole text.
    pub fn scan_all(&self, text: &str, cursor: Option<usize>) -> ScanResult {
        self.scan(text, 0..text.len(), cursor)
    }

    fn scan_level(
        &self,
        source: &str,
        start: usize,
        cursor: Option<usize>,
        depth: usize,
    ) -> ScanResult {
        let mut result = ScanResult::default();
        let mut pos = start;

        while let Some(candidate) = candidates::next(source, pos, &self.options, &self.brackets)
        {
            trace!(?candidate, depth, "scan candidate");
            let resume = match candidate {
                Candidate::Group { head, open } => {
                    self.scan_group(source, head, open, cursor, depth, &mut result)
                }
                Candidate::Class { start, end } => {
                    self.scan_class(source, start, end, cursor, &mut result);
                    Some(end)
                }
            };

            if !self.options.greedy && result.selection.selected.is_some() {
                break;
            }
            match resume {
                Some(next) => pos = next,
                None => break,
            }
        }

        result
    }

    /// Handle a group head and its contents. Returns where scanning resumes, `None` when
    /// the group is unterminated.
    fn scan_group(
        &self,
        source: &str,
        head: usize,
        open: usize,
        cursor: Option<usize>,
        depth: usize,
        result: &mut ScanResult,
    ) -> Option<usize> {
        let after_open = open + char_len_at(source, open);
        let (variants, _) =
            candidates::split_variants(source, head, open, &self.options, &self.brackets);
        let close = self.brackets.find_closing(source, after_open);
        let group_end = close.unwrap_or(source.len());
        let resume = close.map(|close| close + char_len_at(source, close));

        // only a matched group has an inside
        if let (Some(cursor), Some(close)) = (cursor, close) {
            if after_open <= cursor && cursor <= close {
                result.selection.in_group = true;
            }
        }
        if let Some(variant) = variants
            .iter()
            .find(|variant| cursor.is_some_and(|cursor| variant.contains(cursor)))
        {
            result.selection.selected = Some(variant.clone());
        }

        if depth >= self.options.max_depth {
            warn!(
                open,
                depth,
                max_depth = self.options.max_depth,
                "group nesting too deep, skipping its contents"
            );
            return resume;
        }

        let group_index = result.groups.len();
        result.groups.push(GroupInfo {
            variants: variants.clone(),
            open,
            close,
            class_count: 0,
            depth,
        });

        let inner = self.scan_level(&source[..group_end], after_open, cursor, depth + 1);
        debug!(
            open,
            ?close,
            depth,
            classes = inner.classes.len(),
            "scanned group"
        );

        result.groups[group_index].class_count = inner.classes.len();
        result.groups.extend(inner.groups.into_iter().map(|mut group| {
            group.variants = prefixed(&variants, group.variants);
            group
        }));
        result
            .classes
            .extend(inner.classes.into_iter().map(|mut class| {
                class.variants = prefixed(&variants, class.variants);
                class.in_group = true;
                class
            }));

        let at_or_after = |offset: usize| cursor.is_some_and(|cursor| cursor >= offset);
        let past_group = match (cursor, close) {
            (Some(cursor), Some(close)) => cursor > close,
            _ => false,
        };
        if past_group {
            result.selection.variants.clear();
        } else if at_or_after(head) {
            result.selection.variants = variants.clone();
        }
        if at_or_after(head) {
            let selection = inner.selection;
            if let Some(selected) = selection.selected {
                result.selection.selected = Some(selected);
            }
            if selection.in_group {
                result.selection.in_group = true;
            }
            result.selection.variants.extend(selection.variants);
        }

        resume
    }

    fn scan_class(
        &self,
        source: &str,
        start: usize,
        end: usize,
        cursor: Option<usize>,
        result: &mut ScanResult,
    ) {
        let (variants, base) =
            candidates::split_variants(source, start, end, &self.options, &self.brackets);
        let mut token = Token::slice(source, base, end);
        let marker = self.options.important_marker;
        let important = self.options.handle_important && token.text.ends_with(marker);
        if important {
            token.text.pop();
            token.end -= marker.len_utf8();
        }

        let active = cursor.is_some_and(|cursor| {
            cursor >= start
                && if self.options.hover {
                    cursor < end
                } else {
                    cursor <= end
                }
        });
        if active {
            result.selection.variants = variants.clone();
        }

        if let Some(variant) = variants
            .iter()
            .find(|variant| cursor.is_some_and(|cursor| variant.contains(cursor)))
        {
            result.selection.selected = Some(variant.clone());
            result.selection.important = false;
        } else if active && cursor.is_some_and(|cursor| cursor >= token.start) {
            result.selection.selected = Some(token.clone());
            result.selection.important = important;
        }

        result.classes.push(ClassInfo {
            token,
            variants,
            in_group: false,
            important,
        });
    }
}

/// Scan all of `text` with throwaway options.
pub fn scan(
    text: &str,
    cursor: Option<usize>,
    options: &ScanOptions,
) -> Result<ScanResult, ConfigError> {
    Ok(Scanner::new(options.clone())?.scan_all(text, cursor))
}

fn prefixed(outer: &[Token], inner: Vec<Token>) -> Vec<Token> {
    outer.iter().cloned().chain(inner).collect()
}

fn char_len_at(source: &str, offset: usize) -> usize {
    source[offset..].chars().next().map_or(1, char::len_utf8)
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
