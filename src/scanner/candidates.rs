//! Candidate detection and variant splitting.
//!
//! Both work on explicit offsets into the (window-truncated) source so the recursive
//! scanner can thread positions through its calls instead of keeping a shared matcher.

use crate::brackets::BracketMatcher;
use crate::options::ScanOptions;
use crate::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Candidate {
    /// A variant chain directly followed by an opening bracket, e.g. `md:hover:(`.
    /// `head == open` for a bare bracket.
    Group { head: usize, open: usize },
    /// A maximal run of non-whitespace characters.
    Class { start: usize, end: usize },
}

/// The first candidate at or after `from`, if any is left.
///
/// Group detection stops at the first bracket or whitespace; only a bare token needs the
/// end of its run.
pub(super) fn next(
    source: &str,
    from: usize,
    options: &ScanOptions,
    brackets: &BracketMatcher,
) -> Option<Candidate> {
    let rest = source.get(from..)?;
    let (skip, _) = rest.char_indices().find(|(_, ch)| !ch.is_whitespace())?;
    let start = from + skip;
    if options.handle_brackets {
        if let Some(open) = group_open(source, start, options, brackets) {
            return Some(Candidate::Group { head: start, open });
        }
    }
    Some(Candidate::Class {
        start,
        end: run_end(source, start),
    })
}

fn run_end(source: &str, start: usize) -> usize {
    source[start..]
        .char_indices()
        .find(|(_, ch)| ch.is_whitespace())
        .map_or(source.len(), |(offset, _)| start + offset)
}

/// Offset of the opening bracket when the run starting at `start` begins with a group
/// head.
fn group_open(
    source: &str,
    start: usize,
    options: &ScanOptions,
    brackets: &BracketMatcher,
) -> Option<usize> {
    let (offset, ch) = source[start..]
        .char_indices()
        .find(|(_, ch)| ch.is_whitespace() || brackets.is_bracket(*ch))?;
    if !brackets.is_open(ch) {
        return None;
    }
    let head = &source[start..start + offset];
    let separator = options.separator.as_str();
    let is_head =
        head.is_empty() || (head.len() > separator.len() && head.ends_with(separator));
    is_head.then_some(start + offset)
}

/// Split `start..end` into variant tokens and return them with the offset where the base
/// class begins.
///
/// A variant is the shortest non-empty body followed by the separator. With brackets
/// enabled a body never contains a bracket character; brackets are stepped over.
pub(super) fn split_variants(
    source: &str,
    start: usize,
    end: usize,
    options: &ScanOptions,
    brackets: &BracketMatcher,
) -> (Vec<Token>, usize) {
    let separator = options.separator.as_str();
    let mut variants = Vec::new();
    let mut pos = start;
    let mut base = start;

    while pos < end {
        let Some(first) = source[pos..end].chars().next() else {
            break;
        };
        if options.handle_brackets && brackets.is_bracket(first) {
            pos += first.len_utf8();
            continue;
        }
        let body_min = pos + first.len_utf8();
        match stop_after(source, body_min, end, options, brackets) {
            Some(Stop::Separator(separator_at)) => {
                variants.push(Token::slice(source, pos, separator_at));
                pos = separator_at + separator.len();
                base = pos;
            }
            Some(Stop::Bracket(bracket_at)) => pos = bracket_at,
            None => break,
        }
    }

    (variants, base)
}

enum Stop {
    Separator(usize),
    Bracket(usize),
}

/// The first separator or (in bracket mode) bracket in `from..end`.
fn stop_after(
    source: &str,
    from: usize,
    end: usize,
    options: &ScanOptions,
    brackets: &BracketMatcher,
) -> Option<Stop> {
    let rest = &source[from..end];
    rest.char_indices().find_map(|(offset, ch)| {
        if options.handle_brackets && brackets.is_bracket(ch) {
            Some(Stop::Bracket(from + offset))
        } else if rest[offset..].starts_with(options.separator.as_str()) {
            Some(Stop::Separator(from + offset))
        } else {
            None
        }
    })
}
