//! Error types for scan configuration

use thiserror::Error;

/// Which side of a bracket pair a setting refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketSide {
    Open,
    Close,
}

impl std::fmt::Display for BracketSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketSide::Open => f.write_str("open"),
            BracketSide::Close => f.write_str("close"),
        }
    }
}

/// Options that would make the scanner match zero-width or ambiguous input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("separator must not be empty")]
    EmptySeparator,
    #[error("separator {0:?} must not contain whitespace")]
    WhitespaceInSeparator(String),
    #[error("{side} bracket characters must not be empty when brackets are handled")]
    EmptyBracketClass { side: BracketSide },
    #[error("{ch:?} is both an open and a close bracket")]
    OverlappingBrackets { ch: char },
    #[error("separator contains the bracket character {ch:?}")]
    BracketInSeparator { ch: char },
    #[error("bracket character {ch:?} must not be whitespace")]
    WhitespaceBracket { ch: char },
    #[error("important marker {ch:?} must be a visible character outside the separator")]
    InvalidImportantMarker { ch: char },
    #[error("maximum nesting depth must be at least 1")]
    ZeroDepth,
    #[error("maximum nesting depth {depth} is above the limit of {limit}")]
    DepthTooLarge { depth: usize, limit: usize },
}
