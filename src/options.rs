//! Scan options and their validation.

use crate::error::{BracketSide, ConfigError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SEPARATOR: &str = ":";
pub const DEFAULT_OPEN_CHARS: &str = "(";
pub const DEFAULT_CLOSE_CHARS: &str = ")";
pub const DEFAULT_IMPORTANT_MARKER: char = '!';
pub const DEFAULT_MAX_DEPTH: usize = 32;
/// Largest accepted `max_depth`; the scanner recurses once per level.
pub const MAX_DEPTH_LIMIT: usize = 256;

/// Knobs for a scan.
///
/// `hover` and `greedy` describe the query rather than the class syntax: hover resolves
/// the token strictly under a pointer, editing (the default) also accepts a cursor right
/// after a token; `greedy = false` stops as soon as the selection is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    pub separator: String,
    pub handle_brackets: bool,
    pub open_chars: String,
    pub close_chars: String,
    pub handle_important: bool,
    pub important_marker: char,
    pub hover: bool,
    pub greedy: bool,
    pub max_depth: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            handle_brackets: false,
            open_chars: DEFAULT_OPEN_CHARS.to_string(),
            close_chars: DEFAULT_CLOSE_CHARS.to_string(),
            handle_important: false,
            important_marker: DEFAULT_IMPORTANT_MARKER,
            hover: false,
            greedy: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Class strings written for twin-style macros: `:` separated, groups and `!` enabled.
    pub fn twin() -> Self {
        Self::default().brackets(true).important(true)
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn brackets(mut self, enabled: bool) -> Self {
        self.handle_brackets = enabled;
        self
    }

    pub fn bracket_chars(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.open_chars = open.into();
        self.close_chars = close.into();
        self
    }

    pub fn important(mut self, enabled: bool) -> Self {
        self.handle_important = enabled;
        self
    }

    pub fn important_marker(mut self, marker: char) -> Self {
        self.important_marker = marker;
        self
    }

    pub fn hover(mut self, hover: bool) -> Self {
        self.hover = hover;
        self
    }

    pub fn greedy(mut self, greedy: bool) -> Self {
        self.greedy = greedy;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Reject settings under which the scanner could match zero-width input or could not
    /// tell separators, brackets and markers apart.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.separator.is_empty() {
            return Err(ConfigError::EmptySeparator);
        }
        if self.separator.chars().any(char::is_whitespace) {
            return Err(ConfigError::WhitespaceInSeparator(self.separator.clone()));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::DepthTooLarge {
                depth: self.max_depth,
                limit: MAX_DEPTH_LIMIT,
            });
        }
        if self.handle_important {
            let marker = self.important_marker;
            if marker.is_whitespace() || marker.is_control() || self.separator.contains(marker) {
                return Err(ConfigError::InvalidImportantMarker { ch: marker });
            }
        }
        if !self.handle_brackets {
            return Ok(());
        }

        if self.open_chars.is_empty() {
            return Err(ConfigError::EmptyBracketClass {
                side: BracketSide::Open,
            });
        }
        if self.close_chars.is_empty() {
            return Err(ConfigError::EmptyBracketClass {
                side: BracketSide::Close,
            });
        }
        for ch in self.open_chars.chars().chain(self.close_chars.chars()) {
            if ch.is_whitespace() {
                return Err(ConfigError::WhitespaceBracket { ch });
            }
            if self.separator.contains(ch) {
                return Err(ConfigError::BracketInSeparator { ch });
            }
        }
        if let Some(ch) = self.open_chars.chars().find(|ch| self.close_chars.contains(*ch)) {
            return Err(ConfigError::OverlappingBrackets { ch });
        }
        Ok(())
    }
}
