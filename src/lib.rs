//! # classlex
//!
//! A positional tokenizer for utility class strings such as
//! `hover:(focus:text-red-500 disabled:opacity-50) md:p-4!`.
//!
//! A class string is a whitespace separated list of class tokens. Each token may be
//! prefixed with a chain of variants joined by a separator (`md:hover:p-4`), may carry a
//! trailing important marker (`p-4!`), and, when bracket handling is enabled, several
//! tokens can share a variant chain through a group (`hover:(a b)`).
//!
//! Besides enumerating every class, a scan resolves which token or variant sits under a
//! cursor offset. Editor features (completion, hover, decorations) are built on top of
//! that in `classlex-analysis`.
//!
//! ## Layout
//!
//! - [`brackets`]: depth counting bracket matcher (leaf).
//! - [`scanner`]: the recursive scanner producing [`ScanResult`]s.
//! - [`token`]: the plain data produced by a scan.
//! - [`options`] and [`error`]: scan configuration and its validation.

pub mod brackets;
pub mod error;
pub mod options;
pub mod scanner;
pub mod token;

pub use brackets::{BracketMatcher, CharClass, UnbalancedBracket};
pub use error::ConfigError;
pub use options::ScanOptions;
pub use scanner::{scan, Scanner};
pub use token::{ClassInfo, GroupInfo, ScanResult, SelectionInfo, Token};
