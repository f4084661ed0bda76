//! Editor features built on the class scanner.
//!
//! Every feature is a pure function of the text, a window into it and a
//! [`classlex::Scanner`]. Extracting the class attribute from a host document and talking
//! to the client are left to the caller; offsets in and out are byte offsets, and
//! [`LineIndex`] converts them to protocol positions.

pub mod completion;
pub mod diagnostics;
pub mod hover;
pub mod line_index;
pub mod semantic_tokens;

pub use completion::{
    complete, completion_context, CompletionCandidate, CompletionContext, CompletionKind,
    TRIGGER_CHARACTERS,
};
pub use diagnostics::{
    collect_diagnostics, ClassDiagnostic, DiagnosticKind, DiagnosticSettings, DIAGNOSTIC_SOURCE,
};
pub use hover::{hover_at, HoverKind, HoverTarget};
pub use line_index::LineIndex;
pub use semantic_tokens::{
    collect_semantic_tokens, encode_semantic_tokens, ClassSemanticToken, ClassSemanticTokenKind,
    SEMANTIC_TOKEN_KINDS,
};
