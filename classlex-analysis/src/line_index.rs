//! Byte offsets to protocol positions.
//!
//! Protocol columns count UTF-16 code units, the scanner counts bytes.

use lsp_types::{Position, Range};

#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (idx, ch) in text.char_indices() {
            if ch == '\n' {
                line_starts.push(idx + ch.len_utf8());
            }
        }
        Self { text, line_starts }
    }

    /// Position of a byte offset. Offsets past the end map to the end of the text.
    pub fn position(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        let line = self.line_starts.partition_point(|start| *start <= offset) - 1;
        let column = self.text[self.line_starts[line]..offset]
            .encode_utf16()
            .count();
        Position::new(line as u32, column as u32)
    }

    pub fn range(&self, span: std::ops::Range<usize>) -> Range {
        Range::new(self.position(span.start), self.position(span.end))
    }

    /// UTF-16 length of `text[span]`.
    pub fn utf16_len(&self, span: std::ops::Range<usize>) -> u32 {
        self.text
            .get(span)
            .map_or(0, |slice| slice.encode_utf16().count() as u32)
    }
}
