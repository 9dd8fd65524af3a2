//! Paragraph-based text chunking.

use crate::error::Result;

use super::Chunker;

/// Chunks text on blank-line boundaries.
///
/// A boundary is a run of two or more consecutive newlines; single newlines
/// stay inside their paragraph. Chunks that contain only whitespace are
/// dropped: the boundary runs themselves carry no content, and an empty
/// chunk would otherwise occupy an index slot and could be returned as a
/// retrieval result.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParagraphChunker;

impl ParagraphChunker {
    /// Creates a paragraph chunker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Chunker for ParagraphChunker {
    fn chunk(&self, text: &str) -> Result<Vec<String>> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut newline_run = 0usize;

        for ch in text.chars() {
            if ch == '\n' {
                newline_run += 1;
                continue;
            }
            if newline_run >= 2 {
                push_paragraph(&mut chunks, &mut current);
            } else if newline_run == 1 {
                current.push('\n');
            }
            newline_run = 0;
            current.push(ch);
        }
        push_paragraph(&mut chunks, &mut current);

        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "paragraph"
    }
}

fn push_paragraph(chunks: &mut Vec<String>, current: &mut String) {
    if !current.trim().is_empty() {
        chunks.push(std::mem::take(current));
    } else {
        current.clear();
    }
}
