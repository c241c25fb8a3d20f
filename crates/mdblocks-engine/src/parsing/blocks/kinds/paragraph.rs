use crate::parsing::{blocks::detect::starts_block, lines::is_blank};

/// In-progress paragraph threaded through the scan loop.
///
/// Paragraphs have no delimiters; they are the fallback when no other block
/// opener matches. Empty until the first line is pushed; once it holds a
/// line, any line that would open another block ends it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParagraphAccumulator {
    range: Option<(usize, usize)>,
}

impl ParagraphAccumulator {
    pub fn is_empty(&self) -> bool {
        self.range.is_none()
    }

    pub fn accepts(&self, lines: &[&str], i: usize) -> bool {
        if is_blank(lines[i]) {
            return false;
        }
        self.is_empty() || !starts_block(lines, i)
    }

    pub fn push(&mut self, i: usize) {
        self.range = Some(match self.range {
            Some((start, _)) => (start, i),
            None => (i, i),
        });
    }

    /// Inclusive `(start, end)` line range, if any line was collected.
    pub fn finish(self) -> Option<(usize, usize)> {
        self.range
    }
}
