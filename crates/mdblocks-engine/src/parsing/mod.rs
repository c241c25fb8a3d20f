//! # Parsing
//!
//! Turns raw Markdown into an ordered list of [`ScannedBlock`]s. The scanner
//! is a pure function: deterministic, total and without shared state.

pub mod blocks;
pub mod lines;
pub mod normalize;

#[cfg(test)]
mod tests;

pub use blocks::{BlockKind, ScannedBlock, scan_lines};
pub use normalize::{NormalizedText, normalize};

use lines::split_lines;

/// Splits `text` into blocks. Never fails; pathological input degrades to
/// "consume to end of input" or a paragraph.
pub fn scan(text: &str) -> Vec<ScannedBlock> {
    scan_lines(&split_lines(text))
}

/// Kind of a block given only its content, as the scanner would classify it
/// at `start_line`.
pub fn classify(content: &str, start_line: usize) -> BlockKind {
    let mut lines = split_lines(content);
    let at = if start_line == 0 {
        0
    } else {
        // A leading blank line keeps front matter from matching mid-document.
        lines.insert(0, "");
        1
    };
    blocks::detect(&lines, at)
        .map(|open| open.kind)
        .unwrap_or(BlockKind::Paragraph)
}
