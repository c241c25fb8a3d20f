use crate::parsing::lines::is_blank;

use super::{
    detect::detect,
    kinds::ParagraphAccumulator,
    types::{BlockKind, ScannedBlock},
};

/// Splits lines into blocks.
///
/// Blank lines between blocks are skipped. At each other line the detectors
/// run in priority order; without a match, a paragraph accumulates until a
/// blank line, the end of input, or a line that opens another block. There is
/// no backtracking: scanning resumes right after each block's last line.
pub fn scan_lines(lines: &[&str]) -> Vec<ScannedBlock> {
    let mut out = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if is_blank(lines[i]) {
            i += 1;
            continue;
        }

        if let Some(open) = detect(lines, i) {
            out.push(ScannedBlock::from_lines(open.kind, lines, i, open.end));
            i = open.end + 1;
            continue;
        }

        let mut paragraph = ParagraphAccumulator::default();
        while i < lines.len() && paragraph.accepts(lines, i) {
            paragraph.push(i);
            i += 1;
        }
        if let Some((start, end)) = paragraph.finish() {
            out.push(ScannedBlock::from_lines(
                BlockKind::Paragraph,
                lines,
                start,
                end,
            ));
        }
    }

    out
}
