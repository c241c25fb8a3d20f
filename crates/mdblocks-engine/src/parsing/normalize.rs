//! Pre-scan normalization.
//!
//! A display formula written on one line (`$$x^2$$`) is expanded to the
//! three-line `$$` / formula / `$$` form so the scanner sees a math block.
//! Lines inside front matter, fenced code, `$$` blocks and HTML blocks are
//! left alone.
//!
//! The regions are tracked line by line, the way the scanner opens them at
//! the top level. A fence or HTML opener that the scanner sees only as a list
//! continuation line is still treated as opening a region here, so a `$$x$$`
//! line inside it stays unexpanded.
//!
//! Expansion shifts line numbers, so the result carries a map from each
//! normalized line back to the source line it came from.

use super::blocks::kinds::{CodeFence, FenceSig, FrontMatter, HtmlBlock, MathBlock};
use super::lines::split_lines;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub text: String,
    /// `line_map[n]` is the source line of normalized line `n`.
    pub line_map: Vec<usize>,
}

impl NormalizedText {
    /// Source line of a normalized line; past the end maps to the last line.
    pub fn source_line(&self, normalized: usize) -> usize {
        self.line_map
            .get(normalized)
            .or(self.line_map.last())
            .copied()
            .unwrap_or(0)
    }

    /// Whether normalization changed anything.
    pub fn is_identity(&self) -> bool {
        self.line_map.iter().enumerate().all(|(n, src)| n == *src)
    }
}

pub fn normalize(text: &str) -> NormalizedText {
    let lines = split_lines(text);
    if !text.contains(MathBlock::DELIMITER) {
        return NormalizedText {
            text: text.to_string(),
            line_map: (0..lines.len()).collect(),
        };
    }

    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    let mut line_map = Vec::with_capacity(lines.len());
    let mut fence: Option<FenceSig> = None;
    let mut in_math = false;
    // Last line of a front matter or HTML region copied verbatim.
    let mut verbatim_through =
        FrontMatter::is_start(&lines, 0).then(|| FrontMatter::find_end(&lines, 0));

    for (src, line) in lines.iter().copied().enumerate() {
        if verbatim_through.is_some_and(|end| src <= end) {
            // copied as is
        } else if let Some(open) = fence {
            if CodeFence::closes(open, CodeFence::sig(line)) {
                fence = None;
            }
        } else if in_math {
            in_math = line.trim() != MathBlock::DELIMITER;
        } else if let Some(sig) = CodeFence::sig(line) {
            fence = Some(sig);
        } else if line.trim() == MathBlock::DELIMITER {
            in_math = true;
        } else if HtmlBlock::is_start(&lines, src) {
            verbatim_through = Some(HtmlBlock::find_end(&lines, src));
        } else if let Some(formula) = MathBlock::inline_formula(line) {
            out.extend([MathBlock::DELIMITER, formula, MathBlock::DELIMITER]);
            line_map.extend([src; 3]);
            continue;
        }
        out.push(line);
        line_map.push(src);
    }

    NormalizedText {
        text: out.join("\n"),
        line_map,
    }
}
