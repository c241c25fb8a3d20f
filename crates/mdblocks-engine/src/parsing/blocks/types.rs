use serde::{Deserialize, Serialize};

/// Which detector produced a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    /// `---` delimited metadata on the first line of the document.
    FrontMatter,
    /// ``` or ~~~ fenced code.
    FencedCode,
    /// `$$` delimited display math.
    MathBlock,
    /// Raw block-level HTML.
    Html,
    /// Pipe table.
    Table,
    /// `>` quoted lines.
    BlockQuote,
    /// Bullet or ordered list.
    List,
    /// Code indented by four spaces or a tab.
    IndentedCode,
    /// `#` heading.
    Heading,
    /// Fallback when no detector matches.
    Paragraph,
}

/// A block found by the scanner, before it is given an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedBlock {
    pub kind: BlockKind,
    /// Raw text of the block's lines joined with `\n`.
    pub content: String,
    /// 0-based index of the first line.
    pub start_line: usize,
    pub line_count: usize,
}

impl ScannedBlock {
    pub(crate) fn from_lines(kind: BlockKind, lines: &[&str], start: usize, end: usize) -> Self {
        Self {
            kind,
            content: lines[start..=end].join("\n"),
            start_line: start,
            line_count: end - start + 1,
        }
    }

    /// Index of the last line (inclusive).
    pub fn end_line(&self) -> usize {
        self.start_line + self.line_count - 1
    }
}
