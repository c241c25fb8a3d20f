//! Ordered block detectors.
//!
//! The order of [`DETECTION_ORDER`] decides which block type wins when more
//! than one could start on a line: front matter, then fences, math, HTML,
//! tables, quotes, lists, indented code and finally headings.

use super::kinds::{
    BlockQuote, CodeFence, FrontMatter, Heading, HtmlBlock, IndentedCode, List, MathBlock, Table,
};
use super::types::BlockKind;

pub const DETECTION_ORDER: [BlockKind; 9] = [
    BlockKind::FrontMatter,
    BlockKind::FencedCode,
    BlockKind::MathBlock,
    BlockKind::Html,
    BlockKind::Table,
    BlockKind::BlockQuote,
    BlockKind::List,
    BlockKind::IndentedCode,
    BlockKind::Heading,
];

/// A detector match: the block kind and its inclusive last line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockOpen {
    pub kind: BlockKind,
    pub end: usize,
}

impl BlockKind {
    fn is_start(self, lines: &[&str], i: usize) -> bool {
        match self {
            BlockKind::FrontMatter => FrontMatter::is_start(lines, i),
            BlockKind::FencedCode => CodeFence::is_start(lines, i),
            BlockKind::MathBlock => MathBlock::is_start(lines, i),
            BlockKind::Html => HtmlBlock::is_start(lines, i),
            BlockKind::Table => Table::is_start(lines, i),
            BlockKind::BlockQuote => BlockQuote::is_start(lines, i),
            BlockKind::List => List::is_start(lines, i),
            BlockKind::IndentedCode => IndentedCode::is_start(lines, i),
            BlockKind::Heading => Heading::is_start(lines, i),
            BlockKind::Paragraph => false,
        }
    }

    fn find_end(self, lines: &[&str], i: usize) -> usize {
        match self {
            BlockKind::FrontMatter => FrontMatter::find_end(lines, i),
            BlockKind::FencedCode => CodeFence::find_end(lines, i),
            BlockKind::MathBlock => MathBlock::find_end(lines, i),
            BlockKind::Html => HtmlBlock::find_end(lines, i),
            BlockKind::Table => Table::find_end(lines, i),
            BlockKind::BlockQuote => BlockQuote::find_end(lines, i),
            BlockKind::List => List::find_end(lines, i),
            BlockKind::IndentedCode => IndentedCode::find_end(lines, i),
            BlockKind::Heading => Heading::find_end(lines, i),
            BlockKind::Paragraph => i,
        }
    }
}

fn first_match(lines: &[&str], i: usize) -> Option<BlockKind> {
    DETECTION_ORDER
        .into_iter()
        .find(|kind| kind.is_start(lines, i))
}

/// Runs the detectors in order at line `i`; the first match decides the block.
pub fn detect(lines: &[&str], i: usize) -> Option<BlockOpen> {
    let kind = first_match(lines, i)?;
    Some(BlockOpen {
        kind,
        end: kind.find_end(lines, i),
    })
}

/// Whether any detector would open a block at line `i`.
pub fn starts_block(lines: &[&str], i: usize) -> bool {
    first_match(lines, i).is_some()
}
