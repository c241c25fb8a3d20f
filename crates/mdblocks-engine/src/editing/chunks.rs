//! Progressive rendering groups.
//!
//! The first chunk targets `initial_lines` source lines and every following
//! chunk doubles the target, optionally capped. A chunk closes at the first
//! block boundary where it reaches its target, so a large block never splits
//! and every chunk holds at least one block.

use crate::editing::document::Block;

pub fn chunk_blocks(
    blocks: &[Block],
    initial_lines: usize,
    max_lines: Option<usize>,
) -> Vec<&[Block]> {
    let cap = max_lines.unwrap_or(usize::MAX).max(1);
    let mut target = initial_lines.clamp(1, cap);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut lines = 0;

    for (i, block) in blocks.iter().enumerate() {
        lines += block.line_count.max(1);
        if lines >= target {
            chunks.push(&blocks[start..=i]);
            start = i + 1;
            lines = 0;
            target = target.saturating_mul(2).min(cap);
        }
    }
    if start < blocks.len() {
        chunks.push(&blocks[start..]);
    }
    chunks
}
