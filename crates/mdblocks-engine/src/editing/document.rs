use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use xi_rope::Rope;

use crate::editing::{
    chunks::chunk_blocks,
    commands::{BlockAttrs, MutationCommand, initial_commands, synthesize},
    diff::{DiffOp, DiffStats, diff_blocks},
    outline::{HeadingEntry, extract_headings},
    render::{BlockRenderer, RenderRequest, RenderedOutput, wrap_block},
};
use crate::identity::Fingerprint;
use crate::parsing::{BlockKind, NormalizedText, ScannedBlock, normalize, scan};

/// Stable identity of a block across revisions. Never reused once minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(u64);

impl BlockId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block-{}", self.0)
    }
}

/// A contiguous span of source lines classified as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub id: BlockId,
    pub fingerprint: Fingerprint,
    pub kind: BlockKind,
    /// 0-based first source line. Changes on every update that shifts it.
    pub start_line: usize,
    pub line_count: usize,
    /// Raw block text, after math normalization.
    pub content: String,
    pub(crate) rendered: Option<RenderedOutput>,
}

impl Block {
    pub fn new(
        id: BlockId,
        kind: BlockKind,
        content: String,
        start_line: usize,
        line_count: usize,
    ) -> Self {
        Self {
            id,
            fingerprint: Fingerprint::of(&content),
            kind,
            start_line,
            line_count,
            content,
            rendered: None,
        }
    }

    pub fn rendered(&self) -> Option<&RenderedOutput> {
        self.rendered.as_ref()
    }

    pub fn has_pending_render(&self) -> bool {
        self.rendered.as_ref().is_some_and(|out| out.pending)
    }

    /// Last source line (inclusive).
    pub fn end_line(&self) -> usize {
        self.start_line + self.line_count.max(1) - 1
    }

    pub fn contains_line(&self, line: usize) -> bool {
        (self.start_line..=self.end_line()).contains(&line)
    }

    pub fn attrs(&self) -> BlockAttrs {
        BlockAttrs {
            block_id: self.id,
            fingerprint: self.fingerprint,
            start_line: self.start_line,
            line_count: self.line_count,
        }
    }

    fn needs_render(&self) -> bool {
        self.rendered.as_ref().is_none_or(|out| out.pending)
    }
}

/// Result of [`Document::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Commands for the mutation executor, in application order.
    pub commands: Vec<MutationCommand>,
    pub stats: DiffStats,
    /// The diff behind `commands`, for callers that issue their own commands.
    pub ops: Vec<DiffOp>,
}

/// The current block sequence of a live-edited Markdown document.
///
/// Mutated only through [`Document::update`]; not safe for concurrent
/// mutation, so callers serialize updates.
///
/// ```rust
/// # use mdblocks_engine::editing::Document;
/// let mut doc = Document::new();
/// let first = doc.update("# Title");
/// assert_eq!(first.stats.inserted, 1);
///
/// let second = doc.update("# Title\n\nNew paragraph");
/// assert_eq!((second.stats.kept, second.stats.inserted), (1, 1));
/// ```
#[derive(Clone)]
pub struct Document {
    pub(crate) blocks: Vec<Block>,
    /// Source text as last given to `update`.
    pub(crate) buffer: Rope,
    pub(crate) normalized: NormalizedText,
    /// Last minted block id.
    pub(crate) id_counter: u64,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("blocks", &self.blocks.len())
            .field("len", &self.buffer.len())
            .field("id_counter", &self.id_counter)
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            buffer: Rope::from(""),
            normalized: normalize(""),
            id_counter: 0,
        }
    }

    pub fn from_text(text: &str) -> Self {
        let mut doc = Self::new();
        doc.update(text);
        doc
    }

    /// Create a document from raw bytes, which must be valid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::from_text(text))
    }

    fn mint_id(&mut self) -> BlockId {
        self.id_counter += 1;
        BlockId(self.id_counter)
    }

    /// Maps a scanned block's normalized line span back to source lines.
    fn source_span(normalized: &NormalizedText, scanned: &ScannedBlock) -> (usize, usize) {
        let start = normalized.source_line(scanned.start_line);
        let end = normalized.source_line(scanned.end_line());
        (start, end - start + 1)
    }

    /// Re-scans `text` and diffs it against the current blocks.
    ///
    /// On a first render (no current blocks) every block is new and the
    /// commands are `Clear` followed by one `Append` per block. Otherwise the
    /// commands are `Remove`s for deleted blocks, then, in new order,
    /// `UpdateAttrs` for kept blocks whose line span moved and
    /// `InsertBefore`/`Append` for new blocks. Inserted blocks carry their raw
    /// content; see [`Document::update_with`] to render them in the same step.
    pub fn update(&mut self, text: &str) -> UpdateOutcome {
        let normalized = normalize(text);
        let scanned: Vec<(ScannedBlock, Fingerprint)> = scan(&normalized.text)
            .into_iter()
            .map(|s| {
                let fp = Fingerprint::of(&s.content);
                (s, fp)
            })
            .collect();

        let old_fps: Vec<Fingerprint> = self.blocks.iter().map(|b| b.fingerprint).collect();
        let new_fps: Vec<Fingerprint> = scanned.iter().map(|(_, fp)| *fp).collect();
        let ops = diff_blocks(&old_fps, &new_fps);

        let mut inherited: Vec<Option<usize>> = vec![None; scanned.len()];
        for op in &ops {
            if let DiffOp::Keep {
                new_index,
                old_index,
            } = *op
            {
                inherited[new_index] = Some(old_index);
            }
        }

        let mut new_blocks = Vec::with_capacity(scanned.len());
        for ((s, fingerprint), old_index) in scanned.into_iter().zip(inherited) {
            let (start_line, line_count) = Self::source_span(&normalized, &s);
            let (id, rendered) = match old_index {
                Some(old_index) => {
                    let old = &mut self.blocks[old_index];
                    (old.id, old.rendered.take())
                }
                None => (self.mint_id(), None),
            };
            new_blocks.push(Block {
                id,
                fingerprint,
                kind: s.kind,
                start_line,
                line_count,
                content: s.content,
                rendered,
            });
        }

        let commands = if self.blocks.is_empty() {
            initial_commands(&new_blocks)
        } else {
            synthesize(&ops, &self.blocks, &new_blocks)
        };
        let stats = DiffStats::from_ops(&ops);
        log::debug!(
            "document update: {} blocks, kept={} inserted={} removed={}",
            new_blocks.len(),
            stats.kept,
            stats.inserted,
            stats.removed
        );

        self.blocks = new_blocks;
        self.buffer = Rope::from(text);
        self.normalized = normalized;

        UpdateOutcome {
            commands,
            stats,
            ops,
        }
    }

    /// Like [`Document::update`], but renders every inserted block right away,
    /// caches the output and puts it in the `Append`/`InsertBefore` commands.
    pub fn update_with(&mut self, text: &str, renderer: &dyn BlockRenderer) -> UpdateOutcome {
        let mut outcome = self.update(text);
        let index: HashMap<BlockId, usize> = self
            .blocks
            .iter()
            .enumerate()
            .map(|(i, b)| (b.id, i))
            .collect();

        for cmd in &mut outcome.commands {
            if let MutationCommand::Append {
                block_id, content, ..
            }
            | MutationCommand::InsertBefore {
                block_id, content, ..
            } = cmd
                && let Some(&i) = index.get(&*block_id)
            {
                let output = renderer.render(&self.blocks[i]);
                content.clone_from(&output.content);
                self.blocks[i].rendered = Some(output);
            }
        }
        outcome
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn index_of(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    /// The block whose line span contains source line `line`.
    pub fn block_at_line(&self, line: usize) -> Option<&Block> {
        self.blocks.iter().find(|b| b.contains_line(line))
    }

    /// The source text as last given to `update`.
    pub fn raw_text(&self) -> String {
        self.buffer.to_string()
    }

    /// The source text after math normalization; block contents slice this.
    pub fn normalized_text(&self) -> &str {
        &self.normalized.text
    }

    pub fn id_counter(&self) -> u64 {
        self.id_counter
    }

    /// The block's lines as they appear in the source, before normalization.
    pub fn source_text(&self, block: &Block) -> String {
        let start = self.buffer.offset_of_line(block.start_line);
        let end = self
            .buffer
            .offset_of_line(block.start_line + block.line_count)
            .max(start);
        let text = self.buffer.slice_to_cow(start..end);
        let text = text.strip_suffix('\n').unwrap_or(&text);
        text.strip_suffix('\r').unwrap_or(text).to_string()
    }

    /// Attaches renderer output to a block.
    ///
    /// Returns `false`, and drops the output, when the block is gone: a
    /// later update removed it while the render was in flight.
    pub fn set_rendered_output(&mut self, id: BlockId, output: RenderedOutput) -> bool {
        match self.blocks.iter_mut().find(|b| b.id == id) {
            Some(block) => {
                block.rendered = Some(output);
                true
            }
            None => {
                log::debug!("dropping rendered output for {id}: block no longer present");
                false
            }
        }
    }

    /// Attaches renderer output to the block at `index`; `false` if out of range.
    pub fn set_rendered_output_at(&mut self, index: usize, output: RenderedOutput) -> bool {
        match self.blocks.get_mut(index) {
            Some(block) => {
                block.rendered = Some(output);
                true
            }
            None => {
                log::debug!(
                    "dropping rendered output for index {index}: only {} blocks",
                    self.blocks.len()
                );
                false
            }
        }
    }

    /// Blocks without cached output or with a pending placeholder.
    pub fn pending_renders(&self) -> Vec<RenderRequest> {
        self.blocks
            .iter()
            .filter(|b| b.needs_render())
            .map(|b| RenderRequest {
                block_id: b.id,
                content: b.content.clone(),
            })
            .collect()
    }

    /// A `Replace` carrying the block's cached output, e.g. once an
    /// asynchronous render has completed. `None` if the block is gone or has
    /// no output.
    pub fn replace_command(&self, id: BlockId) -> Option<MutationCommand> {
        let block = self.block(id)?;
        let output = block.rendered.as_ref()?;
        Some(MutationCommand::Replace {
            block_id: block.id,
            content: output.content.clone(),
            attrs: block.attrs(),
        })
    }

    /// All cached output in block order, each wrapped with its attributes.
    pub fn full_content(&self) -> String {
        self.blocks.iter().map(wrap_block).collect()
    }

    /// Groups blocks for progressive rendering; see [`chunk_blocks`].
    pub fn chunks(&self, initial_lines: usize, max_lines: Option<usize>) -> Vec<&[Block]> {
        chunk_blocks(&self.blocks, initial_lines, max_lines)
    }

    pub fn headings(&self) -> Vec<HeadingEntry> {
        extract_headings(&self.blocks)
    }

    /// Text of the first level-1 heading.
    pub fn title(&self) -> Option<String> {
        self.headings()
            .into_iter()
            .find(|h| h.level == 1)
            .map(|h| h.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::commands::tests::apply;
    use crate::editing::render::EscapedTextRenderer;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn ids(doc: &Document) -> Vec<BlockId> {
        doc.blocks().iter().map(|b| b.id).collect()
    }

    fn tree_of(doc: &Document) -> Vec<(BlockId, String)> {
        doc.blocks()
            .iter()
            .map(|b| (b.id, b.content.clone()))
            .collect()
    }

    #[test]
    fn first_update_clears_and_appends() {
        let mut doc = Document::new();
        let outcome = doc.update("# Title\n\nParagraph");
        assert_eq!(
            outcome.stats,
            DiffStats {
                kept: 0,
                inserted: 2,
                removed: 0
            }
        );
        assert_eq!(outcome.commands[0], MutationCommand::Clear);
        assert_eq!(outcome.commands.len(), 3);
        assert!(
            outcome
                .ops
                .iter()
                .all(|op| matches!(op, DiffOp::Insert { .. }))
        );
        assert_eq!(ids(&doc), vec![BlockId::new(1), BlockId::new(2)]);
    }

    #[test]
    fn appending_paragraph_keeps_existing_ids() {
        let mut doc = Document::from_text("# Title\n\nPara 1\n\n- a\n- b");
        let before = ids(&doc);

        let outcome = doc.update("# Title\n\nPara 1\n\n- a\n- b\n\nPara 2");
        assert_eq!(
            outcome.stats,
            DiffStats {
                kept: 3,
                inserted: 1,
                removed: 0
            }
        );
        assert_eq!(&ids(&doc)[..3], &before[..]);
        assert!(matches!(
            outcome.commands.as_slice(),
            [MutationCommand::Append { .. }]
        ));
    }

    #[test]
    fn unchanged_text_yields_no_commands() {
        let text = "# A\n\nB\n\nC";
        let mut doc = Document::from_text(text);
        let outcome = doc.update(text);
        assert_eq!(outcome.stats.kept, 3);
        assert_eq!(outcome.stats.inserted + outcome.stats.removed, 0);
        assert!(outcome.commands.is_empty());
    }

    #[test]
    fn shifted_block_gets_update_attrs() {
        let mut doc = Document::from_text("A\n\nB");
        let b_id = doc.blocks()[1].id;
        let outcome = doc.update("A\n\n\n\nB");
        assert_eq!(
            outcome.commands,
            vec![MutationCommand::UpdateAttrs {
                block_id: b_id,
                attrs: crate::editing::commands::PartialAttrs {
                    start_line: Some(4),
                    line_count: None,
                },
            }]
        );
    }

    #[test]
    fn ids_are_never_reused() {
        let mut doc = Document::from_text("A\n\nB");
        doc.update("A");
        doc.update("A\n\nB");
        assert_eq!(ids(&doc), vec![BlockId::new(1), BlockId::new(3)]);
        assert_eq!(doc.id_counter(), 3);
    }

    #[test]
    fn clearing_the_document_removes_everything() {
        let mut doc = Document::from_text("A\n\nB");
        let outcome = doc.update("");
        assert_eq!(outcome.stats.removed, 2);
        assert!(doc.is_empty());
        let outcome = doc.update("C");
        assert_eq!(outcome.commands[0], MutationCommand::Clear);
    }

    #[rstest]
    #[case("A\n\nB\n\nC", "C\n\nB\n\nA")]
    #[case("A\n\nB\n\nC\n\nD", "B\n\nD\n\nA\n\nC")]
    #[case("---\n\nx\n\n---\n\ny\n\n---", "y\n\n---\n\n---\n\nx\n\nz")]
    #[case("# T\n\n- a\n- b\n\n```\nc\n```", "```\nc\n```\n\n# T")]
    #[case("", "A\n\nB")]
    #[case("A\n\nB", "")]
    fn commands_transform_old_tree_into_new(#[case] before: &str, #[case] after: &str) {
        let mut doc = Document::from_text(before);
        let mut tree = tree_of(&doc);
        let outcome = doc.update(after);
        apply(&mut tree, &outcome.commands);
        let got: Vec<BlockId> = tree.iter().map(|(id, _)| *id).collect();
        assert_eq!(got, ids(&doc));
    }

    #[test]
    fn kept_blocks_carry_render_cache() {
        let mut doc = Document::from_text("A\n\nB");
        let a = doc.blocks()[0].id;
        assert!(doc.set_rendered_output(a, RenderedOutput::complete("<p>A</p>")));

        doc.update("A\n\nB changed");
        assert_eq!(
            doc.block(a).and_then(|b| b.rendered()),
            Some(&RenderedOutput::complete("<p>A</p>"))
        );
        assert_eq!(doc.pending_renders().len(), 1);
    }

    #[test]
    fn stale_render_is_rejected() {
        let mut doc = Document::from_text("A\n\nB");
        let b = doc.blocks()[1].id;
        doc.update("A\n\nC");
        assert!(!doc.set_rendered_output(b, RenderedOutput::complete("late")));
        assert!(!doc.set_rendered_output_at(5, RenderedOutput::complete("late")));
    }

    #[test]
    fn pending_placeholder_still_needs_render() {
        let mut doc = Document::from_text("```mermaid\ngraph TD\n```");
        assert!(doc.set_rendered_output_at(0, RenderedOutput::pending("<div>…</div>")));
        assert!(doc.blocks()[0].has_pending_render());
        assert_eq!(doc.pending_renders().len(), 1);

        let id = doc.blocks()[0].id;
        doc.set_rendered_output(id, RenderedOutput::complete("<svg/>"));
        assert!(doc.pending_renders().is_empty());
        assert_eq!(
            doc.replace_command(id),
            Some(MutationCommand::Replace {
                block_id: id,
                content: "<svg/>".to_string(),
                attrs: doc.blocks()[0].attrs(),
            })
        );
    }

    #[test]
    fn update_with_renders_inserted_blocks() {
        let mut doc = Document::from_text("A");
        let outcome = doc.update_with("A\n\n<b>", &EscapedTextRenderer);
        match &outcome.commands[..] {
            [MutationCommand::Append { content, .. }] => {
                assert_eq!(content, "<pre>&lt;b&gt;</pre>");
            }
            other => panic!("unexpected commands {other:?}"),
        }
        assert!(doc.blocks()[1].rendered().is_some());
        assert!(doc.blocks()[0].rendered().is_none());
    }

    #[test]
    fn line_lookup() {
        let doc = Document::from_text("# T\n\nline a\nline b\n\n- x");
        assert_eq!(doc.block_at_line(0).map(|b| b.kind), Some(BlockKind::Heading));
        assert_eq!(doc.block_at_line(3).map(|b| b.kind), Some(BlockKind::Paragraph));
        assert!(doc.block_at_line(1).is_none());
        assert_eq!(doc.block_at_line(5).map(|b| b.kind), Some(BlockKind::List));
        assert!(doc.block_at_line(99).is_none());
    }

    #[test]
    fn inline_math_maps_to_source_lines() {
        let doc = Document::from_text("Intro\n\n$$x^2$$\n\nOutro");
        let math = &doc.blocks()[1];
        assert_eq!(math.kind, BlockKind::MathBlock);
        assert_eq!(math.content, "$$\nx^2\n$$");
        assert_eq!((math.start_line, math.line_count), (2, 1));
        assert_eq!(doc.source_text(math), "$$x^2$$");
        assert_eq!(doc.blocks()[2].start_line, 4);
        assert_eq!(doc.block_at_line(4).map(|b| b.content.as_str()), Some("Outro"));
    }

    #[test]
    fn delimiter_only_math_line_stays_a_paragraph() {
        let doc = Document::from_text("$$$$$$\n\n# Heading\n\nPara");
        let spans: Vec<_> = doc
            .blocks()
            .iter()
            .map(|b| (b.kind, b.start_line, b.line_count))
            .collect();
        assert_eq!(
            spans,
            vec![
                (BlockKind::Paragraph, 0, 1),
                (BlockKind::Heading, 2, 1),
                (BlockKind::Paragraph, 4, 1),
            ]
        );
        assert!(Document::from_json(&doc.to_json().unwrap()).is_ok());
    }

    #[test]
    fn source_text_of_last_block() {
        let doc = Document::from_text("A\n\nB\r\nC");
        assert_eq!(doc.source_text(&doc.blocks()[1]), "B\r\nC");
        assert_eq!(doc.raw_text(), "A\n\nB\r\nC");
    }

    #[test]
    fn full_content_wraps_blocks_in_order() {
        let mut doc = Document::new();
        doc.update_with("# T\n\nbody", &EscapedTextRenderer);
        let html = doc.full_content();
        let first = html.find("<pre># T</pre>").unwrap();
        let second = html.find("<pre>body</pre>").unwrap();
        assert!(first < second);
        assert_eq!(html.matches("class=\"md-block\"").count(), 2);
    }

    #[test]
    fn from_bytes_rejects_invalid_utf8() {
        assert!(Document::from_bytes(&[0xff, 0xfe]).is_err());
        assert_eq!(Document::from_bytes(b"# T").unwrap().len(), 1);
    }
}
