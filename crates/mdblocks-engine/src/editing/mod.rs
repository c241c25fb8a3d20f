/*!
 * # Editing Core
 *
 * The live document model behind an editor preview. Each keystroke hands the
 * full text to [`Document::update`], which re-scans it into blocks, matches
 * the new blocks against the previous ones by content fingerprint and emits
 * the [`MutationCommand`]s that bring a rendered view up to date.
 *
 * ## Pipeline
 *
 * 1. **Normalize**: one-line `$$x$$` math is expanded to three lines, with a
 *    map back to source lines.
 * 2. **Scan**: the text is split into classified blocks
 *    (see [`crate::parsing`]).
 * 3. **Diff**: new fingerprints are matched against old ones, nearest index
 *    first, then made order-preserving ([`diff`]).
 * 4. **Synthesize**: diff ops become `Remove`, `UpdateAttrs`, `InsertBefore`
 *    and `Append` commands ([`commands`]).
 *
 * A kept block keeps its [`BlockId`] and any rendered output cached on it, so
 * an expensive diagram or formula is never rendered twice for the same text.
 *
 * ## Usage
 *
 * ```rust
 * use mdblocks_engine::editing::*;
 *
 * let mut doc = Document::new();
 * let first = doc.update("# Hello\n\nWorld");
 * assert_eq!(first.commands[0], MutationCommand::Clear);
 *
 * // Render outside the document, then attach the result.
 * for request in doc.pending_renders() {
 *     let html = format!("<p>{}</p>", request.content);
 *     doc.set_rendered_output(request.block_id, RenderedOutput::complete(html));
 * }
 *
 * let next = doc.update("# Hello\n\nWorld\n\nAgain");
 * assert_eq!(next.stats.kept, 2);
 * assert!(doc.full_content().contains("<p>World</p>"));
 * ```
 */

pub mod chunks;
pub mod commands;
pub mod diff;
pub mod document;
pub mod outline;
pub mod render;
pub mod snapshot;

// Public API re-exports
pub use chunks::chunk_blocks;
pub use commands::{BlockAttrs, MutationCommand, PartialAttrs};
pub use diff::{DiffOp, DiffStats, diff_blocks};
pub use document::{Block, BlockId, Document, UpdateOutcome};
pub use outline::{HeadingEntry, slugify};
pub use render::{BlockRenderer, EscapedTextRenderer, RenderRequest, RenderedOutput};
pub use snapshot::{BlockSnapshot, DocumentSnapshot, SnapshotError};
