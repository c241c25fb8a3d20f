//! The seam between the document and external renderers.
//!
//! The document never starts a render. Callers ask for [`RenderRequest`]s,
//! render in the background, and attach the result with
//! `Document::set_rendered_output`. Output survives an update only when the
//! block is kept with the same fingerprint.

use serde::{Deserialize, Serialize};

use crate::editing::document::{Block, BlockId};

/// Cached output of an external renderer for one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    pub content: String,
    /// The content is a placeholder awaiting an asynchronous render.
    pub pending: bool,
}

impl RenderedOutput {
    pub fn complete(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            pending: false,
        }
    }

    pub fn pending(placeholder: impl Into<String>) -> Self {
        Self {
            content: placeholder.into(),
            pending: true,
        }
    }
}

/// A block whose output is missing or still a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub block_id: BlockId,
    pub content: String,
}

/// Synchronous renderer used by `Document::update_with`.
pub trait BlockRenderer {
    fn render(&self, block: &Block) -> RenderedOutput;
}

impl<F> BlockRenderer for F
where
    F: Fn(&Block) -> RenderedOutput,
{
    fn render(&self, block: &Block) -> RenderedOutput {
        self(block)
    }
}

/// Shows block source as escaped preformatted text.
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapedTextRenderer;

impl BlockRenderer for EscapedTextRenderer {
    fn render(&self, block: &Block) -> RenderedOutput {
        RenderedOutput::complete(format!(
            "<pre>{}</pre>",
            html_escape::encode_text(&block.content)
        ))
    }
}

/// Wraps a block's cached output (empty if none) in a `div` stamped with its
/// attributes.
pub fn wrap_block(block: &Block) -> String {
    let body = block.rendered().map_or("", |out| out.content.as_str());
    format!(
        "<div class=\"md-block\" data-block-id=\"{}\" data-fingerprint=\"{}\" data-start-line=\"{}\" data-line-count=\"{}\">{}</div>",
        html_escape::encode_double_quoted_attribute(&block.id.to_string()),
        html_escape::encode_double_quoted_attribute(&block.fingerprint.to_string()),
        block.start_line,
        block.line_count,
        body
    )
}
