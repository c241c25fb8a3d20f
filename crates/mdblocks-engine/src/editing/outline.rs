use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::editing::document::{Block, BlockId};
use crate::parsing::BlockKind;

/// ATX heading with optional closing `#` run.
fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(#{1,6})[ \t]+(.*?)(?:[ \t]+#+)?[ \t]*$").expect("Invalid heading regex")
    })
}

/// One entry of a document outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingEntry {
    /// Number of leading `#`, 1 to 6.
    pub level: u8,
    pub text: String,
    /// Anchor id, unique within the document.
    pub slug: String,
    pub block_id: BlockId,
    pub line: usize,
}

/// Lowercases, keeps alphanumerics, joins words with `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if (c.is_whitespace() || c == '-' || c == '_') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug.to_string()
    }
}

/// Headings of `blocks` in document order, slugs suffixed `-1`, `-2`, … on
/// collision.
pub fn extract_headings(blocks: &[Block]) -> Vec<HeadingEntry> {
    let mut taken = HashSet::new();
    blocks
        .iter()
        .filter(|b| b.kind == BlockKind::Heading)
        .filter_map(|block| {
            let caps = heading_regex().captures(&block.content)?;
            let text = caps[2].to_string();
            let base = slugify(&text);
            let mut slug = base.clone();
            let mut n = 0;
            while !taken.insert(slug.clone()) {
                n += 1;
                slug = format!("{base}-{n}");
            }
            Some(HeadingEntry {
                level: caps[1].len() as u8,
                text,
                slug,
                block_id: block.id,
                line: block.start_line,
            })
        })
        .collect()
}
