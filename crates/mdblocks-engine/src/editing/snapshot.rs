use serde::{Deserialize, Serialize};
use xi_rope::Rope;

use crate::editing::document::{Block, BlockId, Document};
use crate::identity::Fingerprint;
use crate::parsing::{classify, normalize};

/// Persisted metadata of one block. Rendered output is not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSnapshot {
    pub id: BlockId,
    pub fingerprint: Fingerprint,
    pub start_line: usize,
    pub line_count: usize,
    pub content: String,
}

/// Everything needed to rebuild a [`Document`] with the same block ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    pub blocks: Vec<BlockSnapshot>,
    pub raw_content: String,
    pub id_counter: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate block id {0}")]
    DuplicateId(BlockId),
    #[error("Id counter {counter} is behind block id {id}")]
    IdCounterBehind { counter: u64, id: BlockId },
    #[error("Block {0} starts before the block preceding it")]
    OutOfOrder(BlockId),
    #[error("Block {0} overlaps the block preceding it")]
    Overlap(BlockId),
    #[error("Fingerprint of block {0} does not match its content")]
    FingerprintMismatch(BlockId),
}

impl Document {
    pub fn to_snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            blocks: self
                .blocks
                .iter()
                .map(|b| BlockSnapshot {
                    id: b.id,
                    fingerprint: b.fingerprint,
                    start_line: b.start_line,
                    line_count: b.line_count,
                    content: b.content.clone(),
                })
                .collect(),
            raw_content: self.raw_text(),
            id_counter: self.id_counter,
        }
    }

    /// Rebuilds a document from a snapshot.
    ///
    /// The next `update` diffs against the restored blocks, so ids survive a
    /// save and reload. Every block starts without rendered output.
    pub fn from_snapshot(snapshot: DocumentSnapshot) -> Result<Self, SnapshotError> {
        validate(&snapshot)?;

        let blocks = snapshot
            .blocks
            .into_iter()
            .map(|b| Block {
                id: b.id,
                fingerprint: b.fingerprint,
                kind: classify(&b.content, b.start_line),
                start_line: b.start_line,
                line_count: b.line_count,
                content: b.content,
                rendered: None,
            })
            .collect();

        Ok(Self {
            blocks,
            buffer: Rope::from(snapshot.raw_content.as_str()),
            normalized: normalize(&snapshot.raw_content),
            id_counter: snapshot.id_counter,
        })
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(&self.to_snapshot())?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Self::from_snapshot(serde_json::from_str(json)?)
    }
}

fn validate(snapshot: &DocumentSnapshot) -> Result<(), SnapshotError> {
    let mut seen = std::collections::HashSet::new();
    let mut prev: Option<&BlockSnapshot> = None;

    for block in &snapshot.blocks {
        if !seen.insert(block.id) {
            return Err(SnapshotError::DuplicateId(block.id));
        }
        if block.id.get() > snapshot.id_counter {
            return Err(SnapshotError::IdCounterBehind {
                counter: snapshot.id_counter,
                id: block.id,
            });
        }
        if Fingerprint::of(&block.content) != block.fingerprint {
            return Err(SnapshotError::FingerprintMismatch(block.id));
        }
        if let Some(prev) = prev {
            if block.start_line < prev.start_line {
                return Err(SnapshotError::OutOfOrder(block.id));
            }
            if block.start_line < prev.start_line + prev.line_count {
                return Err(SnapshotError::Overlap(block.id));
            }
        }
        prev = Some(block);
    }
    Ok(())
}
