//! Declarative UI mutation commands and their synthesis from diff ops.
//!
//! Commands are handed to an external executor that applies them, in order,
//! to a UI tree keyed by block id. Within one batch every `Remove` precedes
//! every `Append`/`InsertBefore`, and an `InsertBefore` only references a
//! block that is kept, so the reference is always present when used.

use serde::{Deserialize, Serialize};

use crate::editing::{
    diff::DiffOp,
    document::{Block, BlockId},
};
use crate::identity::Fingerprint;

/// Attributes stamped on the UI node of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockAttrs {
    pub block_id: BlockId,
    pub fingerprint: Fingerprint,
    pub start_line: usize,
    pub line_count: usize,
}

/// Attributes that changed on a kept block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_count: Option<usize>,
}

impl PartialAttrs {
    pub fn is_empty(&self) -> bool {
        self.start_line.is_none() && self.line_count.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum MutationCommand {
    /// Remove every block node.
    Clear,
    /// Add a block node at the end.
    Append {
        block_id: BlockId,
        content: String,
        attrs: BlockAttrs,
    },
    /// Add a block node before the node of `ref_block_id`.
    InsertBefore {
        block_id: BlockId,
        content: String,
        ref_block_id: BlockId,
        attrs: BlockAttrs,
    },
    Remove {
        block_id: BlockId,
    },
    /// Swap a block node's content in place.
    Replace {
        block_id: BlockId,
        content: String,
        attrs: BlockAttrs,
    },
    UpdateAttrs {
        block_id: BlockId,
        attrs: PartialAttrs,
    },
}

impl MutationCommand {
    /// The block this command targets; `None` for `Clear`.
    pub fn block_id(&self) -> Option<BlockId> {
        match self {
            MutationCommand::Clear => None,
            MutationCommand::Append { block_id, .. }
            | MutationCommand::InsertBefore { block_id, .. }
            | MutationCommand::Remove { block_id }
            | MutationCommand::Replace { block_id, .. }
            | MutationCommand::UpdateAttrs { block_id, .. } => Some(*block_id),
        }
    }

    pub fn append(block: &Block) -> Self {
        MutationCommand::Append {
            block_id: block.id,
            content: block.content.clone(),
            attrs: block.attrs(),
        }
    }

    pub fn insert_before(block: &Block, ref_block_id: BlockId) -> Self {
        MutationCommand::InsertBefore {
            block_id: block.id,
            content: block.content.clone(),
            ref_block_id,
            attrs: block.attrs(),
        }
    }
}

/// Commands for a first render: clear, then append every block.
pub fn initial_commands(blocks: &[Block]) -> Vec<MutationCommand> {
    std::iter::once(MutationCommand::Clear)
        .chain(blocks.iter().map(MutationCommand::append))
        .collect()
}

/// Turns diff ops into commands.
///
/// `old` and `new` are the block sequences the ops index into; `new` must
/// already carry its assigned ids.
pub fn synthesize(ops: &[DiffOp], old: &[Block], new: &[Block]) -> Vec<MutationCommand> {
    let mut commands = Vec::with_capacity(ops.len());

    for op in ops {
        if let DiffOp::Delete { old_index } = op {
            commands.push(MutationCommand::Remove {
                block_id: old[*old_index].id,
            });
        }
    }

    // next_keep[j]: id of the first kept block at or after new position j.
    let mut next_keep = vec![None; new.len() + 1];
    let mut kept_at = vec![false; new.len()];
    for op in ops {
        if let DiffOp::Keep { new_index, .. } = op {
            kept_at[*new_index] = true;
        }
    }
    for j in (0..new.len()).rev() {
        next_keep[j] = if kept_at[j] {
            Some(new[j].id)
        } else {
            next_keep[j + 1]
        };
    }

    for op in ops {
        match *op {
            DiffOp::Delete { .. } => {}
            DiffOp::Keep {
                new_index,
                old_index,
            } => {
                let (before, after) = (&old[old_index], &new[new_index]);
                let attrs = PartialAttrs {
                    start_line: (before.start_line != after.start_line)
                        .then_some(after.start_line),
                    line_count: (before.line_count != after.line_count)
                        .then_some(after.line_count),
                };
                if !attrs.is_empty() {
                    commands.push(MutationCommand::UpdateAttrs {
                        block_id: after.id,
                        attrs,
                    });
                }
            }
            DiffOp::Insert { new_index } => {
                let block = &new[new_index];
                commands.push(match next_keep[new_index + 1] {
                    Some(ref_id) => MutationCommand::insert_before(block, ref_id),
                    None => MutationCommand::append(block),
                });
            }
        }
    }

    commands
}
