//! Fingerprint matching between two block sequences.
//!
//! Matching is greedy and position-biased: each new block, left to right,
//! takes the not-yet-consumed old block with the same fingerprint that is
//! closest by index (ties go to the earlier old block). This is a locally
//! sensible matching, not a minimal edit script.
//!
//! Matches are then made order-preserving: they are accepted closest-first,
//! and one that would cross an accepted match is dropped, leaving its new
//! block as an `Insert` and its old block as a `Delete`. A moved block is
//! therefore always a delete plus an insert and never a move.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::identity::Fingerprint;

/// Outcome for one block position between two revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOp {
    /// New block `new_index` is old block `old_index`.
    Keep { new_index: usize, old_index: usize },
    /// New block with no counterpart in the old sequence.
    Insert { new_index: usize },
    /// Old block with no counterpart in the new sequence.
    Delete { old_index: usize },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub kept: usize,
    pub inserted: usize,
    pub removed: usize,
}

impl DiffStats {
    pub fn from_ops(ops: &[DiffOp]) -> Self {
        ops.iter().fold(Self::default(), |mut stats, op| {
            match op {
                DiffOp::Keep { .. } => stats.kept += 1,
                DiffOp::Insert { .. } => stats.inserted += 1,
                DiffOp::Delete { .. } => stats.removed += 1,
            }
            stats
        })
    }
}

/// Greedy nearest-index matching; returns `(new_index, old_index)` pairs.
fn match_nearest(old: &[Fingerprint], new: &[Fingerprint]) -> Vec<(usize, usize)> {
    let mut by_fingerprint: HashMap<Fingerprint, Vec<usize>> = HashMap::new();
    for (old_index, fp) in old.iter().enumerate() {
        by_fingerprint.entry(*fp).or_default().push(old_index);
    }

    let mut matches = Vec::new();
    for (new_index, fp) in new.iter().enumerate() {
        let Some(unconsumed) = by_fingerprint.get_mut(fp) else {
            continue;
        };
        let nearest = unconsumed
            .iter()
            .enumerate()
            .min_by_key(|(_, old_index)| old_index.abs_diff(new_index))
            .map(|(pos, _)| pos);
        if let Some(pos) = nearest {
            matches.push((new_index, unconsumed.remove(pos)));
        }
    }
    matches
}

/// Drops matches that cross a closer match so kept blocks stay in order.
fn order_preserving(mut matches: Vec<(usize, usize)>) -> BTreeMap<usize, usize> {
    matches.sort_by_key(|&(new_index, old_index)| (new_index.abs_diff(old_index), new_index));

    let mut accepted: BTreeMap<usize, usize> = BTreeMap::new();
    for (new_index, old_index) in matches {
        let after_previous = accepted
            .range(..new_index)
            .next_back()
            .is_none_or(|(_, &prev_old)| prev_old < old_index);
        let before_next = accepted
            .range(new_index + 1..)
            .next()
            .is_none_or(|(_, &next_old)| next_old > old_index);
        if after_previous && before_next {
            accepted.insert(new_index, old_index);
        } else {
            log::trace!("block moved from {old_index} to {new_index}; treating as delete + insert");
        }
    }
    accepted
}

/// Diffs two fingerprint sequences.
///
/// All `Delete`s come first in ascending old index, followed by one `Keep` or
/// `Insert` per new block in new order.
pub fn diff_blocks(old: &[Fingerprint], new: &[Fingerprint]) -> Vec<DiffOp> {
    let kept = order_preserving(match_nearest(old, new));

    let mut consumed = vec![false; old.len()];
    for &old_index in kept.values() {
        consumed[old_index] = true;
    }

    let deletes = consumed
        .iter()
        .enumerate()
        .filter(|(_, used)| !**used)
        .map(|(old_index, _)| DiffOp::Delete { old_index });

    let in_order = (0..new.len()).map(|new_index| match kept.get(&new_index) {
        Some(&old_index) => DiffOp::Keep {
            new_index,
            old_index,
        },
        None => DiffOp::Insert { new_index },
    });

    deletes.chain(in_order).collect()
}
