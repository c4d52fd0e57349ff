//! Pure position arithmetic for the flat complete-binary-tree layout.
//!
//! Everything here is shared by leaf insertion, the parallel build
//! partitioner, and the proof engine. The record-index-to-slot mapping
//! walks the index bits LSB-first from the root; using the identical walk
//! in all three places is what keeps proofs verifiable, so no component
//! re-derives positions on its own.

use crate::{Error, Result};

/// Maximum supported tree height.
///
/// Bounds every shift in this module and keeps in-memory arrays
/// addressable; `2^32 - 1` slots is already past what fits in RAM at 32
/// bytes per digest.
pub const MAX_HEIGHT: u8 = 32;

/// Validate that a height is in `1..=MAX_HEIGHT`.
pub(crate) fn validate_height(height: u8) -> Result<()> {
    if !(1..=MAX_HEIGHT).contains(&height) {
        return Err(Error::InvalidData(format!(
            "height must be between 1 and {}, got {}",
            MAX_HEIGHT, height
        )));
    }
    Ok(())
}

/// Smallest height `h` with `2^(h-1) >= element_count`.
///
/// `height_for_count(0)` and `height_for_count(1)` are both 1: a
/// root-only tree.
pub fn height_for_count(element_count: u64) -> u8 {
    let mut level = 0u8;
    while level < 63 && (1u64 << level) < element_count {
        level += 1;
    }
    level + 1
}

/// Total node slots in a tree of the given height, `2^h - 1`.
pub fn node_count(height: u8) -> usize {
    (1usize << height) - 1
}

/// Leaf slots in a tree of the given height, `2^(h-1)`.
pub fn leaf_capacity(height: u8) -> u64 {
    1u64 << (height - 1)
}

/// Slot of the first (leftmost) leaf, `2^(h-1) - 1`.
pub fn first_leaf_slot(height: u8) -> usize {
    (1usize << (height - 1)) - 1
}

/// Walk `steps` bits of `index` LSB-first from the root, taking the right
/// child on a 1 bit and the left child on a 0 bit.
///
/// With `steps = h - 1` this is the record-index-to-leaf-slot mapping;
/// with `steps = k` it addresses the subtree root assigned to worker
/// `index` during a parallel build.
pub fn bit_walk(index: u64, steps: u8) -> usize {
    let mut slot = 0usize;
    for bit in 0..steps {
        slot = if (index >> bit) & 1 == 1 {
            2 * slot + 2
        } else {
            2 * slot + 1
        };
    }
    slot
}

/// Leaf slot for a record index in a tree of the given height.
pub fn leaf_position(index: u64, height: u8) -> usize {
    bit_walk(index, height - 1)
}

/// Slots from the root down to a record's leaf, inclusive (`h` entries).
pub fn path_to_leaf(index: u64, height: u8) -> Vec<usize> {
    let mut path = Vec::with_capacity(height as usize);
    let mut slot = 0usize;
    path.push(slot);
    for bit in 0..height - 1 {
        slot = if (index >> bit) & 1 == 1 {
            2 * slot + 2
        } else {
            2 * slot + 1
        };
        path.push(slot);
    }
    path
}

/// Inverse of [`leaf_position`]: the record index stored at a leaf slot.
///
/// The leaf offset within its level carries the index bits MSB-first, so
/// the inverse is a bit reversal over `h - 1` bits.
pub fn record_index_for_slot(slot: usize, height: u8) -> u64 {
    let offset = slot - first_leaf_slot(height);
    let steps = (height - 1) as usize;
    let mut index = 0u64;
    for step in 0..steps {
        if (offset >> (steps - 1 - step)) & 1 == 1 {
            index |= 1 << step;
        }
    }
    index
}
