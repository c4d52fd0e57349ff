//! The tree's backing arrays: leaf values and node digests.

use crate::{
    hash::Digest,
    indexer::{self, validate_height},
    Error, Result,
};

/// Owner of the two parallel flat arrays backing one tree instance.
///
/// Both arrays are `2^h - 1` long and indexed level-order. Leaf values
/// live in the leaf slots of `values` (internal slots stay `None`
/// forever); `digests` covers every slot including the root at 0.
///
/// Build-once semantics: records are inserted up front, the digest array
/// is computed once by [`ParallelHasher`], and is logically immutable
/// afterward.
///
/// [`ParallelHasher`]: crate::ParallelHasher
#[derive(Debug, Clone)]
pub struct TreeStore {
    height: u8,
    element_size: usize,
    values: Vec<Option<Vec<u8>>>,
    digests: Vec<Digest>,
}

impl TreeStore {
    /// Create an empty store for a tree of the given height and record
    /// size.
    pub fn new(height: u8, element_size: usize) -> Result<Self> {
        validate_height(height)?;
        if element_size == 0 {
            return Err(Error::InvalidData("element size must be non-zero".into()));
        }
        let slots = indexer::node_count(height);
        Ok(Self {
            height,
            element_size,
            values: vec![None; slots],
            digests: vec![[0u8; 32]; slots],
        })
    }

    /// Height of the tree.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Fixed record size in bytes.
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Number of leaf slots, `2^(h-1)`.
    pub fn leaf_capacity(&self) -> u64 {
        indexer::leaf_capacity(self.height)
    }

    /// Total node slots, `2^h - 1`.
    pub fn node_count(&self) -> usize {
        self.digests.len()
    }

    /// Write a record into the leaf slot for `index`.
    ///
    /// Re-inserting at an already used index overwrites that record.
    pub fn set_record(&mut self, index: u64, value: &[u8]) -> Result<()> {
        let capacity = self.leaf_capacity();
        if index >= capacity {
            return Err(Error::IndexOutOfRange { index, capacity });
        }
        if value.len() != self.element_size {
            return Err(Error::InvalidData(format!(
                "record {} has length {}, expected {}",
                index,
                value.len(),
                self.element_size
            )));
        }
        let slot = indexer::leaf_position(index, self.height);
        self.values[slot] = Some(value.to_vec());
        Ok(())
    }

    /// Read the record at `index` back, or `None` if the slot was never
    /// set (a placeholder read).
    pub fn get_record(&self, index: u64) -> Result<Option<&[u8]>> {
        let capacity = self.leaf_capacity();
        if index >= capacity {
            return Err(Error::IndexOutOfRange { index, capacity });
        }
        let slot = indexer::leaf_position(index, self.height);
        Ok(self.values[slot].as_deref())
    }

    /// Raw leaf read by slot, used by the hashing workers.
    pub(crate) fn leaf_value_by_slot(&self, slot: usize) -> Option<&[u8]> {
        self.values[slot].as_deref()
    }

    /// Digest at a node slot.
    pub fn digest(&self, slot: usize) -> Digest {
        self.digests[slot]
    }

    /// Overwrite the digest at a node slot.
    pub fn set_digest(&mut self, slot: usize, digest: Digest) {
        self.digests[slot] = digest;
    }

    /// The whole digest array in slot order, root first.
    pub fn digests(&self) -> &[Digest] {
        &self.digests
    }

    pub(crate) fn digests_mut(&mut self) -> &mut [Digest] {
        &mut self.digests
    }

    /// Replace the digest array wholesale (cache load path).
    ///
    /// Fails with [`Error::InvalidData`] on a slot-count mismatch.
    pub fn replace_digests(&mut self, digests: Vec<Digest>) -> Result<()> {
        if digests.len() != self.digests.len() {
            return Err(Error::InvalidData(format!(
                "digest array has {} slots, tree has {}",
                digests.len(),
                self.digests.len()
            )));
        }
        self.digests = digests;
        Ok(())
    }

    /// The tree root, slot 0.
    pub fn root(&self) -> Digest {
        self.digests[0]
    }

    /// Linear scan for the first record (in record-index order) equal to
    /// `value`.
    ///
    /// O(ElementCount); not meant for hot paths. Callers that need fast
    /// value lookup should maintain their own value-to-index map while
    /// inserting.
    pub fn find_index_by_value(&self, value: &[u8]) -> Result<u64> {
        for index in 0..self.leaf_capacity() {
            let slot = indexer::leaf_position(index, self.height);
            if self.values[slot].as_deref() == Some(value) {
                return Ok(index);
            }
        }
        Err(Error::NotFound)
    }
}
