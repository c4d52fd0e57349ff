//! Inclusion proof generation and transport encoding.
//!
//! A proof carries the record's raw value, its index, and the digest of
//! the sibling of every node on the leaf's path, ordered leaf-to-root
//! (`h - 1` digests). Verification lives in `verify.rs` and needs no
//! store.

use bincode::{Decode, Encode};

use crate::{
    hash::Digest,
    indexer::{self, MAX_HEIGHT},
    Error, Result, TreeStore,
};

/// Decode size cap for untrusted proof bytes.
const MAX_PROOF_BYTES: usize = 16 * 1024 * 1024;

/// An inclusion proof for a single record.
///
/// Fields are `pub(crate)` so proofs can only be built by
/// [`generate`](InclusionProof::generate) or decoded (and structurally
/// validated) by [`decode_from_slice`](InclusionProof::decode_from_slice).
#[derive(Debug, Clone, Encode, Decode)]
pub struct InclusionProof {
    /// Height of the tree the proof was generated against.
    pub(crate) height: u8,
    /// Record index of the proved leaf.
    pub(crate) index: u64,
    /// Raw record value (empty for a placeholder leaf).
    pub(crate) value: Vec<u8>,
    /// Sibling digests from the leaf's level up to just below the root.
    pub(crate) siblings: Vec<Digest>,
}

impl InclusionProof {
    /// Generate a proof for the record at `index`.
    ///
    /// Walks the root-to-leaf path and collects each non-root path node's
    /// sibling (the other child of the same parent), reversed into
    /// leaf-to-root order. Fails with [`Error::IndexOutOfRange`] past the
    /// leaf capacity. An unset leaf is provable too: its value is the
    /// empty placeholder marker.
    pub fn generate(store: &TreeStore, index: u64) -> Result<Self> {
        let height = store.height();
        let capacity = store.leaf_capacity();
        if index >= capacity {
            return Err(Error::IndexOutOfRange { index, capacity });
        }

        let path = indexer::path_to_leaf(index, height);
        let mut siblings = Vec::with_capacity(height as usize - 1);
        for &slot in path.iter().skip(1).rev() {
            let sibling = if slot % 2 == 1 { slot + 1 } else { slot - 1 };
            siblings.push(store.digest(sibling));
        }

        let value = store.get_record(index)?.map(<[u8]>::to_vec).unwrap_or_default();

        Ok(InclusionProof {
            height,
            index,
            value,
            siblings,
        })
    }

    /// Record index of the proved leaf.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Raw record value covered by the proof.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Sibling digests in leaf-to-root order.
    pub fn siblings(&self) -> &[Digest] {
        &self.siblings
    }

    /// Tree height this proof was generated against.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let config = bincode::config::standard().with_big_endian().with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| Error::MalformedProof(format!("encode error: {}", e)))
    }

    /// Decode from bytes using bincode and validate the shape.
    ///
    /// Rejects heights outside `1..=32`, a sibling count other than
    /// `h - 1`, and an index past the leaf capacity, so a decoded proof
    /// is always structurally sound before any hashing happens.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<MAX_PROOF_BYTES>();
        let (proof, _): (Self, _) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| Error::MalformedProof(format!("decode error: {}", e)))?;
        proof.validate_shape()?;
        Ok(proof)
    }

    /// Structural validation shared by decoding and verification.
    pub(crate) fn validate_shape(&self) -> Result<()> {
        if !(1..=MAX_HEIGHT).contains(&self.height) {
            return Err(Error::MalformedProof(format!(
                "height {} out of range 1..={}",
                self.height, MAX_HEIGHT
            )));
        }
        let expected = self.height as usize - 1;
        if self.siblings.len() != expected {
            return Err(Error::MalformedProof(format!(
                "{} sibling digests, height {} requires {}",
                self.siblings.len(),
                self.height,
                expected
            )));
        }
        let capacity = indexer::leaf_capacity(self.height);
        if self.index >= capacity {
            return Err(Error::MalformedProof(format!(
                "index {} past leaf capacity {}",
                self.index, capacity
            )));
        }
        Ok(())
    }
}
