//! Array-backed Merkle tree over fixed-record binary datasets.
//!
//! Builds an authenticated complete binary hash tree over a dataset of
//! fixed-size records (for example a generated proof-of-work dataset), so
//! that any single record can later be proven to belong to the dataset
//! without shipping the dataset itself.
//!
//! Positions are indexed level-order (BFS): root = 0, left child = `2i+1`,
//! right child = `2i+2`. A tree of height `h` has `2^h - 1` node slots and
//! `2^(h-1)` leaf slots. Record indices map to leaf slots through an
//! LSB-first bit walk from the root; the same arithmetic drives leaf
//! insertion, parallel build partitioning, and proof paths.
//!
//! # Core types
//!
//! - [`DatasetMerkleTree`] — facade: open a dataset file, build, prove.
//! - [`TreeStore`] — the leaf value array and digest array.
//! - [`ParallelHasher`] — deterministic fork-join bottom-up hashing.
//! - [`InclusionProof`] — sibling-path proof (generate, encode, verify).
//! - [`HashPrimitive`] — pluggable digest function, blake3 by default.
//!
//! # Build pipeline
//!
//! Dataset file → [`Dataset::open`] → [`TreeStore`] → [`ParallelHasher`]
//! (or a cached digest array via [`digest_file`]) → proofs.

#![warn(missing_docs)]

mod builder;
mod dataset;
/// Persisted digest-array cache (read/write the flat hash file).
pub mod digest_file;
mod error;
mod hash;
/// Pure position arithmetic: heights, bit paths, subtree roots.
pub mod indexer;
mod proof;
mod store;
mod tree;
mod verify;

#[cfg(test)]
pub(crate) mod test_utils;

pub use builder::ParallelHasher;
pub use dataset::{Dataset, MAGIC_LEN};
pub use error::{Error, Result};
pub use hash::{
    placeholder_digest, Blake3Primitive, Digest, HashPrimitive, DIGEST_LEN, PLACEHOLDER_VALUE,
};
pub use proof::InclusionProof;
pub use store::TreeStore;
pub use tree::DatasetMerkleTree;
