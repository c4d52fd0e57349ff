//! Facade tying the dataset reader, store, hasher, and proof engine
//! together.

use std::{marker::PhantomData, path::Path};

use crate::{
    hash::{Blake3Primitive, Digest, HashPrimitive},
    indexer, Dataset, InclusionProof, ParallelHasher, Result, TreeStore,
};

/// An authenticated Merkle tree built once over a fixed-record dataset
/// file.
///
/// Construction runs the whole pipeline: read the dataset sequentially,
/// size the tree from the record count, hash it with the requested worker
/// count (or load a persisted digest array), then serve proofs.
#[derive(Debug)]
pub struct DatasetMerkleTree<H: HashPrimitive = Blake3Primitive> {
    store: TreeStore,
    element_count: u64,
    magic: u64,
    _hash: PhantomData<H>,
}

impl<H: HashPrimitive> DatasetMerkleTree<H> {
    /// Build a tree from a dataset file.
    ///
    /// `workers` must be a power of two; the build is deterministic
    /// regardless of its value.
    pub fn from_dataset<P: AsRef<Path>>(
        path: P,
        element_size: usize,
        workers: usize,
    ) -> Result<Self> {
        Self::load(path, element_size, workers, None)
    }

    /// Like [`from_dataset`](Self::from_dataset), with a digest-array
    /// cache file in front of the hashing pass.
    ///
    /// A valid cache file skips hashing entirely; a fresh build writes
    /// one.
    pub fn from_dataset_cached<P: AsRef<Path>, Q: AsRef<Path>>(
        path: P,
        element_size: usize,
        workers: usize,
        digest_path: Q,
    ) -> Result<Self> {
        Self::load(path, element_size, workers, Some(digest_path.as_ref()))
    }

    fn load<P: AsRef<Path>>(
        path: P,
        element_size: usize,
        workers: usize,
        digest_path: Option<&Path>,
    ) -> Result<Self> {
        let dataset = Dataset::open(path, element_size)?;
        let magic = dataset.magic();
        let element_count = dataset.element_count();
        let height = indexer::height_for_count(element_count);

        let mut store = TreeStore::new(height, element_size)?;
        dataset.load_into(&mut store)?;

        let hasher = ParallelHasher::<H>::new(workers)?;
        match digest_path {
            Some(digest_path) => {
                hasher.build_or_load(&mut store, digest_path)?;
            }
            None => hasher.build(&mut store)?,
        }

        Ok(Self {
            store,
            element_count,
            magic,
            _hash: PhantomData,
        })
    }

    /// The tree root digest, slot 0 — the one value a verifier trusts
    /// out-of-band.
    pub fn root(&self) -> Digest {
        self.store.root()
    }

    /// Height of the tree.
    pub fn height(&self) -> u8 {
        self.store.height()
    }

    /// Number of real records read from the dataset.
    pub fn element_count(&self) -> u64 {
        self.element_count
    }

    /// The dataset file's magic value.
    pub fn magic(&self) -> u64 {
        self.magic
    }

    /// Read a record back, `None` for an unset (placeholder) slot.
    pub fn record(&self, index: u64) -> Result<Option<&[u8]>> {
        self.store.get_record(index)
    }

    /// Generate an inclusion proof for the record at `index`.
    pub fn prove(&self, index: u64) -> Result<InclusionProof> {
        InclusionProof::generate(&self.store, index)
    }

    /// First record index holding `value`, by linear scan.
    ///
    /// O(ElementCount) — see [`TreeStore::find_index_by_value`].
    pub fn index_of_value(&self, value: &[u8]) -> Result<u64> {
        self.store.find_index_by_value(value)
    }

    /// The underlying store (leaf values and the full digest array).
    pub fn store(&self) -> &TreeStore {
        &self.store
    }
}
