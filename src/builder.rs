//! Deterministic fork-join bottom-up hashing of the tree.
//!
//! The top `k = log2(workers)` levels partition the tree into `2^k`
//! disjoint subtrees rooted at depth `k`. Each worker hashes its subtree
//! bottom-up into a private buffer, so no slot is ever written by two
//! threads; after the join the orchestrator copies the buffers into the
//! shared digest array and finishes the cheap top `k` levels on one
//! thread. The result is byte-identical for any power-of-two worker
//! count.

use std::{marker::PhantomData, path::Path};

use rayon::prelude::*;

use crate::{
    digest_file,
    hash::{placeholder_levels, Blake3Primitive, Digest, HashPrimitive},
    indexer, Error, Result, TreeStore,
};

/// Computes the digest array for a populated [`TreeStore`].
#[derive(Debug, Clone)]
pub struct ParallelHasher<H: HashPrimitive = Blake3Primitive> {
    workers: usize,
    _hash: PhantomData<H>,
}

impl<H: HashPrimitive> ParallelHasher<H> {
    /// Create a hasher with a fixed worker count.
    ///
    /// The count must be a power of two: the partition scheme assigns one
    /// depth-`k` subtree per worker, so only `2^k` workers divide the
    /// tree evenly.
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 || !workers.is_power_of_two() {
            return Err(Error::InvalidData(format!(
                "worker count must be a power of two, got {}",
                workers
            )));
        }
        Ok(Self {
            workers,
            _hash: PhantomData,
        })
    }

    /// Configured worker count.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Levels claimed by the partition phase for a tree of `height`.
    ///
    /// Clamped so that a worker surplus (more workers than leaves)
    /// degenerates to one leaf per subtree instead of overrunning the
    /// tree.
    fn partition_depth(&self, height: u8) -> u8 {
        (self.workers.trailing_zeros() as u8).min(height - 1)
    }

    /// Hash the whole tree bottom-up, filling the store's digest array.
    ///
    /// Deterministic for fixed leaf content regardless of worker count. A
    /// failed worker aborts the build with [`Error::BuildFailure`] and
    /// leaves no partial result in the store.
    pub fn build(&self, store: &mut TreeStore) -> Result<()> {
        let height = store.height();
        let k = self.partition_depth(height);
        let subtree_height = height - k;
        let placeholders = placeholder_levels::<H>(subtree_height as usize);

        // Planning and execution share the same arithmetic: these roots
        // are the only slots each worker's buffer will be merged back to.
        let roots: Vec<usize> = (0..1u64 << k).map(|j| indexer::bit_walk(j, k)).collect();

        let buffers: Vec<Vec<Digest>> = if k == 0 {
            vec![hash_subtree::<H>(store, roots[0], subtree_height, &placeholders)?]
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.workers)
                .build()
                .map_err(|e| Error::BuildFailure(e.to_string()))?;
            pool.install(|| {
                roots
                    .par_iter()
                    .map(|&root| hash_subtree::<H>(store, root, subtree_height, &placeholders))
                    .collect::<Result<Vec<_>>>()
            })?
        };

        // Join barrier passed: copy every subtree buffer into the shared
        // array. Each level of a subtree is a contiguous slot range.
        for (&root, buffer) in roots.iter().zip(&buffers) {
            for level in 0..subtree_height as usize {
                let width = 1usize << level;
                let local_start = width - 1;
                let global_start = ((root + 1) << level) - 1;
                store.digests_mut()[global_start..global_start + width]
                    .copy_from_slice(&buffer[local_start..local_start + width]);
            }
        }

        // Finish the top k levels single-threaded; every child digest now
        // exists.
        for slot in (0..(1usize << k) - 1).rev() {
            let combined = H::combine(&store.digest(2 * slot + 1), &store.digest(2 * slot + 2));
            store.set_digest(slot, combined);
        }

        Ok(())
    }

    /// Build, consulting a persisted digest array first.
    ///
    /// A readable file of exactly `2^h - 1` digests is trusted as-is (the
    /// computation is pure; dataset-identity invalidation is the caller's
    /// policy). Anything else is a cache miss: the tree is hashed and the
    /// file rewritten. Returns `true` on a cache hit.
    pub fn build_or_load(&self, store: &mut TreeStore, digest_path: &Path) -> Result<bool> {
        if let Some(digests) = digest_file::read(digest_path, store.node_count())? {
            store.replace_digests(digests)?;
            return Ok(true);
        }
        self.build(store)?;
        digest_file::write(digest_path, store.digests())?;
        Ok(false)
    }
}

/// Hash one depth-`k` subtree bottom-up into a private buffer.
///
/// The buffer is a complete tree of `subtree_height` levels in local
/// level-order; leaves are read from the store's global leaf slots. An
/// all-placeholder subtree short-circuits to the precomputed per-level
/// placeholder digests, which is bit-identical to hashing it out.
fn hash_subtree<H: HashPrimitive>(
    store: &TreeStore,
    root: usize,
    subtree_height: u8,
    placeholders: &[Digest],
) -> Result<Vec<Digest>> {
    let levels = subtree_height as usize;
    let local_len = (1usize << levels) - 1;
    let first_leaf = (1usize << (levels - 1)) - 1;
    let leaf_base = ((root + 1) << (levels - 1)) - 1;

    if leaf_base + first_leaf + 1 > store.node_count() {
        // A planning/execution mismatch would corrupt disjointness; fail
        // the build rather than write out of range.
        return Err(Error::BuildFailure(format!(
            "subtree at {} exceeds {} slots",
            root,
            store.node_count()
        )));
    }

    let mut local = vec![[0u8; 32]; local_len];

    let mut all_placeholder = true;
    for offset in 0..=first_leaf {
        local[first_leaf + offset] = match store.leaf_value_by_slot(leaf_base + offset) {
            Some(value) => {
                all_placeholder = false;
                H::hash(value)
            }
            None => placeholders[0],
        };
    }

    if all_placeholder {
        for level in 0..levels - 1 {
            let width = 1usize << level;
            local[width - 1..2 * width - 1].fill(placeholders[levels - 1 - level]);
        }
        return Ok(local);
    }

    for slot in (0..first_leaf).rev() {
        local[slot] = H::combine(&local[2 * slot + 1], &local[2 * slot + 2]);
    }

    Ok(local)
}
