//! Shared fixtures for tests.

use std::{fs::File, io::Write, path::Path};

use byteorder::{LittleEndian, WriteBytesExt};
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

use crate::{Blake3Primitive, ParallelHasher, TreeStore};

/// Write a dataset file: 8-byte little-endian magic, then the records
/// back to back.
pub(crate) fn write_dataset_file(path: &Path, magic: u64, records: &[Vec<u8>]) {
    let mut file = File::create(path).expect("create dataset file");
    file.write_u64::<LittleEndian>(magic).expect("write magic");
    for record in records {
        file.write_all(record).expect("write record");
    }
}

/// Deterministic pseudo-random records of a fixed size.
pub(crate) fn random_records(count: usize, size: usize, seed: u64) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let mut record = vec![0u8; size];
            rng.fill_bytes(&mut record);
            record
        })
        .collect()
}

/// A store populated with the given records and hashed with one worker.
pub(crate) fn built_store(records: &[Vec<u8>], element_size: usize) -> TreeStore {
    let height = crate::indexer::height_for_count(records.len() as u64);
    let mut store = TreeStore::new(height, element_size).expect("valid height");
    for (i, record) in records.iter().enumerate() {
        store.set_record(i as u64, record).expect("in range");
    }
    ParallelHasher::<Blake3Primitive>::new(1)
        .expect("one worker")
        .build(&mut store)
        .expect("build");
    store
}

/// A record count in `[min, max]` drawn from the seed, for shapes that
/// are not powers of two.
pub(crate) fn odd_count(seed: u64, min: usize, max: usize) -> usize {
    StdRng::seed_from_u64(seed).gen_range(min..=max)
}
