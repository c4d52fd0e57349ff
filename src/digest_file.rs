//! Flat-file persistence for the digest array.
//!
//! One 32-byte digest per slot in array order, root first, and nothing
//! else — `(2^h - 1) × 32` bytes total. The file acts as a cache in front
//! of the parallel build: a missing file or a length mismatch is a cache
//! miss, not a failure.

use std::{
    fs::File,
    io::{BufReader, BufWriter, ErrorKind, Read, Write},
    path::Path,
};

use crate::{
    hash::{Digest, DIGEST_LEN},
    Result,
};

/// Write the digest array in slot order.
pub fn write<P: AsRef<Path>>(path: P, digests: &[Digest]) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    for digest in digests {
        writer.write_all(digest)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a digest array back, expecting exactly `expected_slots` digests.
///
/// Returns `None` when the file does not exist or its length does not
/// match — the caller falls back to recomputing. Genuine read failures
/// still surface as [`Error::Io`].
///
/// [`Error::Io`]: crate::Error::Io
pub fn read<P: AsRef<Path>>(path: P, expected_slots: usize) -> Result<Option<Vec<Digest>>> {
    let file = match File::open(path.as_ref()) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let len = file.metadata()?.len();
    if len != (expected_slots * DIGEST_LEN) as u64 {
        return Ok(None);
    }

    let mut reader = BufReader::new(file);
    let mut digests = Vec::with_capacity(expected_slots);
    let mut digest = [0u8; DIGEST_LEN];
    for _ in 0..expected_slots {
        reader.read_exact(&mut digest)?;
        digests.push(digest);
    }
    Ok(Some(digests))
}
