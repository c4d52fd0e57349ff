//! Sequential reader for the raw dataset file.
//!
//! Format: an 8-byte little-endian magic, then `element_count ×
//! element_size` bytes of fixed-size records. The element count is
//! derived from the file length; a body that is not a whole number of
//! records is rejected up front rather than discovered mid-read.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::{Error, Result, TreeStore};

/// Length of the magic prefix.
pub const MAGIC_LEN: usize = 8;

/// An open dataset file, positioned just past the magic.
///
/// Reading the records is a one-time sequential pass performed before any
/// hashing begins; [`load_into`](Dataset::load_into) consumes the reader.
#[derive(Debug)]
pub struct Dataset {
    reader: BufReader<File>,
    magic: u64,
    element_size: usize,
    element_count: u64,
}

impl Dataset {
    /// Open and validate the framing of a dataset file.
    pub fn open<P: AsRef<Path>>(path: P, element_size: usize) -> Result<Self> {
        if element_size == 0 {
            return Err(Error::InvalidData("element size must be non-zero".into()));
        }
        let file = File::open(path.as_ref())?;
        let len = file.metadata()?.len();
        if len < MAGIC_LEN as u64 {
            return Err(Error::InvalidData(format!(
                "dataset file is {} bytes, shorter than the {}-byte magic",
                len, MAGIC_LEN
            )));
        }
        let body = len - MAGIC_LEN as u64;
        if body % element_size as u64 != 0 {
            return Err(Error::InvalidData(format!(
                "dataset body of {} bytes is not a multiple of the {}-byte record size",
                body, element_size
            )));
        }

        let mut reader = BufReader::new(file);
        let magic = reader.read_u64::<LittleEndian>()?;

        Ok(Self {
            reader,
            magic,
            element_size,
            element_count: body / element_size as u64,
        })
    }

    /// The magic value from the file header.
    pub fn magic(&self) -> u64 {
        self.magic
    }

    /// Number of records in the file.
    pub fn element_count(&self) -> u64 {
        self.element_count
    }

    /// Fixed record size in bytes.
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Read every record once, in order, into the store.
    ///
    /// Record `i` lands at record index `i`. A short read surfaces as
    /// [`Error::Io`] and aborts construction.
    pub fn load_into(mut self, store: &mut TreeStore) -> Result<()> {
        let mut record = vec![0u8; self.element_size];
        for index in 0..self.element_count {
            self.reader.read_exact(&mut record)?;
            store.set_record(index, &record)?;
        }
        Ok(())
    }
}
