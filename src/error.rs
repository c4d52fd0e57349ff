use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from dataset Merkle tree operations.
///
/// A proof that does not check out is NOT an error: [`verify`] returns
/// `Ok(false)` for a digest mismatch. Only structurally broken proofs
/// surface as [`Error::MalformedProof`].
///
/// [`verify`]: crate::InclusionProof::verify
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset or digest file could not be read or written.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A record index past the tree's leaf capacity.
    #[error("record index {index} out of range (leaf capacity {capacity})")]
    IndexOutOfRange {
        /// The offending record index.
        index: u64,
        /// Leaf capacity of the tree, `2^(h-1)`.
        capacity: u64,
    },

    /// A value lookup found no matching record. Signals absence, not
    /// corruption.
    #[error("no record with the requested value")]
    NotFound,

    /// A proof whose shape does not fit any tree (wrong sibling count,
    /// impossible height, out-of-range index).
    #[error("malformed proof: {0}")]
    MalformedProof(String),

    /// A hashing worker failed; the whole build is aborted and no partial
    /// digest array is published.
    #[error("parallel hash build failed: {0}")]
    BuildFailure(String),

    /// Structurally invalid input (bad height, wrong record length,
    /// worker count not a power of two, truncated dataset framing).
    #[error("invalid data: {0}")]
    InvalidData(String),
}
