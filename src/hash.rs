//! Hash primitive abstraction and placeholder digests.
//!
//! The tree only ever needs two operations: hash a byte string, and hash
//! the concatenation of two digests. Both are routed through
//! [`HashPrimitive`] so callers that feed proofs into a zero-knowledge
//! circuit can substitute an algebraically circuit-friendly hash; the
//! default is blake3, matching the rest of the stack.

/// Fixed digest size in bytes.
pub const DIGEST_LEN: usize = 32;

/// A node or leaf digest.
pub type Digest = [u8; DIGEST_LEN];

/// The well-known empty marker stored in unset leaf slots.
///
/// Its digest (the placeholder digest) stands in for unset leaves so that
/// partially filled trees hash deterministically across independent
/// builds.
pub const PLACEHOLDER_VALUE: &[u8] = b"";

/// A deterministic, collision-resistant hash with a fixed 32-byte output.
///
/// Implementations are stateless; both operations are associated
/// functions so workers can call them without sharing any instance.
pub trait HashPrimitive {
    /// Hash an arbitrary byte string.
    fn hash(data: &[u8]) -> Digest;

    /// Hash the concatenation `left || right`.
    ///
    /// Must equal `Self::hash` of the 64-byte concatenation; the default
    /// implementation does exactly that.
    fn combine(left: &Digest, right: &Digest) -> Digest {
        let mut buf = [0u8; 2 * DIGEST_LEN];
        buf[..DIGEST_LEN].copy_from_slice(left);
        buf[DIGEST_LEN..].copy_from_slice(right);
        Self::hash(&buf)
    }
}

/// The default [`HashPrimitive`], backed by blake3.
#[derive(Debug, Clone, Copy)]
pub struct Blake3Primitive;

impl HashPrimitive for Blake3Primitive {
    fn hash(data: &[u8]) -> Digest {
        *blake3::hash(data).as_bytes()
    }

    fn combine(left: &Digest, right: &Digest) -> Digest {
        let mut hasher = blake3::Hasher::new();
        hasher.update(left);
        hasher.update(right);
        *hasher.finalize().as_bytes()
    }
}

/// Digest of the empty marker, computed from the primitive rather than
/// hand-copied.
pub fn placeholder_digest<H: HashPrimitive>() -> Digest {
    H::hash(PLACEHOLDER_VALUE)
}

/// Placeholder digests per level above the leaves.
///
/// `table[0]` is the leaf placeholder digest; `table[l]` is the digest of
/// an internal node whose entire subtree of depth `l` is placeholders.
/// Powers the all-placeholder subtree short-circuit in the builder.
pub(crate) fn placeholder_levels<H: HashPrimitive>(levels: usize) -> Vec<Digest> {
    let mut table = Vec::with_capacity(levels);
    table.push(placeholder_digest::<H>());
    for l in 1..levels {
        let below = table[l - 1];
        table.push(H::combine(&below, &below));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_matches_concatenated_hash() {
        let a = Blake3Primitive::hash(b"a");
        let b = Blake3Primitive::hash(b"b");
        let mut cat = Vec::new();
        cat.extend_from_slice(&a);
        cat.extend_from_slice(&b);
        assert_eq!(
            Blake3Primitive::combine(&a, &b),
            Blake3Primitive::hash(&cat)
        );
    }

    #[test]
    fn placeholder_levels_chain_upward() {
        let table = placeholder_levels::<Blake3Primitive>(4);
        assert_eq!(table[0], placeholder_digest::<Blake3Primitive>());
        for l in 1..4 {
            assert_eq!(
                table[l],
                Blake3Primitive::combine(&table[l - 1], &table[l - 1])
            );
        }
    }
}
