//! Proof verification. Pure — no store required.
//!
//! Recomputes a running digest from the leaf value upward, consuming the
//! sibling digests in the leaf-to-root order generation produced. The
//! index bit at each level decides which side of the concatenation the
//! running digest takes: bit 0 means the path node is the left child.
//!
//! A digest mismatch is `Ok(false)`, never an error; "the proof does not
//! check out" is an expected first-class outcome. Only structurally
//! broken proofs error out as `MalformedProof`.

use crate::{
    hash::{Blake3Primitive, Digest, HashPrimitive},
    proof::InclusionProof,
    Result,
};

impl InclusionProof {
    /// Verify against an expected root using the default blake3
    /// primitive.
    pub fn verify(&self, expected_root: &Digest) -> Result<bool> {
        self.verify_with::<Blake3Primitive>(expected_root)
    }

    /// Verify against an expected root using a caller-chosen primitive.
    ///
    /// Must be the same primitive the tree was built with.
    pub fn verify_with<H: HashPrimitive>(&self, expected_root: &Digest) -> Result<bool> {
        self.validate_shape()?;

        let mut running = H::hash(&self.value);
        // siblings[i] sits at depth h-1-i; the step into that depth
        // consumed index bit h-2-i.
        for (i, sibling) in self.siblings.iter().enumerate() {
            let level = self.height as usize - 2 - i;
            running = if (self.index >> level) & 1 == 0 {
                H::combine(&running, sibling)
            } else {
                H::combine(sibling, &running)
            };
        }

        Ok(running == *expected_root)
    }
}
