//! Splits a full key hash into the group selector (H1) and fingerprint
//! (H2), and a fast non-cryptographic [`Hasher`]/[`BuildHasher`] pair
//! grounded on the teacher's `u64_fold_hash_fast::fold_hash_fast`.

use std::hash::{BuildHasher, Hasher};

/// H1(h) = h >> 7 — selects the starting group (`spec.md` §4.1).
#[inline(always)]
pub(crate) fn h1(hash: u64) -> u64 {
    hash >> 7
}

const FOLD: u128 = 0x2d35_8dcc_aa6c_78a5;

/// The teacher's single-multiply fold, adapted from operating on one `u64`
/// key into a running [`Hasher`] state update over an arbitrary byte
/// stream.
#[inline(always)]
fn fold(state: u64, chunk: u64) -> u64 {
    let r = (state ^ chunk) as u128 * FOLD;
    ((r >> 64) as u64) ^ (r as u64)
}

/// A fast, non-cryptographic [`Hasher`]. Like the teacher's
/// `fold_hash_fast`, this trades DoS resistance for speed — callers who
/// need adversarial-input hardening should use [`std::collections::hash_map::RandomState`]
/// (the default) instead.
pub struct FoldHasher {
    state: u64,
}

impl FoldHasher {
    #[inline(always)]
    fn with_seed(seed: u64) -> Self {
        FoldHasher { state: seed }
    }
}

impl Hasher for FoldHasher {
    #[inline(always)]
    fn write(&mut self, mut bytes: &[u8]) {
        while bytes.len() >= 8 {
            let chunk = u64::from_ne_bytes(bytes[..8].try_into().unwrap());
            self.state = fold(self.state, chunk);
            bytes = &bytes[8..];
        }
        if !bytes.is_empty() {
            let mut buf = [0u8; 8];
            buf[..bytes.len()].copy_from_slice(bytes);
            self.state = fold(self.state, u64::from_ne_bytes(buf));
        }
    }

    #[inline(always)]
    fn write_u64(&mut self, i: u64) {
        self.state = fold(self.state, i);
    }

    #[inline(always)]
    fn finish(&self) -> u64 {
        self.state
    }
}

/// [`BuildHasher`] for [`FoldHasher`], seeded once at construction so every
/// [`FoldHasher`] it builds shares the same seed (mirroring the teacher's
/// per-table `seed: u64` field).
#[derive(Clone)]
pub struct FoldBuildHasher {
    seed: u64,
}

impl FoldBuildHasher {
    /// Builds a hasher factory seeded from the process-local random source.
    pub fn new() -> Self {
        FoldBuildHasher {
            seed: fastrand_seed(),
        }
    }
}

impl Default for FoldBuildHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildHasher for FoldBuildHasher {
    type Hasher = FoldHasher;

    #[inline(always)]
    fn build_hasher(&self) -> FoldHasher {
        FoldHasher::with_seed(self.seed)
    }
}

/// Picks a fresh per-table seed, same as the teacher's tables seeding
/// themselves via `fastrand::Rng::with_seed`/`fastrand::u64` at construction.
fn fastrand_seed() -> u64 {
    fastrand::u64(..)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn h1_drops_the_fingerprint_bits() {
        assert_eq!(h1(0x7f), 0);
        assert_eq!(h1(0xff), 1);
    }

    #[test]
    fn fold_hasher_is_deterministic_for_a_fixed_seed() {
        let build = FoldBuildHasher { seed: 42 };
        let mut a = build.build_hasher();
        let mut b = build.build_hasher();
        a.write(b"hello world");
        b.write(b"hello world");
        assert_eq!(a.finish(), b.finish());
    }

    #[test]
    fn fold_hasher_distinguishes_inputs() {
        let build = FoldBuildHasher { seed: 7 };
        let mut a = build.build_hasher();
        let mut b = build.build_hasher();
        a.write(b"abc");
        b.write(b"abd");
        assert_ne!(a.finish(), b.finish());
    }
}
