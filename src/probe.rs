//! Triangular-number probe sequence over groups (`spec.md` §4.1).
//!
//! Grounded on the teacher's `direct_simd_quadratic_probing::ProbeSeq`,
//! unchanged: this already implements the spec's normative triangular
//! probing rather than the linear variant the spec calls out as an
//! intentional correction in §4.1 / §9.

/// Visits every group exactly once (when `group_mask + 1` is a power of
/// two) via `g_{i+1} = (g_i + i + 1) mod group_count`.
#[derive(Clone, Copy)]
pub(crate) struct ProbeSeq {
    pub(crate) group: usize,
    stride: usize,
}

impl ProbeSeq {
    #[inline(always)]
    pub(crate) fn new(h1: u64, group_mask: usize) -> Self {
        ProbeSeq {
            group: (h1 as usize) & group_mask,
            stride: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn move_next(&mut self, group_mask: usize) {
        debug_assert!(
            self.stride <= group_mask,
            "probe sequence exceeded group count; I1 has been violated"
        );
        self.stride += 1;
        self.group = (self.group + self.stride) & group_mask;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn visits_every_group_exactly_once() {
        for group_count_pow2 in 0..8 {
            let group_count = 1usize << group_count_pow2;
            let group_mask = group_count - 1;
            for h1 in 0..group_count as u64 {
                let mut seq = ProbeSeq::new(h1, group_mask);
                let mut seen = HashSet::new();
                for _ in 0..group_count {
                    assert!(seen.insert(seq.group), "group visited twice");
                    seq.move_next(group_mask);
                }
                assert_eq!(seen.len(), group_count);
            }
        }
    }
}
