//! Group-parallel scan over a 16-slot window of the control array.
//!
//! The SWAR implementation in [`generic`] is the normative reference: every
//! specialization must return bit-for-bit identical masks for the same
//! 16 control bytes. Selection mirrors the teacher's `control/group/mod.rs`
//! dispatch between a SIMD specialization and a portable fallback.

cfg_if::cfg_if! {
    if #[cfg(all(
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "sse2",
        not(miri),
    ))] {
        // Only needed to cross-check `sse2`'s mask contract in tests; the
        // teacher's own dispatch (`control/group/mod.rs`) likewise compiles
        // just one specialization per arm outside of `cfg(test)`.
        #[cfg(test)]
        mod generic;
        mod sse2;
        use sse2 as imp;
    } else {
        mod generic;
        use generic as imp;
    }
}

pub(crate) use imp::Group;
