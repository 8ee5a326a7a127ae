//! SSE2 group scan: a single 128-bit load covers the spec's 16-slot group.
//! Grounded on the teacher's AVX2 `Group` (`control/group/avx2.rs`), narrowed
//! from a 32-byte to a 16-byte vector so the mask contract matches
//! [`super::generic`] bit-for-bit.

use crate::bitmask::BitMask;
use crate::tag::Tag;

#[cfg(target_arch = "x86")]
use core::arch::x86;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64 as x86;

#[derive(Copy, Clone)]
pub(crate) struct Group(x86::__m128i);

impl Group {
    pub(crate) const WIDTH: usize = 16;

    /// # Safety
    /// `ptr` must be valid for reads of `Self::WIDTH` bytes.
    #[inline(always)]
    pub(crate) unsafe fn load(ptr: *const Tag) -> Self {
        unsafe { Group(x86::_mm_loadu_si128(ptr.cast())) }
    }

    #[inline(always)]
    pub(crate) fn match_tag(self, tag: Tag) -> BitMask {
        unsafe {
            let cmp = x86::_mm_cmpeq_epi8(self.0, x86::_mm_set1_epi8(tag.0 as i8));
            BitMask(x86::_mm_movemask_epi8(cmp) as u16)
        }
    }

    #[inline(always)]
    pub(crate) fn match_empty(self) -> BitMask {
        self.match_tag(Tag::EMPTY)
    }

    /// A tag is EMPTY or DELETED iff its high bit is set.
    #[inline(always)]
    pub(crate) fn match_empty_or_deleted(self) -> BitMask {
        unsafe { BitMask(x86::_mm_movemask_epi8(self.0) as u16) }
    }
}
