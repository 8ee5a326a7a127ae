//! A single slot of the table: the entry payload plus its position in the
//! insertion-order layer.
//!
//! `key`/`value` are only initialized while the slot's control byte is
//! `FULL` (`spec.md` I2); `order_prev`/`order_next` are arena indices into
//! the same slot array rather than raw pointers, per the redesign note in
//! `spec.md` §9.

use std::mem::MaybeUninit;

/// Sentinel meaning "no such link" for `order_prev`/`order_next`.
pub(crate) const NIL: u32 = u32::MAX;

pub(crate) struct Slot<K, V> {
    pub(crate) key: MaybeUninit<K>,
    pub(crate) value: MaybeUninit<V>,
    /// Full hash cached at insertion time; the sole input to H1/H2 during
    /// rehash (`spec.md` §4.7).
    pub(crate) hash: u64,
    pub(crate) order_prev: u32,
    pub(crate) order_next: u32,
}

impl<K, V> Slot<K, V> {
    #[inline(always)]
    pub(crate) fn empty() -> Self {
        Slot {
            key: MaybeUninit::uninit(),
            value: MaybeUninit::uninit(),
            hash: 0,
            order_prev: NIL,
            order_next: NIL,
        }
    }

    /// # Safety
    /// The slot's control byte must be `FULL`.
    #[inline(always)]
    pub(crate) unsafe fn key_ref(&self) -> &K {
        unsafe { self.key.assume_init_ref() }
    }

    /// # Safety
    /// The slot's control byte must be `FULL`.
    #[inline(always)]
    pub(crate) unsafe fn value_ref(&self) -> &V {
        unsafe { self.value.assume_init_ref() }
    }

    /// # Safety
    /// The slot's control byte must be `FULL`.
    #[inline(always)]
    pub(crate) unsafe fn value_mut(&mut self) -> &mut V {
        unsafe { self.value.assume_init_mut() }
    }

    /// Drops the key and value in place. The caller is responsible for
    /// updating the slot's control byte and order links.
    ///
    /// # Safety
    /// The slot's control byte must be `FULL`, and must not be read again
    /// as `FULL` without being reinitialized first.
    #[inline(always)]
    pub(crate) unsafe fn drop_in_place(&mut self) {
        unsafe {
            self.key.assume_init_drop();
            self.value.assume_init_drop();
        }
    }
}
