//! The hash index: slot table, find/insert/remove, and the resize/rehash
//! engine (`spec.md` §4.3–§4.5), generalized from the teacher's per-variant
//! `HashTable<V>` structs to owned, non-`Copy` `K`/`V` with a pluggable
//! `BuildHasher`.

use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};

use tracing::{debug, trace};

use crate::error::MapError;
use crate::group::Group;
use crate::hash::h1;
use crate::probe::ProbeSeq;
use crate::slot::{Slot, NIL};
use crate::tag::Tag;

/// Capacity may never shrink below this (`spec.md` §9 Open Questions).
pub(crate) const MIN_CAPACITY: usize = 16;
const GROUP_WIDTH: usize = Group::WIDTH;

/// Smallest power-of-two capacity `>= MIN_CAPACITY` that can hold
/// `min_used` live entries at the 7/8 load-factor bound.
fn capacity_for(min_used: usize) -> usize {
    let mut capacity = MIN_CAPACITY;
    while capacity * 7 < min_used * 8 {
        capacity *= 2;
    }
    capacity
}

pub(crate) struct RawTable<K, V, S> {
    ctrl: Box<[Tag]>,
    slots: Box<[Slot<K, V>]>,
    bucket_mask: usize,
    group_mask: usize,
    used: usize,
    tombstones: usize,
    version: u64,
    order_head: u32,
    order_tail: u32,
    hash_builder: S,
}

impl<K, V, S> RawTable<K, V, S> {
    pub(crate) fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        let capacity = capacity_for(capacity.max(1)).max(MIN_CAPACITY);
        let ctrl = vec![Tag::EMPTY; capacity].into_boxed_slice();
        let slots = (0..capacity)
            .map(|_| Slot::empty())
            .collect::<Vec<_>>()
            .into_boxed_slice();
        RawTable {
            ctrl,
            slots,
            bucket_mask: capacity - 1,
            group_mask: capacity / GROUP_WIDTH - 1,
            used: 0,
            tombstones: 0,
            version: 0,
            order_head: NIL,
            order_tail: NIL,
            hash_builder,
        }
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.used
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.bucket_mask + 1
    }

    #[inline(always)]
    pub(crate) fn version(&self) -> u64 {
        self.version
    }

    #[inline(always)]
    pub(crate) fn hasher(&self) -> &S {
        &self.hash_builder
    }

    #[inline(always)]
    pub(crate) fn order_head(&self) -> u32 {
        self.order_head
    }

    /// # Safety
    /// `idx` must be `!= NIL` and refer to a currently `FULL` slot.
    #[inline(always)]
    pub(crate) unsafe fn slot(&self, idx: u32) -> &Slot<K, V> {
        unsafe { self.slots.get_unchecked(idx as usize) }
    }

    #[inline(always)]
    fn group_ptr(&self, group: usize) -> *const Tag {
        unsafe { self.ctrl.as_ptr().add(group * GROUP_WIDTH) }
    }

    #[inline(always)]
    fn compute_hash<Q>(&self, key: &Q) -> u64
    where
        Q: Hash + ?Sized,
        S: BuildHasher,
    {
        self.hash_builder.hash_one(key)
    }

    /// Walks the probe sequence, verifying candidates with `eq`. Returns the
    /// slot index of the first match, or `None` once a group with an
    /// `EMPTY` byte is reached (`spec.md` I4).
    fn find_slot<F>(&self, hash: u64, mut eq: F) -> Option<usize>
    where
        F: FnMut(&K) -> bool,
    {
        let tag = Tag::full(hash);
        let mut seq = ProbeSeq::new(h1(hash), self.group_mask);
        loop {
            let group = unsafe { Group::load(self.group_ptr(seq.group)) };
            for bit in group.match_tag(tag) {
                let idx = seq.group * GROUP_WIDTH + bit;
                let slot = unsafe { self.slots.get_unchecked(idx) };
                if slot.hash == hash && eq(unsafe { slot.key_ref() }) {
                    return Some(idx);
                }
            }
            if group.match_empty().any_set() {
                return None;
            }
            seq.move_next(self.group_mask);
        }
    }

    /// Finds the slot a new entry for `hash` should occupy: the first
    /// empty-or-deleted slot seen, confirmed by probing until a group with
    /// an `EMPTY` byte is reached (`spec.md` §4.3 step 2).
    fn find_insert_slot(&self, hash: u64) -> usize {
        let mut seq = ProbeSeq::new(h1(hash), self.group_mask);
        let mut candidate: Option<usize> = None;
        loop {
            let group = unsafe { Group::load(self.group_ptr(seq.group)) };
            if candidate.is_none() {
                if let Some(bit) = group.match_empty_or_deleted().lowest_set_bit() {
                    candidate = Some(seq.group * GROUP_WIDTH + bit);
                }
            }
            if group.match_empty().any_set() {
                return candidate.expect("a group with an EMPTY byte implies one was recorded");
            }
            seq.move_next(self.group_mask);
        }
    }

    fn unlink_order(&mut self, prev: u32, next: u32) {
        if prev != NIL {
            self.slots[prev as usize].order_next = next;
        } else {
            self.order_head = next;
        }
        if next != NIL {
            self.slots[next as usize].order_prev = prev;
        } else {
            self.order_tail = prev;
        }
    }

    fn append_order(&mut self, idx: u32) {
        let tail = self.order_tail;
        self.slots[idx as usize].order_prev = tail;
        self.slots[idx as usize].order_next = NIL;
        if tail != NIL {
            self.slots[tail as usize].order_next = idx;
        } else {
            self.order_head = idx;
        }
        self.order_tail = idx;
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        S: BuildHasher,
    {
        let hash = self.compute_hash(key);
        let idx = self.find_slot(hash, |k| k.borrow() == key)?;
        Some(unsafe { self.slots.get_unchecked(idx).value_ref() })
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        S: BuildHasher,
    {
        let hash = self.compute_hash(key);
        let idx = self.find_slot(hash, |k| k.borrow() == key)?;
        Some(unsafe { self.slots.get_unchecked_mut(idx).value_mut() })
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        S: BuildHasher,
    {
        self.get(key).is_some()
    }

    pub(crate) fn insert(&mut self, key: K, value: V) -> Result<Option<V>, MapError>
    where
        K: Hash + Eq,
        S: BuildHasher,
    {
        let hash = self.compute_hash(&key);
        if let Some(idx) = self.find_slot(hash, |k| *k == key) {
            let old = std::mem::replace(unsafe { self.slots.get_unchecked_mut(idx).value_mut() }, value);
            self.version += 1;
            return Ok(Some(old));
        }

        self.reserve_one_for_insert()?;

        let idx = self.find_insert_slot(hash);
        let was_deleted = self.ctrl[idx] == Tag::DELETED;
        self.ctrl[idx] = Tag::full(hash);
        if was_deleted {
            self.tombstones -= 1;
        }
        let slot = &mut self.slots[idx];
        slot.key.write(key);
        slot.value.write(value);
        slot.hash = hash;
        self.used += 1;
        self.append_order(idx as u32);
        self.version += 1;
        trace!(idx, capacity = self.capacity(), "inserted new entry");
        Ok(None)
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Result<V, MapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        S: BuildHasher,
    {
        let hash = self.compute_hash(key);
        let idx = self.find_slot(hash, |k| k.borrow() == key).ok_or(MapError::NotFound)?;

        // spec.md §4.3 step 3: a tombstone is only needed if this slot's
        // group has no EMPTY byte right now — otherwise future probes along
        // this path will already stop at that EMPTY byte, so EMPTY is safe.
        let group = idx / GROUP_WIDTH;
        let group_has_empty = unsafe { Group::load(self.group_ptr(group)).match_empty().any_set() };

        let (prev, next, value) = unsafe {
            let slot = self.slots.get_unchecked_mut(idx);
            let prev = slot.order_prev;
            let next = slot.order_next;
            slot.key.assume_init_drop();
            let value = slot.value.assume_init_read();
            (prev, next, value)
        };
        self.unlink_order(prev, next);

        if group_has_empty {
            self.ctrl[idx] = Tag::EMPTY;
        } else {
            self.ctrl[idx] = Tag::DELETED;
            self.tombstones += 1;
        }
        self.used -= 1;
        self.version += 1;
        trace!(idx, "removed entry");

        self.maybe_compact();
        Ok(value)
    }

    /// Reclaims tombstones by rehashing at the same capacity once they
    /// exceed the spec's `capacity / 8` bound (`spec.md` §4.3 step 5). This
    /// is a best-effort internal optimization: an allocation failure here
    /// does not fail the `remove` that triggered it, since the deletion has
    /// already logically completed.
    fn maybe_compact(&mut self) {
        if self.tombstones > self.capacity() / 8 {
            let capacity = self.capacity();
            if self.rebuild(capacity).is_err() {
                debug!(capacity, "tombstone compaction skipped: allocation failed");
            }
        }
    }

    fn reserve_one_for_insert(&mut self) -> Result<(), MapError> {
        let capacity = self.capacity();
        if (self.used + self.tombstones + 1) * 8 > capacity * 7 {
            let min_capacity = capacity_for(self.used + 1);
            let new_capacity = (capacity * 2).max(min_capacity);
            debug!(from = capacity, to = new_capacity, "growing table");
            self.rebuild(new_capacity)?;
        }
        Ok(())
    }

    /// Allocates a fresh table of `new_capacity` and replays every live
    /// entry by walking the order layer head-to-tail, so insertion order is
    /// preserved exactly across the resize (`spec.md` §4.5 step 2, I5).
    fn rebuild(&mut self, new_capacity: usize) -> Result<(), MapError> {
        debug_assert!(new_capacity.is_power_of_two() && new_capacity >= MIN_CAPACITY);

        let mut new_ctrl = Vec::new();
        new_ctrl
            .try_reserve_exact(new_capacity)
            .map_err(|_| MapError::OutOfMemory)?;
        new_ctrl.resize(new_capacity, Tag::EMPTY);

        let mut new_slots = Vec::new();
        new_slots
            .try_reserve_exact(new_capacity)
            .map_err(|_| MapError::OutOfMemory)?;
        new_slots.resize_with(new_capacity, Slot::empty);

        let new_group_mask = new_capacity / GROUP_WIDTH - 1;

        let mut cursor = self.order_head;
        let mut prev_new_idx: u32 = NIL;
        let mut new_head: u32 = NIL;
        while cursor != NIL {
            let old_idx = cursor as usize;
            let hash = self.slots[old_idx].hash;
            let next_cursor = self.slots[old_idx].order_next;

            let tag = Tag::full(hash);
            let mut seq = ProbeSeq::new(h1(hash), new_group_mask);
            let new_idx = loop {
                let group =
                    unsafe { Group::load(new_ctrl.as_ptr().add(seq.group * GROUP_WIDTH)) };
                if let Some(bit) = group.match_empty().lowest_set_bit() {
                    break seq.group * GROUP_WIDTH + bit;
                }
                seq.move_next(new_group_mask);
            };

            new_ctrl[new_idx] = tag;
            let old_slot = &mut self.slots[old_idx];
            let new_slot = &mut new_slots[new_idx];
            new_slot.hash = hash;
            unsafe {
                new_slot.key.write(old_slot.key.assume_init_read());
                new_slot.value.write(old_slot.value.assume_init_read());
            }
            new_slot.order_prev = prev_new_idx;
            new_slot.order_next = NIL;
            if prev_new_idx != NIL {
                new_slots[prev_new_idx as usize].order_next = new_idx as u32;
            } else {
                new_head = new_idx as u32;
            }
            prev_new_idx = new_idx as u32;

            cursor = next_cursor;
        }

        self.ctrl = new_ctrl.into_boxed_slice();
        self.slots = new_slots.into_boxed_slice();
        self.bucket_mask = new_capacity - 1;
        self.group_mask = new_group_mask;
        self.tombstones = 0;
        self.order_head = new_head;
        self.order_tail = prev_new_idx;
        self.version += 1;
        Ok(())
    }
}

impl<K, V, S> Drop for RawTable<K, V, S> {
    fn drop(&mut self) {
        let mut cursor = self.order_head;
        while cursor != NIL {
            let idx = cursor as usize;
            let next = self.slots[idx].order_next;
            unsafe {
                self.slots[idx].drop_in_place();
            }
            cursor = next;
        }
    }
}
