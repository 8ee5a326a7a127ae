//! Lazy, insertion-ordered, version-checked iteration (`spec.md` §4.6, §6).
//!
//! Each iterator snapshots the table's `version` counter at creation. If a
//! structural mutation (insert of a new key, or removal) happens while the
//! iterator is alive, the next `next()` call yields
//! [`MapError::MutatedDuringIteration`](crate::error::MapError) once, and
//! the iterator is exhausted afterward — it is not restartable
//! (`spec.md` §6, scenario S6).
//!
//! `Iter`/`Keys`/`Values` borrow the table for their whole lifetime, so the
//! version check below is unreachable through the safe [`crate::OrderedMap`]
//! API: the borrow checker already rejects any `&mut` call while one of
//! these iterators is alive, which is a stronger, compile-time form of the
//! same guarantee. The check is kept because it documents the contract
//! `spec.md` describes and because it is exactly what a future owning or
//! raw-handle cursor would need (see `DESIGN.md` OQ-5).

use crate::error::MapError;
use crate::raw::RawTable;
use crate::slot::NIL;

enum State {
    Running,
    Failed,
    Done,
}

/// Ordered, version-checked iterator over `(&K, &V)` pairs.
pub struct Iter<'a, K, V, S> {
    table: &'a RawTable<K, V, S>,
    cursor: u32,
    version: u64,
    state: State,
}

/// Ordered, version-checked iterator over `&K`.
pub struct Keys<'a, K, V, S>(Iter<'a, K, V, S>);

/// Ordered, version-checked iterator over `&V`.
pub struct Values<'a, K, V, S>(Iter<'a, K, V, S>);

impl<'a, K, V, S> Iter<'a, K, V, S> {
    pub(crate) fn new(table: &'a RawTable<K, V, S>) -> Self {
        Iter {
            cursor: table.order_head(),
            version: table.version(),
            table,
            state: State::Running,
        }
    }
}

impl<'a, K, V, S> Iterator for Iter<'a, K, V, S> {
    type Item = Result<(&'a K, &'a V), MapError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Done => return None,
            State::Failed => {
                self.state = State::Done;
                return None;
            }
            State::Running => {}
        }

        if self.table.version() != self.version {
            self.state = State::Failed;
            return Some(Err(MapError::MutatedDuringIteration));
        }

        if self.cursor == NIL {
            self.state = State::Done;
            return None;
        }

        // Safety: `cursor` was either the table's order head or the
        // `order_next` of a slot we just visited, and the version check
        // above confirms no structural mutation has touched the order
        // layer since this iterator's snapshot was taken.
        let slot = unsafe { self.table.slot(self.cursor) };
        let item = unsafe { (slot.key_ref(), slot.value_ref()) };
        self.cursor = slot.order_next;
        Some(Ok(item))
    }
}

impl<'a, K, V, S> Keys<'a, K, V, S> {
    pub(crate) fn new(table: &'a RawTable<K, V, S>) -> Self {
        Keys(Iter::new(table))
    }
}

impl<'a, K, V, S> Iterator for Keys<'a, K, V, S> {
    type Item = Result<&'a K, MapError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|r| r.map(|(k, _)| k))
    }
}

impl<'a, K, V, S> Values<'a, K, V, S> {
    pub(crate) fn new(table: &'a RawTable<K, V, S>) -> Self {
        Values(Iter::new(table))
    }
}

impl<'a, K, V, S> Iterator for Values<'a, K, V, S> {
    type Item = Result<&'a V, MapError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|r| r.map(|(_, v)| v))
    }
}
