//! Symbolic error signals observable through the mapping contract
//! (`spec.md` §6/§7).

/// Errors surfaced by [`crate::OrderedMap`](crate::OrderedMap) operations.
///
/// `HashFailed` and `EqualityFailed` exist for parity with `spec.md`'s
/// contract, which models a surrounding language runtime where a key's
/// hash or equality hook can itself fail (e.g. a Python `__hash__`/`__eq__`
/// raising). That runtime is explicitly out of scope for this crate
/// (`spec.md` §1): keys are bound by Rust's infallible `Hash`/`Eq` traits,
/// so these two variants are never constructed by the `K: Hash + Eq` entry
/// points. They are kept in the enum, rather than dropped, so the error
/// surface documents the full contract — see `DESIGN.md` (OQ-1).
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// The requested key is not present in the map.
    #[error("key not found")]
    NotFound,
    /// A user-supplied hash hook failed. Unreachable via the `Hash`-bound
    /// API; reserved for contract parity (see module docs).
    #[error("hash computation failed")]
    HashFailed,
    /// A user-supplied equality hook failed. Unreachable via the
    /// `Eq`-bound API; reserved for contract parity (see module docs).
    #[error("equality comparison failed")]
    EqualityFailed,
    /// A structural mutation (insert of a new key, or removal) was
    /// detected while an iterator was in progress. Unreachable through the
    /// safe [`crate::OrderedMap`] iterators, whose borrow already prevents
    /// this at compile time — see `DESIGN.md` OQ-5.
    #[error("map was mutated during iteration")]
    MutatedDuringIteration,
    /// Allocation failed while growing or compacting the table. The table
    /// is left at its previous capacity with its previous contents intact.
    #[error("allocation failed")]
    OutOfMemory,
}
