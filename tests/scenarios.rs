//! Literal end-to-end scenarios and boundary behaviors from `spec.md` §8.

use swissdict::{MapError, OrderedMap};

fn items(m: &OrderedMap<&'static str, i32>) -> Vec<(&'static str, i32)> {
    m.iter().map(|r| r.unwrap()).map(|(k, v)| (*k, *v)).collect()
}

#[test]
fn s1_ordered_iteration_after_replace() {
    let mut m = OrderedMap::new();
    m.insert("a", 1).unwrap();
    m.insert("b", 2).unwrap();
    m.insert("c", 3).unwrap();
    m.insert("b", 20).unwrap();

    assert_eq!(items(&m), vec![("a", 1), ("b", 20), ("c", 3)]);
    assert_eq!(m.len(), 3);
}

#[test]
fn s2_delete_and_reinsert_repositions() {
    let mut m = OrderedMap::new();
    m.insert("a", 1).unwrap();
    m.insert("b", 2).unwrap();
    m.insert("c", 3).unwrap();
    m.remove("a").unwrap();
    m.insert("a", 10).unwrap();

    assert_eq!(items(&m), vec![("b", 2), ("c", 3), ("a", 10)]);
    assert_eq!(m.len(), 3);
}

#[test]
fn s3_grow_preserves_order() {
    let mut m: OrderedMap<i32, i32> = OrderedMap::new();
    for i in 0..100 {
        m.insert(i, i * i).unwrap();
    }
    assert!(m.capacity() >= 128);
    let got: Vec<(i32, i32)> = m.iter().map(|r| r.unwrap()).map(|(k, v)| (*k, *v)).collect();
    let want: Vec<(i32, i32)> = (0..100).map(|i| (i, i * i)).collect();
    assert_eq!(got, want);
}

#[test]
fn s4_tombstone_compaction() {
    let mut m: OrderedMap<i32, i32> = OrderedMap::new();
    for i in 0..1000 {
        m.insert(i, i).unwrap();
    }
    for i in 0..990 {
        m.remove(&i).unwrap();
    }

    assert_eq!(m.get(&995), Some(&995));
    assert_eq!(m.get(&0), None);
    assert_eq!(m.len(), 10);
}

#[test]
fn s5_adversarial_collisions() {
    // 64 keys sharing the low 14 bits of a cheap identity-style hash: use
    // a hasher that only looks at the low bits so every key collides on
    // both H1 and H2.
    use std::hash::{BuildHasher, Hasher};

    #[derive(Clone, Default)]
    struct CollidingBuildHasher;
    struct CollidingHasher(u64);
    impl Hasher for CollidingHasher {
        fn write(&mut self, bytes: &[u8]) {
            for &b in bytes {
                self.0 = self.0.wrapping_add(b as u64);
            }
        }
        fn finish(&self) -> u64 {
            self.0 & 0x3fff
        }
    }
    impl BuildHasher for CollidingBuildHasher {
        type Hasher = CollidingHasher;
        fn build_hasher(&self) -> CollidingHasher {
            CollidingHasher(0)
        }
    }

    let mut m = OrderedMap::with_hasher(CollidingBuildHasher);
    for i in 0..64u64 {
        m.insert(i, i).unwrap();
    }
    assert_eq!(m.len(), 64);
    for i in 0..64u64 {
        assert_eq!(m.get(&i), Some(&i));
    }
}

// spec.md's S6 ("mutate the map mid-iteration, expect
// MutatedDuringIteration on the next `next()` call") has no expressible
// regression test here: `Iter<'a, ..>` borrows the map for `'a`, so the
// borrow checker already rejects any `&mut` call (`insert`/`remove`) while
// an iterator from that borrow is still live (E0502) — there is no way to
// reach the version-mismatch branch in `src/iter.rs` through the safe
// `OrderedMap` API. See DESIGN.md OQ-5.

#[test]
fn b1_insert_up_to_capacity_without_growing() {
    let mut m: OrderedMap<i32, i32> = OrderedMap::new();
    assert_eq!(m.capacity(), 16);
    for i in 0..14 {
        m.insert(i, i).unwrap();
    }
    assert_eq!(m.capacity(), 16);
    m.insert(14, 14).unwrap();
    assert_eq!(m.len(), 15);
}

#[test]
fn b2_delete_all_then_insert_one() {
    let mut m: OrderedMap<i32, i32> = OrderedMap::new();
    for i in 0..10 {
        m.insert(i, i).unwrap();
    }
    for i in 0..10 {
        m.remove(&i).unwrap();
    }
    assert_eq!(m.len(), 0);
    m.insert(42, 42).unwrap();
    assert_eq!(m.get(&42), Some(&42));
    assert_eq!(m.len(), 1);
}

#[test]
fn b3_hash_collision_class_is_bounded() {
    use std::hash::{BuildHasher, Hasher};

    #[derive(Clone, Default)]
    struct AllSameBuildHasher;
    struct AllSameHasher;
    impl Hasher for AllSameHasher {
        fn write(&mut self, _bytes: &[u8]) {}
        fn finish(&self) -> u64 {
            7
        }
    }
    impl BuildHasher for AllSameBuildHasher {
        type Hasher = AllSameHasher;
        fn build_hasher(&self) -> AllSameHasher {
            AllSameHasher
        }
    }

    let mut m = OrderedMap::with_hasher(AllSameBuildHasher);
    for i in 0..50i32 {
        m.insert(i, i).unwrap();
    }
    assert_eq!(m.len(), 50);
    for i in 0..50i32 {
        assert_eq!(m.get(&i), Some(&i));
    }
}

#[test]
fn p4_delete_then_reinsert_moves_to_end() {
    let mut m = OrderedMap::new();
    m.insert("k", 1).unwrap();
    m.insert("other", 2).unwrap();
    m.remove("k").unwrap();
    m.insert("k", 9).unwrap();
    assert_eq!(items(&m), vec![("other", 2), ("k", 9)]);
}

#[test]
fn p5_replace_keeps_original_position() {
    let mut m = OrderedMap::new();
    m.insert("k", 1).unwrap();
    m.insert("other", 2).unwrap();
    m.insert("k", 9).unwrap();
    assert_eq!(items(&m), vec![("k", 9), ("other", 2)]);
}

#[test]
fn remove_missing_key_reports_not_found() {
    let mut m: OrderedMap<&'static str, i32> = OrderedMap::new();
    assert_eq!(m.remove("missing"), Err(MapError::NotFound));
}

#[test]
fn get_does_not_mutate_version() {
    let mut m = OrderedMap::new();
    m.insert("a", 1).unwrap();
    let mut it = m.iter();
    assert!(it.next().is_some());
    assert!(m.get("a").is_some());
    // A read-only lookup must not trip the mutation guard.
    assert_eq!(it.next(), None);
}
