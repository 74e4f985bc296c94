//! Property-based invariant testing for the erasing wrapper
//!
//! Example-based tests pin down specific traversals; the properties here
//! verify **universal invariants** that must hold for all sequences and
//! all in-bounds positions:
//!
//! 1. **Round-trip equivalence**: an erased cursor behaves
//!    element-for-element like the native cursor it was constructed from.
//! 2. **Value-semantics isolation**: a cloned wrapper is unaffected by
//!    later mutation of the original.
//! 3. **Step algebra**: n increments on the wrapper equal one wrapper
//!    built at the natively advanced position; increment then decrement
//!    restores the element; advance and distance agree with position
//!    arithmetic.
//! 4. **Equality laws**: equality is position identity, symmetric, and
//!    mutually exclusive with inequality.
//!
//! All properties drive the public API only. Failing cases are shrunk and
//! persisted by proptest in `.proptest-regressions` files.

use anyiter::{AnyIterator, Bidirectional, Cursor, Forward, RandomAccess, SliceCursor};
use proptest::prelude::*;

fn arbitrary_elements() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(any::<i32>(), 1..=40)
}

proptest! {
    #[test]
    fn prop_wrapped_traversal_matches_native(data in arbitrary_elements()) {
        let mut native = SliceCursor::begin(&data);
        let native_end = SliceCursor::end(&data);
        let mut erased: AnyIterator<i32, Forward> = AnyIterator::new(SliceCursor::begin(&data));
        let erased_end: AnyIterator<i32, Forward> = AnyIterator::new(SliceCursor::end(&data));

        while native != native_end {
            prop_assert!(erased != erased_end);
            prop_assert_eq!(erased.current(), native.current());
            native.increment();
            erased.increment();
        }
        prop_assert!(erased == erased_end);
    }

    #[test]
    fn prop_n_increments_equal_native_position(data in arbitrary_elements(), seed in any::<usize>()) {
        let n = seed % (data.len() + 1);

        let mut stepped: AnyIterator<i32, Forward> = AnyIterator::new(SliceCursor::begin(&data));
        for _ in 0..n {
            stepped.increment();
        }

        let placed: AnyIterator<i32, Forward> = AnyIterator::new(SliceCursor::at(&data, n));
        prop_assert!(stepped == placed);
        if n < data.len() {
            prop_assert_eq!(*stepped, data[n]);
        }
    }

    #[test]
    fn prop_clone_is_isolated(data in arbitrary_elements(), seed in any::<usize>()) {
        let start = seed % data.len();
        let mut original: AnyIterator<i32, Forward> =
            AnyIterator::new(SliceCursor::at(&data, start));
        let snapshot = original.clone();

        for _ in start..data.len() {
            original.increment();
        }
        prop_assert_eq!(*snapshot, data[start]);
    }

    #[test]
    fn prop_increment_then_decrement_restores(data in arbitrary_elements(), seed in any::<usize>()) {
        let pos = seed % data.len();
        let mut it: AnyIterator<i32, Bidirectional> =
            AnyIterator::new(SliceCursor::at(&data, pos));

        let before = *it;
        it.increment();
        it.decrement();
        prop_assert_eq!(*it, before);
        prop_assert_eq!(*it, data[pos]);
    }

    #[test]
    fn prop_advance_distance_algebra(
        data in arbitrary_elements(),
        from_seed in any::<usize>(),
        to_seed in any::<usize>(),
    ) {
        let from = from_seed % (data.len() + 1);
        let to = to_seed % (data.len() + 1);
        let jump = to as isize - from as isize;

        let origin: AnyIterator<i32, RandomAccess> =
            AnyIterator::new(SliceCursor::at(&data, from));
        let mut moved = origin.clone();
        moved.advance(jump);

        prop_assert_eq!(origin.distance_to(&moved), jump);
        prop_assert_eq!(moved.distance_to(&origin), -jump);

        let begin: AnyIterator<i32, RandomAccess> = AnyIterator::new(SliceCursor::begin(&data));
        prop_assert_eq!(begin.distance_to(&moved), to as isize);
    }

    #[test]
    fn prop_equality_is_position_identity(
        data in arbitrary_elements(),
        left_seed in any::<usize>(),
        right_seed in any::<usize>(),
    ) {
        let left_pos = left_seed % (data.len() + 1);
        let right_pos = right_seed % (data.len() + 1);

        let left: AnyIterator<i32, Forward> = AnyIterator::new(SliceCursor::at(&data, left_pos));
        let right: AnyIterator<i32, Forward> = AnyIterator::new(SliceCursor::at(&data, right_pos));

        prop_assert_eq!(left == right, left_pos == right_pos);
        prop_assert_eq!(left == right, right == left);
        prop_assert_eq!(left != right, !(left == right));
    }
}
