//! The erasing wrapper: a runtime-polymorphic cursor value
//!
//! [`AnyIterator`] holds *any* concrete cursor whose declared native
//! strength is at least the wrapper's declared strength, behind a fixed
//! amount of inline storage and a dynamically-dispatched operation table,
//! while keeping ordinary value semantics: it clones, moves, swaps, and
//! compares like the cursor it hides.
//!
//! # Construction pipeline
//!
//! ```text
//! AnyIterator::<V, S, D>::new(concrete)
//!     ↓ compile-time validation
//!   T: Cursor<Value = V, Difference = D>     element/difference identity
//!   S: Erase<T>                              native strength ≥ declared
//!     ↓ category selector
//!   S::CONTRACT                              strength → contract
//!     ↓ adapter resolution (constant evaluation)
//!   <S as Erase<T>>::TABLE                   contract × T → operation table
//!     ↓ erasure
//!   Poly { InlineStorage(concrete), &TABLE }
//! ```
//!
//! Every compatibility rule is enforced while compiling the construction
//! site; there is no runtime validation path and no partially-constructed
//! state. After construction, operator calls route through the bound
//! table by operation kind.
//!
//! # What stays a runtime check
//!
//! Exactly one thing: binary operations (`==`, `distance_to`) between two
//! wrappers that do not erase the same concrete type. The wrapper keeps
//! no per-instance record of the erased type beyond its bound table
//! reference, so this is asserted at the call, unconditionally and in
//! every build, as a fatal programmer error rather than a recoverable
//! one.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

use crate::adapter::Erase;
use crate::category::{BidirectionalStrength, RandomAccessStrength, Strength};
use crate::contract::{Contract, OpKind};
use crate::cursor::Cursor;
use crate::poly::{OpTable, Poly};

/// A type-erased cursor with value semantics.
///
/// Parameterized by the declared element type `V`, the declared strength
/// `S`, and the declared difference type `D` (defaulting to the signed
/// machine word). The declared reference type is `&V`, borrowed from the
/// wrapper itself. The lifetime `'a` bounds whatever sequence the erased
/// cursor borrows, so a wrapper can never outlive the data it walks; it
/// is inferred at the construction site and rarely written out.
///
/// The erased payload lives in inline storage and must satisfy the
/// capacity contract of [`crate::poly::InlineStorage`]; an oversized
/// cursor type is rejected at compile time.
pub struct AnyIterator<'a, V: 'static, S: Strength, D: 'static = isize> {
    poly: Poly<'a, V, D>,
    strength: PhantomData<S>,
}

impl<'a, V: 'static, S: Strength, D: 'static> AnyIterator<'a, V, S, D> {
    /// Erase `cursor` into a wrapper of declared strength `S`.
    ///
    /// Compatibility is validated entirely at compile time:
    ///
    /// * the cursor's element type is exactly `V` (Rust has no implicit
    ///   conversions, so the classical "convertible to" loosening
    ///   tightens to identity, for the reference type with it);
    /// * the cursor's difference type is exactly `D`;
    /// * the cursor's declared native strength is at least `S`, via the
    ///   `S: Erase<T>` bound; erasing a forward-only cursor at
    ///   bidirectional strength does not compile.
    pub fn new<T>(cursor: T) -> Self
    where
        T: Cursor<Value = V, Difference = D> + 'a,
        S: Erase<T>,
    {
        let table: &'static OpTable<V, D> = &<S as Erase<T>>::TABLE;
        log::trace!(
            "erasing `{}` under contract `{}`",
            std::any::type_name::<T>(),
            table.contract().name()
        );
        AnyIterator {
            poly: Poly::new(cursor, table),
            strength: PhantomData,
        }
    }

    /// Step to the next position. Returns the wrapper so steps chain.
    pub fn increment(&mut self) -> &mut Self {
        self.poly.call_mutate(OpKind::Increment);
        self
    }

    /// Borrow the current element.
    pub fn current(&self) -> &V {
        self.poly.call_deref(OpKind::Dereference)
    }

    /// The contract selected for the declared strength.
    pub fn contract(&self) -> &'static Contract {
        self.poly.table().contract()
    }

    /// Exchange payloads and table bindings whole-value.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Consume the wrapper into a std iterator over `[self, end)`.
    ///
    /// The sentinel must erase the same concrete type as `self`, the same
    /// way `==` requires it.
    pub fn until(self, end: Self) -> Items<'a, V, S, D> {
        Items { cursor: self, end }
    }
}

impl<V: 'static, S: BidirectionalStrength, D: 'static> AnyIterator<'_, V, S, D> {
    /// Step to the previous position.
    ///
    /// Only wrappers declared bidirectional or stronger have this method;
    /// on a forward-declared wrapper the call does not compile.
    pub fn decrement(&mut self) -> &mut Self {
        self.poly.call_mutate(OpKind::Decrement);
        self
    }
}

impl<V: 'static, S: RandomAccessStrength, D: 'static> AnyIterator<'_, V, S, D> {
    /// Jump by `count` positions; negative counts move backwards.
    pub fn advance(&mut self, count: D) -> &mut Self {
        self.poly.call_advance(OpKind::Advance, count);
        self
    }

    /// Signed number of increments that carry `self` to `other`.
    ///
    /// # Panics
    ///
    /// When the two wrappers do not erase the same concrete type.
    pub fn distance_to(&self, other: &Self) -> D {
        self.poly.call_distance(&other.poly, OpKind::Distance)
    }
}

impl<V: 'static, S: Strength, D: 'static> Clone for AnyIterator<'_, V, S, D> {
    /// Clones the erased payload and rebinds the same operation table.
    /// The clone dereferences to the same element and moves independently
    /// of the original from then on.
    fn clone(&self) -> Self {
        AnyIterator {
            poly: self.poly.clone(),
            strength: PhantomData,
        }
    }
}

impl<V: 'static, S: Strength, D: 'static> Deref for AnyIterator<'_, V, S, D> {
    type Target = V;

    fn deref(&self) -> &V {
        self.current()
    }
}

impl<V: 'static, S: Strength, D: 'static> PartialEq for AnyIterator<'_, V, S, D> {
    /// Position equality through the bound `equal` operation.
    ///
    /// # Panics
    ///
    /// When the operands do not erase the same concrete type. The check
    /// is always on; see the module documentation.
    fn eq(&self, other: &Self) -> bool {
        self.poly.call_predicate(&other.poly, OpKind::Equal)
    }
}

impl<V: 'static, S: Strength, D: 'static> fmt::Debug for AnyIterator<'_, V, S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyIterator")
            .field("strength", &S::NAME)
            .field("contract", &self.contract().name())
            .finish_non_exhaustive()
    }
}

/// Bridge from an erased cursor range into the std `Iterator` protocol.
///
/// Yields clones of the elements in `[cursor, end)`. Created by
/// [`AnyIterator::until`].
pub struct Items<'a, V: 'static, S: Strength, D: 'static = isize> {
    cursor: AnyIterator<'a, V, S, D>,
    end: AnyIterator<'a, V, S, D>,
}

impl<V: Clone + 'static, S: Strength, D: 'static> Iterator for Items<'_, V, S, D> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        if self.cursor == self.end {
            return None;
        }
        let value = self.cursor.current().clone();
        self.cursor.increment();
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{Bidirectional, Forward, RandomAccess, SinglePass};
    use crate::cursor::{ForwardCursor, SinglePassCursor, SliceCursor};

    /// Downgrade wrapper: forwards the base operations of an inner cursor
    /// but declares nothing beyond forward strength.
    #[derive(Clone, Default, PartialEq)]
    struct ForwardOnly<C>(C);

    impl<C: Cursor> Cursor for ForwardOnly<C> {
        type Value = C::Value;
        type Difference = C::Difference;

        fn increment(&mut self) {
            self.0.increment();
        }

        fn current(&self) -> &C::Value {
            self.0.current()
        }
    }

    impl<C: SinglePassCursor> SinglePassCursor for ForwardOnly<C> {}
    impl<C: ForwardCursor> ForwardCursor for ForwardOnly<C> {}

    #[test]
    fn test_forward_scenario_over_three_elements() {
        let values = [10, 20, 30];
        let mut it: AnyIterator<i32, Forward> = AnyIterator::new(SliceCursor::begin(&values));
        let end: AnyIterator<i32, Forward> = AnyIterator::new(SliceCursor::end(&values));

        assert_eq!(*it, 10);
        it.increment();
        assert_eq!(*it, 20);
        it.increment();
        assert_eq!(*it, 30);
        it.increment();
        assert_eq!(it, end);
    }

    #[test]
    fn test_random_access_scenario() {
        let values = [1, 2, 3, 4, 5];
        let begin: AnyIterator<i32, RandomAccess> = AnyIterator::new(SliceCursor::begin(&values));
        let mut it: AnyIterator<i32, RandomAccess> =
            AnyIterator::new(SliceCursor::at(&values, 1));

        it.advance(3);
        assert_eq!(*it, 5);
        assert_eq!(begin.distance_to(&it), 4);
    }

    #[test]
    fn test_single_pass_wrapper_over_stronger_concrete_cursor() {
        let values = [7, 8];
        let mut it: AnyIterator<i32, SinglePass> = AnyIterator::new(SliceCursor::begin(&values));
        assert_eq!(it.contract().name(), "InputIterator");
        it.increment();
        assert_eq!(*it, 8);
    }

    #[test]
    fn test_forward_wrapper_over_forward_only_cursor() {
        let values = [4, 5, 6];
        let mut it: AnyIterator<i32, Forward> =
            AnyIterator::new(ForwardOnly(SliceCursor::begin(&values)));
        it.increment();
        assert_eq!(*it, 5);
        assert_eq!(it.contract().name(), "ForwardIterator");
    }

    #[test]
    fn test_clone_is_isolated_from_the_original() {
        let values = [1, 2, 3];
        let mut original: AnyIterator<i32, Forward> =
            AnyIterator::new(SliceCursor::begin(&values));
        let snapshot = original.clone();

        original.increment();
        original.increment();
        assert_eq!(*original, 3);
        assert_eq!(*snapshot, 1);
    }

    #[test]
    fn test_increment_then_decrement_restores_the_element() {
        let values = [1, 2, 3];
        let mut it: AnyIterator<i32, Bidirectional> =
            AnyIterator::new(SliceCursor::at(&values, 1));
        it.increment();
        it.decrement();
        assert_eq!(*it, 2);
    }

    #[test]
    fn test_chained_steps() {
        let values = [1, 2, 3, 4];
        let mut it: AnyIterator<i32, Bidirectional> =
            AnyIterator::new(SliceCursor::begin(&values));
        it.increment().increment().decrement();
        assert_eq!(*it, 2);
    }

    #[test]
    fn test_equality_is_symmetric_and_exclusive_with_inequality() {
        let values = [1, 2];
        let a: AnyIterator<i32, Forward> = AnyIterator::new(SliceCursor::begin(&values));
        let b: AnyIterator<i32, Forward> = AnyIterator::new(SliceCursor::begin(&values));
        let c: AnyIterator<i32, Forward> = AnyIterator::new(SliceCursor::end(&values));

        assert_eq!(a == b, b == a);
        assert!(a == b);
        assert!(!(a != b));
        assert!(a != c);
        assert!(!(a == c));
    }

    #[test]
    fn test_swap_exchanges_whole_values() {
        let values = [1, 2, 3];
        let mut at_start: AnyIterator<i32, Forward> =
            AnyIterator::new(SliceCursor::begin(&values));
        let mut at_last: AnyIterator<i32, Forward> =
            AnyIterator::new(SliceCursor::at(&values, 2));

        at_start.swap(&mut at_last);
        assert_eq!(*at_start, 3);
        assert_eq!(*at_last, 1);
    }

    #[test]
    fn test_swap_across_different_concrete_types() {
        let values = [1, 2];
        let mut plain: AnyIterator<i32, Forward> = AnyIterator::new(SliceCursor::begin(&values));
        let mut wrapped: AnyIterator<i32, Forward> =
            AnyIterator::new(ForwardOnly(SliceCursor::at(&values, 1)));

        // Swap rebinds tables along with payloads, so heterogeneous
        // erasures exchange cleanly.
        plain.swap(&mut wrapped);
        assert_eq!(*plain, 2);
        assert_eq!(*wrapped, 1);
        wrapped.increment(); // still a live cursor after the swap
        assert_eq!(*wrapped, 2);
    }

    #[test]
    #[should_panic(expected = "different erased representations")]
    fn test_comparing_different_erased_types_is_fatal() {
        let values = [1, 2];
        let plain: AnyIterator<i32, Forward> = AnyIterator::new(SliceCursor::begin(&values));
        let wrapped: AnyIterator<i32, Forward> =
            AnyIterator::new(ForwardOnly(SliceCursor::begin(&values)));
        let _ = plain == wrapped;
    }

    #[test]
    fn test_until_bridges_into_std_iteration() {
        let values = [10, 20, 30];
        let begin: AnyIterator<i32, Forward> = AnyIterator::new(SliceCursor::begin(&values));
        let end: AnyIterator<i32, Forward> = AnyIterator::new(SliceCursor::end(&values));

        let collected: Vec<i32> = begin.until(end).collect();
        assert_eq!(collected, vec![10, 20, 30]);
    }

    #[test]
    fn test_debug_names_strength_and_contract() {
        let values = [1];
        let it: AnyIterator<i32, RandomAccess> = AnyIterator::new(SliceCursor::begin(&values));
        let rendered = format!("{it:?}");
        assert!(rendered.contains("random-access"));
        assert!(rendered.contains("RandomAccessIterator"));
    }

    #[test]
    fn test_wrapper_works_with_non_copy_elements() {
        let values = [String::from("a"), String::from("b")];
        let mut it: AnyIterator<String, Bidirectional> =
            AnyIterator::new(SliceCursor::begin(&values));
        it.increment();
        assert_eq!(it.current(), "b");
        it.decrement();
        assert_eq!(it.current(), "a");
    }
}
