//! The generic dispatch engine behind the erasing wrapper
//!
//! This module is the crate's rendition of the engine the erasure core
//! consumes: polymorphic storage plus a dynamically-dispatched table of
//! named operations. It knows nothing about iteration; the contracts it
//! validates against and the adapters that fill its tables live elsewhere.
//!
//! # Architecture
//!
//! ```text
//! Poly<'a, V, D>
//!     ├─→ InlineStorage            fixed 8-word buffer, payload bytes
//!     └─→ &'static OpTable<V, D>   shared per (contract, concrete type)
//!             ├─→ clone_into / drop_in_place     lifecycle entries
//!             └─→ [Option<OpImpl>; OpKind::COUNT]  indexed by OpKind
//! ```
//!
//! The table reference is the "remote" half of a two-level scheme: the
//! per-type table is materialized once as a constant and every value
//! holds only the pointer, keeping `Poly` itself small enough to copy
//! around freely.
//!
//! ## Key invariants
//!
//! 1. **Live payload**: storage always holds a validly constructed value
//!    of the concrete type the table was resolved for; there is no empty
//!    or partially-erased state.
//! 2. **Table immutability**: tables are resolved in constant evaluation
//!    and never mutated, so sharing them across values needs no
//!    synchronization.
//! 3. **Representation identity**: binary operations are only meaningful
//!    between two values bound to the same table. The engine asserts this
//!    unconditionally; table identity is the only record of the erased
//!    concrete type it keeps.

mod storage;
mod table;

pub use storage::{InlineStorage, STORAGE_WORDS};
pub use table::{AdvanceFn, DerefFn, DistanceFn, MutateFn, OpImpl, OpTable, PredicateFn};

use std::marker::PhantomData;
use std::ptr;

use crate::contract::OpKind;

/// A polymorphic value: an erased payload in inline storage plus the
/// operation table resolved for its concrete type.
///
/// The lifetime `'a` bounds everything the erased payload may borrow, so
/// a `Poly` can never outlive data its hidden cursor points into.
///
/// `Poly` is deliberately neither `Send` nor `Sync`: erasure hides
/// whether the concrete type is thread-safe, so thread affinity must stay
/// with the thread that constructed the value.
pub struct Poly<'a, V: 'static, D: 'static = isize> {
    table: &'static OpTable<V, D>,
    storage: InlineStorage,
    // Covariant in `'a`; the raw pointer keeps the type `!Send + !Sync`.
    _marker: PhantomData<(&'a (), *mut u8)>,
}

impl<'a, V: 'static, D: 'static> Poly<'a, V, D> {
    /// Erase `value` behind `table`.
    ///
    /// The caller guarantees `table` was resolved for exactly `T`. The
    /// erasing wrapper upholds this by always resolving the table through
    /// the adapter layer for the value it constructs from.
    pub fn new<T: 'a>(value: T, table: &'static OpTable<V, D>) -> Self {
        Poly {
            table,
            storage: InlineStorage::new(value),
            _marker: PhantomData,
        }
    }

    /// The table this value is bound to.
    pub fn table(&self) -> &'static OpTable<V, D> {
        self.table
    }

    /// Whether two values share one resolved table, and therefore erase
    /// the same concrete type under the same contract.
    pub fn same_representation(&self, other: &Self) -> bool {
        ptr::eq(self.table, other.table)
    }

    /// Borrow the erased payload as its concrete type.
    ///
    /// # Safety
    ///
    /// `T` must be exactly the concrete type this value was constructed
    /// from; the engine keeps no record it could check this against.
    pub unsafe fn get_unchecked<T>(&self) -> &T {
        // SAFETY: the caller guarantees the payload is a live `T`.
        unsafe { &*self.payload().cast::<T>() }
    }

    fn payload(&self) -> *const u8 {
        self.storage.as_ptr()
    }

    fn payload_mut(&mut self) -> *mut u8 {
        self.storage.as_mut_ptr()
    }

    /// Invoke a `Mutate`-shaped operation on the stored value.
    ///
    /// # Panics
    ///
    /// When `kind` is not named by the bound contract or was resolved to
    /// a different shape. Both are programmer errors; the public wrapper
    /// makes them unreachable by gating operations at compile time.
    pub fn call_mutate(&mut self, kind: OpKind) {
        match self.table.op(kind) {
            Some(&OpImpl::Mutate(f)) => {
                // SAFETY: storage holds a live value of the concrete type
                // the table was resolved for.
                unsafe { f(self.payload_mut()) }
            }
            bound => wrong_op(self.table.contract().name(), kind, bound.is_some()),
        }
    }

    /// Invoke a `Deref`-shaped operation, borrowing out of the payload.
    pub fn call_deref(&self, kind: OpKind) -> &V {
        match self.table.op(kind) {
            Some(&OpImpl::Deref(f)) => {
                // SAFETY: the shim projects out of the live payload; the
                // resulting borrow is tied to `self`, which owns it.
                unsafe { &*f(self.payload()) }
            }
            bound => wrong_op(self.table.contract().name(), kind, bound.is_some()),
        }
    }

    /// Invoke a `Predicate`-shaped operation across two values.
    ///
    /// # Panics
    ///
    /// When the operands are not bound to the same resolved table. The
    /// check is unconditional: the shim reinterprets both payloads as one
    /// concrete type, so a mismatch is never allowed to proceed.
    pub fn call_predicate(&self, other: &Self, kind: OpKind) -> bool {
        assert!(
            self.same_representation(other),
            "`{}` invoked across two different erased representations",
            kind.name()
        );
        match self.table.op(kind) {
            Some(&OpImpl::Predicate(f)) => {
                // SAFETY: both payloads are live values of the same
                // concrete type, per the assertion above.
                unsafe { f(self.payload(), other.payload()) }
            }
            bound => wrong_op(self.table.contract().name(), kind, bound.is_some()),
        }
    }

    /// Invoke an `Advance`-shaped operation with a signed offset.
    pub fn call_advance(&mut self, kind: OpKind, count: D) {
        match self.table.op(kind) {
            Some(&OpImpl::Advance(f)) => {
                // SAFETY: storage holds a live value of the concrete type
                // the table was resolved for.
                unsafe { f(self.payload_mut(), count) }
            }
            bound => wrong_op(self.table.contract().name(), kind, bound.is_some()),
        }
    }

    /// Invoke a `Distance`-shaped operation across two values.
    ///
    /// # Panics
    ///
    /// Same representation-identity requirement as [`Poly::call_predicate`].
    pub fn call_distance(&self, other: &Self, kind: OpKind) -> D {
        assert!(
            self.same_representation(other),
            "`{}` invoked across two different erased representations",
            kind.name()
        );
        match self.table.op(kind) {
            Some(&OpImpl::Distance(f)) => {
                // SAFETY: both payloads are live values of the same
                // concrete type, per the assertion above.
                unsafe { f(self.payload(), other.payload()) }
            }
            bound => wrong_op(self.table.contract().name(), kind, bound.is_some()),
        }
    }
}

impl<V: 'static, D: 'static> Clone for Poly<'_, V, D> {
    fn clone(&self) -> Self {
        let mut storage = InlineStorage::uninit();
        // SAFETY: `clone_into` copy-constructs the concrete payload into
        // the fresh buffer, which satisfies the capacity contract because
        // the original did.
        unsafe { (self.table.clone_into())(self.payload(), storage.as_mut_ptr()) };
        Poly {
            table: self.table,
            storage,
            _marker: PhantomData,
        }
    }
}

impl<V: 'static, D: 'static> Drop for Poly<'_, V, D> {
    fn drop(&mut self) {
        // SAFETY: storage holds a live payload; after this call the
        // buffer is dead bytes and is never touched again.
        unsafe { (self.table.drop_in_place())(self.payload_mut()) }
    }
}

fn wrong_op(contract: &str, kind: OpKind, bound: bool) -> ! {
    if bound {
        panic!(
            "operation `{}` bound with an unexpected signature shape under contract `{contract}`",
            kind.name()
        );
    }
    panic!("operation `{}` is not named by contract `{contract}`", kind.name())
}
