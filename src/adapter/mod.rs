//! Default adapters from native cursor operations to contract operations
//!
//! For any concrete cursor type `T`, this module supplies the
//! implementations of each contract's named operations in terms of `T`'s
//! native interface, and resolves them into the operation table a wrapper
//! binds at construction.
//!
//! # Conditioned registration
//!
//! Adapters are additive and independently conditioned on `T`'s declared
//! native strength, expressed as trait bounds:
//!
//! * base (`Cursor`): `increment`, `dereference`
//! * equality (`SinglePassCursor`): `equal`
//! * bidirectional (`BidirectionalCursor` only): `decrement`
//! * random-access (`RandomAccessCursor` only): `advance`, `distance`
//!
//! A forward-only concrete type therefore receives no decrement, advance,
//! or distance registration at all, and resolving a stronger contract
//! against it fails where the wrapper is instantiated (there is no
//! [`Erase`] impl to find) rather than at call time.

use crate::category::{Bidirectional, Forward, RandomAccess, SinglePass, Strength};
use crate::contract::OpKind;
use crate::cursor::{
    BidirectionalCursor, Cursor, ForwardCursor, RandomAccessCursor, SinglePassCursor,
};
use crate::poly::{OpImpl, OpTable};

type Entries<T> =
    [Option<OpImpl<<T as Cursor>::Value, <T as Cursor>::Difference>>; OpKind::COUNT];

// Shims: monomorphized trampolines from the erased calling convention
// back onto the native operations. Each one requires `raw` (and its peer,
// where there is one) to point at a live `T`; the engine's
// representation-identity assertion upholds this for the binary shims.

unsafe fn increment<T: Cursor>(raw: *mut u8) {
    unsafe { (*raw.cast::<T>()).increment() }
}

unsafe fn dereference<T: Cursor>(raw: *const u8) -> *const T::Value {
    unsafe { (*raw.cast::<T>()).current() }
}

unsafe fn equal<T: SinglePassCursor>(a: *const u8, b: *const u8) -> bool {
    unsafe { *a.cast::<T>() == *b.cast::<T>() }
}

unsafe fn decrement<T: BidirectionalCursor>(raw: *mut u8) {
    unsafe { (*raw.cast::<T>()).decrement() }
}

unsafe fn advance<T: RandomAccessCursor>(raw: *mut u8, count: T::Difference) {
    unsafe { (*raw.cast::<T>()).advance(count) }
}

unsafe fn distance<T: RandomAccessCursor>(a: *const u8, b: *const u8) -> T::Difference {
    unsafe { (*a.cast::<T>()).distance_to(&*b.cast::<T>()) }
}

unsafe fn clone_into<T: Clone>(src: *const u8, dst: *mut u8) {
    unsafe { dst.cast::<T>().write((*src.cast::<T>()).clone()) }
}

unsafe fn drop_in_place<T>(raw: *mut u8) {
    unsafe { raw.cast::<T>().drop_in_place() }
}

const fn no_entries<T: Cursor>() -> Entries<T> {
    [None; OpKind::COUNT]
}

const fn set<T: Cursor>(
    mut entries: Entries<T>,
    kind: OpKind,
    op: OpImpl<<T as Cursor>::Value, <T as Cursor>::Difference>,
) -> Entries<T> {
    entries[kind.index()] = Some(op);
    entries
}

/// Base adapter: every cursor's native step and projection.
const fn base_adapter<T: Cursor>(entries: Entries<T>) -> Entries<T> {
    let entries = set::<T>(entries, OpKind::Increment, OpImpl::Mutate(increment::<T>));
    set::<T>(entries, OpKind::Dereference, OpImpl::Deref(dereference::<T>))
}

/// Equality adapter: single-pass or stronger declared strength.
const fn equality_adapter<T: SinglePassCursor>(entries: Entries<T>) -> Entries<T> {
    set::<T>(entries, OpKind::Equal, OpImpl::Predicate(equal::<T>))
}

/// Bidirectional-conditioned adapter: only declared-bidirectional types
/// ever get a `decrement` registration.
const fn bidirectional_adapter<T: BidirectionalCursor>(entries: Entries<T>) -> Entries<T> {
    set::<T>(entries, OpKind::Decrement, OpImpl::Mutate(decrement::<T>))
}

/// Random-access-conditioned adapter.
const fn random_access_adapter<T: RandomAccessCursor>(entries: Entries<T>) -> Entries<T> {
    let entries = set::<T>(entries, OpKind::Advance, OpImpl::Advance(advance::<T>));
    set::<T>(entries, OpKind::Distance, OpImpl::Distance(distance::<T>))
}

/// Resolution of the operation table for erasing `T` at strength `Self`.
///
/// An impl exists exactly when `T`'s declared native strength is at least
/// `Self`, so constructing a wrapper from an under-qualified cursor is a
/// missing-impl compile error at the construction site. The table itself
/// is validated against the selected contract in constant evaluation, per
/// concrete type, when that construction is first compiled.
pub trait Erase<T: Cursor>: Strength {
    /// Table bound to every wrapper erasing a `T` at this strength.
    const TABLE: OpTable<T::Value, T::Difference>;
}

impl<T: SinglePassCursor> Erase<T> for SinglePass {
    const TABLE: OpTable<T::Value, T::Difference> = OpTable::resolve(
        Self::CONTRACT,
        clone_into::<T>,
        drop_in_place::<T>,
        equality_adapter::<T>(base_adapter::<T>(no_entries::<T>())),
    );
}

impl<T: ForwardCursor> Erase<T> for Forward {
    // The forward contract adds only the default-construct capability,
    // carried by the `ForwardCursor: Default` bound; the operation set
    // matches single-pass.
    const TABLE: OpTable<T::Value, T::Difference> = OpTable::resolve(
        Self::CONTRACT,
        clone_into::<T>,
        drop_in_place::<T>,
        equality_adapter::<T>(base_adapter::<T>(no_entries::<T>())),
    );
}

impl<T: BidirectionalCursor> Erase<T> for Bidirectional {
    const TABLE: OpTable<T::Value, T::Difference> = OpTable::resolve(
        Self::CONTRACT,
        clone_into::<T>,
        drop_in_place::<T>,
        bidirectional_adapter::<T>(equality_adapter::<T>(base_adapter::<T>(no_entries::<T>()))),
    );
}

impl<T: RandomAccessCursor> Erase<T> for RandomAccess {
    const TABLE: OpTable<T::Value, T::Difference> = OpTable::resolve(
        Self::CONTRACT,
        clone_into::<T>,
        drop_in_place::<T>,
        random_access_adapter::<T>(bidirectional_adapter::<T>(equality_adapter::<T>(
            base_adapter::<T>(no_entries::<T>()),
        ))),
    );
}
