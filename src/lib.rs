//! Type-erased iterators with capability-level dynamic dispatch
//!
//! `anyiter` provides [`AnyIterator`], a uniform runtime-polymorphic
//! value type that can hold *any* concrete cursor implementation matching
//! a declared iteration strength (single-pass, forward, bidirectional, or
//! random-access), while preserving value semantics (clone, move, swap)
//! and dispatching operations without the caller knowing the concrete
//! stored type.
//!
//! # Architecture
//!
//! ```text
//! AnyIterator<V, S, D>          public erasing wrapper (any_iterator)
//!     ├─→ Strength → Contract   category selector      (category)
//!     ├─→ Erase<T> resolution   adapter layer          (adapter)
//!     │       └─→ native ops    cursor traits          (cursor)
//!     └─→ Poly<V, D>            dispatch engine        (poly)
//!             ├─→ InlineStorage fixed 8-word buffer
//!             └─→ &'static OpTable   validated against (contract)
//! ```
//!
//! ## Key design principles
//!
//! 1. **Compile-time contracts**: every compatibility rule (element and
//!    difference type identity, sufficient native strength, payload size)
//!    is enforced while compiling the construction site. There is no
//!    runtime validation path.
//! 2. **Closed operation names**: contracts and dispatch tables are
//!    indexed by a closed enum of operation kinds, not by name lookup, so
//!    collisions and lookup failures cannot exist.
//! 3. **Additive refinement**: stronger contracts only ever add
//!    requirements to weaker ones, and adapters register stronger
//!    operations only for concrete types that declare them.
//! 4. **One runtime check**: binary operations across two wrappers assert
//!    in every build that both erase the same concrete type; that is the
//!    single fact erasure cannot move to compile time.
//!
//! # Example
//!
//! ```
//! use anyiter::{AnyIterator, Forward, RandomAccess, SliceCursor};
//!
//! let values = [10, 20, 30];
//! let mut it: AnyIterator<i32, Forward> = AnyIterator::new(SliceCursor::begin(&values));
//! assert_eq!(*it, 10);
//! it.increment();
//! assert_eq!(*it, 20);
//!
//! let mut fast: AnyIterator<i32, RandomAccess> =
//!     AnyIterator::new(SliceCursor::begin(&values));
//! fast.advance(2);
//! assert_eq!(*fast, 30);
//! ```

pub mod adapter;
pub mod any_iterator;
pub mod category;
pub mod contract;
pub mod cursor;
pub mod poly;

pub use adapter::Erase;
pub use any_iterator::{AnyIterator, Items};
pub use category::{
    Bidirectional, BidirectionalStrength, Forward, RandomAccess, RandomAccessStrength,
    SinglePass, Strength,
};
pub use contract::{Capabilities, Contract, OpKind, OpShape};
pub use cursor::{
    BidirectionalCursor, Cursor, ForwardCursor, RandomAccessCursor, SinglePassCursor, SliceCursor,
};
pub use poly::{InlineStorage, OpTable, Poly, STORAGE_WORDS};
