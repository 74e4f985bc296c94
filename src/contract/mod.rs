//! Capability contracts for erased cursors
//!
//! A contract is an immutable, named description of everything an erased
//! cursor type must support at a given iteration strength: a set of
//! intrinsic capabilities (clone, destroy, compare, ...) and a set of
//! named operations with fixed signature shapes.
//!
//! # Architecture
//!
//! Contracts form a strict refinement chain:
//!
//! ```text
//! ITERATOR                        increment, dereference
//!     ↓ refine
//! INPUT_ITERATOR                  + equality-compare (supplies `equal`)
//!     ↓ refine
//! FORWARD_ITERATOR                + default-construct
//!     ↓ refine
//! BIDIRECTIONAL_ITERATOR          + decrement
//!     ↓ refine
//! RANDOM_ACCESS_ITERATOR          + advance, distance
//! ```
//!
//! Refinement is set union: a refined contract starts as an exact copy of
//! its base and only ever gains requirements. Re-requiring an operation
//! that is already present with the same shape is a no-op; requiring it
//! with a *different* shape aborts constant evaluation, so a contradictory
//! composition can never reach runtime.
//!
//! Operation names are a closed enum ([`OpKind`]) rather than strings.
//! Requirement sets and dispatch tables are fixed-size arrays indexed by
//! that enum, which rules out name collisions and name-lookup failures by
//! construction.

use bitflags::bitflags;

bitflags! {
    /// Intrinsic capabilities a contract demands from an erased cursor type.
    ///
    /// These cover the lifecycle and comparison surface of the stored
    /// value; named operations cover everything that moves or reads it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capabilities: u8 {
        /// Clone into fresh storage.
        const COPY_CONSTRUCT = 1 << 0;
        /// Overwrite an existing value with a copy of another.
        const COPY_ASSIGN = 1 << 1;
        /// Destroy in place.
        const DESTRUCT = 1 << 2;
        /// Exchange two values whole.
        const SWAP = 1 << 3;
        /// Compare two values for position equality. Requiring this
        /// implicitly names the [`OpKind::Equal`] operation.
        const EQUALITY_COMPARE = 1 << 4;
        /// Construct a detached value with no arguments.
        const DEFAULT_CONSTRUCT = 1 << 5;
    }
}

/// Closed set of operation names a contract can require.
///
/// Doubles as the index into requirement sets and dispatch tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum OpKind {
    /// Step to the next position.
    Increment = 0,
    /// Borrow the element at the current position.
    Dereference = 1,
    /// Position equality of two cursors of one concrete type.
    Equal = 2,
    /// Step to the previous position.
    Decrement = 3,
    /// Jump by a signed offset.
    Advance = 4,
    /// Signed element count between two cursors.
    Distance = 5,
}

impl OpKind {
    /// Number of distinct operation kinds; the length of every
    /// requirement set and dispatch table.
    pub const COUNT: usize = 6;

    /// Slot of this kind in a requirement set or dispatch table.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Operation name, for diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            OpKind::Increment => "increment",
            OpKind::Dereference => "dereference",
            OpKind::Equal => "equal",
            OpKind::Decrement => "decrement",
            OpKind::Advance => "advance",
            OpKind::Distance => "distance",
        }
    }
}

/// Signature shape of a named operation, up to the declared value and
/// difference types of the wrapper that will invoke it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpShape {
    /// `fn(&mut Self)`
    Mutate,
    /// `fn(&Self) -> &Value`
    Deref,
    /// `fn(&Self, &Self) -> bool`
    Predicate,
    /// `fn(&mut Self, Difference)`
    Advance,
    /// `fn(&Self, &Self) -> Difference`
    Distance,
}

impl OpShape {
    /// Shape equality, usable in constant evaluation.
    pub const fn same(self, other: OpShape) -> bool {
        matches!(
            (self, other),
            (OpShape::Mutate, OpShape::Mutate)
                | (OpShape::Deref, OpShape::Deref)
                | (OpShape::Predicate, OpShape::Predicate)
                | (OpShape::Advance, OpShape::Advance)
                | (OpShape::Distance, OpShape::Distance)
        )
    }
}

/// An immutable, named set of required capabilities and operations.
///
/// Built once, in constant evaluation, by [`Contract::new`] and
/// [`Contract::refine`]; never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contract {
    name: &'static str,
    caps: Capabilities,
    ops: [Option<OpShape>; OpKind::COUNT],
}

impl Contract {
    /// Root contract requiring only `caps` and whatever operations they
    /// imply.
    pub const fn new(name: &'static str, caps: Capabilities) -> Self {
        Contract {
            name,
            caps: Capabilities::empty(),
            ops: [None; OpKind::COUNT],
        }
        .require_caps(caps)
    }

    /// Refine `base` under a new name.
    ///
    /// The result starts as an exact copy of `base`'s requirement sets;
    /// composition can only add to them, never remove.
    pub const fn refine(name: &'static str, base: &Contract) -> Self {
        Contract {
            name,
            caps: base.caps,
            ops: base.ops,
        }
    }

    /// Union in additional intrinsic capabilities.
    ///
    /// `EQUALITY_COMPARE` carries the `equal` operation with it, the way
    /// an equality capability supplies the comparison everywhere it is
    /// required.
    pub const fn require_caps(mut self, caps: Capabilities) -> Self {
        self.caps = self.caps.union(caps);
        if self.caps.contains(Capabilities::EQUALITY_COMPARE) {
            self = self.require_op(OpKind::Equal, OpShape::Predicate);
        }
        self
    }

    /// Union in a named operation requirement.
    ///
    /// # Panics
    ///
    /// Aborts constant evaluation when `kind` is already required with a
    /// different signature shape. Two requirement sets that disagree on
    /// one name cannot be merged.
    pub const fn require_op(mut self, kind: OpKind, shape: OpShape) -> Self {
        let slot = kind.index();
        match self.ops[slot] {
            None => self.ops[slot] = Some(shape),
            Some(existing) => {
                if !existing.same(shape) {
                    panic!("conflicting signature shapes required for one operation name");
                }
            }
        }
        self
    }

    /// Contract name, for diagnostics.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Required intrinsic capabilities.
    pub const fn capabilities(&self) -> Capabilities {
        self.caps
    }

    /// Shape required for `kind`, if this contract names it at all.
    pub const fn op(&self, kind: OpKind) -> Option<OpShape> {
        self.ops[kind.index()]
    }

    /// Shape required at a raw table slot.
    pub(crate) const fn op_at(&self, slot: usize) -> Option<OpShape> {
        self.ops[slot]
    }

    /// Number of operations this contract names.
    pub const fn op_count(&self) -> usize {
        let mut slot = 0;
        let mut count = 0;
        while slot < OpKind::COUNT {
            if self.ops[slot].is_some() {
                count += 1;
            }
            slot += 1;
        }
        count
    }

    /// True when every requirement of `weaker` also appears here with an
    /// agreeing shape.
    pub const fn refines(&self, weaker: &Contract) -> bool {
        if !self.caps.contains(weaker.caps) {
            return false;
        }
        let mut slot = 0;
        while slot < OpKind::COUNT {
            match (weaker.ops[slot], self.ops[slot]) {
                (Some(theirs), Some(ours)) => {
                    if !theirs.same(ours) {
                        return false;
                    }
                }
                (Some(_), None) => return false,
                (None, _) => {}
            }
            slot += 1;
        }
        true
    }
}

const CORE: Capabilities = Capabilities::COPY_CONSTRUCT
    .union(Capabilities::COPY_ASSIGN)
    .union(Capabilities::DESTRUCT)
    .union(Capabilities::SWAP);

/// Weakest contract: a cursor that can step and be read, nothing more.
pub const ITERATOR: Contract = Contract::new("Iterator", CORE)
    .require_op(OpKind::Increment, OpShape::Mutate)
    .require_op(OpKind::Dereference, OpShape::Deref);

/// Single-pass traversal with position equality.
pub const INPUT_ITERATOR: Contract =
    Contract::refine("InputIterator", &ITERATOR).require_caps(Capabilities::EQUALITY_COMPARE);

/// Multi-pass traversal; detached cursors can be default-constructed.
pub const FORWARD_ITERATOR: Contract =
    Contract::refine("ForwardIterator", &INPUT_ITERATOR).require_caps(Capabilities::DEFAULT_CONSTRUCT);

/// Forward plus stepping backwards.
pub const BIDIRECTIONAL_ITERATOR: Contract =
    Contract::refine("BidirectionalIterator", &FORWARD_ITERATOR)
        .require_op(OpKind::Decrement, OpShape::Mutate);

/// Bidirectional plus constant-time jumps and distances.
pub const RANDOM_ACCESS_ITERATOR: Contract =
    Contract::refine("RandomAccessIterator", &BIDIRECTIONAL_ITERATOR)
        .require_op(OpKind::Advance, OpShape::Advance)
        .require_op(OpKind::Distance, OpShape::Distance);
