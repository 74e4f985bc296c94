//! Declared iteration strengths and the contract each one selects
//!
//! The four standard strength tags parameterize the erasing wrapper. The
//! [`Strength`] trait is the category selector: a total, compile-time,
//! injective mapping from tag to the weakest contract sufficient for that
//! strength. Note that single-pass already selects [`INPUT_ITERATOR`]; the
//! root `ITERATOR` contract is the base of the refinement chain but is
//! never selected on its own.
//!
//! The refinement markers ([`BidirectionalStrength`],
//! [`RandomAccessStrength`]) exist so that category-conditional wrapper
//! operations can be gated by a trait bound: `decrement` on a
//! forward-declared wrapper is not a runtime error, it simply does not
//! exist.

use crate::contract::{self, Contract};

/// Single-pass traversal: positions compare for equality, but a consumed
/// element cannot be revisited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinglePass;

/// Multi-pass forward traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Forward;

/// Forward plus stepping backwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bidirectional;

/// Bidirectional plus constant-time jumps and distances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomAccess;

/// A declared iteration strength.
///
/// Implementations select the contract an erased cursor must satisfy to be
/// stored behind a wrapper of this strength.
pub trait Strength: Copy + 'static {
    /// Tag name, for diagnostics.
    const NAME: &'static str;

    /// The weakest contract sufficient for this strength.
    const CONTRACT: &'static Contract;
}

impl Strength for SinglePass {
    const NAME: &'static str = "single-pass";
    const CONTRACT: &'static Contract = &contract::INPUT_ITERATOR;
}

impl Strength for Forward {
    const NAME: &'static str = "forward";
    const CONTRACT: &'static Contract = &contract::FORWARD_ITERATOR;
}

impl Strength for Bidirectional {
    const NAME: &'static str = "bidirectional";
    const CONTRACT: &'static Contract = &contract::BIDIRECTIONAL_ITERATOR;
}

impl Strength for RandomAccess {
    const NAME: &'static str = "random-access";
    const CONTRACT: &'static Contract = &contract::RANDOM_ACCESS_ITERATOR;
}

/// Strengths whose contract names `decrement`.
pub trait BidirectionalStrength: Strength {}

impl BidirectionalStrength for Bidirectional {}
impl BidirectionalStrength for RandomAccess {}

/// Strengths whose contract names `advance` and `distance`.
pub trait RandomAccessStrength: BidirectionalStrength {}

impl RandomAccessStrength for RandomAccess {}
