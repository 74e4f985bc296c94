use crate::contract::{Contract, OpKind, OpShape};

/// Mutating operation on an erased payload (`increment`, `decrement`).
pub type MutateFn = unsafe fn(*mut u8);

/// Borrowing projection out of an erased payload (`dereference`).
pub type DerefFn<V> = unsafe fn(*const u8) -> *const V;

/// Binary predicate over two payloads of one concrete type (`equal`).
pub type PredicateFn = unsafe fn(*const u8, *const u8) -> bool;

/// Mutating jump by a signed offset (`advance`).
pub type AdvanceFn<D> = unsafe fn(*mut u8, D);

/// Signed count between two payloads of one concrete type (`distance`).
pub type DistanceFn<D> = unsafe fn(*const u8, *const u8) -> D;

/// One resolved operation implementation, tagged by its signature shape.
///
/// The tag is what lets the engine check, in constant evaluation, that an
/// adapter registration agrees with the contract's declared shape for the
/// same operation name.
pub enum OpImpl<V, D> {
    /// See [`MutateFn`].
    Mutate(MutateFn),
    /// See [`DerefFn`].
    Deref(DerefFn<V>),
    /// See [`PredicateFn`].
    Predicate(PredicateFn),
    /// See [`AdvanceFn`].
    Advance(AdvanceFn<D>),
    /// See [`DistanceFn`].
    Distance(DistanceFn<D>),
}

// Manual impls: the variants hold only function pointers, so the usual
// `V: Copy`/`D: Copy` derive bounds would be spurious.
impl<V, D> Clone for OpImpl<V, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V, D> Copy for OpImpl<V, D> {}

impl<V, D> OpImpl<V, D> {
    /// Signature shape of this implementation.
    pub const fn shape(&self) -> OpShape {
        match self {
            OpImpl::Mutate(_) => OpShape::Mutate,
            OpImpl::Deref(_) => OpShape::Deref,
            OpImpl::Predicate(_) => OpShape::Predicate,
            OpImpl::Advance(_) => OpShape::Advance,
            OpImpl::Distance(_) => OpShape::Distance,
        }
    }
}

/// Resolved dispatch table for one (contract, concrete type) pairing.
///
/// Holds the fundamental lifecycle entries plus one slot per operation
/// kind, indexed by [`OpKind`]. Built once, in constant evaluation, and
/// shared read-only by every wrapper erasing that concrete type at that
/// strength; a wrapper instance only ever holds a `&'static` reference to
/// it.
pub struct OpTable<V, D = isize> {
    contract: &'static Contract,
    clone_into: unsafe fn(*const u8, *mut u8),
    drop_in_place: unsafe fn(*mut u8),
    ops: [Option<OpImpl<V, D>>; OpKind::COUNT],
}

impl<V, D> OpTable<V, D> {
    /// Validate `ops` against `contract` and bind them into a table.
    ///
    /// # Panics
    ///
    /// Aborts constant evaluation when an operation the contract names is
    /// missing, an operation the contract does not name is supplied, or a
    /// supplied implementation disagrees with the contract's declared
    /// shape. Because tables are resolved in `const` contexts, each
    /// failure surfaces as a build error at the erasing construction that
    /// forced the resolution, before any instance exists.
    pub const fn resolve(
        contract: &'static Contract,
        clone_into: unsafe fn(*const u8, *mut u8),
        drop_in_place: unsafe fn(*mut u8),
        ops: [Option<OpImpl<V, D>>; OpKind::COUNT],
    ) -> Self {
        let mut slot = 0;
        while slot < OpKind::COUNT {
            match (contract.op_at(slot), &ops[slot]) {
                (None, None) => {}
                (None, Some(_)) => {
                    panic!("adapter supplies an operation the contract does not name")
                }
                (Some(_), None) => {
                    panic!("adapter leaves a contract operation unimplemented")
                }
                (Some(required), Some(supplied)) => {
                    if !required.same(supplied.shape()) {
                        panic!("adapter implementation disagrees with the contract's signature shape");
                    }
                }
            }
            slot += 1;
        }
        OpTable {
            contract,
            clone_into,
            drop_in_place,
            ops,
        }
    }

    /// The contract this table was resolved for.
    pub const fn contract(&self) -> &'static Contract {
        self.contract
    }

    /// Implementation bound for `kind`, if the contract names it.
    pub(crate) fn op(&self, kind: OpKind) -> Option<&OpImpl<V, D>> {
        self.ops[kind.index()].as_ref()
    }

    pub(crate) fn clone_into(&self) -> unsafe fn(*const u8, *mut u8) {
        self.clone_into
    }

    pub(crate) fn drop_in_place(&self) -> unsafe fn(*mut u8) {
        self.drop_in_place
    }
}
