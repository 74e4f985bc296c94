use std::mem::{self, MaybeUninit};

/// Capacity of the inline buffer, in machine words.
pub const STORAGE_WORDS: usize = 8;

/// Fixed-capacity inline storage for an erased cursor payload.
///
/// # Capacity contract
///
/// An erased type must fit [`STORAGE_WORDS`] machine words
/// ([`InlineStorage::BYTES`] bytes) and must not require alignment
/// stricter than one word. Both limits are part of the public API: a type
/// that violates either is rejected when the erasing construction is
/// compiled. There is no heap fallback and no runtime branch: oversized
/// payloads are a build failure, never a silent truncation.
///
/// The buffer itself is inert bytes. Whoever writes a value in owns its
/// lifecycle; [`crate::poly::Poly`] pairs every buffer with the operation
/// table that knows how to clone and destroy the payload.
pub struct InlineStorage {
    words: [MaybeUninit<usize>; STORAGE_WORDS],
}

impl InlineStorage {
    /// Capacity in bytes.
    pub const BYTES: usize = STORAGE_WORDS * mem::size_of::<usize>();

    /// Strictest alignment the buffer guarantees.
    pub const ALIGN: usize = mem::align_of::<usize>();

    /// Move `value` into fresh storage.
    ///
    /// Compilation of this call fails when `T` exceeds the capacity
    /// contract; the assertions are evaluated per concrete type, before
    /// any instance can exist.
    pub fn new<T>(value: T) -> Self {
        const {
            assert!(
                mem::size_of::<T>() <= InlineStorage::BYTES,
                "erased cursor type exceeds the inline storage capacity"
            );
        }
        const {
            assert!(
                mem::align_of::<T>() <= InlineStorage::ALIGN,
                "erased cursor type requires stricter alignment than the inline storage guarantees"
            );
        }
        let mut storage = InlineStorage::uninit();
        // SAFETY: the assertions above guarantee the buffer is large
        // enough and sufficiently aligned for `T`.
        unsafe { storage.as_mut_ptr().cast::<T>().write(value) };
        storage
    }

    /// Uninitialized storage for a payload about to be cloned in.
    pub(crate) fn uninit() -> Self {
        InlineStorage {
            words: [MaybeUninit::uninit(); STORAGE_WORDS],
        }
    }

    /// Raw pointer to the payload bytes.
    pub fn as_ptr(&self) -> *const u8 {
        self.words.as_ptr().cast()
    }

    /// Raw mutable pointer to the payload bytes.
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.words.as_mut_ptr().cast()
    }
}
