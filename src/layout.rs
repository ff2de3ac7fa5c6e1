//! Block sizing and the logical-slot to (block, offset) mapping.
//!
//! Every position inside a `BlockDeque` is an absolute slot in the flattened
//! block table. The container and all cursors translate slots through
//! [`slot_of`], so both always agree on where an element lives.

use core::mem::size_of;
use core::ptr::NonNull;

/// Target size of one block in bytes.
pub const BLOCK_BYTES: usize = 512;

/// Block length used when an element is too large to fit the byte budget.
pub const MIN_BLOCK_LEN: usize = 8;

/// Growth multiplier applied to the number of blocks spanned by the live window.
pub const EXPANSION_FACTOR: usize = 2;

/// Number of element slots in one block for `T`.
#[must_use]
pub const fn block_len<T>() -> usize {
    let size = size_of::<T>();
    if size == 0 {
        BLOCK_BYTES
    } else if size < BLOCK_BYTES / MIN_BLOCK_LEN {
        BLOCK_BYTES / size
    } else {
        MIN_BLOCK_LEN
    }
}

/// Splits an absolute slot into `(block index, offset within block)`.
#[inline]
#[must_use]
pub const fn slot_of<T>(slot: usize) -> (usize, usize) {
    let len = block_len::<T>();
    (slot / len, slot % len)
}

/// Pointer to an absolute slot of a block table.
///
/// `slot` must lie inside the table, that is below `blocks.len() * block_len::<T>()`.
#[inline]
pub(crate) fn slot_ptr<T>(blocks: &[NonNull<T>], slot: usize) -> *mut T {
    let (block, offset) = slot_of::<T>(slot);
    debug_assert!(block < blocks.len(), "slot {slot} outside table");
    // SAFETY: `block` indexes an allocated block of `block_len::<T>()` slots
    // and `offset` is below that length.
    unsafe { blocks.get_unchecked(block).as_ptr().add(offset) }
}
