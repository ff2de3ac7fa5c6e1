//! Bulk allocation and release of fixed-size element blocks.
//!
//! The store never looks at slot contents. Callers destroy live elements
//! before handing blocks back.

use alloc::vec::Vec;
use core::alloc::Layout;
use core::mem::size_of;
use core::ptr::NonNull;

use allocator_api2::alloc::Allocator;

use crate::error::DequeError;
use crate::layout::block_len;

/// Memory layout of a single block of `T`.
pub(crate) fn block_layout<T>() -> Result<Layout, DequeError> {
    Layout::array::<T>(block_len::<T>()).map_err(|_| DequeError::CapacityOverflow)
}

/// Appends `count` freshly allocated blocks to the end of `blocks`.
///
/// # Errors
///
/// Returns `DequeError::OutOfMemory` if the table or any block cannot be
/// allocated. Every block allocated by this call is released first, so
/// `blocks` is exactly as it was before the call.
pub(crate) fn allocate_range<T, A: Allocator>(
    alloc: &A,
    blocks: &mut Vec<NonNull<T>>,
    count: usize,
) -> Result<(), DequeError> {
    let layout = block_layout::<T>()?;
    blocks
        .try_reserve_exact(count)
        .map_err(|_| DequeError::OutOfMemory {
            bytes: count.saturating_mul(size_of::<NonNull<T>>()),
        })?;

    let base = blocks.len();
    for _ in 0..count {
        match alloc.allocate(layout) {
            Ok(block) => blocks.push(block.cast::<T>()),
            Err(_) => {
                tracing::debug!(
                    bytes = layout.size(),
                    rolled_back = blocks.len() - base,
                    "block allocation failed"
                );
                release(alloc, blocks.drain(base..), layout);
                return Err(DequeError::OutOfMemory {
                    bytes: layout.size(),
                });
            }
        }
    }
    Ok(())
}

/// Releases every block from `start` to the end of `blocks` and removes them
/// from the table. A table with fewer than `start` blocks is left untouched.
pub(crate) fn deallocate_range<T, A: Allocator>(
    alloc: &A,
    blocks: &mut Vec<NonNull<T>>,
    start: usize,
) {
    if start >= blocks.len() {
        return;
    }
    if let Ok(layout) = block_layout::<T>() {
        release(alloc, blocks.drain(start..), layout);
    }
}

/// Releases the first `count` blocks and shifts the remaining ones down.
pub(crate) fn deallocate_front<T, A: Allocator>(
    alloc: &A,
    blocks: &mut Vec<NonNull<T>>,
    count: usize,
) {
    let count = count.min(blocks.len());
    if count == 0 {
        return;
    }
    if let Ok(layout) = block_layout::<T>() {
        release(alloc, blocks.drain(..count), layout);
    }
}

fn release<T, A: Allocator>(alloc: &A, blocks: impl Iterator<Item = NonNull<T>>, layout: Layout) {
    for block in blocks {
        // SAFETY: every table entry was produced by `alloc.allocate(layout)`
        // in `allocate_range` and is released exactly once, here.
        unsafe {
            alloc.deallocate(block.cast::<u8>(), layout);
        }
    }
}
