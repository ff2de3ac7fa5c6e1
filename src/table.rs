//! The block table: an ordered run of exclusively owned blocks plus the
//! allocation policy that produced them.
//!
//! The table owns memory, never elements. Dropping it releases every block,
//! so the container only has to destroy live elements before it goes away.

use alloc::vec::Vec;
use core::marker::PhantomData;
use core::mem::size_of;
use core::ptr::NonNull;

use allocator_api2::alloc::Allocator;

use crate::block_store::{allocate_range, deallocate_front, deallocate_range};
use crate::error::DequeError;
use crate::layout::{block_len, slot_ptr};

pub(crate) struct BlockTable<T, A: Allocator> {
    blocks: Vec<NonNull<T>>,
    alloc: A,
    _owns: PhantomData<T>,
}

impl<T, A: Allocator> BlockTable<T, A> {
    pub(crate) const fn new_in(alloc: A) -> Self {
        Self {
            blocks: Vec::new(),
            alloc,
            _owns: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    #[inline]
    pub(crate) fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Total number of slots across all blocks.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.blocks.len() * block_len::<T>()
    }

    #[inline]
    pub(crate) fn blocks(&self) -> &[NonNull<T>] {
        &self.blocks
    }

    /// Pointer to an absolute slot. The slot must be below `capacity()`.
    #[inline]
    pub(crate) fn slot_ptr(&self, slot: usize) -> *mut T {
        slot_ptr(&self.blocks, slot)
    }

    /// Appends `added` blocks after the existing ones.
    pub(crate) fn grow_back(&mut self, added: usize) -> Result<(), DequeError> {
        tracing::trace!(added, blocks = self.blocks.len(), "growing block table at the back");
        allocate_range(&self.alloc, &mut self.blocks, added)
    }

    /// Places `added` new blocks before the existing ones.
    ///
    /// Existing block pointers keep their relative order; only the pointers
    /// are copied, never the elements. Callers shift their slot indices by
    /// `added * block_len::<T>()`.
    pub(crate) fn grow_front(&mut self, added: usize) -> Result<(), DequeError> {
        tracing::trace!(added, blocks = self.blocks.len(), "growing block table at the front");
        let total = added.checked_add(self.blocks.len()).ok_or(DequeError::CapacityOverflow)?;
        let mut grown: Vec<NonNull<T>> = Vec::new();
        grown
            .try_reserve_exact(total)
            .map_err(|_| DequeError::OutOfMemory {
                bytes: total.saturating_mul(size_of::<NonNull<T>>()),
            })?;
        allocate_range(&self.alloc, &mut grown, added)?;
        grown.extend_from_slice(&self.blocks);
        self.blocks = grown;
        Ok(())
    }

    /// Moves the first `count` blocks to the back of the table.
    ///
    /// Only pointers change places. Callers shift their slot indices down by
    /// `count * block_len::<T>()`.
    pub(crate) fn recycle_front(&mut self, count: usize) {
        tracing::trace!(count, blocks = self.blocks.len(), "recycling front blocks at the back");
        self.blocks.rotate_left(count);
    }

    /// Moves the last `count` blocks to the front of the table.
    pub(crate) fn recycle_back(&mut self, count: usize) {
        tracing::trace!(count, blocks = self.blocks.len(), "recycling back blocks at the front");
        self.blocks.rotate_right(count);
    }

    /// Releases `front` blocks at the start and every block from `back_end` on.
    pub(crate) fn release_outside(&mut self, front: usize, back_end: usize) {
        let before = self.blocks.len();
        deallocate_range(&self.alloc, &mut self.blocks, back_end);
        deallocate_front(&self.alloc, &mut self.blocks, front);
        self.blocks.shrink_to_fit();
        tracing::trace!(released = before - self.blocks.len(), "shrank block table");
    }

    pub(crate) fn release_all(&mut self) {
        self.release_outside(0, 0);
    }
}

impl<T, A: Allocator> Drop for BlockTable<T, A> {
    fn drop(&mut self) {
        deallocate_range(&self.alloc, &mut self.blocks, 0);
    }
}
