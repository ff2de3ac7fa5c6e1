use core::mem;
use core::ptr;

use allocator_api2::alloc::{Allocator, Global};

use crate::cursor::{Cursor, CursorMut};
use crate::error::DequeError;
use crate::iter::{Iter, IterMut};
use crate::layout::{block_len, EXPANSION_FACTOR};
use crate::table::BlockTable;

/// A double-ended queue stored in a table of fixed-size blocks.
///
/// Elements occupy the contiguous run of absolute slots
/// `[start, start + len)` of the flattened table. Pushing at either end
/// never moves existing elements: when the window touches a table boundary,
/// new blocks are added on that side and only block pointers are copied.
pub struct BlockDeque<T, A: Allocator = Global> {
    table: BlockTable<T, A>,
    start: usize,
    len: usize,
}

impl<T> BlockDeque<T> {
    /// Creates an empty deque. No blocks are allocated until the first insertion.
    #[must_use]
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// Creates an empty deque with room for `capacity` elements, centered so
    /// that both ends have the same amount of free space.
    ///
    /// # Errors
    ///
    /// Returns `DequeError::OutOfMemory` if the blocks cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Result<Self, DequeError> {
        Self::with_capacity_in(capacity, Global)
    }

    /// Creates a deque holding `n` copies of `value`.
    ///
    /// # Errors
    ///
    /// Returns `DequeError::OutOfMemory` if the blocks cannot be allocated.
    /// If cloning `value` panics, the already constructed elements are dropped
    /// and every block is released before the panic continues.
    pub fn from_elem(value: T, n: usize) -> Result<Self, DequeError>
    where
        T: Clone,
    {
        Self::from_elem_in(value, n, Global)
    }

    /// Creates a deque from an iterator.
    ///
    /// # Errors
    ///
    /// Returns `DequeError::OutOfMemory` if storage cannot be allocated. The
    /// partially built deque is dropped before the error is returned.
    pub fn try_from_iter<I: IntoIterator<Item = T>>(iter: I) -> Result<Self, DequeError> {
        Self::try_from_iter_in(iter, Global)
    }

    /// Creates a deque of `n` elements produced by a fallible constructor.
    ///
    /// `make` is called with each index in order. The first error it returns
    /// is propagated unchanged after the elements built so far are dropped and
    /// all blocks are released.
    ///
    /// # Errors
    ///
    /// Returns the constructor's error, or a `DequeError` converted into `E`
    /// if storage cannot be allocated.
    pub fn try_from_fn<E, F>(n: usize, make: F) -> Result<Self, E>
    where
        E: From<DequeError>,
        F: FnMut(usize) -> Result<T, E>,
    {
        Self::try_from_fn_in(n, make, Global)
    }
}

impl<T, A: Allocator> BlockDeque<T, A> {
    /// Number of element slots per block.
    pub const BLOCK_LEN: usize = block_len::<T>();

    /// Creates an empty deque that allocates its blocks through `alloc`.
    #[must_use]
    pub const fn new_in(alloc: A) -> Self {
        Self {
            table: BlockTable::new_in(alloc),
            start: 0,
            len: 0,
        }
    }

    /// Like [`BlockDeque::with_capacity`], using `alloc` for blocks.
    ///
    /// # Errors
    ///
    /// Returns `DequeError::OutOfMemory` if the blocks cannot be allocated.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self, DequeError> {
        let mut deque = Self::new_in(alloc);
        if capacity > 0 {
            let blocks = capacity.div_ceil(Self::BLOCK_LEN);
            deque.table.grow_back(blocks)?;
            deque.start = (deque.table.capacity() - capacity) / 2;
        }
        Ok(deque)
    }

    /// Like [`BlockDeque::from_elem`], using `alloc` for blocks.
    ///
    /// # Errors
    ///
    /// Returns `DequeError::OutOfMemory` if the blocks cannot be allocated.
    pub fn from_elem_in(value: T, n: usize, alloc: A) -> Result<Self, DequeError>
    where
        T: Clone,
    {
        let mut deque = Self::with_capacity_in(n, alloc)?;
        if n > 0 {
            for _ in 1..n {
                deque.write_back(value.clone());
            }
            deque.write_back(value);
        }
        Ok(deque)
    }

    /// Like [`BlockDeque::try_from_iter`], using `alloc` for blocks.
    ///
    /// # Errors
    ///
    /// Returns `DequeError::OutOfMemory` if storage cannot be allocated.
    pub fn try_from_iter_in<I: IntoIterator<Item = T>>(
        iter: I,
        alloc: A,
    ) -> Result<Self, DequeError> {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut deque = Self::with_capacity_in(lower, alloc)?;
        for value in iter {
            deque.push_back(value)?;
        }
        Ok(deque)
    }

    /// Like [`BlockDeque::try_from_fn`], using `alloc` for blocks.
    ///
    /// # Errors
    ///
    /// Returns the constructor's error, or a `DequeError` converted into `E`.
    pub fn try_from_fn_in<E, F>(n: usize, mut make: F, alloc: A) -> Result<Self, E>
    where
        E: From<DequeError>,
        F: FnMut(usize) -> Result<T, E>,
    {
        let mut deque = Self::with_capacity_in(n, alloc)?;
        for index in 0..n {
            let value = make(index)?;
            deque.write_back(value);
        }
        Ok(deque)
    }

    /// Clones the deque into an identically sized block run.
    ///
    /// # Errors
    ///
    /// Returns `DequeError::OutOfMemory` if the blocks cannot be allocated.
    /// If an element's `clone` panics, the copies made so far are dropped and
    /// the new blocks are released before the panic continues.
    pub fn try_clone(&self) -> Result<Self, DequeError>
    where
        T: Clone,
        A: Clone,
    {
        let mut copy = Self::new_in(self.table.allocator().clone());
        copy.table.grow_back(self.table.block_count())?;
        copy.start = self.start;
        for value in self {
            copy.write_back(value.clone());
        }
        Ok(copy)
    }

    // --- Inspection ---

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total number of slots in the allocated blocks, live or not.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Number of allocated blocks.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.table.block_count()
    }

    #[must_use]
    pub fn allocator(&self) -> &A {
        self.table.allocator()
    }

    // --- Access ---

    /// Returns the element at `index`, or `None` if it is out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            // SAFETY: bounds checked above.
            Some(unsafe { self.get_unchecked(index) })
        } else {
            None
        }
    }

    /// Returns the element at `index` mutably, or `None` if it is out of bounds.
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            // SAFETY: bounds checked above.
            Some(unsafe { self.get_unchecked_mut(index) })
        } else {
            None
        }
    }

    /// Bounds-checked access.
    ///
    /// # Errors
    ///
    /// Returns `DequeError::IndexOutOfBounds` if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T, DequeError> {
        let length = self.len;
        self.get(index)
            .ok_or(DequeError::IndexOutOfBounds { index, length })
    }

    /// Bounds-checked mutable access.
    ///
    /// # Errors
    ///
    /// Returns `DequeError::IndexOutOfBounds` if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, DequeError> {
        let length = self.len;
        self.get_mut(index)
            .ok_or(DequeError::IndexOutOfBounds { index, length })
    }

    /// Returns the element at `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than `self.len()`.
    #[must_use]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        unsafe { &*self.slot_ptr(index) }
    }

    /// Returns the element at `index` mutably without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than `self.len()`.
    #[must_use]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        unsafe { &mut *self.slot_ptr(index) }
    }

    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    #[must_use]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.get(self.len.wrapping_sub(1))
    }

    #[must_use]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.get_mut(self.len.wrapping_sub(1))
    }

    // --- End operations ---

    /// Appends an element.
    ///
    /// # Errors
    ///
    /// Returns `DequeError::OutOfMemory` if the table had to grow and the new
    /// blocks could not be allocated. The deque is left unchanged.
    pub fn push_back(&mut self, value: T) -> Result<(), DequeError> {
        self.emplace_back(|| value).map(|_| ())
    }

    /// Prepends an element.
    ///
    /// # Errors
    ///
    /// Returns `DequeError::OutOfMemory` if the table had to grow and the new
    /// blocks could not be allocated. The deque is left unchanged.
    pub fn push_front(&mut self, value: T) -> Result<(), DequeError> {
        self.emplace_front(|| value).map(|_| ())
    }

    /// Constructs an element directly in the next free slot at the back.
    ///
    /// # Errors
    ///
    /// Returns `DequeError::OutOfMemory` if growth fails; `make` is not called.
    pub fn emplace_back<F: FnOnce() -> T>(&mut self, make: F) -> Result<&mut T, DequeError> {
        self.reserve_back()?;
        let slot = self.slot_ptr(self.len);
        // SAFETY: `reserve_back` guarantees the slot past the window is allocated.
        unsafe {
            slot.write(make());
        }
        self.len += 1;
        // SAFETY: the slot now holds a live element borrowed through `self`.
        Ok(unsafe { &mut *slot })
    }

    /// Constructs an element directly in the next free slot at the front.
    ///
    /// # Errors
    ///
    /// Returns `DequeError::OutOfMemory` if growth fails; `make` is not called.
    pub fn emplace_front<F: FnOnce() -> T>(&mut self, make: F) -> Result<&mut T, DequeError> {
        self.reserve_front()?;
        let slot = self.table.slot_ptr(self.start - 1);
        // SAFETY: `reserve_front` guarantees `start > 0`, so the slot before
        // the window is allocated.
        unsafe {
            slot.write(make());
        }
        self.start -= 1;
        self.len += 1;
        // SAFETY: the slot is now the first live element.
        Ok(unsafe { &mut *slot })
    }

    /// Removes and returns the last element, or `None` if the deque is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot held the last live element and is now outside the window.
        Some(unsafe { self.slot_ptr(self.len).read() })
    }

    /// Removes and returns the first element, or `None` if the deque is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: the slot holds the first live element; the window moves past it.
        let value = unsafe { self.slot_ptr(0).read() };
        self.start += 1;
        self.len -= 1;
        Some(value)
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns `DequeError::EmptyDeque` if the deque is empty.
    pub fn try_pop_back(&mut self) -> Result<T, DequeError> {
        self.pop_back().ok_or(DequeError::EmptyDeque)
    }

    /// Removes and returns the first element.
    ///
    /// # Errors
    ///
    /// Returns `DequeError::EmptyDeque` if the deque is empty.
    pub fn try_pop_front(&mut self) -> Result<T, DequeError> {
        self.pop_front().ok_or(DequeError::EmptyDeque)
    }

    // --- Positional operations ---

    /// Inserts `value` so that it ends up at `index`.
    ///
    /// Elements on the shorter side of `index` move by one slot. Ties move the
    /// back part.
    ///
    /// # Errors
    ///
    /// Returns `DequeError::InvalidPosition` if `index > len()`, or
    /// `DequeError::OutOfMemory` if growth fails. The deque is left unchanged.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), DequeError> {
        self.emplace(index, || value).map(|_| ())
    }

    /// Constructs an element at `index`, shifting the shorter side.
    ///
    /// `make` runs before any element moves, so a panic in it leaves the
    /// deque untouched.
    ///
    /// # Errors
    ///
    /// Returns `DequeError::InvalidPosition` if `index > len()`, or
    /// `DequeError::OutOfMemory` if growth fails.
    pub fn emplace<F: FnOnce() -> T>(&mut self, index: usize, make: F) -> Result<&mut T, DequeError> {
        if index > self.len {
            return Err(DequeError::InvalidPosition {
                position: index,
                length: self.len,
            });
        }
        let value = make();
        if self.len - index <= index {
            self.reserve_back()?;
            // Walk from the back so every slot is read before it is overwritten.
            let mut i = self.len;
            while i > index {
                self.move_slot(i - 1, i);
                i -= 1;
            }
        } else {
            self.reserve_front()?;
            self.start -= 1;
            for i in 0..index {
                self.move_slot(i + 1, i);
            }
        }
        let slot = self.slot_ptr(index);
        // SAFETY: the element that lived at `index` was moved away above.
        unsafe {
            slot.write(value);
        }
        self.len += 1;
        // SAFETY: `index` is inside the grown window and was just written.
        Ok(unsafe { &mut *slot })
    }

    /// Erases the element at `index` and returns it.
    ///
    /// Elements on the shorter side close the gap. Ties move the back part.
    ///
    /// # Errors
    ///
    /// Returns `DequeError::InvalidPosition` if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> Result<T, DequeError> {
        if index >= self.len {
            return Err(DequeError::InvalidPosition {
                position: index,
                length: self.len,
            });
        }
        // SAFETY: `index` is inside the window; its slot is refilled or dropped
        // from the window below.
        let value = unsafe { self.slot_ptr(index).read() };
        if self.len - index - 1 <= index {
            for i in index..self.len - 1 {
                self.move_slot(i + 1, i);
            }
        } else {
            let mut i = index;
            while i > 0 {
                self.move_slot(i - 1, i);
                i -= 1;
            }
            self.start += 1;
        }
        self.len -= 1;
        Ok(value)
    }

    /// Grows by pushing clones of `value` at the back, or shrinks by dropping
    /// elements from the back, until `len() == count`.
    ///
    /// # Errors
    ///
    /// Returns `DequeError::OutOfMemory` if growth fails. Elements pushed
    /// before the failure are dropped again, so the deque is left unchanged.
    pub fn resize(&mut self, count: usize, value: T) -> Result<(), DequeError>
    where
        T: Clone,
    {
        if count <= self.len {
            self.truncate(count);
            return Ok(());
        }
        let old = self.len;
        let grown = (old + 1..count)
            .try_for_each(|_| self.push_back(value.clone()))
            .and_then(|()| self.push_back(value));
        if grown.is_err() {
            self.truncate(old);
        }
        grown
    }

    /// Like [`BlockDeque::resize`], producing new elements with `make`.
    ///
    /// # Errors
    ///
    /// Returns `DequeError::OutOfMemory` if growth fails. The deque is left
    /// unchanged.
    pub fn resize_with<F: FnMut() -> T>(&mut self, count: usize, mut make: F) -> Result<(), DequeError> {
        if count <= self.len {
            self.truncate(count);
            return Ok(());
        }
        let old = self.len;
        while self.len < count {
            if let Err(err) = self.emplace_back(&mut make) {
                self.truncate(old);
                return Err(err);
            }
        }
        Ok(())
    }

    /// Drops elements from the back until at most `len` remain.
    pub fn truncate(&mut self, len: usize) {
        while self.len > len {
            self.len -= 1;
            // SAFETY: the slot held a live element and is now outside the window.
            unsafe {
                ptr::drop_in_place(self.slot_ptr(self.len));
            }
        }
    }

    /// Drops every element. Blocks stay allocated and the empty window is
    /// recentered.
    pub fn clear(&mut self) {
        self.truncate(0);
        self.start = self.table.capacity() / 2;
    }

    /// Releases blocks that lie entirely outside the live window. Live
    /// elements never move.
    pub fn shrink_to_fit(&mut self) {
        if self.len == 0 {
            self.table.release_all();
            self.start = 0;
            return;
        }
        let first = self.start / Self::BLOCK_LEN;
        let end = (self.start + self.len).div_ceil(Self::BLOCK_LEN);
        self.table.release_outside(first, end);
        self.start -= first * Self::BLOCK_LEN;
    }

    /// Exchanges the contents, blocks and allocators of two deques.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    // --- Iteration ---

    /// Returns an iterator over the elements, front to back.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.begin(), self.end())
    }

    /// Returns an iterator over the elements, back to front.
    #[must_use]
    pub fn iter_rev(&self) -> core::iter::Rev<Iter<'_, T>> {
        self.iter().rev()
    }

    /// Returns a mutable iterator over the elements, front to back.
    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let head = self.start;
        let tail = self.start + self.len;
        IterMut::new(self.table.blocks(), head, tail)
    }

    /// Cursor at the first element.
    #[must_use]
    pub fn begin(&self) -> Cursor<'_, T> {
        self.cursor(0)
    }

    /// Cursor one past the last element.
    #[must_use]
    pub fn end(&self) -> Cursor<'_, T> {
        self.cursor(self.len)
    }

    /// Cursor at logical `index`. Positions outside `0..len()` are allowed but
    /// do not dereference.
    #[must_use]
    pub fn cursor(&self, index: usize) -> Cursor<'_, T> {
        Cursor::new(
            self.table.blocks(),
            self.start.wrapping_add(index),
            self.start,
            self.start + self.len,
        )
    }

    /// Mutable cursor at the first element.
    #[must_use]
    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        self.cursor_mut(0)
    }

    /// Mutable cursor one past the last element.
    #[must_use]
    pub fn end_mut(&mut self) -> CursorMut<'_, T> {
        let len = self.len;
        self.cursor_mut(len)
    }

    /// Mutable cursor at logical `index`.
    #[must_use]
    pub fn cursor_mut(&mut self, index: usize) -> CursorMut<'_, T> {
        let start = self.start;
        let end = self.start + self.len;
        CursorMut::new(self.table.blocks(), start.wrapping_add(index), start, end)
    }

    // --- Internals ---

    #[inline]
    fn slot_ptr(&self, index: usize) -> *mut T {
        self.table.slot_ptr(self.start + index)
    }

    /// Bitwise move of the element at logical `from` into logical `to`.
    #[inline]
    fn move_slot(&mut self, from: usize, to: usize) {
        // SAFETY: callers move each live element exactly once into a slot that
        // is vacant or was itself moved out earlier in the same pass.
        unsafe {
            let value = self.slot_ptr(from).read();
            self.slot_ptr(to).write(value);
        }
    }

    /// Writes into the slot past the back. Capacity must already be reserved.
    fn write_back(&mut self, value: T) {
        debug_assert!(self.start + self.len < self.table.capacity());
        // SAFETY: the caller reserved the slot.
        unsafe {
            self.slot_ptr(self.len).write(value);
        }
        self.len += 1;
    }

    /// Blocks spanned by the live window, at least one.
    fn occupied_blocks(&self) -> usize {
        if self.len == 0 {
            return 1;
        }
        let first = self.start / Self::BLOCK_LEN;
        let last = (self.start + self.len - 1) / Self::BLOCK_LEN;
        last - first + 1
    }

    /// Makes sure the slot right after the window exists.
    ///
    /// Empty blocks left at the front are moved to the back when there are at
    /// least as many of them as the window spans. Otherwise new blocks are
    /// allocated.
    fn reserve_back(&mut self) -> Result<(), DequeError> {
        let capacity = self.table.capacity();
        if self.start + self.len < capacity {
            return Ok(());
        }
        if capacity == 0 {
            self.table.grow_back(EXPANSION_FACTOR)?;
            self.start = self.table.capacity() / 2;
            return Ok(());
        }
        if self.len == 0 {
            self.start = capacity / 2;
            return Ok(());
        }
        let occupied = self.occupied_blocks();
        let dead = self.start / Self::BLOCK_LEN;
        if dead >= occupied {
            self.table.recycle_front(dead);
            self.start -= dead * Self::BLOCK_LEN;
            return Ok(());
        }
        self.table.grow_back(occupied * EXPANSION_FACTOR)
    }

    /// Makes sure the slot right before the window exists. Mirrors
    /// `reserve_back`, recycling empty blocks from the back.
    fn reserve_front(&mut self) -> Result<(), DequeError> {
        if self.start > 0 {
            return Ok(());
        }
        let capacity = self.table.capacity();
        if capacity == 0 {
            self.table.grow_back(EXPANSION_FACTOR)?;
            self.start = self.table.capacity() / 2;
            return Ok(());
        }
        if self.len == 0 {
            self.start = capacity / 2;
            return Ok(());
        }
        let occupied = self.occupied_blocks();
        let dead = self.table.block_count() - self.len.div_ceil(Self::BLOCK_LEN);
        if dead >= occupied {
            self.table.recycle_back(dead);
            self.start += dead * Self::BLOCK_LEN;
            return Ok(());
        }
        let added = occupied * EXPANSION_FACTOR;
        self.table.grow_front(added)?;
        self.start += added * Self::BLOCK_LEN;
        Ok(())
    }
}

impl<T, A: Allocator> Drop for BlockDeque<T, A> {
    fn drop(&mut self) {
        self.truncate(0);
    }
}

// SAFETY: the deque owns its elements and blocks exclusively.
unsafe impl<T: Send, A: Allocator + Send> Send for BlockDeque<T, A> {}
// SAFETY: shared access only hands out `&T` and `&A`.
unsafe impl<T: Sync, A: Allocator + Sync> Sync for BlockDeque<T, A> {}
