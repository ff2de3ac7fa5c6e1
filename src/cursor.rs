//! Random-access cursors over a `BlockDeque`.
//!
//! A cursor is the block table plus an absolute slot. Every move is plain
//! slot arithmetic and every dereference goes through the same slot mapping
//! the deque uses, so a cursor behaves like a flat random-access position
//! even though consecutive elements may live in different blocks.
//!
//! Cursors may step outside the live window (one before the front, the end
//! position, or further). Such positions compare and subtract normally but
//! do not dereference.

use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Sub, SubAssign};
use core::ptr::NonNull;

use crate::layout::slot_ptr;

/// Read-only random-access position in a `BlockDeque`.
///
/// Two cursors are only meaningfully comparable or subtractable when they
/// come from the same deque.
pub struct Cursor<'a, T> {
    blocks: &'a [NonNull<T>],
    slot: usize,
    start: usize,
    end: usize,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(blocks: &'a [NonNull<T>], slot: usize, start: usize, end: usize) -> Self {
        Self {
            blocks,
            slot,
            start,
            end,
        }
    }

    /// Logical index of this position; `len()` for the end cursor.
    ///
    /// Positions before the front wrap around.
    #[must_use]
    pub fn index(&self) -> usize {
        self.slot.wrapping_sub(self.start)
    }

    /// Returns the element under the cursor, or `None` outside the live window.
    #[must_use]
    pub fn get(&self) -> Option<&'a T> {
        if self.is_live() {
            // SAFETY: slots inside the window hold live elements, and the
            // shared borrow of the deque keeps them alive for `'a`.
            Some(unsafe { &*slot_ptr(self.blocks, self.slot) })
        } else {
            None
        }
    }

    pub fn move_next(&mut self) {
        self.slot = self.slot.wrapping_add(1);
    }

    pub fn move_prev(&mut self) {
        self.slot = self.slot.wrapping_sub(1);
    }

    /// Signed distance from `origin` to `self`.
    #[must_use]
    pub fn offset_from(&self, origin: &Self) -> isize {
        debug_assert!(
            core::ptr::eq(self.blocks, origin.blocks),
            "cursors from different deques"
        );
        self.slot.wrapping_sub(origin.slot) as isize
    }

    fn is_live(&self) -> bool {
        self.start <= self.slot && self.slot < self.end
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Cursor<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.slot.cmp(&other.slot)
    }
}

impl<T> AddAssign<isize> for Cursor<'_, T> {
    fn add_assign(&mut self, offset: isize) {
        self.slot = self.slot.wrapping_add_signed(offset);
    }
}

impl<T> SubAssign<isize> for Cursor<'_, T> {
    fn sub_assign(&mut self, offset: isize) {
        self.slot = self.slot.wrapping_add_signed(offset.wrapping_neg());
    }
}

impl<T> Add<isize> for Cursor<'_, T> {
    type Output = Self;

    fn add(mut self, offset: isize) -> Self {
        self += offset;
        self
    }
}

impl<T> Sub<isize> for Cursor<'_, T> {
    type Output = Self;

    fn sub(mut self, offset: isize) -> Self {
        self -= offset;
        self
    }
}

impl<'a, T> Sub for Cursor<'a, T> {
    type Output = isize;

    fn sub(self, origin: Self) -> isize {
        self.offset_from(&origin)
    }
}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index())
            .finish_non_exhaustive()
    }
}

// SAFETY: a cursor only hands out `&T`.
unsafe impl<T: Sync> Send for Cursor<'_, T> {}
// SAFETY: sharing a cursor shares nothing beyond `&T`.
unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

/// Mutable random-access position in a `BlockDeque`.
///
/// Holds the deque's exclusive borrow, so at most one mutable cursor exists
/// at a time. Narrow it to a [`Cursor`] with [`CursorMut::as_cursor`] or
/// `Cursor::from`.
pub struct CursorMut<'a, T> {
    blocks: &'a [NonNull<T>],
    slot: usize,
    start: usize,
    end: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(blocks: &'a [NonNull<T>], slot: usize, start: usize, end: usize) -> Self {
        Self {
            blocks,
            slot,
            start,
            end,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.slot.wrapping_sub(self.start)
    }

    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.as_cursor().get()
    }

    /// Returns the element under the cursor mutably, or `None` outside the
    /// live window.
    #[must_use]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        if self.start <= self.slot && self.slot < self.end {
            // SAFETY: the slot holds a live element and the cursor owns the
            // deque's exclusive borrow; the result borrows the cursor.
            Some(unsafe { &mut *slot_ptr(self.blocks, self.slot) })
        } else {
            None
        }
    }

    /// Consumes the cursor, returning the element under it for the full borrow.
    #[must_use]
    pub fn into_mut(self) -> Option<&'a mut T> {
        if self.start <= self.slot && self.slot < self.end {
            // SAFETY: as in `get_mut`; the cursor is consumed so no other
            // reference can be produced from it.
            Some(unsafe { &mut *slot_ptr(self.blocks, self.slot) })
        } else {
            None
        }
    }

    pub fn move_next(&mut self) {
        self.slot = self.slot.wrapping_add(1);
    }

    pub fn move_prev(&mut self) {
        self.slot = self.slot.wrapping_sub(1);
    }

    /// Read-only view of the same position, borrowing this cursor.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.blocks, self.slot, self.start, self.end)
    }
}

impl<'a, T> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        Cursor::new(cursor.blocks, cursor.slot, cursor.start, cursor.end)
    }
}

impl<T> AddAssign<isize> for CursorMut<'_, T> {
    fn add_assign(&mut self, offset: isize) {
        self.slot = self.slot.wrapping_add_signed(offset);
    }
}

impl<T> SubAssign<isize> for CursorMut<'_, T> {
    fn sub_assign(&mut self, offset: isize) {
        self.slot = self.slot.wrapping_add_signed(offset.wrapping_neg());
    }
}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("index", &self.index())
            .finish_non_exhaustive()
    }
}

// SAFETY: same rules as `&mut T`.
unsafe impl<T: Send> Send for CursorMut<'_, T> {}
// SAFETY: through `&CursorMut` only `&T` is reachable.
unsafe impl<T: Sync> Sync for CursorMut<'_, T> {}
