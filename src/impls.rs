use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Index, IndexMut};

use allocator_api2::alloc::{Allocator, Global};

use crate::core::BlockDeque;

impl<T> Default for BlockDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for BlockDeque<T, A> {
    /// # Panics
    ///
    /// Panics if the blocks for the copy cannot be allocated.
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(copy) => copy,
            Err(err) => panic!("BlockDeque::clone failed: {err}"),
        }
    }
}

impl<T, A: Allocator> Index<usize> for BlockDeque<T, A> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!(
                "Index {} out of bounds for deque of length {}",
                index,
                self.len()
            ),
        }
    }
}

impl<T, A: Allocator> IndexMut<usize> for BlockDeque<T, A> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let length = self.len();
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("Index {index} out of bounds for deque of length {length}"),
        }
    }
}

impl<T, A: Allocator> Extend<T> for BlockDeque<T, A> {
    /// # Panics
    ///
    /// Panics if the deque cannot grow.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            if let Err(err) = self.push_back(value) {
                panic!("BlockDeque::extend failed: {err}");
            }
        }
    }
}

impl<'a, T: Copy + 'a, A: Allocator> Extend<&'a T> for BlockDeque<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for BlockDeque<T> {
    /// # Panics
    ///
    /// Panics if storage cannot be allocated; use `try_from_iter` to handle
    /// the error instead.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        match Self::try_from_iter(iter) {
            Ok(deque) => deque,
            Err(err) => panic!("BlockDeque::from_iter failed: {err}"),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for BlockDeque<T, Global> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T: PartialEq, A: Allocator, B: Allocator> PartialEq<BlockDeque<T, B>> for BlockDeque<T, A> {
    fn eq(&self, other: &BlockDeque<T, B>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, A: Allocator> Eq for BlockDeque<T, A> {}

impl<T: PartialEq, A: Allocator> PartialEq<[T]> for BlockDeque<T, A> {
    fn eq(&self, other: &[T]) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: PartialEq, A: Allocator, const N: usize> PartialEq<[T; N]> for BlockDeque<T, A> {
    fn eq(&self, other: &[T; N]) -> bool {
        *self == other[..]
    }
}

impl<T: PartialOrd, A: Allocator> PartialOrd for BlockDeque<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, A: Allocator> Ord for BlockDeque<T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, A: Allocator> Hash for BlockDeque<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for value in self {
            value.hash(state);
        }
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for BlockDeque<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

/// Writes the elements front to back, separated by a single space.
impl<T: fmt::Display, A: Allocator> fmt::Display for BlockDeque<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.iter();
        if let Some(first) = iter.next() {
            write!(f, "{first}")?;
            for value in iter {
                write!(f, " {value}")?;
            }
        }
        Ok(())
    }
}
