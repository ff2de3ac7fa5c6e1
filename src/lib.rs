#![no_std]

//! `BlockDeque`: a double-ended queue stored in a table of fixed-size blocks.
//!
//! `BlockDeque` keeps its elements in equally sized blocks reached through an
//! indirection table. The live elements form one contiguous window of slots
//! across the flattened table, so indexing is a single division, and both
//! ends can grow by adding blocks without moving a single existing element.
//!
//! This crate is `no_std` compatible and only needs `alloc`.
//!
//! Storage layout: [block table] -> [block 0][block 1]...[block n-1]
//! A logical index `i` lives in slot `start + i`, at
//! `(slot / BLOCK_LEN, slot % BLOCK_LEN)`.
//!
//! # Performance Characteristics
//!
//! ## Time Complexity
//! - `push_back()`, `push_front()`: amortized O(1)
//! - `pop_back()`, `pop_front()`: O(1)
//! - `get()`, `at()`, indexing: O(1) via the slot mapping
//! - `insert()`, `remove()`: O(min(index, len - index))
//! - Growth: O(number of blocks); only block pointers are copied
//! - `shrink_to_fit()`: O(number of blocks)
//!
//! ## Space Complexity
//! - One pointer per block in the table
//! - Blocks hold about `BLOCK_BYTES` (512) bytes, and at least eight elements
//! - Blocks are only released by `shrink_to_fit()` or on drop
//!
//! ## `no_std` Compatibility
//!
//! Enable the optional `std` feature to forward `std` to the dependencies:
//! ```toml
//! [dependencies]
//! blockdeque = { version = "0.1", features = ["std"] }
//! ```
//!
//! # Deque Interface
//!
//! ```
//! # use blockdeque::BlockDeque;
//! let mut deque = BlockDeque::new();
//!
//! deque.push_back(1).unwrap();
//! deque.push_back(2).unwrap();
//! deque.push_back(3).unwrap();
//! deque.push_front(0).unwrap();
//! assert_eq!(deque, [0, 1, 2, 3]);
//!
//! // Erase at position 1
//! assert_eq!(deque.remove(1), Ok(1));
//! assert_eq!(deque, [0, 2, 3]);
//!
//! assert_eq!(deque.pop_front(), Some(0));
//! assert_eq!(deque.to_string(), "2 3");
//!
//! // Checked variants report errors instead of returning `None`
//! assert!(deque.at(2).is_err());
//! deque.clear();
//! assert!(deque.try_pop_back().is_err());
//! ```
//!
//! # Cursors
//!
//! Cursors are random-access positions that cross block boundaries
//! transparently:
//!
//! ```
//! # use blockdeque::BlockDeque;
//! let deque: BlockDeque<u64> = (0..200).collect();
//!
//! let begin = deque.begin();
//! let end = deque.end();
//! assert_eq!(end - begin, 200);
//!
//! let mid = begin + 150;
//! assert_eq!(mid.get(), Some(&150));
//! assert!(mid < end);
//! assert_eq!(end.get(), None);
//! ```
//!
//! # Custom Allocators
//!
//! Blocks are obtained from any [`allocator_api2::alloc::Allocator`]:
//!
//! ```
//! # use blockdeque::BlockDeque;
//! use allocator_api2::alloc::Global;
//!
//! let mut deque = BlockDeque::new_in(Global);
//! deque.push_back("block").unwrap();
//! assert_eq!(deque.len(), 1);
//! ```

extern crate alloc;

mod block_store;
mod core;
mod cursor;
mod error;
mod impls;
mod iter;
pub mod layout;
mod table;

// Re-export public types
pub use crate::core::BlockDeque;
pub use crate::cursor::{Cursor, CursorMut};
pub use crate::error::DequeError;
pub use crate::iter::{IntoIter, Iter, IterMut};
