use thiserror::Error;

/// Error types for `BlockDeque` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum DequeError {
    /// The allocation policy could not provide memory for blocks or the block table
    #[error("Out of memory: failed to allocate {bytes} bytes")]
    OutOfMemory {
        /// Number of bytes requested
        bytes: usize,
    },
    /// A block or table size does not fit in a memory layout
    #[error("Capacity overflow: requested size exceeds the addressable maximum")]
    CapacityOverflow,
    /// Index is beyond the current deque length
    #[error("Index out of bounds: index {index} is beyond deque length {length}")]
    IndexOutOfBounds {
        /// Index that was accessed
        index: usize,
        /// Current length of the deque
        length: usize,
    },
    /// Position is not valid for the requested insert or erase
    #[error("Invalid position: {position} is not a valid position in a deque of length {length}")]
    InvalidPosition {
        /// Position that was requested
        position: usize,
        /// Current length of the deque
        length: usize,
    },
    /// Operation attempted on an empty deque
    #[error("Operation attempted on an empty deque")]
    EmptyDeque,
}
