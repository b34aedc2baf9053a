//! Two small in-memory integer structures:
//!
//! - [`MaxHeap`]: a fixed-capacity binary max-heap with priority changes and
//!   removal at arbitrary indices.
//! - [`StackWithMin`]: a LIFO stack that reports its current minimum in O(1).
//!
//! The [`script`] module drives either structure from a list of textual
//! operations, which is what the `heapstack` binary is built on.

pub mod config;
pub mod error;
pub mod max_heap;
pub mod min_stack;
pub mod script;
pub mod types;

pub use error::HeapError;
pub use max_heap::{MaxHeap, SiftMode};
pub use min_stack::StackWithMin;

#[cfg(test)]
pub(crate) mod test_helpers {
    /// Seeded per call site, so every test explores its own sequence while
    /// staying reproducible across runs.
    #[track_caller]
    pub(crate) fn test_rng() -> rand_xorshift::XorShiftRng {
        use std::hash::{Hash, Hasher};
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        std::panic::Location::caller().hash(&mut hasher);
        let hc64 = hasher.finish();
        let seed_vec = hc64.to_le_bytes().into_iter().chain(0u8..8).collect::<Vec<u8>>();
        let seed: [u8; 16] = seed_vec.as_slice().try_into().unwrap();
        rand::SeedableRng::from_seed(seed)
    }
}
