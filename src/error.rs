/// Errors raised by [`MaxHeap`](crate::max_heap::MaxHeap) operations.
///
/// Every failure is reported at the point of violation; the heap never
/// retries or repairs itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeapError {
    /// An index outside `[0, capacity - 1]`, an unoccupied index where an
    /// element is required, or a construction request the heap cannot hold.
    InvalidArgument(String),
    /// Insertion attempted while `size == capacity`.
    CapacityExceeded { capacity: usize },
    /// Legacy removal needs `root + 1`, which does not fit in an `i64`.
    PriorityOverflow { root: i64 },
}

impl HeapError {
    pub(crate) fn index_out_of_bound(index: usize) -> Self {
        HeapError::InvalidArgument(format!("Index {} is out of bound.", index))
    }

    pub(crate) fn unoccupied(index: usize) -> Self {
        HeapError::InvalidArgument(format!("Index {} holds no element.", index))
    }
}

impl std::fmt::Display for HeapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeapError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            HeapError::CapacityExceeded { capacity } => {
                write!(f, "Heap is full (capacity {}).", capacity)
            }
            HeapError::PriorityOverflow { root } => {
                write!(f, "Cannot raise priority above root {}: integer overflow.", root)
            }
        }
    }
}

impl std::error::Error for HeapError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            HeapError::index_out_of_bound(7).to_string(),
            "Invalid argument: Index 7 is out of bound."
        );
        assert_eq!(
            HeapError::CapacityExceeded { capacity: 4 }.to_string(),
            "Heap is full (capacity 4)."
        );
        assert!(HeapError::PriorityOverflow { root: i64::MAX }
            .to_string()
            .contains("overflow"));
    }
}
