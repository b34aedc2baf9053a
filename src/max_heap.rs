use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::HeapConfig;
use crate::error::HeapError;

/// How elements move when the heap restores its ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiftMode {
    /// Compare before every swap; sift-down stays inside the live region;
    /// removal swaps the target with the last live element.
    #[default]
    Ordered,
    /// Swap once unconditionally on sift-up; sift-down sees stale slots;
    /// removal raises the target to `root + 1` and extracts it.
    Legacy,
}

impl FromStr for SiftMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ordered" => Ok(SiftMode::Ordered),
            "legacy" => Ok(SiftMode::Legacy),
            _ => Err(format!("Invalid sift mode: {}. Must be ordered or legacy", s)),
        }
    }
}

impl std::fmt::Display for SiftMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SiftMode::Ordered => write!(f, "ordered"),
            SiftMode::Legacy => write!(f, "legacy"),
        }
    }
}

/// A binary max-heap over `i64` with a fixed maximum capacity.
///
/// The tree lives in a dense vector: the children of slot `i` are `2i + 1`
/// and `2i + 2`, its parent is `(i - 1) / 2`. Only the first `len()` slots
/// are live. Slots past that point are leftovers from earlier extractions;
/// they stay visible through [`get_heap`](Self::get_heap) and the index
/// accessors until an insertion overwrites them.
///
/// Complexity:
/// - Insert / extract / remove / change priority: O(log N)
/// - Peek: O(1)
/// - Memory: O(capacity), reserved up front
#[derive(Debug, Clone)]
pub struct MaxHeap {
    storage: Vec<i64>,
    size: usize,
    capacity: usize,
    mode: SiftMode,
}

impl MaxHeap {
    /// Creates a heap from `initial_contents` without reordering them.
    ///
    /// The caller is responsible for the heap property of the first
    /// `initial_size` values.
    pub fn new(
        initial_size: usize,
        capacity: usize,
        initial_contents: Vec<i64>,
    ) -> Result<Self, HeapError> {
        Self::with_mode(initial_size, capacity, initial_contents, SiftMode::default())
    }

    /// Same as [`new`](Self::new) with an explicit sift mode.
    pub fn with_mode(
        initial_size: usize,
        capacity: usize,
        initial_contents: Vec<i64>,
        mode: SiftMode,
    ) -> Result<Self, HeapError> {
        if initial_contents.len() > capacity {
            return Err(HeapError::InvalidArgument(format!(
                "Initial heap size {} greater than {} max size.",
                initial_contents.len(),
                capacity
            )));
        }
        if initial_size > initial_contents.len() {
            return Err(HeapError::InvalidArgument(format!(
                "Initial size {} exceeds the {} provided elements.",
                initial_size,
                initial_contents.len()
            )));
        }

        let mut storage = initial_contents;
        storage.try_reserve(capacity - storage.len()).map_err(|e| {
            HeapError::InvalidArgument(format!("Cannot reserve {} slots: {}", capacity, e))
        })?;

        Ok(Self {
            storage,
            size: initial_size,
            capacity,
            mode,
        })
    }

    /// Creates an empty heap in the default sift mode.
    pub fn with_capacity(capacity: usize) -> Result<Self, HeapError> {
        Self::with_mode(0, capacity, Vec::new(), SiftMode::default())
    }

    /// Creates an empty heap sized and configured from `config`.
    pub fn from_config(config: &HeapConfig) -> Result<Self, HeapError> {
        Self::with_mode(0, config.capacity, Vec::new(), config.sift_mode)
    }

    pub fn get_parent_index(&self, index: usize) -> Result<usize, HeapError> {
        self.check_bounds(index)?;

        if index == 0 {
            return Ok(0);
        }

        Ok((index - 1) / 2)
    }

    pub fn get_left_child_index(&self, index: usize) -> Result<usize, HeapError> {
        self.check_bounds(index)?;

        Ok(2 * index + 1)
    }

    pub fn get_right_child_index(&self, index: usize) -> Result<usize, HeapError> {
        self.check_bounds(index)?;

        Ok(2 * index + 2)
    }

    /// Value stored at the parent of `index`. The root has no parent.
    pub fn get_parent(&self, index: usize) -> Result<Option<i64>, HeapError> {
        if index == 0 {
            return Ok(None);
        }

        let parent = self.get_parent_index(index)?;
        Ok(self.storage.get(parent).copied())
    }

    pub fn get_left_child(&self, index: usize) -> Result<Option<i64>, HeapError> {
        let child = self.get_left_child_index(index)?;
        Ok(self.storage.get(child).copied())
    }

    pub fn get_right_child(&self, index: usize) -> Result<Option<i64>, HeapError> {
        let child = self.get_right_child_index(index)?;
        Ok(self.storage.get(child).copied())
    }

    pub fn get_current(&self, index: usize) -> Result<Option<i64>, HeapError> {
        self.check_bounds(index)?;

        Ok(self.storage.get(index).copied())
    }

    /// Highest occupied slot, stale slots included; 0 when nothing is stored.
    pub fn get_last_index(&self) -> usize {
        self.storage.len().saturating_sub(1)
    }

    /// Moves the element at `index` towards the root.
    ///
    /// In [`SiftMode::Legacy`] the first swap happens without comparing, so
    /// an element that is already in place still trades places with its
    /// parent. Only call it on elements that need to rise.
    pub fn sift_up(&mut self, index: usize) -> Result<(), HeapError> {
        match self.mode {
            SiftMode::Ordered => self.check_live(index)?,
            SiftMode::Legacy => {
                self.check_bounds(index)?;
                if index >= self.storage.len() {
                    return Err(HeapError::unoccupied(index));
                }
            }
        }

        self.sift_up_from(index);
        Ok(())
    }

    /// Moves the element at `index` towards the leaves, always trading
    /// places with the larger child (left wins ties).
    pub fn sift_down(&mut self, index: usize) -> Result<(), HeapError> {
        self.check_bounds(index)?;

        self.sift_down_from(index);
        Ok(())
    }

    /// Returns the largest element without removing it.
    pub fn get_max(&self) -> Option<i64> {
        if self.size == 0 {
            return None;
        }

        Some(self.storage[0])
    }

    /// Removes and returns the largest element.
    pub fn extract_max(&mut self) -> Option<i64> {
        if self.size == 0 {
            return None;
        }

        let max = self.storage[0];
        self.storage[0] = self.storage[self.size - 1];
        self.size -= 1;
        self.sift_down_from(0);

        trace!("extracted {} (size {})", max, self.size);
        Some(max)
    }

    pub fn insert(&mut self, value: i64) -> Result<(), HeapError> {
        if self.size + 1 > self.capacity {
            debug!("rejecting insert of {}: heap holds {} elements", value, self.size);
            return Err(HeapError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let index = self.size;
        if index < self.storage.len() {
            self.storage[index] = value;
        } else {
            self.storage.push(value);
        }
        self.size += 1;
        self.sift_up_from(index);

        Ok(())
    }

    /// Replaces the value at `index` and restores the ordering around it.
    pub fn change_priority(&mut self, index: usize, priority: i64) -> Result<(), HeapError> {
        self.check_live(index)?;

        let old = self.storage[index];
        self.storage[index] = priority;
        if priority > old {
            self.sift_up_from(index);
        } else {
            self.sift_down_from(index);
        }

        Ok(())
    }

    /// Removes the element at `index` and returns its value.
    ///
    /// In [`SiftMode::Legacy`] this fails with
    /// [`HeapError::PriorityOverflow`] when the root is `i64::MAX`; the heap
    /// is left untouched in that case.
    pub fn remove(&mut self, index: usize) -> Result<i64, HeapError> {
        self.check_live(index)?;

        let removed = self.storage[index];
        match self.mode {
            SiftMode::Ordered => {
                let last = self.size - 1;
                self.swap(index, last);
                self.size -= 1;

                if index < self.size {
                    let moved = self.storage[index];
                    if index > 0 && self.storage[(index - 1) / 2] < moved {
                        self.sift_up_from(index);
                    } else {
                        self.sift_down_from(index);
                    }
                }
            }
            SiftMode::Legacy => {
                let root = self.storage[0];
                let raised = root.checked_add(1).ok_or_else(|| {
                    debug!("cannot remove index {}: root {} has no successor", index, root);
                    HeapError::PriorityOverflow { root }
                })?;

                self.storage[index] = raised;
                self.sift_up_from(index);
                self.extract_max();
            }
        }

        Ok(removed)
    }

    /// Copy of the backing storage, stale slots included.
    pub fn get_heap(&self) -> Vec<i64> {
        self.storage.clone()
    }

    /// Returns the number of live elements.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn is_full(&self) -> bool {
        self.size == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn mode(&self) -> SiftMode {
        self.mode
    }

    /// Checks the max-heap property over the live elements.
    pub fn is_heap(&self) -> bool {
        (1..self.size).all(|i| self.storage[(i - 1) / 2] >= self.storage[i])
    }

    fn check_bounds(&self, index: usize) -> Result<(), HeapError> {
        if index >= self.capacity {
            return Err(HeapError::index_out_of_bound(index));
        }
        Ok(())
    }

    fn check_live(&self, index: usize) -> Result<(), HeapError> {
        self.check_bounds(index)?;
        if index >= self.size {
            return Err(HeapError::unoccupied(index));
        }
        Ok(())
    }

    /// Slots that sift-down may pull children from.
    fn sift_limit(&self) -> usize {
        match self.mode {
            SiftMode::Ordered => self.size,
            SiftMode::Legacy => self.storage.len(),
        }
    }

    fn sift_up_from(&mut self, mut index: usize) {
        match self.mode {
            SiftMode::Ordered => {
                while index > 0 {
                    let parent = (index - 1) / 2;
                    if self.storage[parent] >= self.storage[index] {
                        break;
                    }
                    self.swap(index, parent);
                    index = parent;
                }
            }
            SiftMode::Legacy => {
                let mut keep_going = true;
                while index > 0 && keep_going {
                    let parent = (index - 1) / 2;
                    self.swap(index, parent);
                    index = parent;
                    keep_going = index == 0 || self.storage[(index - 1) / 2] < self.storage[index];
                }
            }
        }
    }

    fn sift_down_from(&mut self, mut index: usize) {
        let limit = self.sift_limit();

        while index < limit {
            let left = 2 * index + 1;
            let right = left + 1;

            let mut largest = index;
            if left < limit && self.storage[left] > self.storage[largest] {
                largest = left;
            }
            if right < limit && self.storage[right] > self.storage[largest] {
                largest = right;
            }

            if largest == index {
                break;
            }
            self.swap(index, largest);
            index = largest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.storage.swap(a, b);
        trace!("swapped slots {} and {}", a, b);
    }
}
