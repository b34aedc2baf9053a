use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MinEntry {
    value: i64,
    min_so_far: i64,
}

/// A LIFO stack of `i64` that reports its minimum in O(1).
///
/// Each entry remembers the minimum of itself and everything beneath it,
/// so popping restores the previous minimum without a rescan.
#[derive(Debug, Clone, Default)]
pub struct StackWithMin {
    entries: Vec<MinEntry>,
}

impl StackWithMin {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of values on the stack.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn push(&mut self, value: i64) {
        let current_min = self.entries.last().map_or(i64::MAX, |top| top.min_so_far);
        let min_so_far = value.min(current_min);

        self.entries.push(MinEntry { value, min_so_far });
        trace!("pushed {} (min {})", value, min_so_far);
    }

    pub fn pop(&mut self) -> Option<i64> {
        self.entries.pop().map(|top| top.value)
    }

    /// Top value without removing it.
    pub fn peek(&self) -> Option<i64> {
        self.entries.last().map(|top| top.value)
    }

    /// Minimum over the values currently on the stack.
    pub fn get_min(&self) -> Option<i64> {
        self.entries.last().map(|top| top.min_so_far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::test_rng;
    use rand::Rng;

    #[test]
    fn test_min_follows_pushes_and_pops() {
        let mut stack = StackWithMin::new();

        for value in [5, 3, 7, 2] {
            stack.push(value);
        }
        assert_eq!(stack.get_min(), Some(2));

        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.get_min(), Some(3));
    }

    #[test]
    fn test_empty_stack() {
        let mut stack = StackWithMin::new();

        assert!(stack.is_empty());
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.get_min(), None);
        assert_eq!(stack.peek(), None);
    }

    #[test]
    fn test_push_max_value() {
        let mut stack = StackWithMin::default();

        stack.push(i64::MAX);
        assert_eq!(stack.get_min(), Some(i64::MAX));

        stack.push(i64::MIN);
        assert_eq!(stack.get_min(), Some(i64::MIN));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_duplicate_minimum() {
        let mut stack = StackWithMin::new();

        stack.push(1);
        stack.push(4);
        stack.push(1);
        stack.pop();
        assert_eq!(stack.get_min(), Some(1));
        assert_eq!(stack.peek(), Some(4));
    }

    #[test]
    fn test_min_matches_present_values_random() {
        let mut rng = test_rng();
        let mut stack = StackWithMin::new();
        let mut present: Vec<i64> = Vec::new();

        for _ in 0..1000 {
            if rng.gen_bool(0.6) {
                let value = rng.gen_range(-100..100);
                stack.push(value);
                present.push(value);
            } else {
                assert_eq!(stack.pop(), present.pop());
            }

            assert_eq!(stack.get_min(), present.iter().copied().min());
            assert_eq!(stack.len(), present.len());
        }
    }
}
