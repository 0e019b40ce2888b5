//! Fixed-capacity rolling window with FIFO eviction
//!
//! Shared by the acceleration and activity chart buffers, and by the device
//! classifier's smoothing buffer.

use heapless::Deque;

/// Ring buffer that keeps the `N` most recent values in arrival order
#[derive(Debug, Clone)]
pub struct RollingWindow<T, const N: usize> {
    values: Deque<T, N>,
}

impl<T: Copy, const N: usize> RollingWindow<T, N> {
    /// Create an empty window
    pub fn new() -> Self {
        Self {
            values: Deque::new(),
        }
    }

    /// Append a value, evicting and returning the oldest one if the window was full
    pub fn push(&mut self, value: T) -> Option<T> {
        let evicted = if self.values.is_full() {
            self.values.pop_front()
        } else {
            None
        };
        // Cannot fail: a slot was freed above when the deque was full
        let _ = self.values.push_back(value);
        evicted
    }

    /// Number of values currently held
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.values.iter().copied()
    }

    /// Iterate over at most `count` of the newest values, oldest first
    pub fn latest(&self, count: usize) -> impl Iterator<Item = T> + '_ {
        let skip = self.values.len().saturating_sub(count);
        self.values.iter().skip(skip).copied()
    }

    /// Most recently pushed value
    pub fn newest(&self) -> Option<T> {
        self.values.back().copied()
    }
}

impl<T: Copy, const N: usize> Default for RollingWindow<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn test_push_below_capacity_keeps_everything() {
        let mut window = RollingWindow::<u32, 4>::new();
        assert_eq!(window.push(1), None);
        assert_eq!(window.push(2), None);

        assert_eq!(window.len(), 2);
        assert_eq!(window.iter().collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut window = RollingWindow::<u32, 3>::new();
        for i in 0..3 {
            window.push(i);
        }

        assert_eq!(window.push(3), Some(0));
        assert_eq!(window.len(), 3);
        assert_eq!(window.iter().collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(window.newest(), Some(3));
    }

    #[test]
    fn test_latest_returns_tail_in_order() {
        let mut window = RollingWindow::<u32, 8>::new();
        for i in 0..6 {
            window.push(i);
        }

        assert_eq!(window.latest(3).collect::<Vec<_>>(), [3, 4, 5]);
        // Asking for more than is held returns everything
        assert_eq!(window.latest(10).count(), 6);
    }
}
