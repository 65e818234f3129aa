//! Identifiers and a simple allocator for autoplay timer handles.

use serde::{Deserialize, Serialize};

/// Handle of one armed autoplay timer. A pager holds at most one live handle;
/// re-arming always allocates a fresh one so stale ticks can be told apart.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u32);

/// Monotonic allocator for TimerId.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_timer: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_timer(&mut self) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer = self.next_timer.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_timer(), TimerId(0));
        assert_eq!(alloc.alloc_timer(), TimerId(1));
    }
}
