//! Logical repeating timer driven by host-supplied elapsed time.

use crate::ids::TimerId;

/// One armed repeating timer. Elapsed time only moves forward through
/// `advance`; a tick is consumed with `take_due`, so ticks never overlap.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    id: TimerId,
    interval_ms: u64,
    elapsed_ms: u64,
}

impl IntervalTimer {
    /// A zero interval is treated as 1 ms.
    pub fn new(id: TimerId, interval_ms: u32) -> Self {
        Self {
            id,
            interval_ms: u64::from(interval_ms.max(1)),
            elapsed_ms: 0,
        }
    }

    #[inline]
    pub fn id(&self) -> TimerId {
        self.id
    }

    #[inline]
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Time until the next tick is due; 0 when one is already due.
    #[inline]
    pub fn due_in_ms(&self) -> u64 {
        self.interval_ms.saturating_sub(self.elapsed_ms)
    }

    pub fn advance(&mut self, dt_ms: u64) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
    }

    /// Consume one due tick, if any.
    pub fn take_due(&mut self) -> bool {
        if self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms -= self.interval_ms;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_are_consumed_one_at_a_time() {
        let mut t = IntervalTimer::new(TimerId(0), 100);
        t.advance(250);
        assert!(t.take_due());
        assert!(t.take_due());
        assert!(!t.take_due());
        assert_eq!(t.elapsed_ms(), 50);
        assert_eq!(t.due_in_ms(), 50);
    }

    #[test]
    fn zero_interval_is_one_ms() {
        let mut t = IntervalTimer::new(TimerId(3), 0);
        assert_eq!(t.interval_ms(), 1);
        t.advance(1);
        assert!(t.take_due());
    }
}
