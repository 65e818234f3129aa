//! Bounds policy: how out-of-range index requests resolve.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundsPolicy {
    /// Past either end lands on the opposite end.
    Loop,
    /// Past either end stays on that end.
    Clamp,
}

impl BoundsPolicy {
    pub fn from_loops(loops: bool) -> Self {
        if loops {
            BoundsPolicy::Loop
        } else {
            BoundsPolicy::Clamp
        }
    }

    #[inline]
    pub fn loops(self) -> bool {
        matches!(self, BoundsPolicy::Loop)
    }

    /// Resolve an absolute index request. A request past an end is a single
    /// wrap (loop) or a clamp, whatever its distance from the range.
    /// Returns 0 when `length == 0`.
    pub fn resolve(self, requested: i64, length: usize) -> usize {
        if length == 0 {
            return 0;
        }
        let last = length as i64 - 1;
        let idx = match self {
            BoundsPolicy::Loop if requested < 0 => last,
            BoundsPolicy::Loop if requested > last => 0,
            BoundsPolicy::Clamp => requested.clamp(0, last),
            BoundsPolicy::Loop => requested,
        };
        idx as usize
    }

    /// Resolve a relative step of any magnitude from `index`.
    pub fn step(self, index: usize, delta: i64, length: usize) -> usize {
        if length == 0 {
            return 0;
        }
        let len = length as i64;
        let target = (index as i64).saturating_add(delta);
        match self {
            BoundsPolicy::Loop => target.rem_euclid(len) as usize,
            BoundsPolicy::Clamp => target.clamp(0, len - 1) as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_resolve_wraps_once() {
        assert_eq!(BoundsPolicy::Loop.resolve(-1, 10), 9);
        assert_eq!(BoundsPolicy::Loop.resolve(-7, 10), 9);
        assert_eq!(BoundsPolicy::Loop.resolve(10, 10), 0);
        assert_eq!(BoundsPolicy::Loop.resolve(25, 10), 0);
        assert_eq!(BoundsPolicy::Loop.resolve(4, 10), 4);
    }

    #[test]
    fn clamp_resolve() {
        assert_eq!(BoundsPolicy::Clamp.resolve(-3, 10), 0);
        assert_eq!(BoundsPolicy::Clamp.resolve(12, 10), 9);
        assert_eq!(BoundsPolicy::Clamp.resolve(5, 10), 5);
    }

    #[test]
    fn loop_step_is_modular() {
        assert_eq!(BoundsPolicy::Loop.step(9, 1, 10), 0);
        assert_eq!(BoundsPolicy::Loop.step(0, -1, 10), 9);
        assert_eq!(BoundsPolicy::Loop.step(3, 23, 10), 6);
        assert_eq!(BoundsPolicy::Loop.step(3, -23, 10), 0);
        assert_eq!(BoundsPolicy::Loop.step(0, i64::MIN, 10), (i64::MIN).rem_euclid(10) as usize);
    }

    #[test]
    fn clamp_step_saturates() {
        assert_eq!(BoundsPolicy::Clamp.step(9, 1, 10), 9);
        assert_eq!(BoundsPolicy::Clamp.step(0, -1, 10), 0);
        assert_eq!(BoundsPolicy::Clamp.step(2, 100, 10), 9);
    }

    #[test]
    fn empty_length_is_zero() {
        assert_eq!(BoundsPolicy::Loop.resolve(5, 0), 0);
        assert_eq!(BoundsPolicy::Clamp.step(0, 3, 0), 0);
    }
}
