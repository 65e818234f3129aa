//! Animation strategy contract and a named registry of strategy factories.
//!
//! A strategy performs the visual change between pages; the pager never waits
//! on it. Compliance is checked by the compiler: `init`, `page_transition` and
//! `hover` are required, `pager_created` is an optional hook.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::controls::ControlState;
use crate::error::{PagerError, Result};
use crate::geometry::{ListGeometry, Orientation};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    /// Direction of travel between two indices; equal indices count as forward.
    pub fn between(old: usize, new: usize) -> Self {
        if new < old {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }

    pub fn of_delta(delta: i64) -> Self {
        if delta < 0 {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }

    /// -1 or 1, the form host-side animation code expects.
    #[inline]
    pub fn signum(self) -> i32 {
        match self {
            Direction::Backward => -1,
            Direction::Forward => 1,
        }
    }
}

/// What a strategy learns about the list when it is initialised.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyContext {
    pub orientation: Orientation,
    pub geometry: ListGeometry,
    /// Number of items in the list (not pages).
    pub item_count: usize,
    pub animation_speed_ms: u32,
}

pub trait AnimationStrategy {
    /// Prepare the list and report how many pages it splits into.
    fn init(&mut self, ctx: &StrategyContext) -> usize;

    /// Start the visual change from `old` to `new`. Fire-and-forget.
    fn page_transition(&mut self, old: usize, new: usize, direction: Direction);

    fn hover(&mut self, hovering: bool);

    /// Called once after the pager exists, with its initial control state.
    fn pager_created(&mut self, _state: &ControlState) {}
}

pub type StrategyFactory = Box<dyn Fn() -> Box<dyn AnimationStrategy>>;

/// Named strategy factories, in registration order.
#[derive(Default)]
pub struct StrategyRegistry {
    items: Vec<(String, StrategyFactory)>,
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: &str, factory: F) -> Result<()>
    where
        F: Fn() -> Box<dyn AnimationStrategy> + 'static,
    {
        if name.is_empty() || name.trim() != name {
            return Err(PagerError::InvalidStrategyName {
                name: name.to_string(),
            });
        }
        if self.contains(name) {
            return Err(PagerError::DuplicateStrategy {
                name: name.to_string(),
            });
        }
        self.items.push((name.to_string(), Box::new(factory)));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|(n, _)| n == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|(n, _)| n.as_str())
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn AnimationStrategy>> {
        self.items
            .iter()
            .find_map(|(n, f)| if n == name { Some(f()) } else { None })
            .ok_or_else(|| PagerError::UnknownStrategy {
                name: name.to_string(),
            })
    }
}
