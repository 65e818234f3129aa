//! Output contracts from the carousel.
//!
//! Outputs carry the semantic events of one update and, when the index moved,
//! the control state hosts should mirror.

use serde::{Deserialize, Serialize};

use crate::controls::ControlState;
use crate::ids::TimerId;
use crate::strategy::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeSource {
    User,
    Autoplay,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PagerEvent {
    PageChanged {
        old: usize,
        new: usize,
        direction: Direction,
        source: ChangeSource,
    },
    /// A manual command arrived while paging was locked.
    NavigationBlocked,
    /// An autoplay tick found paging locked and was dropped.
    AutoplayTickSkipped,
    /// Autoplay reached the last page of a non-looping pager.
    AutoplayStopped { index: usize },
    AutoplayReset { timer: TimerId },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<PagerEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_state: Option<ControlState>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
        self.control_state = None;
    }

    #[inline]
    pub fn push_event(&mut self, event: PagerEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.control_state.is_none()
    }

    /// Indices reached this update, in order.
    pub fn page_changes(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.events.iter().filter_map(|e| match e {
            PagerEvent::PageChanged { old, new, .. } => Some((*old, *new)),
            _ => None,
        })
    }
}
