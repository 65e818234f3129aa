//! Control surface contracts and the control state the pager pushes to them.
//!
//! Hosts render buttons, page links and the status line; the pager only
//! toggles state on whichever handles it was given. Every handle is optional.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::bounds::BoundsPolicy;
use crate::config::StatusText;

/// Previous/next button.
pub trait NavButton {
    fn set_enabled(&mut self, enabled: bool);
}

/// One page-number link.
pub trait PageLink {
    fn set_visible(&mut self, visible: bool);
    fn set_active(&mut self, active: bool);
}

/// "3 / 10" style status line.
pub trait StatusDisplay {
    fn set_text(&mut self, text: &str);
}

#[derive(Default)]
pub struct ControlHandles {
    pub previous: Option<Box<dyn NavButton>>,
    pub next: Option<Box<dyn NavButton>>,
    /// Ordered page links, one per page.
    pub links: Vec<Box<dyn PageLink>>,
    pub status: Option<Box<dyn StatusDisplay>>,
}

impl fmt::Debug for ControlHandles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlHandles")
            .field("previous", &self.previous.is_some())
            .field("next", &self.next.is_some())
            .field("links", &self.links.len())
            .field("status", &self.status.is_some())
            .finish()
    }
}

/// Everything the controls should show for one index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub index: usize,
    pub length: usize,
    /// None only when there are no pages.
    pub active_link: Option<usize>,
    /// Half-open range of links to show; None shows every link.
    pub visible_links: Option<Range<usize>>,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub status_text: Option<String>,
}

impl ControlState {
    pub fn compute(
        index: usize,
        length: usize,
        policy: BoundsPolicy,
        visible_link_radius: i64,
        status: Option<&StatusText>,
    ) -> Self {
        let (previous_enabled, next_enabled) = if policy.loops() {
            (true, true)
        } else if length == 0 {
            (false, false)
        } else {
            (index > 0, index + 1 < length)
        };

        Self {
            index,
            length,
            active_link: (length > 0).then_some(index),
            visible_links: visible_window(index, length, visible_link_radius),
            previous_enabled,
            next_enabled,
            status_text: match status {
                Some(s) if length > 0 => Some(s.render(index, length)),
                _ => None,
            },
        }
    }

    /// Push this state onto whatever handles are present.
    pub fn apply(&self, handles: &mut ControlHandles) {
        for (i, link) in handles.links.iter_mut().enumerate() {
            link.set_active(self.active_link == Some(i));
            let visible = self
                .visible_links
                .as_ref()
                .map_or(true, |window| window.contains(&i));
            link.set_visible(visible);
        }
        if let Some(prev) = handles.previous.as_mut() {
            prev.set_enabled(self.previous_enabled);
        }
        if let Some(next) = handles.next.as_mut() {
            next.set_enabled(self.next_enabled);
        }
        if let (Some(display), Some(text)) = (handles.status.as_mut(), &self.status_text) {
            display.set_text(text);
        }
    }
}

/// Window of `2 * radius + 1` links centred on `index`, shifted to stay
/// inside `[0, length)`. None when the radius is negative.
pub fn visible_window(index: usize, length: usize, radius: i64) -> Option<Range<usize>> {
    if radius < 0 {
        return None;
    }
    let width = radius.saturating_mul(2).saturating_add(1);
    let len = length as i64;
    if width >= len {
        return Some(0..length);
    }
    let start = (index as i64 - radius).clamp(0, len - width);
    Some(start as usize..(start + width) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_clamped_at_both_ends() {
        assert_eq!(visible_window(0, 20, 2), Some(0..5));
        assert_eq!(visible_window(19, 20, 2), Some(15..20));
        assert_eq!(visible_window(10, 20, 2), Some(8..13));
        assert_eq!(visible_window(1, 20, 2), Some(0..5));
    }

    #[test]
    fn window_disabled_or_wider_than_list() {
        assert_eq!(visible_window(3, 20, -1), None);
        assert_eq!(visible_window(1, 3, 2), Some(0..3));
        assert_eq!(visible_window(0, 0, 0), Some(0..0));
        assert_eq!(visible_window(4, 10, 0), Some(4..5));
    }

    #[test]
    fn clamp_mode_disables_edges() {
        let first = ControlState::compute(0, 5, BoundsPolicy::Clamp, -1, None);
        assert!(!first.previous_enabled && first.next_enabled);
        let last = ControlState::compute(4, 5, BoundsPolicy::Clamp, -1, None);
        assert!(last.previous_enabled && !last.next_enabled);
        let looped = ControlState::compute(0, 5, BoundsPolicy::Loop, -1, None);
        assert!(looped.previous_enabled && looped.next_enabled);
    }

    #[test]
    fn empty_list_has_no_active_link() {
        let s = ControlState::compute(0, 0, BoundsPolicy::Clamp, 1, Some(&StatusText::default()));
        assert_eq!(s.active_link, None);
        assert_eq!(s.status_text, None);
        assert!(!s.previous_enabled && !s.next_enabled);
    }
}
