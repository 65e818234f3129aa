//! Pager: index ownership, bounds policy, control state and autoplay.
//!
//! The pager is the only authority on the current index. `set_index` and
//! `move_by` are the only index mutators and both re-apply control state.
//! `length == 0` is degenerate: the index stays 0 and moves are no-ops.

use tracing::{debug, info};

use crate::autoplay::Autopager;
use crate::bounds::BoundsPolicy;
use crate::config::{AutoplayConfig, PagerConfig, StatusText};
use crate::controls::{ControlHandles, ControlState};
use crate::geometry::{ListGeometry, Orientation};
use crate::ids::TimerId;
use crate::indicator::IndicatorFactory;
use crate::outputs::{ChangeSource, PagerEvent};
use crate::strategy::{AnimationStrategy, Direction};

#[derive(Debug)]
pub struct Pager {
    index: usize,
    length: usize,
    policy: BoundsPolicy,
    visible_link_radius: i64,
    status: Option<StatusText>,
    controls: ControlHandles,
    state: ControlState,
    autoplay: Option<Autopager>,
}

impl Pager {
    /// Build a pager and push the initial control state.
    pub fn create(
        initial_index: i64,
        length: usize,
        loops: bool,
        controls: ControlHandles,
        status: Option<StatusText>,
        visible_link_radius: i64,
    ) -> Self {
        let policy = BoundsPolicy::from_loops(loops);
        let index = policy.resolve(initial_index, length);
        let state = ControlState::compute(index, length, policy, visible_link_radius, status.as_ref());
        let mut pager = Self {
            index,
            length,
            policy,
            visible_link_radius,
            status,
            controls,
            state,
            autoplay: None,
        };
        pager.state.apply(&mut pager.controls);
        pager
    }

    pub fn from_config(cfg: &PagerConfig, controls: ControlHandles) -> Self {
        Self::create(
            cfg.initial_index,
            cfg.length,
            cfg.loops,
            controls,
            cfg.status.clone(),
            cfg.visible_link_radius,
        )
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    pub fn loops(&self) -> bool {
        self.policy.loops()
    }

    #[inline]
    pub fn is_last(&self) -> bool {
        self.length > 0 && self.index == self.length - 1
    }

    /// Control state last pushed to the handles.
    pub fn control_state(&self) -> &ControlState {
        &self.state
    }

    /// Resolve `requested` through the bounds policy, store it and re-apply
    /// control state even when the index did not change.
    pub fn set_index(&mut self, requested: i64) -> usize {
        if self.length == 0 {
            return 0;
        }
        let resolved = self.policy.resolve(requested, self.length);
        self.commit(resolved);
        resolved
    }

    /// Relative move of any magnitude; wraps modulo `len()` when looping.
    pub fn move_by(&mut self, delta: i64) -> usize {
        if self.length == 0 {
            return 0;
        }
        let resolved = self.policy.step(self.index, delta, self.length);
        self.commit(resolved);
        resolved
    }

    fn commit(&mut self, index: usize) {
        if index != self.index {
            debug!(old = self.index, new = index, "pager index changed");
        }
        self.index = index;
        self.apply_control_state();
    }

    fn apply_control_state(&mut self) {
        self.state = ControlState::compute(
            self.index,
            self.length,
            self.policy,
            self.visible_link_radius,
            self.status.as_ref(),
        );
        self.state.apply(&mut self.controls);
    }

    /// Set up autoplay. The timer is armed only when the list overflows its
    /// container on the paging axis and there is somewhere to go.
    /// Returns whether the timer was armed.
    pub fn init_autopager(
        &mut self,
        cfg: AutoplayConfig,
        orientation: Orientation,
        geometry: &ListGeometry,
        indicators: &dyn IndicatorFactory,
    ) -> bool {
        let mut autopager = match self.autoplay.take() {
            Some(previous) => previous.reconfigure(cfg),
            None => Autopager::new(cfg),
        };
        let warranted = self.length > 1 && geometry.overflows(orientation);
        if warranted {
            autopager.start(indicators);
        } else {
            debug!(length = self.length, "list fits its container; autoplay not armed");
        }
        self.autoplay = Some(autopager);
        warranted
    }

    /// Cancel-then-restart the autoplay timer so the interval measures time
    /// since the last interaction.
    pub fn reset_autopager(&mut self) -> Option<TimerId> {
        let id = self.autoplay.as_mut()?.reset()?;
        debug!(timer = id.0, "autoplay reset");
        Some(id)
    }

    pub fn autopager(&self) -> Option<&Autopager> {
        self.autoplay.as_ref()
    }

    pub fn autoplay_running(&self) -> bool {
        self.autoplay.as_ref().is_some_and(Autopager::is_running)
    }

    pub fn autoplay_due_in_ms(&self) -> Option<u64> {
        self.autoplay.as_ref().and_then(Autopager::due_in_ms)
    }

    /// Advance the autoplay timer by `dt_ms` and run every tick that falls
    /// due. A tick blocked by `can_page` is dropped without moving.
    pub fn advance_autopager(
        &mut self,
        dt_ms: u64,
        strategy: &mut dyn AnimationStrategy,
        can_page: &mut dyn FnMut() -> bool,
        events: &mut Vec<PagerEvent>,
    ) {
        match self.autoplay.as_mut() {
            Some(autopager) => autopager.advance(dt_ms),
            None => return,
        }

        while self.autoplay.as_mut().is_some_and(Autopager::take_due) {
            if !can_page() {
                debug!(index = self.index, "autoplay tick skipped; paging locked");
                events.push(PagerEvent::AutoplayTickSkipped);
                continue;
            }
            if !self.loops() && self.is_last() {
                self.stop_autoplay(events);
                break;
            }

            let old = self.index;
            let new = self.move_by(1);
            strategy.page_transition(old, new, Direction::Forward);
            events.push(PagerEvent::PageChanged {
                old,
                new,
                direction: Direction::Forward,
                source: ChangeSource::Autoplay,
            });

            if !self.loops() && self.is_last() {
                self.stop_autoplay(events);
                break;
            }
            if let Some(autopager) = self.autoplay.as_mut() {
                autopager.restart_indicator();
            }
        }
    }

    fn stop_autoplay(&mut self, events: &mut Vec<PagerEvent>) {
        if let Some(autopager) = self.autoplay.as_mut() {
            autopager.stop();
        }
        info!(index = self.index, "autoplay reached the last page and stopped");
        events.push(PagerEvent::AutoplayStopped { index: self.index });
    }

    /// Teardown: clear any pending timer.
    pub fn destroy(&mut self) {
        if let Some(autopager) = self.autoplay.as_mut() {
            autopager.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_normalizes_initial_index() {
        let p = Pager::create(42, 10, false, ControlHandles::default(), None, -1);
        assert_eq!(p.index(), 9);
        let p = Pager::create(-1, 10, true, ControlHandles::default(), None, -1);
        assert_eq!(p.index(), 9);
    }

    #[test]
    fn empty_pager_is_inert() {
        let mut p = Pager::create(3, 0, true, ControlHandles::default(), None, 2);
        assert_eq!(p.index(), 0);
        assert_eq!(p.set_index(5), 0);
        assert_eq!(p.move_by(-2), 0);
        assert!(p.is_empty());
        assert!(!p.is_last());
    }
}
