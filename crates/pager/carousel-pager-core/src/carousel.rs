//! Carousel: wires a pager to an animation strategy and the host clock.
//!
//! Methods:
//! - new / with_controls / from_registry (strategy init -> pager -> pager_created -> autoplay)
//! - update (commands -> time), command, reset_autopager, destroy
//!
//! Manual navigation and autoplay share one guard: while a transition is in
//! flight and `lock_during_transition` is set, paging is refused.

use tracing::debug;

use crate::config::PagerConfig;
use crate::controls::{ControlHandles, ControlState};
use crate::error::{PagerError, Result};
use crate::geometry::ListGeometry;
use crate::ids::TimerId;
use crate::indicator::IndicatorFactory;
use crate::inputs::{Command, Inputs};
use crate::outputs::{ChangeSource, Outputs, PagerEvent};
use crate::pager::Pager;
use crate::strategy::{AnimationStrategy, Direction, StrategyContext, StrategyRegistry};

/// Held from the start of a transition until it finishes or its expected
/// duration elapses.
#[derive(Debug, Default, Clone, Copy)]
struct TransitionLock {
    remaining_ms: Option<u64>,
}

impl TransitionLock {
    fn engage(&mut self, duration_ms: u32) {
        self.remaining_ms = (duration_ms > 0).then_some(u64::from(duration_ms));
    }

    fn release(&mut self) {
        self.remaining_ms = None;
    }

    #[inline]
    fn is_held(&self) -> bool {
        self.remaining_ms.is_some()
    }

    fn advance(&mut self, dt_ms: u64) {
        if let Some(left) = self.remaining_ms {
            let left = left.saturating_sub(dt_ms);
            self.remaining_ms = (left > 0).then_some(left);
        }
    }
}

pub struct Carousel {
    cfg: PagerConfig,
    pager: Pager,
    strategy: Box<dyn AnimationStrategy>,
    transition: TransitionLock,
    outputs: Outputs,
    destroyed: bool,
}

impl std::fmt::Debug for Carousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("cfg", &self.cfg)
            .field("pager", &self.pager)
            .field("transition", &self.transition)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

impl Carousel {
    /// The strategy's `init` decides the page count; `cfg.length` is ignored.
    pub fn new(
        cfg: PagerConfig,
        strategy: Box<dyn AnimationStrategy>,
        controls: ControlHandles,
        indicators: &dyn IndicatorFactory,
        geometry: ListGeometry,
        item_count: usize,
    ) -> Self {
        Self::with_controls(cfg, strategy, |_| controls, indicators, geometry, item_count)
    }

    /// Like `new`, but the control handles are built once the page count is
    /// known, so hosts can create exactly one link per page.
    pub fn with_controls<F>(
        cfg: PagerConfig,
        mut strategy: Box<dyn AnimationStrategy>,
        build_controls: F,
        indicators: &dyn IndicatorFactory,
        geometry: ListGeometry,
        item_count: usize,
    ) -> Self
    where
        F: FnOnce(usize) -> ControlHandles,
    {
        let ctx = StrategyContext {
            orientation: cfg.orientation,
            geometry,
            item_count,
            animation_speed_ms: cfg.animation_speed_ms,
        };
        let pages = strategy.init(&ctx);
        debug!(items = item_count, pages, "animation strategy initialised");

        let mut pager = Pager::create(
            cfg.initial_index,
            pages,
            cfg.loops,
            build_controls(pages),
            cfg.status.clone(),
            cfg.visible_link_radius,
        );
        strategy.pager_created(pager.control_state());

        if let Some(autoplay) = cfg.autoplay.clone() {
            pager.init_autopager(autoplay, cfg.orientation, &geometry, indicators);
        }

        Self {
            cfg,
            pager,
            strategy,
            transition: TransitionLock::default(),
            outputs: Outputs::default(),
            destroyed: false,
        }
    }

    /// Build with the strategy named in `cfg.strategy`.
    pub fn from_registry(
        cfg: PagerConfig,
        registry: &StrategyRegistry,
        controls: ControlHandles,
        indicators: &dyn IndicatorFactory,
        geometry: ListGeometry,
        item_count: usize,
    ) -> Result<Self> {
        let name = cfg
            .strategy
            .clone()
            .ok_or_else(|| PagerError::UnknownStrategy {
                name: String::new(),
            })?;
        let strategy = registry.create(&name)?;
        Ok(Self::new(cfg, strategy, controls, indicators, geometry, item_count))
    }

    pub fn config(&self) -> &PagerConfig {
        &self.cfg
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.pager.index()
    }

    pub fn control_state(&self) -> &ControlState {
        self.pager.control_state()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_held()
    }

    /// The guard consulted before every manual or automatic page.
    pub fn can_page(&self) -> bool {
        !(self.cfg.lock_during_transition && self.transition.is_held())
    }

    /// Apply `inputs` in order, then advance time by `dt_ms`.
    pub fn update(&mut self, dt_ms: u64, inputs: Inputs) -> &Outputs {
        self.outputs.clear();
        if self.destroyed {
            return &self.outputs;
        }

        for cmd in inputs.commands {
            self.apply_command(cmd);
        }
        self.advance_time(dt_ms);

        if self.outputs.page_changes().next().is_some() {
            self.outputs.control_state = Some(self.pager.control_state().clone());
        }
        &self.outputs
    }

    /// Apply one command without advancing time.
    pub fn command(&mut self, cmd: Command) -> &Outputs {
        self.update(0, Inputs::new().with(cmd))
    }

    pub fn reset_autopager(&mut self) -> Option<TimerId> {
        if self.destroyed {
            return None;
        }
        self.pager.reset_autopager()
    }

    /// Clear the autoplay timer; later updates do nothing.
    pub fn destroy(&mut self) {
        self.pager.destroy();
        self.transition.release();
        self.destroyed = true;
        debug!("carousel destroyed");
    }

    fn apply_command(&mut self, cmd: Command) {
        if !cmd.is_navigation() {
            match cmd {
                Command::Hover { hovering } => self.strategy.hover(hovering),
                Command::TransitionFinished => self.transition.release(),
                _ => {}
            }
            return;
        }
        if !self.can_page() {
            debug!(?cmd, "navigation blocked; transition in flight");
            self.outputs.push_event(PagerEvent::NavigationBlocked);
            return;
        }

        let old = self.pager.index();
        let (new, direction) = match cmd {
            Command::Next => (self.pager.move_by(1), Direction::Forward),
            Command::Previous => (self.pager.move_by(-1), Direction::Backward),
            Command::Move { delta } => (self.pager.move_by(delta), Direction::of_delta(delta)),
            Command::Goto { index } => {
                let new = self.pager.set_index(index);
                (new, Direction::between(old, new))
            }
            Command::Hover { .. } | Command::TransitionFinished => return,
        };

        if new != old {
            self.strategy.page_transition(old, new, direction);
            self.transition.engage(self.cfg.animation_speed_ms);
            self.outputs.push_event(PagerEvent::PageChanged {
                old,
                new,
                direction,
                source: ChangeSource::User,
            });
        }
        if let Some(timer) = self.pager.reset_autopager() {
            self.outputs.push_event(PagerEvent::AutoplayReset { timer });
        }
    }

    /// Step time in slices that end at each timer or lock deadline, so every
    /// autoplay tick sees the lock state of its own instant.
    fn advance_time(&mut self, dt_ms: u64) {
        let mut remaining = dt_ms;
        while remaining > 0 {
            let mut step = remaining;
            if let Some(due) = self.pager.autoplay_due_in_ms() {
                step = step.min(due.max(1));
            }
            if let Some(left) = self.transition.remaining_ms {
                step = step.min(left.max(1));
            }

            self.transition.advance(step);
            let locked = self.cfg.lock_during_transition && self.transition.is_held();
            let mut can_page = || !locked;

            let before = self.outputs.events.len();
            self.pager.advance_autopager(
                step,
                self.strategy.as_mut(),
                &mut can_page,
                &mut self.outputs.events,
            );
            let autoplay_paged = self.outputs.events[before..]
                .iter()
                .any(|e| matches!(e, PagerEvent::PageChanged { .. }));
            if autoplay_paged {
                self.transition.engage(self.cfg.animation_speed_ms);
            }

            remaining -= step;
        }
    }
}
