//! Autoplay state: the single live timer handle and the optional indicator.

use std::fmt;

use tracing::{debug, warn};

use crate::config::AutoplayConfig;
use crate::ids::{IdAllocator, TimerId};
use crate::indicator::{Indicator, IndicatorFactory};
use crate::timer::IntervalTimer;

pub struct Autopager {
    cfg: AutoplayConfig,
    ids: IdAllocator,
    /// At most one live timer. None while stopped or torn down.
    timer: Option<IntervalTimer>,
    indicator: Option<Box<dyn Indicator>>,
    indicator_resolved: bool,
    /// Autoplay was warranted at init; reset may re-arm it.
    armed: bool,
}

impl fmt::Debug for Autopager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autopager")
            .field("cfg", &self.cfg)
            .field("timer", &self.timer)
            .field("indicator", &self.indicator.is_some())
            .field("armed", &self.armed)
            .finish()
    }
}

impl Autopager {
    pub fn new(cfg: AutoplayConfig) -> Self {
        Self {
            cfg,
            ids: IdAllocator::new(),
            timer: None,
            indicator: None,
            indicator_resolved: false,
            armed: false,
        }
    }

    /// Replace the configuration of an existing autopager. The timer is
    /// dropped and autoplay disarmed; timer ids keep counting from the
    /// previous generation, and an indicator of the same kind is kept.
    pub fn reconfigure(mut self, cfg: AutoplayConfig) -> Self {
        let same_kind = match (&self.cfg.indicator, &cfg.indicator) {
            (Some(old), Some(new)) => old.kind == new.kind,
            _ => false,
        };
        if !(same_kind && self.indicator.is_some()) {
            self.indicator = None;
            self.indicator_resolved = false;
        }
        self.cfg = cfg;
        self.clear();
        self
    }

    pub fn config(&self) -> &AutoplayConfig {
        &self.cfg
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn timer_id(&self) -> Option<TimerId> {
        self.timer.as_ref().map(IntervalTimer::id)
    }

    pub fn due_in_ms(&self) -> Option<u64> {
        self.timer.as_ref().map(IntervalTimer::due_in_ms)
    }

    pub fn has_indicator(&self) -> bool {
        self.indicator.is_some()
    }

    /// First start: resolve the indicator, then arm the timer.
    pub fn start(&mut self, indicators: &dyn IndicatorFactory) -> TimerId {
        if !self.indicator_resolved {
            self.indicator_resolved = true;
            if let Some(ind_cfg) = self.cfg.indicator.as_ref() {
                match indicators.create(ind_cfg, self.cfg.interval_ms) {
                    Some(mut indicator) => {
                        indicator.init();
                        self.indicator = Some(indicator);
                    }
                    None => {
                        warn!(
                            kind = %ind_cfg.kind,
                            "autoplay indicator unsupported; continuing without one"
                        );
                        self.cfg.indicator = None;
                    }
                }
            }
        }
        self.armed = true;
        self.arm()
    }

    /// Cancel the live timer and arm a fresh one in the same call.
    /// No-op when autoplay was never started or has been torn down.
    pub fn reset(&mut self) -> Option<TimerId> {
        if !self.armed {
            return None;
        }
        self.timer = None;
        Some(self.arm())
    }

    fn arm(&mut self) -> TimerId {
        let id = self.ids.alloc_timer();
        self.timer = Some(IntervalTimer::new(id, self.cfg.interval_ms));
        self.restart_indicator();
        debug!(timer = id.0, interval_ms = self.cfg.interval_ms, "autoplay timer armed");
        id
    }

    pub fn restart_indicator(&mut self) {
        if let Some(indicator) = self.indicator.as_mut() {
            indicator.start();
        }
    }

    pub fn advance(&mut self, dt_ms: u64) {
        if let Some(timer) = self.timer.as_mut() {
            timer.advance(dt_ms);
        }
    }

    pub fn take_due(&mut self) -> bool {
        self.timer.as_mut().is_some_and(IntervalTimer::take_due)
    }

    /// Stop ticking; a later reset re-arms.
    pub fn stop(&mut self) {
        self.timer = None;
    }

    /// Teardown: no timer, and reset no longer re-arms.
    pub fn clear(&mut self) {
        self.timer = None;
        self.armed = false;
    }
}
