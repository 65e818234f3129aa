//! Autoplay countdown indicator contract.

use crate::config::IndicatorConfig;

/// Host-side countdown animation shown between autoplay ticks.
pub trait Indicator {
    fn init(&mut self);
    /// Restart the countdown from zero.
    fn start(&mut self);
}

/// Builds indicators by kind. Returning None means the kind is unsupported in
/// this environment; autoplay then runs without an indicator.
pub trait IndicatorFactory {
    fn create(&self, cfg: &IndicatorConfig, interval_ms: u32) -> Option<Box<dyn Indicator>>;
}

/// Factory for hosts with no indicator support at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoIndicators;

impl IndicatorFactory for NoIndicators {
    fn create(&self, _cfg: &IndicatorConfig, _interval_ms: u32) -> Option<Box<dyn Indicator>> {
        None
    }
}
