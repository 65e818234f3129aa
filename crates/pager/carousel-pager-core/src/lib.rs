//! Carousel Pager Core (host-agnostic)
//!
//! Index state machine for carousel/pager widgets: bounds policy (loop or
//! clamp), control state for buttons, page links and status text, and an
//! autoplay timer with reset-on-interaction. Hosts drive time through
//! `Carousel::update` and implement the capability traits in `controls`,
//! `strategy` and `indicator`.

pub mod autoplay;
pub mod bounds;
pub mod carousel;
pub mod config;
pub mod controls;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod indicator;
pub mod inputs;
pub mod outputs;
pub mod pager;
pub mod strategy;
pub mod timer;

// Re-exports for consumers (adapters)
pub use autoplay::Autopager;
pub use bounds::BoundsPolicy;
pub use carousel::Carousel;
pub use config::{AutoplayConfig, IndicatorConfig, PagerConfig, StatusText};
pub use controls::{visible_window, ControlHandles, ControlState, NavButton, PageLink, StatusDisplay};
pub use error::{PagerError, Result};
pub use geometry::{Extent, ListGeometry, Orientation};
pub use ids::TimerId;
pub use indicator::{Indicator, IndicatorFactory, NoIndicators};
pub use inputs::{Command, Inputs};
pub use outputs::{ChangeSource, Outputs, PagerEvent};
pub use pager::Pager;
pub use strategy::{AnimationStrategy, Direction, StrategyContext, StrategyRegistry};
pub use timer::IntervalTimer;
