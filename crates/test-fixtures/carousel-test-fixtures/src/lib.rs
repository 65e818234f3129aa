//! Shared test doubles and named JSON configs for the carousel crates.
//!
//! Every double records into an `Rc<RefCell<..>>` log that the test keeps a
//! clone of, so calls stay observable after the double is boxed and handed to
//! the pager.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use carousel_pager_core::{
    AnimationStrategy, ControlHandles, ControlState, Direction, Extent, Indicator,
    IndicatorConfig, IndicatorFactory, ListGeometry, NavButton, PageLink, StatusDisplay,
    StrategyContext,
};

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    configs: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn lookup(name: &str) -> Result<&'static str> {
    MANIFEST
        .configs
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("unknown config fixture '{name}'"))
}

pub mod configs {
    use super::*;

    pub fn json(name: &str) -> Result<String> {
        read_to_string(lookup(name)?)
    }

    pub fn value(name: &str) -> Result<serde_json::Value> {
        load(name)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let text = json(name)?;
        serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {name}"))
    }
}

/// A list three times wider than its container.
pub fn overflowing_geometry() -> ListGeometry {
    ListGeometry {
        container: Extent::new(300.0, 200.0),
        list: Extent::new(900.0, 200.0),
    }
}

/// A list that fits its container on both axes.
pub fn fitting_geometry() -> ListGeometry {
    ListGeometry {
        container: Extent::new(300.0, 200.0),
        list: Extent::new(300.0, 200.0),
    }
}

// ---------------------------------------------------------------------------
// Controls

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCall {
    Previous(bool),
    Next(bool),
    LinkVisible { index: usize, visible: bool },
    LinkActive { index: usize, active: bool },
    Status(String),
}

#[derive(Clone, Default)]
pub struct ControlLog(Rc<RefCell<Vec<ControlCall>>>);

struct RecButton {
    log: ControlLog,
    next: bool,
}

impl NavButton for RecButton {
    fn set_enabled(&mut self, enabled: bool) {
        let call = if self.next {
            ControlCall::Next(enabled)
        } else {
            ControlCall::Previous(enabled)
        };
        self.log.push(call);
    }
}

struct RecLink {
    log: ControlLog,
    index: usize,
}

impl PageLink for RecLink {
    fn set_visible(&mut self, visible: bool) {
        self.log.push(ControlCall::LinkVisible {
            index: self.index,
            visible,
        });
    }

    fn set_active(&mut self, active: bool) {
        self.log.push(ControlCall::LinkActive {
            index: self.index,
            active,
        });
    }
}

struct RecStatus {
    log: ControlLog,
}

impl StatusDisplay for RecStatus {
    fn set_text(&mut self, text: &str) {
        self.log.push(ControlCall::Status(text.to_string()));
    }
}

impl ControlLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: ControlCall) {
        self.0.borrow_mut().push(call);
    }

    /// Full set of recording handles: both buttons, `links` page links and a
    /// status display.
    pub fn handles(&self, links: usize) -> ControlHandles {
        ControlHandles {
            previous: Some(Box::new(RecButton {
                log: self.clone(),
                next: false,
            })),
            next: Some(Box::new(RecButton {
                log: self.clone(),
                next: true,
            })),
            links: (0..links)
                .map(|index| {
                    Box::new(RecLink {
                        log: self.clone(),
                        index,
                    }) as Box<dyn PageLink>
                })
                .collect(),
            status: Some(Box::new(RecStatus { log: self.clone() })),
        }
    }

    pub fn calls(&self) -> Vec<ControlCall> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn previous_enabled(&self) -> Option<bool> {
        self.0.borrow().iter().rev().find_map(|c| match c {
            ControlCall::Previous(e) => Some(*e),
            _ => None,
        })
    }

    pub fn next_enabled(&self) -> Option<bool> {
        self.0.borrow().iter().rev().find_map(|c| match c {
            ControlCall::Next(e) => Some(*e),
            _ => None,
        })
    }

    pub fn status(&self) -> Option<String> {
        self.0.borrow().iter().rev().find_map(|c| match c {
            ControlCall::Status(s) => Some(s.clone()),
            _ => None,
        })
    }

    /// Links whose latest visibility call was `true`, ascending.
    pub fn visible_links(&self) -> Vec<usize> {
        let mut latest: HashMap<usize, bool> = HashMap::new();
        for call in self.0.borrow().iter() {
            if let ControlCall::LinkVisible { index, visible } = call {
                latest.insert(*index, *visible);
            }
        }
        let mut shown: Vec<usize> = latest
            .into_iter()
            .filter_map(|(i, v)| v.then_some(i))
            .collect();
        shown.sort_unstable();
        shown
    }

    /// Links whose latest active call was `true`, ascending.
    pub fn active_links(&self) -> Vec<usize> {
        let mut latest: HashMap<usize, bool> = HashMap::new();
        for call in self.0.borrow().iter() {
            if let ControlCall::LinkActive { index, active } = call {
                latest.insert(*index, *active);
            }
        }
        let mut active: Vec<usize> = latest
            .into_iter()
            .filter_map(|(i, a)| a.then_some(i))
            .collect();
        active.sort_unstable();
        active
    }
}

// ---------------------------------------------------------------------------
// Strategy

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StrategyCall {
    Init { item_count: usize },
    Transition { old: usize, new: usize, direction: Direction },
    Hover(bool),
    PagerCreated { index: usize },
}

#[derive(Clone, Default)]
pub struct StrategyLog(Rc<RefCell<Vec<StrategyCall>>>);

impl StrategyLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<StrategyCall> {
        self.0.borrow().clone()
    }

    pub fn transitions(&self) -> Vec<(usize, usize, Direction)> {
        self.0
            .borrow()
            .iter()
            .filter_map(|c| match c {
                StrategyCall::Transition {
                    old,
                    new,
                    direction,
                } => Some((*old, *new, *direction)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Strategy that shows `per_page` items per page and records every call.
pub struct RecordingStrategy {
    per_page: usize,
    log: StrategyLog,
}

impl RecordingStrategy {
    pub fn new(log: &StrategyLog) -> Self {
        Self::with_per_page(log, 1)
    }

    pub fn with_per_page(log: &StrategyLog, per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
            log: log.clone(),
        }
    }

    pub fn boxed(log: &StrategyLog) -> Box<dyn AnimationStrategy> {
        Box::new(Self::new(log))
    }
}

impl AnimationStrategy for RecordingStrategy {
    fn init(&mut self, ctx: &StrategyContext) -> usize {
        self.log.0.borrow_mut().push(StrategyCall::Init {
            item_count: ctx.item_count,
        });
        ctx.item_count.div_ceil(self.per_page)
    }

    fn page_transition(&mut self, old: usize, new: usize, direction: Direction) {
        self.log.0.borrow_mut().push(StrategyCall::Transition {
            old,
            new,
            direction,
        });
    }

    fn hover(&mut self, hovering: bool) {
        self.log.0.borrow_mut().push(StrategyCall::Hover(hovering));
    }

    fn pager_created(&mut self, state: &ControlState) {
        self.log
            .0
            .borrow_mut()
            .push(StrategyCall::PagerCreated { index: state.index });
    }
}

// ---------------------------------------------------------------------------
// Indicator

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndicatorCounts {
    pub created: usize,
    pub inits: usize,
    pub starts: usize,
}

#[derive(Clone, Default)]
pub struct IndicatorLog(Rc<RefCell<IndicatorCounts>>);

impl IndicatorLog {
    pub fn counts(&self) -> IndicatorCounts {
        self.0.borrow().clone()
    }
}

struct RecIndicator {
    log: IndicatorLog,
}

impl Indicator for RecIndicator {
    fn init(&mut self) {
        self.log.0.borrow_mut().inits += 1;
    }

    fn start(&mut self) {
        self.log.0.borrow_mut().starts += 1;
    }
}

/// Indicator factory that supports only the listed kinds.
pub struct RecordingIndicators {
    supported: Vec<String>,
    log: IndicatorLog,
}

impl RecordingIndicators {
    pub fn new(supported: &[&str], log: &IndicatorLog) -> Self {
        Self {
            supported: supported.iter().map(|s| s.to_string()).collect(),
            log: log.clone(),
        }
    }
}

impl IndicatorFactory for RecordingIndicators {
    fn create(&self, cfg: &IndicatorConfig, _interval_ms: u32) -> Option<Box<dyn Indicator>> {
        if !self.supported.iter().any(|k| *k == cfg.kind) {
            return None;
        }
        self.log.0.borrow_mut().created += 1;
        Some(Box::new(RecIndicator {
            log: self.log.clone(),
        }))
    }
}
