//! Carousel configuration.
//!
//! Two ways in: `from_json_str` is strict and reports malformed JSON, while
//! `from_json_value` accepts whatever a page script hands over and falls back
//! to defaults field by field. Defaulting never fails.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::geometry::Orientation;

pub const DEFAULT_INTERVAL_MS: u32 = 5000;
pub const DEFAULT_ANIMATION_SPEED_MS: u32 = 400;

/// Text pieces around the 1-based "current of total" status display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusText {
    pub prepend: String,
    pub separation: String,
    pub append: String,
}

impl Default for StatusText {
    fn default() -> Self {
        Self {
            prepend: String::new(),
            separation: " / ".to_string(),
            append: String::new(),
        }
    }
}

impl StatusText {
    /// Render the status for a 0-based index.
    pub fn render(&self, index: usize, length: usize) -> String {
        format!(
            "{}{}{}{}{}",
            self.prepend,
            index + 1,
            self.separation,
            length,
            self.append
        )
    }
}

/// Visual countdown shown while autoplay waits for its next tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub kind: String,
    #[serde(default)]
    pub options: JsonValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    pub interval_ms: u32,
    pub indicator: Option<IndicatorConfig>,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            indicator: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerConfig {
    pub initial_index: i64,
    pub length: usize,
    pub loops: bool,
    /// Negative disables link hiding.
    pub visible_link_radius: i64,
    pub status: Option<StatusText>,
    pub autoplay: Option<AutoplayConfig>,
    pub animation_speed_ms: u32,
    pub lock_during_transition: bool,
    pub orientation: Orientation,
    pub strategy: Option<String>,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            initial_index: 0,
            length: 0,
            loops: true,
            visible_link_radius: -1,
            status: None,
            autoplay: None,
            animation_speed_ms: DEFAULT_ANIMATION_SPEED_MS,
            lock_during_transition: true,
            orientation: Orientation::Horizontal,
            strategy: None,
        }
    }
}

impl PagerConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Lenient conversion: every field that is missing or has the wrong type
    /// keeps its default.
    pub fn from_json_value(value: &JsonValue) -> Self {
        let mut cfg = Self::default();
        let Some(obj) = value.as_object() else {
            return cfg;
        };

        if let Some(i) = obj.get("initial_index").and_then(as_int) {
            cfg.initial_index = i;
        }
        if let Some(n) = obj.get("length").and_then(as_int) {
            cfg.length = n.max(0) as usize;
        }
        if let Some(b) = obj.get("loops").and_then(JsonValue::as_bool) {
            cfg.loops = b;
        }
        if let Some(r) = obj.get("visible_link_radius").and_then(as_int) {
            cfg.visible_link_radius = r;
        }
        if let Some(status) = obj.get("status") {
            cfg.status = status_from_value(status);
        }
        if let Some(autoplay) = obj.get("autoplay") {
            cfg.autoplay = autoplay_from_value(autoplay);
        }
        if let Some(ms) = obj.get("animation_speed_ms").and_then(as_int) {
            cfg.animation_speed_ms = clamp_u32(ms);
        }
        if let Some(b) = obj
            .get("lock_during_transition")
            .and_then(JsonValue::as_bool)
        {
            cfg.lock_during_transition = b;
        }
        if let Some(o) = obj
            .get("orientation")
            .and_then(|v| serde_json::from_value::<Orientation>(v.clone()).ok())
        {
            cfg.orientation = o;
        }
        if let Some(name) = obj.get("strategy").and_then(JsonValue::as_str) {
            cfg.strategy = Some(name.to_string());
        }
        cfg
    }
}

/// Integer view of a JSON number; fractions truncate toward zero.
fn as_int(v: &JsonValue) -> Option<i64> {
    if let Some(i) = v.as_i64() {
        return Some(i);
    }
    v.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)
}

fn clamp_u32(v: i64) -> u32 {
    v.clamp(0, u32::MAX as i64) as u32
}

fn status_from_value(v: &JsonValue) -> Option<StatusText> {
    let obj = v.as_object()?;
    let mut status = StatusText::default();
    let text = |key: &str| obj.get(key).and_then(JsonValue::as_str).map(str::to_string);
    if let Some(s) = text("prepend") {
        status.prepend = s;
    }
    if let Some(s) = text("separation") {
        status.separation = s;
    }
    if let Some(s) = text("append") {
        status.append = s;
    }
    Some(status)
}

fn autoplay_from_value(v: &JsonValue) -> Option<AutoplayConfig> {
    // `autoplay: true` enables it with defaults, `false`/null leave it off.
    if let Some(enabled) = v.as_bool() {
        return enabled.then(AutoplayConfig::default);
    }
    let obj = v.as_object()?;
    let mut autoplay = AutoplayConfig::default();
    if let Some(ms) = obj.get("interval_ms").and_then(as_int) {
        autoplay.interval_ms = clamp_u32(ms);
    }
    autoplay.indicator = obj
        .get("indicator")
        .and_then(|i| serde_json::from_value::<IndicatorConfig>(i.clone()).ok());
    Some(autoplay)
}
