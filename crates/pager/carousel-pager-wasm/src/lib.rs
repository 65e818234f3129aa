use js_sys::{Function, Reflect};
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use carousel_pager_core::{
    AnimationStrategy, Carousel, Command, ControlHandles, ControlState, Direction, Indicator,
    IndicatorConfig, IndicatorFactory, Inputs, ListGeometry, NavButton, PageLink, PagerConfig,
    StatusDisplay, StrategyContext,
};

#[wasm_bindgen]
pub struct WasmCarousel {
    core: Carousel,
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    fn console_warn(label: &str, err: &JsValue);
}

/// Host callbacks are fire-and-forget; a throw is reported and paging goes on.
fn report(callback: &str, result: Result<JsValue, JsValue>) {
    if let Err(err) = result {
        console_warn(&format!("carousel: {callback} threw"), &err);
    }
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Serialize with plain objects for maps and null for None.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&swb::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("serialize error: {e}")))
}

fn optional_fn(obj: &JsValue, name: &str) -> Option<Function> {
    if jsvalue_is_undefined_or_null(obj) {
        return None;
    }
    Reflect::get(obj, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

fn required_fn(obj: &JsValue, name: &str, what: &str) -> Result<Function, JsError> {
    optional_fn(obj, name).ok_or_else(|| JsError::new(&format!("{what}: missing '{name}' function")))
}

/// Strategy object supplied by the page: `{ init, page, hover, pagerCreated? }`.
struct JsStrategy {
    this: JsValue,
    init: Function,
    page: Function,
    hover: Function,
    pager_created: Option<Function>,
}

impl JsStrategy {
    fn from_js(obj: JsValue) -> Result<Self, JsError> {
        Ok(Self {
            init: required_fn(&obj, "init", "strategy")?,
            page: required_fn(&obj, "page", "strategy")?,
            hover: required_fn(&obj, "hover", "strategy")?,
            pager_created: optional_fn(&obj, "pagerCreated"),
            this: obj,
        })
    }
}

impl AnimationStrategy for JsStrategy {
    fn init(&mut self, ctx: &StrategyContext) -> usize {
        // A missing or non-numeric page count means one page per item.
        let arg = to_js(ctx).unwrap_or(JsValue::UNDEFINED);
        match self.init.call1(&self.this, &arg) {
            Ok(val) => val
                .as_f64()
                .filter(|n| n.is_finite() && *n >= 0.0)
                .map_or(ctx.item_count, page_count),
            Err(err) => {
                report("strategy.init", Err(err));
                ctx.item_count
            }
        }
    }

    fn page_transition(&mut self, old: usize, new: usize, direction: Direction) {
        report(
            "strategy.page",
            self.page.call3(
                &self.this,
                &JsValue::from(old as u32),
                &JsValue::from(new as u32),
                &JsValue::from(direction.signum()),
            ),
        );
    }

    fn hover(&mut self, hovering: bool) {
        report(
            "strategy.hover",
            self.hover.call1(&self.this, &JsValue::from_bool(hovering)),
        );
    }

    fn pager_created(&mut self, state: &ControlState) {
        if let Some(f) = &self.pager_created {
            let arg = to_js(state).unwrap_or(JsValue::UNDEFINED);
            report("strategy.pagerCreated", f.call1(&self.this, &arg));
        }
    }
}

/// Page counts are carried as u32 on the JS side.
fn page_count(n: f64) -> usize {
    n.min(f64::from(u32::MAX)) as usize
}

struct JsButton(Function);

impl NavButton for JsButton {
    fn set_enabled(&mut self, enabled: bool) {
        report(
            "controls button",
            self.0.call1(&JsValue::UNDEFINED, &JsValue::from_bool(enabled)),
        );
    }
}

struct JsLink {
    index: u32,
    visible: Option<Function>,
    active: Option<Function>,
}

impl PageLink for JsLink {
    fn set_visible(&mut self, visible: bool) {
        if let Some(f) = &self.visible {
            report(
                "controls.linkVisible",
                f.call2(
                    &JsValue::UNDEFINED,
                    &JsValue::from(self.index),
                    &JsValue::from_bool(visible),
                ),
            );
        }
    }

    fn set_active(&mut self, active: bool) {
        if let Some(f) = &self.active {
            report(
                "controls.linkActive",
                f.call2(
                    &JsValue::UNDEFINED,
                    &JsValue::from(self.index),
                    &JsValue::from_bool(active),
                ),
            );
        }
    }
}

struct JsStatus(Function);

impl StatusDisplay for JsStatus {
    fn set_text(&mut self, text: &str) {
        report(
            "controls.status",
            self.0.call1(&JsValue::UNDEFINED, &JsValue::from_str(text)),
        );
    }
}

/// Control callbacks: `{ previous?, next?, linkVisible?, linkActive?, status? }`.
struct JsControls {
    previous: Option<Function>,
    next: Option<Function>,
    link_visible: Option<Function>,
    link_active: Option<Function>,
    status: Option<Function>,
}

impl JsControls {
    fn from_js(obj: &JsValue) -> Self {
        Self {
            previous: optional_fn(obj, "previous"),
            next: optional_fn(obj, "next"),
            link_visible: optional_fn(obj, "linkVisible"),
            link_active: optional_fn(obj, "linkActive"),
            status: optional_fn(obj, "status"),
        }
    }

    fn into_handles(self, pages: usize) -> ControlHandles {
        let has_links = self.link_visible.is_some() || self.link_active.is_some();
        let links = if has_links {
            (0..pages)
                .map(|index| {
                    Box::new(JsLink {
                        index: u32::try_from(index).unwrap_or(u32::MAX),
                        visible: self.link_visible.clone(),
                        active: self.link_active.clone(),
                    }) as Box<dyn PageLink>
                })
                .collect()
        } else {
            Vec::new()
        };
        ControlHandles {
            previous: self
                .previous
                .map(|f| Box::new(JsButton(f)) as Box<dyn NavButton>),
            next: self.next.map(|f| Box::new(JsButton(f)) as Box<dyn NavButton>),
            links,
            status: self
                .status
                .map(|f| Box::new(JsStatus(f)) as Box<dyn StatusDisplay>),
        }
    }
}

struct JsIndicator {
    this: JsValue,
    init: Option<Function>,
    start: Option<Function>,
}

impl Indicator for JsIndicator {
    fn init(&mut self) {
        if let Some(f) = &self.init {
            report("indicator.init", f.call0(&self.this));
        }
    }

    fn start(&mut self) {
        if let Some(f) = &self.start {
            report("indicator.start", f.call0(&self.this));
        }
    }
}

/// `indicator(kind, options, intervalMs)` returning `{ init?, start? }`, or
/// null/undefined when the kind is unsupported.
struct JsIndicatorFactory {
    f: Option<Function>,
}

impl IndicatorFactory for JsIndicatorFactory {
    fn create(&self, cfg: &IndicatorConfig, interval_ms: u32) -> Option<Box<dyn Indicator>> {
        let f = self.f.as_ref()?;
        let options = to_js(&cfg.options).ok()?;
        let obj = f
            .call3(
                &JsValue::UNDEFINED,
                &JsValue::from_str(&cfg.kind),
                &options,
                &JsValue::from(interval_ms),
            )
            .ok()?;
        if jsvalue_is_undefined_or_null(&obj) {
            return None;
        }
        Some(Box::new(JsIndicator {
            init: optional_fn(&obj, "init"),
            start: optional_fn(&obj, "start"),
            this: obj,
        }))
    }
}

#[wasm_bindgen]
impl WasmCarousel {
    /// Create a carousel.
    ///
    /// - `config`: loose config object (wrong or missing fields fall back to defaults)
    /// - `strategy`: `{ init(ctx) -> pages, page(old, new, dir), hover(bool), pagerCreated?(state) }`
    /// - `controls`: optional callbacks, see `JsControls`
    /// - `indicator`: optional `indicator(kind, options, intervalMs)` factory
    /// - `geometry`: `{ container: {width, height}, list: {width, height} }`
    #[wasm_bindgen(constructor)]
    pub fn new(
        config: JsValue,
        strategy: JsValue,
        controls: JsValue,
        indicator: JsValue,
        geometry: JsValue,
        item_count: u32,
    ) -> Result<WasmCarousel, JsError> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let cfg = if jsvalue_is_undefined_or_null(&config) {
            PagerConfig::default()
        } else {
            let raw: serde_json::Value = swb::from_value(config)
                .map_err(|e| JsError::new(&format!("config error: {e}")))?;
            PagerConfig::from_json_value(&raw)
        };
        let strategy = JsStrategy::from_js(strategy)?;
        let controls = JsControls::from_js(&controls);
        let indicators = JsIndicatorFactory {
            f: indicator.dyn_into::<Function>().ok(),
        };
        let geometry: ListGeometry = if jsvalue_is_undefined_or_null(&geometry) {
            ListGeometry::default()
        } else {
            swb::from_value(geometry).map_err(|e| JsError::new(&format!("geometry error: {e}")))?
        };

        let core = Carousel::with_controls(
            cfg,
            Box::new(strategy),
            |pages| controls.into_handles(pages),
            &indicators,
            geometry,
            item_count as usize,
        );
        Ok(WasmCarousel { core })
    }

    pub fn index(&self) -> u32 {
        self.core.index() as u32
    }

    pub fn length(&self) -> u32 {
        u32::try_from(self.core.pager().len()).unwrap_or(u32::MAX)
    }

    #[wasm_bindgen(js_name = canPage)]
    pub fn can_page(&self) -> bool {
        self.core.can_page()
    }

    #[wasm_bindgen(js_name = autoplayRunning)]
    pub fn autoplay_running(&self) -> bool {
        self.core.pager().autoplay_running()
    }

    pub fn next(&mut self) -> Result<JsValue, JsError> {
        to_js(self.core.command(Command::Next))
    }

    pub fn previous(&mut self) -> Result<JsValue, JsError> {
        to_js(self.core.command(Command::Previous))
    }

    pub fn goto(&mut self, index: i32) -> Result<JsValue, JsError> {
        to_js(self.core.command(Command::Goto {
            index: i64::from(index),
        }))
    }

    #[wasm_bindgen(js_name = moveBy)]
    pub fn move_by(&mut self, delta: i32) -> Result<JsValue, JsError> {
        to_js(self.core.command(Command::Move {
            delta: i64::from(delta),
        }))
    }

    pub fn hover(&mut self, hovering: bool) {
        self.core.command(Command::Hover { hovering });
    }

    #[wasm_bindgen(js_name = transitionFinished)]
    pub fn transition_finished(&mut self) {
        self.core.command(Command::TransitionFinished);
    }

    /// Advance by `dt_ms` milliseconds with optional inputs JSON
    /// (`{ commands: ["Next", { "Goto": { "index": 3 } }] }`). Returns Outputs.
    pub fn update(&mut self, dt_ms: f64, inputs_json: JsValue) -> Result<JsValue, JsError> {
        let inputs: Inputs = if jsvalue_is_undefined_or_null(&inputs_json) {
            Inputs::default()
        } else {
            swb::from_value(inputs_json).map_err(|e| JsError::new(&format!("inputs error: {e}")))?
        };
        let dt = if dt_ms.is_finite() { dt_ms.max(0.0) as u64 } else { 0 };
        to_js(self.core.update(dt, inputs))
    }

    /// Restart the autoplay interval; returns the new timer id, if autoplay is armed.
    #[wasm_bindgen(js_name = resetAutopager)]
    pub fn reset_autopager(&mut self) -> Option<u32> {
        self.core.reset_autopager().map(|id| id.0)
    }

    #[wasm_bindgen(js_name = controlState)]
    pub fn control_state(&self) -> Result<JsValue, JsError> {
        to_js(self.core.control_state())
    }

    /// Clear the autoplay timer. Call before removing the widget's DOM.
    pub fn destroy(&mut self) {
        self.core.destroy();
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
