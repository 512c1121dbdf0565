// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The JS-facing VPAID object.
//!
//! [`VpaidAd`] wraps an [`AdUnit`] over a [`DomSurface`] and exports the
//! VPAID method names. Host callbacks are wrapped as listeners; an exception
//! thrown by one is turned into a [`ListenerFault`] and ends up in the log
//! box instead of propagating into the unit.
//!
//! Operator panel closures hold a `Weak` handle to the shared state, so
//! dropping the last `VpaidAd` releases the unit even though the closures
//! themselves live as long as the page.

use alloc::format;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use core::cell::RefCell;

use decoy_core::attributes::{AttrKey, AttrValue, ViewMode};
use decoy_core::backend::AttributePresenter;
use decoy_core::changes::AttributeChanges;
use decoy_core::event::{AdEvent, EventKind};
use decoy_core::host::{CreativeData, EnvironmentVars};
use decoy_core::registry::{Listener, ListenerFault};
use decoy_core::unit::AdUnit;
use js_sys::Function;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;

use crate::dom::property;
use crate::log_box::LogBoxSink;
use crate::panel::{DomPanel, OperatorAction};
use crate::surface::DomSurface;
use crate::visibility::measure;

/// A host callback plus the `this` it is invoked with.
struct JsListener {
    callback: Function,
    context: JsValue,
}

impl Listener for JsListener {
    fn notify(&self, event: &AdEvent<'_>) -> Result<(), ListenerFault> {
        let this = &self.context;
        let result = match *event {
            AdEvent::ClickThru {
                url,
                id,
                player_handles,
            } => self.callback.call3(
                this,
                &JsValue::from_str(url),
                &JsValue::from_str(id),
                &JsValue::from_bool(player_handles),
            ),
            AdEvent::Error { message } | AdEvent::Log { message } => {
                self.callback.call1(this, &JsValue::from_str(message))
            }
            AdEvent::Interaction { id } => self.callback.call1(this, &JsValue::from_str(id)),
            _ => self.callback.call0(this),
        };
        result
            .map(drop)
            .map_err(|e| ListenerFault::new(describe(&e)))
    }
}

/// Best-effort text for a thrown JS value.
fn describe(e: &JsValue) -> String {
    if let Some(err) = e.dyn_ref::<js_sys::Error>() {
        return String::from(err.to_string());
    }
    e.as_string().unwrap_or_else(|| format!("{e:?}"))
}

struct Bridge {
    unit: AdUnit<DomSurface>,
    panel: RefCell<Option<DomPanel>>,
}

impl Bridge {
    /// Pushes pending attribute changes to the panel, if it exists.
    ///
    /// Changes stay queued until the panel is built.
    fn refresh(&self) {
        let layout_changed = {
            let mut panel = self.panel.borrow_mut();
            let Some(panel) = panel.as_mut() else {
                return;
            };
            let changes = self.unit.take_changes();
            if changes.is_empty() {
                return;
            }
            panel.apply(&self.unit.attributes(), &changes);
            changes.layout_changed
        };
        if layout_changed {
            self.update_visibility();
        }
    }

    fn ensure_panel(self: &Rc<Self>) {
        if self.panel.borrow().is_some() {
            return;
        }
        let (document, container) = self
            .unit
            .with_surface(|s| (s.document().cloned(), s.container().cloned()));
        let (Some(document), Some(container)) = (document, container) else {
            return;
        };

        let weak: Weak<Self> = Rc::downgrade(self);
        let built = DomPanel::build(&document, &container, move |action| {
            if let Some(bridge) = weak.upgrade() {
                bridge.on_operator(action);
            }
        });
        match built {
            Ok(mut panel) => {
                // The panel may live in the host's document rather than ours.
                self.unit.set_sink(LogBoxSink::new(Some(panel.document().clone())));
                let _ = self.unit.take_changes();
                panel.apply(&self.unit.attributes(), &AttributeChanges::all());
                *self.panel.borrow_mut() = Some(panel);
                self.update_visibility();
            }
            Err(e) => self
                .unit
                .report_surface_problem(format!("building operator panel: {}", describe(&e))),
        }
    }

    fn on_operator(&self, action: OperatorAction) {
        match action {
            OperatorAction::ClickThru {
                url,
                id,
                player_handles,
            } => self.unit.click_thru(&url, &id, player_handles),
            OperatorAction::Error { message } => self.unit.report_error(&message),
            OperatorAction::Log { message } => self.unit.report_log(&message),
            OperatorAction::Interaction { id } => self.unit.report_interaction(&id),
            OperatorAction::SetSkippable(skippable) => {
                let _ = self
                    .unit
                    .set_attribute(AttrKey::SkippableState, AttrValue::Bool(skippable));
            }
            OperatorAction::Scroll => self.update_visibility(),
        }
        self.refresh();
    }

    fn update_visibility(&self) {
        let percent = self
            .unit
            .with_surface(|s| s.container().and_then(|c| measure(c)));
        if let Some(panel) = self.panel.borrow().as_ref() {
            panel.set_visibility(percent);
        }
    }
}

/// The object returned by `getVPAIDAd()`.
#[wasm_bindgen]
pub struct VpaidAd {
    inner: Rc<Bridge>,
}

impl core::fmt::Debug for VpaidAd {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VpaidAd")
            .field("unit", &self.inner.unit)
            .field("has_panel", &self.inner.panel.borrow().is_some())
            .finish_non_exhaustive()
    }
}

impl VpaidAd {
    pub(crate) fn create() -> Self {
        let document = web_sys::window().and_then(|w| w.document());
        let unit = AdUnit::new(DomSurface::with_document(document.clone()))
            .with_sink(LogBoxSink::new(document));
        Self {
            inner: Rc::new(Bridge {
                unit,
                panel: RefCell::new(None),
            }),
        }
    }

    /// The wrapped unit.
    #[must_use]
    pub fn unit(&self) -> &AdUnit<DomSurface> {
        &self.inner.unit
    }

    fn after(&self) {
        self.inner.refresh();
    }
}

#[wasm_bindgen]
impl VpaidAd {
    /// `handshakeVersion(version)`
    #[wasm_bindgen(js_name = handshakeVersion)]
    pub fn handshake_version(&self, version: &str) -> String {
        String::from(self.inner.unit.handshake_version(version))
    }

    /// `initAd(width, height, viewMode, desiredBitrate, creativeData, environmentVars)`
    #[wasm_bindgen(js_name = initAd)]
    pub fn init_ad(
        &self,
        width: u32,
        height: u32,
        view_mode: &str,
        desired_bitrate: u32,
        creative_data: JsValue,
        environment_vars: JsValue,
    ) {
        let creative = CreativeData {
            ad_parameters: property(&creative_data, "AdParameters")
                .and_then(|v| v.as_string())
                .unwrap_or_default(),
        };
        let environment = EnvironmentVars {
            slot: property(&environment_vars, "slot"),
            video_slot: property(&environment_vars, "videoSlot"),
        };
        self.inner.unit.init_ad(
            width,
            height,
            ViewMode::parse(view_mode),
            desired_bitrate,
            creative,
            environment,
        );
        self.inner.ensure_panel();
        self.after();
    }

    /// `startAd()`
    #[wasm_bindgen(js_name = startAd)]
    pub fn start_ad(&self) {
        self.inner.unit.start_ad();
        self.after();
    }

    /// `stopAd()`
    #[wasm_bindgen(js_name = stopAd)]
    pub fn stop_ad(&self) {
        self.inner.unit.stop_ad();
        self.after();
    }

    /// `skipAd()`
    #[wasm_bindgen(js_name = skipAd)]
    pub fn skip_ad(&self) {
        self.inner.unit.skip_ad();
        self.after();
    }

    /// `resizeAd(width, height, viewMode)`
    #[wasm_bindgen(js_name = resizeAd)]
    pub fn resize_ad(&self, width: u32, height: u32, view_mode: &str) {
        self.inner
            .unit
            .resize_ad(width, height, ViewMode::parse(view_mode));
        self.after();
    }

    /// `pauseAd()`
    #[wasm_bindgen(js_name = pauseAd)]
    pub fn pause_ad(&self) {
        self.inner.unit.pause_ad();
        self.after();
    }

    /// `resumeAd()`
    #[wasm_bindgen(js_name = resumeAd)]
    pub fn resume_ad(&self) {
        self.inner.unit.resume_ad();
        self.after();
    }

    /// `expandAd()`
    #[wasm_bindgen(js_name = expandAd)]
    pub fn expand_ad(&self) {
        self.inner.unit.expand_ad();
        self.after();
    }

    /// `collapseAd()`
    #[wasm_bindgen(js_name = collapseAd)]
    pub fn collapse_ad(&self) {
        self.inner.unit.collapse_ad();
        self.after();
    }

    /// `subscribe(fn, event, context)`
    ///
    /// A non-callable `fn` is reported to the log box and ignored. The check
    /// is `typeof`, so callbacks from the host's window are accepted.
    pub fn subscribe(&self, callback: JsValue, event: &str, context: JsValue) {
        if callback.is_function() {
            let callback: Function = callback.unchecked_into();
            self.inner
                .unit
                .subscribe(EventKind::from_name(event), JsListener { callback, context });
        } else {
            self.inner
                .unit
                .report_surface_problem(format!("subscribe({event}): callback is not a function"));
        }
    }

    /// `unsubscribe(fn, event)`
    ///
    /// Listeners are keyed by event name only; `fn` is not compared.
    pub fn unsubscribe(&self, callback: JsValue, event: &str) {
        _ = callback;
        self.inner.unit.unsubscribe(EventKind::from_name(event));
    }

    /// `getAdLinear()`
    #[wasm_bindgen(js_name = getAdLinear)]
    pub fn get_ad_linear(&self) -> bool {
        self.inner.unit.get_ad_linear()
    }

    /// `getAdWidth()`
    #[wasm_bindgen(js_name = getAdWidth)]
    pub fn get_ad_width(&self) -> u32 {
        self.inner.unit.get_ad_width()
    }

    /// `getAdHeight()`
    #[wasm_bindgen(js_name = getAdHeight)]
    pub fn get_ad_height(&self) -> u32 {
        self.inner.unit.get_ad_height()
    }

    /// `getAdExpanded()`
    #[wasm_bindgen(js_name = getAdExpanded)]
    pub fn get_ad_expanded(&self) -> bool {
        self.inner.unit.get_ad_expanded()
    }

    /// `getAdSkippableState()`
    #[wasm_bindgen(js_name = getAdSkippableState)]
    pub fn get_ad_skippable_state(&self) -> bool {
        self.inner.unit.get_ad_skippable_state()
    }

    /// `getAdRemainingTime()`
    #[wasm_bindgen(js_name = getAdRemainingTime)]
    pub fn get_ad_remaining_time(&self) -> i32 {
        self.inner.unit.get_ad_remaining_time()
    }

    /// `getAdDuration()`
    #[wasm_bindgen(js_name = getAdDuration)]
    pub fn get_ad_duration(&self) -> i32 {
        self.inner.unit.get_ad_duration()
    }

    /// `getAdVolume()`
    #[wasm_bindgen(js_name = getAdVolume)]
    pub fn get_ad_volume(&self) -> i32 {
        self.inner.unit.get_ad_volume()
    }

    /// `setAdVolume(volume)`
    ///
    /// Fractional values are truncated by the JS-to-`i32` conversion.
    #[wasm_bindgen(js_name = setAdVolume)]
    pub fn set_ad_volume(&self, volume: i32) {
        self.inner.unit.set_ad_volume(volume);
        self.after();
    }

    /// `getAdCompanions()`
    #[wasm_bindgen(js_name = getAdCompanions)]
    pub fn get_ad_companions(&self) -> String {
        self.inner.unit.get_ad_companions()
    }

    /// `getAdIcons()`
    #[wasm_bindgen(js_name = getAdIcons)]
    pub fn get_ad_icons(&self) -> String {
        self.inner.unit.get_ad_icons()
    }
}
