// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ad unit: lifecycle controller and event dispatch.
//!
//! [`AdUnit`] is the object a host drives. Every entry point runs to
//! completion before returning, and every event it emits is delivered
//! synchronously inside the triggering call: `init_ad` has invoked the
//! `AdLoaded` listener by the time it returns.
//!
//! # Re-entrancy
//!
//! Entry points take `&self`. State lives in `Cell`/`RefCell` fields whose
//! borrows never span a listener invocation, so a listener may call straight
//! back into the unit (a host commonly calls `startAd` from its `AdLoaded`
//! handler) or unsubscribe itself.
//!
//! # Status
//!
//! VPAID leaves the lifecycle state implicit. [`AdStatus`] makes it explicit
//! for diagnostics only; it never gates an entry point or an emission.
//!
//! ```text
//!   Uninitialized ──init──► Initialized ──start──► Started ◄──resume── Paused
//!                                                     │  └──pause──────►┘
//!                                                     ▼
//!                                 stop / honored skip: Stopped (terminal)
//! ```

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::attributes::{AttrKey, AttrValue, AttributeSet, ViewMode};
use crate::changes::{AttributeChanges, ChangeTracker};
use crate::config::AdConfig;
use crate::event::{AdEvent, EventKind};
use crate::host::{CreativeData, EnvironmentVars, HostSurface, NullSurface, SlotBinding};
use crate::registry::{CallbackRegistry, Listener};
use crate::trace::{CallEvent, Delivery, Diagnostic, DiagnosticSink, EmitEvent, NoopSink, Operation};

/// Lifecycle status inferred from the calls a host has made.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AdStatus {
    /// `initAd` has not been called.
    #[default]
    Uninitialized,
    /// `initAd` has been called; the ad has not started.
    Initialized,
    /// The ad is playing.
    Started,
    /// The ad is paused.
    Paused,
    /// The ad was stopped or skipped.
    Stopped,
}

impl AdStatus {
    /// Returns a short lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Initialized => "initialized",
            Self::Started => "started",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for AdStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mock VPAID creative.
///
/// Construct one per impression with [`AdUnit::new`] (or
/// [`AdUnit::default`] for the headless [`NullSurface`]), subscribe
/// listeners, then drive it through the VPAID entry points.
pub struct AdUnit<S = NullSurface> {
    vpaid_version: &'static str,
    attributes: RefCell<AttributeSet>,
    registry: RefCell<CallbackRegistry>,
    status: Cell<AdStatus>,
    changes: RefCell<ChangeTracker>,
    creative: RefCell<CreativeData>,
    surface: RefCell<S>,
    sink: RefCell<Box<dyn DiagnosticSink>>,
}

impl<S> fmt::Debug for AdUnit<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdUnit")
            .field("vpaid_version", &self.vpaid_version)
            .field("status", &self.status.get())
            .field("attributes", &self.attributes)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl Default for AdUnit<NullSurface> {
    fn default() -> Self {
        Self::new(NullSurface::new())
    }
}

impl<S: HostSurface> AdUnit<S> {
    /// Creates a unit with the default [`AdConfig`].
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, AdConfig::default())
    }

    /// Creates a unit from a configuration preset.
    #[must_use]
    pub fn with_config(surface: S, config: AdConfig) -> Self {
        Self {
            vpaid_version: config.vpaid_version,
            attributes: RefCell::new(config.attributes),
            registry: RefCell::new(CallbackRegistry::new()),
            status: Cell::new(AdStatus::Uninitialized),
            changes: RefCell::new(ChangeTracker::new()),
            creative: RefCell::new(CreativeData::default()),
            surface: RefCell::new(surface),
            sink: RefCell::new(Box::new(NoopSink)),
        }
    }

    /// Installs a diagnostic sink, replacing the previous one.
    pub fn set_sink(&self, sink: impl DiagnosticSink + 'static) {
        *self.sink.borrow_mut() = Box::new(sink);
    }

    /// Builder form of [`set_sink`](Self::set_sink).
    #[must_use]
    pub fn with_sink(self, sink: impl DiagnosticSink + 'static) -> Self {
        self.set_sink(sink);
        self
    }

    // -- Callback registry --------------------------------------------------

    /// Registers `listener` under `kind`, replacing any previous listener.
    ///
    /// Names outside the recognized set are accepted and never invoked.
    pub fn subscribe(&self, kind: impl Into<EventKind>, listener: impl Listener + 'static) {
        self.subscribe_shared(kind, Rc::new(listener));
    }

    /// Registers an already shared listener under `kind`.
    pub fn subscribe_shared(&self, kind: impl Into<EventKind>, listener: Rc<dyn Listener>) {
        self.registry.borrow_mut().subscribe(kind.into(), listener);
        self.record(Operation::Subscribe);
    }

    /// Removes the listener registered under `kind`. Absent kinds are a no-op.
    pub fn unsubscribe(&self, kind: impl Into<EventKind>) {
        self.registry.borrow_mut().unsubscribe(&kind.into());
        self.record(Operation::Unsubscribe);
    }

    /// Whether a listener is registered under `kind`.
    #[must_use]
    pub fn is_subscribed(&self, kind: &EventKind) -> bool {
        self.registry.borrow().is_subscribed(kind)
    }

    // -- Lifecycle ------------------------------------------------------------

    /// Returns the supported VPAID version. The host's version is ignored.
    #[must_use]
    pub fn handshake_version(&self, host_version: &str) -> &'static str {
        _ = host_version;
        self.record(Operation::HandshakeVersion);
        self.vpaid_version
    }

    /// Stores the initial size, view mode, and bitrate, binds the host's
    /// slots, and emits `AdLoaded`.
    ///
    /// Calling it again is honored and reported as
    /// [`Diagnostic::Reinitialized`].
    pub fn init_ad(
        &self,
        width: u32,
        height: u32,
        view_mode: ViewMode,
        desired_bitrate: u32,
        creative_data: CreativeData,
        environment: EnvironmentVars<S::Slot, S::VideoSlot>,
    ) {
        let previous = self.status.get();
        let binding = {
            let mut surface = self.surface.borrow_mut();
            let binding = surface.bind(environment.slot, environment.video_slot);
            surface.resize(width, height, &view_mode);
            binding
        };
        {
            let mut attrs = self.attributes.borrow_mut();
            attrs.width = width;
            attrs.height = height;
            attrs.view_mode = view_mode;
            attrs.desired_bitrate = desired_bitrate;
        }
        self.mark(&[
            AttrKey::Width,
            AttrKey::Height,
            AttrKey::ViewMode,
            AttrKey::DesiredBitrate,
        ]);
        *self.creative.borrow_mut() = creative_data;
        self.status.set(AdStatus::Initialized);

        self.record(Operation::InitAd);
        if previous != AdStatus::Uninitialized {
            self.diagnose(Diagnostic::Reinitialized { previous });
        }
        if binding == SlotBinding::Fallback {
            self.diagnose(Diagnostic::SlotFallback);
        }
        self.emit(AdEvent::Loaded);
    }

    /// Emits `AdStarted`.
    pub fn start_ad(&self) {
        if self.status.get() != AdStatus::Stopped {
            self.status.set(AdStatus::Started);
        }
        self.record(Operation::StartAd);
        self.emit(AdEvent::Started);
    }

    /// Emits `AdStopped`.
    pub fn stop_ad(&self) {
        self.status.set(AdStatus::Stopped);
        self.record(Operation::StopAd);
        self.emit(AdEvent::Stopped);
    }

    /// Emits `AdPaused`.
    pub fn pause_ad(&self) {
        if self.status.get() == AdStatus::Started {
            self.status.set(AdStatus::Paused);
        }
        self.record(Operation::PauseAd);
        self.emit(AdEvent::Paused);
    }

    /// Emits `AdResumed`.
    pub fn resume_ad(&self) {
        if self.status.get() == AdStatus::Paused {
            self.status.set(AdStatus::Started);
        }
        self.record(Operation::ResumeAd);
        self.emit(AdEvent::Resumed);
    }

    /// Stores the new size and view mode and emits `AdSizeChange`.
    pub fn resize_ad(&self, width: u32, height: u32, view_mode: ViewMode) {
        self.surface.borrow_mut().resize(width, height, &view_mode);
        {
            let mut attrs = self.attributes.borrow_mut();
            attrs.width = width;
            attrs.height = height;
            attrs.view_mode = view_mode;
        }
        self.mark(&[AttrKey::Width, AttrKey::Height, AttrKey::ViewMode]);
        self.record(Operation::ResizeAd);
        self.emit(AdEvent::SizeChange);
    }

    /// Sets `expanded` and emits `AdExpanded`.
    pub fn expand_ad(&self) {
        self.attributes.borrow_mut().expanded = true;
        self.mark(&[AttrKey::Expanded]);
        self.record(Operation::ExpandAd);
        self.emit(AdEvent::Expanded);
    }

    /// Clears `expanded`. Emits nothing.
    pub fn collapse_ad(&self) {
        self.attributes.borrow_mut().expanded = false;
        self.mark(&[AttrKey::Expanded]);
        self.record(Operation::CollapseAd);
    }

    /// Emits `AdSkipped` if, and only if, the ad is currently skippable.
    ///
    /// A skippable ad with no `AdSkipped` listener is reported as
    /// [`Diagnostic::SkipWithoutListener`]. A non-skippable ad ignores the
    /// request silently.
    pub fn skip_ad(&self) {
        let skippable = self.attributes.borrow().skippable_state;
        if skippable {
            self.status.set(AdStatus::Stopped);
        }
        self.record(Operation::SkipAd);
        if skippable && self.emit(AdEvent::Skipped) == Delivery::NoListener {
            self.diagnose(Diagnostic::SkipWithoutListener);
        }
    }

    /// Stores `volume` as given (no clamping) and emits `AdVolumeChange`.
    pub fn set_ad_volume(&self, volume: i32) {
        self.attributes.borrow_mut().volume = volume;
        self.mark(&[AttrKey::Volume]);
        self.record(Operation::SetAdVolume);
        self.emit(AdEvent::VolumeChange);
    }

    /// Returns the stored volume.
    #[must_use]
    pub fn get_ad_volume(&self) -> i32 {
        self.record(Operation::GetAdVolume);
        self.attributes.borrow().volume
    }

    // -- Getters --------------------------------------------------------------

    /// `getAdSkippableState`
    #[must_use]
    pub fn get_ad_skippable_state(&self) -> bool {
        self.read(AttrKey::SkippableState, |a| a.skippable_state)
    }

    /// `getAdWidth`
    #[must_use]
    pub fn get_ad_width(&self) -> u32 {
        self.read(AttrKey::Width, |a| a.width)
    }

    /// `getAdHeight`
    #[must_use]
    pub fn get_ad_height(&self) -> u32 {
        self.read(AttrKey::Height, |a| a.height)
    }

    /// `getAdDuration`
    #[must_use]
    pub fn get_ad_duration(&self) -> i32 {
        self.read(AttrKey::Duration, |a| a.duration)
    }

    /// `getAdRemainingTime`
    #[must_use]
    pub fn get_ad_remaining_time(&self) -> i32 {
        self.read(AttrKey::RemainingTime, |a| a.remaining_time)
    }

    /// `getAdCompanions`
    #[must_use]
    pub fn get_ad_companions(&self) -> String {
        self.read(AttrKey::Companions, |a| a.companions.clone())
    }

    /// `getAdIcons`
    #[must_use]
    pub fn get_ad_icons(&self) -> String {
        self.read(AttrKey::Icons, |a| a.icons.clone())
    }

    /// `getAdLinear`
    #[must_use]
    pub fn get_ad_linear(&self) -> bool {
        self.read(AttrKey::Linear, |a| a.linear)
    }

    /// `getAdExpanded`
    #[must_use]
    pub fn get_ad_expanded(&self) -> bool {
        self.read(AttrKey::Expanded, |a| a.expanded)
    }

    /// The view mode last set by `initAd` or `resizeAd`.
    #[must_use]
    pub fn get_ad_view_mode(&self) -> ViewMode {
        self.read(AttrKey::ViewMode, |a| a.view_mode.clone())
    }

    /// The bitrate passed to `initAd`.
    #[must_use]
    pub fn get_ad_desired_bitrate(&self) -> u32 {
        self.read(AttrKey::DesiredBitrate, |a| a.desired_bitrate)
    }

    // -- Operator events ------------------------------------------------------

    /// Raises `AdClickThru(url, id, playerHandles)`.
    pub fn click_thru(&self, url: &str, id: &str, player_handles: bool) {
        self.record(Operation::ClickThru);
        self.emit(AdEvent::ClickThru {
            url,
            id,
            player_handles,
        });
    }

    /// Raises `AdError(message)`.
    pub fn report_error(&self, message: &str) {
        self.record(Operation::ReportError);
        self.emit(AdEvent::Error { message });
    }

    /// Raises `AdLog(message)`.
    pub fn report_log(&self, message: &str) {
        self.record(Operation::ReportLog);
        self.emit(AdEvent::Log { message });
    }

    /// Raises `AdInteraction(id)`.
    pub fn report_interaction(&self, id: &str) {
        self.record(Operation::ReportInteraction);
        self.emit(AdEvent::Interaction { id });
    }

    /// Overwrites one attribute on the operator's behalf. Emits nothing.
    ///
    /// Returns `false` and reports [`Diagnostic::AttributeRejected`] when the
    /// value does not fit the key.
    pub fn set_attribute(&self, key: AttrKey, value: AttrValue) -> bool {
        let accepted = self.attributes.borrow_mut().set(key, value);
        if accepted {
            self.mark(&[key]);
        }
        self.record(Operation::SetAttribute(key));
        if !accepted {
            self.diagnose(Diagnostic::AttributeRejected { key });
        }
        accepted
    }

    // -- Introspection --------------------------------------------------------

    /// A snapshot of every attribute.
    #[must_use]
    pub fn attributes(&self) -> AttributeSet {
        self.attributes.borrow().clone()
    }

    /// Drains the attributes written since the last call.
    pub fn take_changes(&self) -> AttributeChanges {
        self.changes.borrow_mut().drain()
    }

    /// The current lifecycle status.
    #[must_use]
    pub fn status(&self) -> AdStatus {
        self.status.get()
    }

    /// The `creativeData` received by the last `initAd`.
    #[must_use]
    pub fn creative_data(&self) -> CreativeData {
        self.creative.borrow().clone()
    }

    /// Runs `f` with shared access to the host surface.
    ///
    /// # Panics
    ///
    /// Panics if called from inside [`HostSurface`] code of the same unit.
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.surface.borrow())
    }

    /// Reports a platform problem through the installed sink.
    pub fn report_surface_problem(&self, reason: impl Into<String>) {
        self.diagnose(Diagnostic::Surface {
            reason: reason.into(),
        });
    }

    // -- Internals ------------------------------------------------------------

    fn read<T>(&self, key: AttrKey, f: impl FnOnce(&AttributeSet) -> T) -> T {
        self.record(Operation::Get(key));
        f(&self.attributes.borrow())
    }

    fn mark(&self, keys: &[AttrKey]) {
        let mut changes = self.changes.borrow_mut();
        for &key in keys {
            changes.mark(key);
        }
    }

    fn record(&self, op: Operation) {
        let e = CallEvent {
            op,
            status: self.status.get(),
        };
        self.sink.borrow_mut().on_call(&e);
    }

    fn diagnose(&self, d: Diagnostic) {
        self.sink.borrow_mut().on_diagnostic(&d);
    }

    /// Delivers `event` to its listener, if any.
    ///
    /// The registry borrow ends before the listener runs. An interactive
    /// event nobody listens to is also reported as a diagnostic.
    fn emit(&self, event: AdEvent<'_>) -> Delivery {
        let kind = event.kind();
        let listener = self.registry.borrow().get(&kind);
        let delivery = match listener {
            None => Delivery::NoListener,
            Some(listener) => match listener.notify(&event) {
                Ok(()) => Delivery::Delivered,
                Err(fault) => {
                    self.diagnose(Diagnostic::ListenerFaulted { kind, fault });
                    Delivery::Faulted
                }
            },
        };
        self.sink
            .borrow_mut()
            .on_emit(&EmitEvent { event, delivery });
        if delivery == Delivery::NoListener && event.kind().is_interactive() {
            self.diagnose(Diagnostic::NoListener { kind: event.kind() });
        }
        delivery
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ListenerFault;
    use alloc::rc::Weak;
    use alloc::string::ToString as _;
    use alloc::vec;
    use alloc::vec::Vec;

    type Log = Rc<RefCell<Vec<String>>>;

    fn listen(unit: &AdUnit, kind: EventKind) -> Log {
        let seen: Log = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        unit.subscribe(kind, move |e: &AdEvent<'_>| s.borrow_mut().push(e.to_string()));
        seen
    }

    fn listen_all(unit: &AdUnit) -> Log {
        let seen: Log = Rc::new(RefCell::new(Vec::new()));
        for kind in EventKind::RECOGNIZED {
            let s = Rc::clone(&seen);
            unit.subscribe(kind, move |e: &AdEvent<'_>| s.borrow_mut().push(e.to_string()));
        }
        seen
    }

    #[derive(Clone, Default)]
    struct Diagnostics(Rc<RefCell<Vec<Diagnostic>>>);

    impl DiagnosticSink for Diagnostics {
        fn on_diagnostic(&mut self, d: &Diagnostic) {
            self.0.borrow_mut().push(d.clone());
        }
    }

    fn init(unit: &AdUnit) {
        unit.init_ad(
            300,
            250,
            ViewMode::parse("normal"),
            256,
            CreativeData::default(),
            EnvironmentVars::default(),
        );
    }

    #[test]
    fn init_emits_loaded_once_and_stores_geometry() {
        let unit = AdUnit::default();
        let loaded = listen(&unit, EventKind::Loaded);

        unit.init_ad(
            300,
            250,
            ViewMode::Normal,
            512,
            CreativeData::default(),
            EnvironmentVars {
                slot: None,
                video_slot: None,
            },
        );

        assert_eq!(*loaded.borrow(), ["AdLoaded"]);
        assert_eq!(unit.get_ad_width(), 300);
        assert_eq!(unit.get_ad_height(), 250);
        assert_eq!(unit.get_ad_view_mode(), ViewMode::Normal);
        assert_eq!(unit.get_ad_desired_bitrate(), 512);
        assert_eq!(unit.status(), AdStatus::Initialized);
        unit.with_surface(|s| assert_eq!(s.size(), (300, 250)));
    }

    #[test]
    fn every_recognized_lifecycle_event_fires_once() {
        let unit = AdUnit::with_config(NullSurface::new(), AdConfig::skippable_linear());
        let seen = listen_all(&unit);

        init(&unit);
        unit.start_ad();
        unit.pause_ad();
        unit.resume_ad();
        unit.resize_ad(640, 360, ViewMode::Fullscreen);
        unit.set_ad_volume(80);
        unit.expand_ad();
        unit.collapse_ad();
        unit.stop_ad();
        unit.skip_ad();

        assert_eq!(
            *seen.borrow(),
            [
                "AdLoaded",
                "AdStarted",
                "AdPaused",
                "AdResumed",
                "AdSizeChange",
                "AdVolumeChange",
                "AdExpanded",
                "AdStopped",
                "AdSkipped",
            ]
        );
    }

    /// Performs the call that raises `kind`.
    fn trigger(unit: &AdUnit, kind: &EventKind) {
        match kind {
            EventKind::Loaded => init(unit),
            EventKind::Started => unit.start_ad(),
            EventKind::Stopped => unit.stop_ad(),
            EventKind::VolumeChange => unit.set_ad_volume(10),
            EventKind::SizeChange => unit.resize_ad(640, 360, ViewMode::Normal),
            EventKind::Paused => unit.pause_ad(),
            EventKind::Resumed => unit.resume_ad(),
            EventKind::Expanded => unit.expand_ad(),
            EventKind::Skipped => unit.skip_ad(),
            EventKind::ClickThru => unit.click_thru("u", "i", false),
            EventKind::Error => unit.report_error("e"),
            EventKind::Log => unit.report_log("l"),
            EventKind::Interaction => unit.report_interaction("x"),
            EventKind::Other(_) => {}
        }
    }

    #[test]
    fn unsubscribe_silences_event() {
        for kind in EventKind::RECOGNIZED {
            let unit = AdUnit::with_config(NullSurface::new(), AdConfig::skippable_linear());
            let seen = listen(&unit, kind.clone());
            trigger(&unit, &kind);
            assert_eq!(seen.borrow().len(), 1, "{kind} before unsubscribe");

            unit.unsubscribe(kind.clone());
            assert!(!unit.is_subscribed(&kind));
            trigger(&unit, &kind);
            assert_eq!(seen.borrow().len(), 1, "{kind} after unsubscribe");
        }
    }

    #[test]
    fn start_and_stop_dispatch_under_their_emitted_names() {
        let unit = AdUnit::default();
        let started = listen(&unit, EventKind::from_name("AdStarted"));
        let stopped = listen(&unit, EventKind::from_name("AdStopped"));
        unit.start_ad();
        unit.stop_ad();
        assert_eq!(started.borrow().len(), 1);
        assert_eq!(stopped.borrow().len(), 1);
    }

    #[test]
    fn skip_requires_skippable_state() {
        let unit = AdUnit::default();
        let skipped = listen(&unit, EventKind::Skipped);

        unit.skip_ad();
        assert!(skipped.borrow().is_empty());
        assert_ne!(unit.status(), AdStatus::Stopped);

        assert!(unit.set_attribute(AttrKey::SkippableState, AttrValue::Bool(true)));
        unit.skip_ad();
        assert_eq!(skipped.borrow().len(), 1);
        assert_eq!(unit.status(), AdStatus::Stopped);
    }

    #[test]
    fn skip_without_anything_subscribed_is_harmless() {
        let diags = Diagnostics::default();
        let unit = AdUnit::default().with_sink(diags.clone());

        unit.skip_ad();
        assert!(diags.0.borrow().is_empty());

        // Still fully usable afterwards.
        init(&unit);
        unit.start_ad();
        assert_eq!(unit.status(), AdStatus::Started);
    }

    #[test]
    fn skippable_skip_without_listener_is_diagnosed() {
        let diags = Diagnostics::default();
        let unit = AdUnit::with_config(NullSurface::new(), AdConfig::skippable_linear())
            .with_sink(diags.clone());
        init(&unit);
        unit.skip_ad();
        assert!(diags.0.borrow().contains(&Diagnostic::SkipWithoutListener));
    }

    #[test]
    fn volume_is_stored_verbatim() {
        let unit = AdUnit::default();
        for v in [0, 1, 50, 99, 100, 150, -3] {
            unit.set_ad_volume(v);
            assert_eq!(unit.get_ad_volume(), v);
        }
    }

    #[test]
    fn handshake_ignores_host_version() {
        let unit = AdUnit::default();
        for v in ["", "1.0", "2.0", "3.0", "banana"] {
            assert_eq!(unit.handshake_version(v), "2.0");
        }
    }

    #[test]
    fn expand_then_collapse() {
        let unit = AdUnit::default();
        let expanded = listen(&unit, EventKind::Expanded);

        unit.expand_ad();
        assert_eq!(expanded.borrow().len(), 1);
        assert!(unit.get_ad_expanded());

        unit.collapse_ad();
        assert!(!unit.get_ad_expanded());
        assert_eq!(expanded.borrow().len(), 1);
    }

    #[test]
    fn interactive_events_carry_arguments() {
        let unit = AdUnit::default();
        let seen = listen_all(&unit);

        unit.click_thru("https://example.com", "cta", true);
        unit.report_error("decode failed");
        unit.report_log("hello");
        unit.report_interaction("hover");

        assert_eq!(
            *seen.borrow(),
            [
                r#"AdClickThru("https://example.com", "cta", true)"#,
                r#"AdError("decode failed")"#,
                r#"AdLog("hello")"#,
                r#"AdInteraction("hover")"#,
            ]
        );
    }

    #[test]
    fn interactive_events_without_listener_are_diagnosed() {
        let diags = Diagnostics::default();
        let unit = AdUnit::default().with_sink(diags.clone());

        unit.click_thru("u", "i", false);
        unit.report_error("e");
        unit.report_log("l");
        unit.report_interaction("x");
        // Lifecycle events without listeners stay silent.
        unit.start_ad();

        let kinds: Vec<EventKind> = diags
            .0
            .borrow()
            .iter()
            .map(|d| match d {
                Diagnostic::NoListener { kind } => kind.clone(),
                other => panic!("unexpected diagnostic {other:?}"),
            })
            .collect();
        assert_eq!(
            kinds,
            [
                EventKind::ClickThru,
                EventKind::Error,
                EventKind::Log,
                EventKind::Interaction
            ]
        );
    }

    #[test]
    fn unknown_subscriptions_are_never_invoked() {
        let unit = AdUnit::default();
        let other = listen(&unit, EventKind::from_name("AdVideoComplete"));
        init(&unit);
        unit.start_ad();
        unit.stop_ad();
        assert!(other.borrow().is_empty());
        assert!(unit.is_subscribed(&EventKind::from_name("AdVideoComplete")));
    }

    #[test]
    fn listener_may_reenter_the_unit() {
        let unit = Rc::new(AdUnit::default());
        let order: Log = Rc::new(RefCell::new(Vec::new()));

        let weak: Weak<AdUnit> = Rc::downgrade(&unit);
        let o = Rc::clone(&order);
        unit.subscribe(EventKind::Loaded, move |e: &AdEvent<'_>| {
            o.borrow_mut().push(e.to_string());
            if let Some(unit) = weak.upgrade() {
                let _ = unit.get_ad_volume();
                unit.start_ad();
            }
        });
        let o = Rc::clone(&order);
        let weak: Weak<AdUnit> = Rc::downgrade(&unit);
        unit.subscribe(EventKind::Started, move |e: &AdEvent<'_>| {
            o.borrow_mut().push(e.to_string());
            // Unsubscribing from inside the own callback is fine too.
            if let Some(unit) = weak.upgrade() {
                unit.unsubscribe(EventKind::Started);
            }
        });

        init(&unit);
        unit.start_ad();

        assert_eq!(*order.borrow(), ["AdLoaded", "AdStarted"]);
        assert_eq!(unit.status(), AdStatus::Started);
    }

    #[test]
    fn faulting_listener_is_diagnosed_and_unit_survives() {
        struct Throws;
        impl Listener for Throws {
            fn notify(&self, _: &AdEvent<'_>) -> Result<(), ListenerFault> {
                Err(ListenerFault::new("TypeError"))
            }
        }

        let diags = Diagnostics::default();
        let unit = AdUnit::default().with_sink(diags.clone());
        unit.subscribe(EventKind::Loaded, Throws);
        init(&unit);

        assert_eq!(
            *diags.0.borrow(),
            [
                Diagnostic::SlotFallback,
                Diagnostic::ListenerFaulted {
                    kind: EventKind::Loaded,
                    fault: ListenerFault::new("TypeError"),
                }
            ]
        );
        assert_eq!(unit.get_ad_width(), 300);
    }

    #[test]
    fn missing_slot_falls_back_and_reinit_is_reported() {
        let diags = Diagnostics::default();
        let unit = AdUnit::default().with_sink(diags.clone());
        init(&unit);
        unit.start_ad();
        unit.init_ad(
            1,
            2,
            ViewMode::Thumbnail,
            128,
            CreativeData {
                ad_parameters: "{\"k\":1}".to_string(),
            },
            EnvironmentVars {
                slot: Some(()),
                video_slot: Some(()),
            },
        );

        assert_eq!(
            *diags.0.borrow(),
            [
                Diagnostic::SlotFallback,
                Diagnostic::Reinitialized {
                    previous: AdStatus::Started
                },
            ]
        );
        assert_eq!(unit.creative_data().ad_parameters, "{\"k\":1}");
        assert_eq!(unit.status(), AdStatus::Initialized);
    }

    #[test]
    fn status_transitions() {
        let unit = AdUnit::default();
        assert_eq!(unit.status(), AdStatus::Uninitialized);
        unit.pause_ad();
        assert_eq!(unit.status(), AdStatus::Uninitialized);
        init(&unit);
        unit.start_ad();
        unit.pause_ad();
        assert_eq!(unit.status(), AdStatus::Paused);
        unit.resume_ad();
        assert_eq!(unit.status(), AdStatus::Started);
        unit.stop_ad();
        unit.start_ad();
        assert_eq!(unit.status(), AdStatus::Stopped);
    }

    #[test]
    fn take_changes_reports_written_attributes() {
        let unit = AdUnit::default();
        init(&unit);
        let changes = unit.take_changes();
        assert_eq!(
            changes.keys,
            [
                AttrKey::DesiredBitrate,
                AttrKey::Height,
                AttrKey::ViewMode,
                AttrKey::Width
            ]
        );
        assert!(changes.layout_changed);

        unit.set_ad_volume(10);
        assert_eq!(unit.take_changes().keys, vec![AttrKey::Volume]);
        assert!(unit.take_changes().is_empty());
    }

    #[test]
    fn rejected_attribute_edit() {
        let diags = Diagnostics::default();
        let unit = AdUnit::default().with_sink(diags.clone());
        assert!(!unit.set_attribute(AttrKey::Width, AttrValue::Bool(true)));
        assert_eq!(
            *diags.0.borrow(),
            [Diagnostic::AttributeRejected {
                key: AttrKey::Width
            }]
        );
        assert!(unit.take_changes().is_empty());
    }

    #[test]
    fn getters_read_configured_values() {
        let unit = AdUnit::with_config(NullSurface::new(), AdConfig::nonlinear());
        assert!(!unit.get_ad_linear());
        assert_eq!(unit.get_ad_duration(), -2);
        assert_eq!(unit.get_ad_remaining_time(), -2);
        assert_eq!(unit.get_ad_companions(), "");
        assert_eq!(unit.get_ad_icons(), "");
        assert!(!unit.get_ad_skippable_state());
    }
}
