// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostics for the ad unit.
//!
//! This module provides a [`DiagnosticSink`] trait with per-event methods that
//! the [`AdUnit`](crate::unit::AdUnit) calls as it works. All method bodies
//! default to no-ops, so implementing only the events you care about is fine.
//!
//! Nothing here is ever surfaced to the host. Failure modes that have no
//! listener to report to (an operator click with nobody subscribed, a host
//! callback that threw, a slot that was not a container) become
//! [`Diagnostic`] values and end up in whatever sink is installed, typically
//! a log box on the page.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::attributes::AttrKey;
use crate::event::{AdEvent, EventKind};
use crate::registry::ListenerFault;
use crate::unit::AdStatus;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which entry point was called.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `handshakeVersion`
    HandshakeVersion,
    /// `initAd`
    InitAd,
    /// `startAd`
    StartAd,
    /// `stopAd`
    StopAd,
    /// `pauseAd`
    PauseAd,
    /// `resumeAd`
    ResumeAd,
    /// `resizeAd`
    ResizeAd,
    /// `expandAd`
    ExpandAd,
    /// `collapseAd`
    CollapseAd,
    /// `skipAd`
    SkipAd,
    /// `setAdVolume`
    SetAdVolume,
    /// `getAdVolume`
    GetAdVolume,
    /// Any other `getAd*` read.
    Get(AttrKey),
    /// `subscribe`
    Subscribe,
    /// `unsubscribe`
    Unsubscribe,
    /// Operator click-through.
    ClickThru,
    /// Operator error report.
    ReportError,
    /// Operator log line.
    ReportLog,
    /// Operator interaction.
    ReportInteraction,
    /// Operator attribute edit.
    SetAttribute(AttrKey),
}

impl Operation {
    /// Returns the method name as a host or operator would see it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HandshakeVersion => "handshakeVersion",
            Self::InitAd => "initAd",
            Self::StartAd => "startAd",
            Self::StopAd => "stopAd",
            Self::PauseAd => "pauseAd",
            Self::ResumeAd => "resumeAd",
            Self::ResizeAd => "resizeAd",
            Self::ExpandAd => "expandAd",
            Self::CollapseAd => "collapseAd",
            Self::SkipAd => "skipAd",
            Self::SetAdVolume => "setAdVolume",
            Self::GetAdVolume => "getAdVolume",
            Self::Get(key) => match key {
                AttrKey::Companions => "getAdCompanions",
                AttrKey::DesiredBitrate => "getAdDesiredBitrate",
                AttrKey::Duration => "getAdDuration",
                AttrKey::Expanded => "getAdExpanded",
                AttrKey::Height => "getAdHeight",
                AttrKey::Icons => "getAdIcons",
                AttrKey::Linear => "getAdLinear",
                AttrKey::RemainingTime => "getAdRemainingTime",
                AttrKey::SkippableState => "getAdSkippableState",
                AttrKey::ViewMode => "getAdViewMode",
                AttrKey::Width => "getAdWidth",
                AttrKey::Volume => "getAdVolume",
            },
            Self::Subscribe => "subscribe",
            Self::Unsubscribe => "unsubscribe",
            Self::ClickThru => "operator:clickThru",
            Self::ReportError => "operator:error",
            Self::ReportLog => "operator:log",
            Self::ReportInteraction => "operator:interaction",
            Self::SetAttribute(_) => "operator:setAttribute",
        }
    }

    /// Whether the operation only reads state.
    #[must_use]
    pub const fn is_read(self) -> bool {
        matches!(
            self,
            Self::Get(_) | Self::GetAdVolume | Self::HandshakeVersion
        )
    }
}

/// What happened to an emission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Delivery {
    /// A listener was invoked and returned normally.
    Delivered,
    /// No listener was registered; nothing was invoked.
    NoListener,
    /// A listener was invoked and reported a fault.
    Faulted,
}

impl Delivery {
    /// Returns a short kebab-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::NoListener => "no-listener",
            Self::Faulted => "faulted",
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once per entry-point call, after the call's state changes and
/// before any event it emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallEvent {
    /// Which entry point ran.
    pub op: Operation,
    /// The unit's status after the call.
    pub status: AdStatus,
}

/// Emitted for every emission attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmitEvent<'a> {
    /// The event and its arguments.
    pub event: AdEvent<'a>,
    /// Whether a listener received it.
    pub delivery: Delivery,
}

/// A non-fatal problem worth telling the operator about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// An operator-triggered event had no listener.
    NoListener {
        /// The event that went unheard.
        kind: EventKind,
    },
    /// `skipAd` was honored but nobody listens for `AdSkipped`.
    SkipWithoutListener,
    /// A listener reported a fault.
    ListenerFaulted {
        /// The event being delivered.
        kind: EventKind,
        /// What went wrong.
        fault: ListenerFault,
    },
    /// The host's rendering slot was missing or not a container.
    SlotFallback,
    /// `initAd` was called again.
    Reinitialized {
        /// Status before the repeated call.
        previous: AdStatus,
    },
    /// An attribute edit had the wrong type or range.
    AttributeRejected {
        /// The attribute that was left untouched.
        key: AttrKey,
    },
    /// A platform surface reported a problem (e.g. building DOM controls).
    Surface {
        /// Platform-provided description.
        reason: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoListener { kind } => write!(f, "{kind}: no listener subscribed"),
            Self::SkipWithoutListener => {
                f.write_str("skipAd: ad is skippable but no AdSkipped listener subscribed")
            }
            Self::ListenerFaulted { kind, fault } => write!(f, "{kind}: listener failed: {fault}"),
            Self::SlotFallback => {
                f.write_str("initAd: slot is not a container element, using own container")
            }
            Self::Reinitialized { previous } => {
                write!(f, "initAd: called again while {}", previous.as_str())
            }
            Self::AttributeRejected { key } => write!(f, "{key}: value rejected"),
            Self::Surface { reason } => write!(f, "surface: {reason}"),
        }
    }
}

// ---------------------------------------------------------------------------
// DiagnosticSink trait
// ---------------------------------------------------------------------------

/// Receives diagnostics from an ad unit.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait DiagnosticSink {
    /// Called for every entry-point call, ahead of the events it emits.
    fn on_call(&mut self, e: &CallEvent) {
        _ = e;
    }

    /// Called after every emission attempt.
    fn on_emit(&mut self, e: &EmitEvent<'_>) {
        _ = e;
    }

    /// Called when something went wrong without halting the unit.
    fn on_diagnostic(&mut self, d: &Diagnostic) {
        _ = d;
    }
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// A [`DiagnosticSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {}

/// Forwards every event to each inner sink, in insertion order.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn DiagnosticSink>>,
}

impl fmt::Debug for FanoutSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FanoutSink")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl FanoutSink {
    /// Creates a fan-out with no sinks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sink.
    #[must_use]
    pub fn with(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl DiagnosticSink for FanoutSink {
    fn on_call(&mut self, e: &CallEvent) {
        for s in &mut self.sinks {
            s.on_call(e);
        }
    }

    fn on_emit(&mut self, e: &EmitEvent<'_>) {
        for s in &mut self.sinks {
            s.on_emit(e);
        }
    }

    fn on_diagnostic(&mut self, d: &Diagnostic) {
        for s in &mut self.sinks {
            s.on_diagnostic(d);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::string::ToString as _;
    use core::cell::RefCell;

    struct Lines(Rc<RefCell<Vec<String>>>);

    impl DiagnosticSink for Lines {
        fn on_diagnostic(&mut self, d: &Diagnostic) {
            self.0.borrow_mut().push(d.to_string());
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_call(&CallEvent {
            op: Operation::StartAd,
            status: AdStatus::Started,
        });
        sink.on_emit(&EmitEvent {
            event: AdEvent::Started,
            delivery: Delivery::NoListener,
        });
        sink.on_diagnostic(&Diagnostic::SlotFallback);
    }

    #[test]
    fn fanout_reaches_every_sink() {
        let a = Rc::new(RefCell::new(Vec::new()));
        let b = Rc::new(RefCell::new(Vec::new()));
        let mut fan = FanoutSink::new()
            .with(Lines(Rc::clone(&a)))
            .with(Lines(Rc::clone(&b)));
        fan.on_diagnostic(&Diagnostic::SkipWithoutListener);
        assert_eq!(a.borrow().len(), 1);
        assert_eq!(*a.borrow(), *b.borrow());
    }

    #[test]
    fn diagnostic_messages() {
        let d = Diagnostic::NoListener {
            kind: EventKind::ClickThru,
        };
        assert_eq!(d.to_string(), "AdClickThru: no listener subscribed");

        let d = Diagnostic::ListenerFaulted {
            kind: EventKind::Loaded,
            fault: ListenerFault::new("ReferenceError"),
        };
        assert_eq!(d.to_string(), "AdLoaded: listener failed: ReferenceError");

        let d = Diagnostic::Reinitialized {
            previous: AdStatus::Started,
        };
        assert_eq!(d.to_string(), "initAd: called again while started");
    }

    #[test]
    fn operation_names() {
        assert_eq!(Operation::InitAd.as_str(), "initAd");
        assert_eq!(
            Operation::Get(AttrKey::SkippableState).as_str(),
            "getAdSkippableState"
        );
        assert!(Operation::Get(AttrKey::Width).is_read());
        assert!(!Operation::SkipAd.is_read());
    }
}
