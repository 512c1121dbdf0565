// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory session recording.
//!
//! [`SessionRecorder`] implements [`DiagnosticSink`] and appends an owned
//! [`RecordedEvent`] for every callback. The recorder is a cheap clonable
//! handle: install one clone in the ad unit and keep another to inspect the
//! session afterwards.

use std::cell::RefCell;
use std::rc::Rc;

use decoy_core::event::{AdEvent, EventKind};
use decoy_core::trace::{CallEvent, Delivery, Diagnostic, DiagnosticSink, EmitEvent};

/// One positional argument of an emitted event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventArg {
    /// A string argument.
    Text(String),
    /// A boolean argument.
    Bool(bool),
}

/// An owned copy of one diagnostic callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// An entry-point call.
    Call(CallEvent),
    /// An emission attempt.
    Emit {
        /// Registry key of the event.
        kind: EventKind,
        /// Positional arguments, in VPAID order.
        args: Vec<EventArg>,
        /// Whether a listener received it.
        delivery: Delivery,
    },
    /// A diagnostic.
    Diagnostic(Diagnostic),
}

fn args_of(event: &AdEvent<'_>) -> Vec<EventArg> {
    match *event {
        AdEvent::ClickThru {
            url,
            id,
            player_handles,
        } => vec![
            EventArg::Text(url.to_owned()),
            EventArg::Text(id.to_owned()),
            EventArg::Bool(player_handles),
        ],
        AdEvent::Error { message } | AdEvent::Log { message } => {
            vec![EventArg::Text(message.to_owned())]
        }
        AdEvent::Interaction { id } => vec![EventArg::Text(id.to_owned())],
        _ => Vec::new(),
    }
}

/// A [`DiagnosticSink`] that records owned events into shared storage.
#[derive(Clone, Debug, Default)]
pub struct SessionRecorder {
    events: Rc<RefCell<Vec<RecordedEvent>>>,
}

impl SessionRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every event recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.borrow().clone()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Kinds of the events that reached a listener, in order.
    #[must_use]
    pub fn delivered(&self) -> Vec<EventKind> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::Emit {
                    kind,
                    delivery: Delivery::Delivered,
                    ..
                } => Some(kind.clone()),
                _ => None,
            })
            .collect()
    }

    /// Every diagnostic recorded so far, in order.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::Diagnostic(d) => Some(d.clone()),
                _ => None,
            })
            .collect()
    }

    /// Discards everything recorded so far.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl DiagnosticSink for SessionRecorder {
    fn on_call(&mut self, e: &CallEvent) {
        self.events.borrow_mut().push(RecordedEvent::Call(*e));
    }

    fn on_emit(&mut self, e: &EmitEvent<'_>) {
        self.events.borrow_mut().push(RecordedEvent::Emit {
            kind: e.event.kind(),
            args: args_of(&e.event),
            delivery: e.delivery,
        });
    }

    fn on_diagnostic(&mut self, d: &Diagnostic) {
        self.events
            .borrow_mut()
            .push(RecordedEvent::Diagnostic(d.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decoy_core::attributes::AttrKey;
    use decoy_core::attributes::AttrValue;
    use decoy_core::trace::Operation;
    use decoy_core::unit::{AdStatus, AdUnit};

    #[test]
    fn records_a_session_through_a_shared_handle() {
        let recorder = SessionRecorder::new();
        let unit = AdUnit::default().with_sink(recorder.clone());
        unit.subscribe(EventKind::Started, |_: &AdEvent<'_>| {});

        unit.start_ad();
        unit.click_thru("https://example.com", "cta", false);

        assert_eq!(
            recorder.events(),
            [
                RecordedEvent::Call(CallEvent {
                    op: Operation::Subscribe,
                    status: AdStatus::Uninitialized,
                }),
                RecordedEvent::Call(CallEvent {
                    op: Operation::StartAd,
                    status: AdStatus::Started,
                }),
                RecordedEvent::Emit {
                    kind: EventKind::Started,
                    args: vec![],
                    delivery: Delivery::Delivered,
                },
                RecordedEvent::Call(CallEvent {
                    op: Operation::ClickThru,
                    status: AdStatus::Started,
                }),
                RecordedEvent::Emit {
                    kind: EventKind::ClickThru,
                    args: vec![
                        EventArg::Text("https://example.com".into()),
                        EventArg::Text("cta".into()),
                        EventArg::Bool(false),
                    ],
                    delivery: Delivery::NoListener,
                },
                RecordedEvent::Diagnostic(Diagnostic::NoListener {
                    kind: EventKind::ClickThru,
                }),
            ]
        );
        assert_eq!(recorder.delivered(), [EventKind::Started]);
    }

    #[test]
    fn diagnostics_filter() {
        let recorder = SessionRecorder::new();
        let unit = AdUnit::default().with_sink(recorder.clone());
        let _ = unit.set_attribute(AttrKey::Volume, AttrValue::Bool(true));
        assert_eq!(
            recorder.diagnostics(),
            [Diagnostic::AttributeRejected {
                key: AttrKey::Volume
            }]
        );
        recorder.clear();
        assert!(recorder.is_empty());
    }
}
