// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host callback registry.
//!
//! A [`CallbackRegistry`] maps each [`EventKind`] to at most one
//! [`Listener`]. Subscribing replaces any previous listener for the same kind;
//! unsubscribing an absent kind is a no-op.
//!
//! Listeners are held as `Rc<dyn Listener>` so that a dispatcher can clone the
//! handle out of the registry, drop its borrow, and only then invoke the
//! listener. That keeps dispatch re-entrant: a listener may subscribe,
//! unsubscribe, or drive the ad unit from inside its own callback.

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use crate::event::{AdEvent, EventKind};

/// A failure reported by a listener, e.g. an exception thrown by a host
/// callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListenerFault {
    reason: String,
}

impl ListenerFault {
    /// Creates a fault with the given reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Returns the reason text.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for ListenerFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Receives events from an ad unit.
///
/// Any `Fn(&AdEvent)` closure is a listener that never faults.
pub trait Listener {
    /// Delivers `event` to the listener.
    fn notify(&self, event: &AdEvent<'_>) -> Result<(), ListenerFault>;
}

impl<F> Listener for F
where
    F: Fn(&AdEvent<'_>),
{
    fn notify(&self, event: &AdEvent<'_>) -> Result<(), ListenerFault> {
        self(event);
        Ok(())
    }
}

/// Event-kind to listener mapping.
#[derive(Default)]
pub struct CallbackRegistry {
    listeners: BTreeMap<EventKind, Rc<dyn Listener>>,
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("kinds", &self.listeners.keys())
            .finish()
    }
}

impl CallbackRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` under `kind`, returning the listener it replaced.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        listener: Rc<dyn Listener>,
    ) -> Option<Rc<dyn Listener>> {
        self.listeners.insert(kind, listener)
    }

    /// Removes the listener registered under `kind`, if any.
    pub fn unsubscribe(&mut self, kind: &EventKind) -> Option<Rc<dyn Listener>> {
        self.listeners.remove(kind)
    }

    /// Returns a handle to the listener registered under `kind`.
    #[must_use]
    pub fn get(&self, kind: &EventKind) -> Option<Rc<dyn Listener>> {
        self.listeners.get(kind).cloned()
    }

    /// Whether a listener is registered under `kind`.
    #[must_use]
    pub fn is_subscribed(&self, kind: &EventKind) -> bool {
        self.listeners.contains_key(kind)
    }

    /// Number of registered listeners, recognized or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString as _;
    use core::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, Rc<dyn Listener>) {
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let listener: Rc<dyn Listener> = Rc::new(move |_: &AdEvent<'_>| h.set(h.get() + 1));
        (hits, listener)
    }

    #[test]
    fn subscribe_replaces_previous() {
        let mut reg = CallbackRegistry::new();
        let (first_hits, first) = counter();
        let (second_hits, second) = counter();

        assert!(reg.subscribe(EventKind::Loaded, first).is_none());
        assert!(reg.subscribe(EventKind::Loaded, second).is_some());
        assert_eq!(reg.len(), 1);

        let l = reg.get(&EventKind::Loaded).expect("registered");
        l.notify(&AdEvent::Loaded).expect("closure listeners never fault");
        assert_eq!(first_hits.get(), 0);
        assert_eq!(second_hits.get(), 1);
    }

    #[test]
    fn unsubscribe_absent_is_noop() {
        let mut reg = CallbackRegistry::new();
        assert!(reg.unsubscribe(&EventKind::Paused).is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn unsubscribe_removes() {
        let mut reg = CallbackRegistry::new();
        let (_, l) = counter();
        reg.subscribe(EventKind::Paused, l);
        assert!(reg.is_subscribed(&EventKind::Paused));
        assert!(reg.unsubscribe(&EventKind::Paused).is_some());
        assert!(!reg.is_subscribed(&EventKind::Paused));
        assert!(reg.get(&EventKind::Paused).is_none());
    }

    #[test]
    fn arbitrary_names_are_accepted() {
        let mut reg = CallbackRegistry::new();
        let (_, l) = counter();
        reg.subscribe(EventKind::from_name("AdVideoFirstQuartile"), l);
        assert!(reg.is_subscribed(&EventKind::Other("AdVideoFirstQuartile".to_string())));
    }

    #[test]
    fn fault_reason() {
        let fault = ListenerFault::new("TypeError: x is undefined");
        assert_eq!(fault.reason(), "TypeError: x is undefined");
        assert_eq!(fault.to_string(), "TypeError: x is undefined");
    }
}
