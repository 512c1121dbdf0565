// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Callback registry and lifecycle controller for a mock VPAID creative.
//!
//! `decoy_core` models an ad unit that a video player (the host) loads and
//! drives through the VPAID 2.0 interface. It does not play media. It accepts
//! lifecycle calls, stores the attributes a host may query, and emits the
//! matching events to whatever listeners the host subscribed. It is `no_std`
//! compatible (with `alloc`) and platform-free: browsers and native test hosts
//! plug in through the [`HostSurface`](host::HostSurface) and
//! [`AttributePresenter`](backend::AttributePresenter) traits.
//!
//! # Architecture
//!
//! ```text
//!   Host ──subscribe──► CallbackRegistry
//!     │                       ▲
//!     │ initAd/startAd/…      │ listener lookup
//!     ▼                       │
//!   AdUnit ──emit(AdEvent)────┘──► Listener::notify()
//!     │   │
//!     │   └──► DiagnosticSink (calls, emissions, diagnostics)
//!     ▼
//!   AttributeSet ──mark──► ChangeTracker ──take_changes()──► AttributePresenter::apply()
//! ```
//!
//! **[`unit`]**: [`AdUnit`](unit::AdUnit), the lifecycle controller. Every
//! VPAID entry point lives here. Dispatch is synchronous and re-entrant.
//!
//! **[`registry`]**: One listener per event kind, keyed by
//! [`EventKind`](event::EventKind).
//!
//! **[`event`]**: Recognized event names and the [`AdEvent`](event::AdEvent)
//! payloads delivered to listeners.
//!
//! **[`attributes`]**: The twelve queryable attributes and their typed
//! values.
//!
//! **[`dirty`]** / **[`changes`]**: Attribute change tracking via
//! `understory_dirty`, drained into
//! [`AttributeChanges`](changes::AttributeChanges) for presenters.
//!
//! **[`host`]**: The [`HostSurface`](host::HostSurface) contract for slot
//! binding and layout, plus the headless [`NullSurface`](host::NullSurface).
//!
//! **[`backend`]**: The [`AttributePresenter`](backend::AttributePresenter)
//! trait for attribute readouts.
//!
//! **[`trace`]**: [`DiagnosticSink`](trace::DiagnosticSink) and the
//! diagnostics an ad unit reports instead of failing.
//!
//! **[`config`]**: Attribute presets.
//!
//! **[`visibility`]**: Viewport visibility percentage.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod attributes;
pub mod backend;
pub mod changes;
pub mod config;
pub mod dirty;
pub mod event;
pub mod host;
pub mod registry;
pub mod trace;
pub mod unit;
pub mod visibility;
