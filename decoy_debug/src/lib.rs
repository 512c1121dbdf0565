// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session recording, pretty-printing, and JSON export for decoy
//! diagnostics.
//!
//! This crate provides [`DiagnosticSink`](decoy_core::trace::DiagnosticSink)
//! implementations for native hosts and test harnesses:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::SessionRecorder`]: a shared, clonable log of owned
//!   [`recorder::RecordedEvent`]s.
//! - [`export::export_json`]: writes a recorded session as a JSON array.

pub mod export;
pub mod pretty;
pub mod recorder;
