// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable session output.
//!
//! [`PrettyPrintSink`] implements [`DiagnosticSink`] and writes one line per
//! event to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use decoy_core::trace::{CallEvent, Diagnostic, DiagnosticSink, EmitEvent};

/// Writes human-readable lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    show_reads: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("show_reads", &self.show_reads)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self::with_writer(writer)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            show_reads: true,
        }
    }

    /// Whether getter calls are printed. Defaults to `true`.
    #[must_use]
    pub fn show_reads(mut self, show: bool) -> Self {
        self.show_reads = show;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DiagnosticSink for PrettyPrintSink<W> {
    fn on_call(&mut self, e: &CallEvent) {
        if e.op.is_read() && !self.show_reads {
            return;
        }
        let _ = writeln!(self.writer, "[call] {} status={}", e.op.as_str(), e.status);
    }

    fn on_emit(&mut self, e: &EmitEvent<'_>) {
        let _ = writeln!(self.writer, "[emit] {} {}", e.event, e.delivery.as_str());
    }

    fn on_diagnostic(&mut self, d: &Diagnostic) {
        let _ = writeln!(self.writer, "[diag] {d}");
    }
}
