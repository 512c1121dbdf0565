// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Log box diagnostic sink.
//!
//! [`LogBoxSink`] appends one line per event to the `<textarea>` with id
//! [`LOG_ID`] and mirrors it to the browser console. The textarea is looked
//! up on every line, so it may be created after the sink is installed.

use alloc::format;
use alloc::string::String;

use decoy_core::trace::{CallEvent, Diagnostic, DiagnosticSink, EmitEvent};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Document, HtmlTextAreaElement};

use crate::dom;

/// Element id of the log textarea.
pub const LOG_ID: &str = "decoy-log";

/// A [`DiagnosticSink`] that writes to the page's log box.
pub struct LogBoxSink {
    document: Option<Document>,
    show_reads: bool,
}

impl core::fmt::Debug for LogBoxSink {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LogBoxSink")
            .field("has_document", &self.document.is_some())
            .field("show_reads", &self.show_reads)
            .finish()
    }
}

impl LogBoxSink {
    /// Creates a sink over `document`. Getter calls are not logged.
    #[must_use]
    pub fn new(document: Option<Document>) -> Self {
        Self {
            document,
            show_reads: false,
        }
    }

    /// Whether getter calls are logged.
    #[must_use]
    pub fn show_reads(mut self, show: bool) -> Self {
        self.show_reads = show;
        self
    }

    fn textarea(&self) -> Option<HtmlTextAreaElement> {
        self.document
            .as_ref()?
            .get_element_by_id(LOG_ID)
            .filter(|el| dom::has_tag(el, "textarea"))
            .map(|el| el.unchecked_into())
    }

    fn append(&self, line: &str) {
        if let Some(ta) = self.textarea() {
            let mut text = ta.value();
            text.push_str(line);
            text.push('\n');
            ta.set_value(&text);
            ta.set_scroll_top(ta.scroll_height());
        }
    }
}

impl DiagnosticSink for LogBoxSink {
    fn on_call(&mut self, e: &CallEvent) {
        if e.op.is_read() && !self.show_reads {
            return;
        }
        let line = call_line(e);
        self.append(&line);
        web_sys::console::debug_1(&JsValue::from_str(&line));
    }

    fn on_emit(&mut self, e: &EmitEvent<'_>) {
        let line = emit_line(e);
        self.append(&line);
        web_sys::console::debug_1(&JsValue::from_str(&line));
    }

    fn on_diagnostic(&mut self, d: &Diagnostic) {
        let line = diagnostic_line(d);
        self.append(&line);
        web_sys::console::warn_1(&JsValue::from_str(&line));
    }
}

fn call_line(e: &CallEvent) -> String {
    format!("{} [{}]", e.op.as_str(), e.status)
}

fn emit_line(e: &EmitEvent<'_>) -> String {
    format!("  -> {} ({})", e.event, e.delivery.as_str())
}

fn diagnostic_line(d: &Diagnostic) -> String {
    format!("  !! {d}")
}
