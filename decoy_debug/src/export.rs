// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON session export.
//!
//! [`export_json`] writes events captured by a
//! [`SessionRecorder`](super::recorder::SessionRecorder) as a JSON array, one
//! object per event, in recording order.

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{EventArg, RecordedEvent};

/// Writes `events` as a pretty-printed JSON array.
///
/// Each object has a `"type"` of `"call"`, `"emit"`, or `"diagnostic"`:
///
/// ```json
/// { "type": "call", "op": "startAd", "status": "started" }
/// { "type": "emit", "event": "AdLog", "args": ["hi"], "delivery": "delivered" }
/// { "type": "diagnostic", "message": "AdLog: no listener subscribed" }
/// ```
pub fn export_json(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = events.iter().map(to_value).collect();
    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn to_value(event: &RecordedEvent) -> Value {
    match event {
        RecordedEvent::Call(e) => json!({
            "type": "call",
            "op": e.op.as_str(),
            "status": e.status.as_str(),
        }),
        RecordedEvent::Emit {
            kind,
            args,
            delivery,
        } => {
            let args: Vec<Value> = args
                .iter()
                .map(|a| match a {
                    EventArg::Text(s) => Value::from(s.as_str()),
                    EventArg::Bool(b) => Value::from(*b),
                })
                .collect();
            json!({
                "type": "emit",
                "event": kind.as_str(),
                "args": args,
                "delivery": delivery.as_str(),
            })
        }
        RecordedEvent::Diagnostic(d) => json!({
            "type": "diagnostic",
            "message": d.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::SessionRecorder;
    use decoy_core::event::{AdEvent, EventKind};
    use decoy_core::unit::AdUnit;

    #[test]
    fn export_produces_valid_json() {
        let recorder = SessionRecorder::new();
        let unit = AdUnit::default().with_sink(recorder.clone());
        unit.subscribe(EventKind::ClickThru, |_: &AdEvent<'_>| {});
        unit.click_thru("https://example.com", "cta", true);
        unit.report_log("unheard");

        let mut out = Vec::new();
        export_json(&recorder.events(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();

        // subscribe, clickThru call + emit, log call + emit + diagnostic
        assert_eq!(parsed.len(), 6);

        assert_eq!(parsed[0]["type"], "call");
        assert_eq!(parsed[0]["op"], "subscribe");
        assert_eq!(parsed[0]["status"], "uninitialized");

        assert_eq!(parsed[2]["type"], "emit");
        assert_eq!(parsed[2]["event"], "AdClickThru");
        assert_eq!(parsed[2]["args"], json!(["https://example.com", "cta", true]));
        assert_eq!(parsed[2]["delivery"], "delivered");

        assert_eq!(parsed[4]["delivery"], "no-listener");
        assert_eq!(parsed[5]["type"], "diagnostic");
        assert_eq!(parsed[5]["message"], "AdLog: no listener subscribed");
    }

    #[test]
    fn export_empty_session() {
        let mut out = Vec::new();
        export_json(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
