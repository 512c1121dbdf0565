// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted host session that exercises the ad unit and its diagnostics.
//!
//! Plays the part of a video player: subscribes to every recognized event,
//! starts the ad from inside its `AdLoaded` handler, then walks through the
//! rest of the lifecycle and a few operator events. Every call and emission
//! is printed to stderr through a
//! [`PrettyPrintSink`](decoy_debug::pretty::PrettyPrintSink) and recorded by a [`SessionRecorder`](decoy_debug::recorder::SessionRecorder),
//! which is exported as `session.json`.
//!
//! Usage: `scripted_host [linear|skippable|nonlinear]`

use std::fs::File;
use std::io::BufWriter;
use std::rc::{Rc, Weak};

use decoy_core::attributes::ViewMode;
use decoy_core::config::AdConfig;
use decoy_core::event::{AdEvent, EventKind};
use decoy_core::host::{CreativeData, EnvironmentVars, NullSurface};
use decoy_core::trace::FanoutSink;
use decoy_core::unit::AdUnit;

use decoy_debug::pretty::PrettyPrintSink;
use decoy_debug::recorder::SessionRecorder;

fn main() {
    let preset = std::env::args().nth(1).unwrap_or_else(|| "skippable".to_owned());
    let Some(config) = AdConfig::preset(&preset) else {
        eprintln!("unknown preset {preset:?}; expected linear, skippable, or nonlinear");
        std::process::exit(2);
    };

    // -- sinks -------------------------------------------------------------
    let recorder = SessionRecorder::new();
    let sink = FanoutSink::new()
        .with(PrettyPrintSink::stderr().show_reads(false))
        .with(recorder.clone());

    // -- unit --------------------------------------------------------------
    let unit = Rc::new(AdUnit::with_config(NullSurface::new(), config).with_sink(sink));

    for kind in EventKind::RECOGNIZED {
        unit.subscribe(kind, |e: &AdEvent<'_>| println!("  host saw {e}"));
    }
    // Hosts usually start the ad as soon as it reports loaded.
    let weak: Weak<AdUnit> = Rc::downgrade(&unit);
    unit.subscribe(EventKind::Loaded, move |e: &AdEvent<'_>| {
        println!("  host saw {e}, starting");
        if let Some(unit) = weak.upgrade() {
            unit.start_ad();
        }
    });
    // Nobody listens for AdLog, so the operator's log line is diagnosed.
    unit.unsubscribe(EventKind::Log);

    // -- session -----------------------------------------------------------
    println!("handshake: {}", unit.handshake_version("2.0"));
    unit.init_ad(
        640,
        360,
        ViewMode::Normal,
        1200,
        CreativeData {
            ad_parameters: r#"{"campaign":"demo"}"#.to_owned(),
        },
        EnvironmentVars {
            slot: Some(()),
            video_slot: Some(()),
        },
    );
    unit.set_ad_volume(75);
    unit.pause_ad();
    unit.resume_ad();
    unit.resize_ad(1280, 720, ViewMode::Fullscreen);
    unit.expand_ad();
    unit.collapse_ad();
    unit.click_thru("https://example.com/landing", "cta", true);
    unit.report_interaction("hover");
    unit.report_log("operator note");
    unit.skip_ad();
    unit.stop_ad();

    println!(
        "final: status={} volume={} size={}x{} changes={:?}",
        unit.status(),
        unit.get_ad_volume(),
        unit.get_ad_width(),
        unit.get_ad_height(),
        unit.take_changes().keys,
    );

    // -- export session ----------------------------------------------------
    let path = "session.json";
    let file = File::create(path).expect("failed to create session.json");
    let mut writer = BufWriter::new(file);
    decoy_debug::export::export_json(&recorder.events(), &mut writer)
        .expect("failed to write session");

    let delivered = recorder.delivered();
    println!(
        "Wrote {path} ({} events, {} delivered, {} diagnostics)",
        recorder.len(),
        delivered.len(),
        recorder.diagnostics().len()
    );
    println!(
        "delivered: {}",
        delivered
            .iter()
            .map(EventKind::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );
}
