// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser glue for decoy.
//!
//! This crate exposes a [`decoy_core`] ad unit to a page-hosted video
//! player:
//!
//! - [`get_vpaid_ad`]: the `getVPAIDAd()` factory a VPAID host calls
//! - [`VpaidAd`]: the returned object, with the VPAID method names
//! - [`DomSurface`]: slot binding over DOM elements
//! - [`DomPanel`]: attribute readouts and operator controls
//! - [`LogBoxSink`]: diagnostics into the page's log box and the console
//! - [`measure`]: viewport visibility through same-origin frames

#![no_std]

extern crate alloc;

mod bridge;
mod dom;
mod log_box;
mod panel;
mod surface;
mod visibility;

pub use bridge::VpaidAd;
pub use decoy_core::backend::AttributePresenter;
pub use log_box::{LOG_ID, LogBoxSink};
pub use panel::{DomPanel, OperatorAction, PANEL_ID, VISIBLE_ID, attribute_id};
pub use surface::{DomSurface, FALLBACK_CONTAINER_ID};
pub use visibility::{measure, readout};

use wasm_bindgen::prelude::*;

/// Creates a fresh ad unit for a VPAID host.
///
/// Exported to JS as `getVPAIDAd()`.
#[wasm_bindgen(js_name = getVPAIDAd)]
#[must_use]
pub fn get_vpaid_ad() -> VpaidAd {
    VpaidAd::create()
}
