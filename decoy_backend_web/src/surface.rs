// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM host surface.
//!
//! [`DomSurface`] binds the `slot` and `videoSlot` a host passes through
//! `environmentVars`. Both may come from the host's own window, so they are
//! accepted when they look like elements rather than by `instanceof`. A slot
//! that is not an element (including a missing one) is replaced by a `<div>` the surface creates itself and appends to
//! the document body when there is one.

use alloc::format;
use alloc::string::String;

use decoy_core::attributes::ViewMode;
use decoy_core::host::{HostSurface, SlotBinding};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Document, HtmlElement, HtmlVideoElement};

use crate::dom;

/// Element id of the container created when the host's slot is unusable.
pub const FALLBACK_CONTAINER_ID: &str = "decoy-container";

/// A [`HostSurface`] over live DOM elements.
pub struct DomSurface {
    document: Option<Document>,
    container: Option<HtmlElement>,
    video: Option<HtmlVideoElement>,
    binding: Option<SlotBinding>,
}

impl core::fmt::Debug for DomSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomSurface")
            .field("has_document", &self.document.is_some())
            .field("has_container", &self.container.is_some())
            .field("has_video", &self.video.is_some())
            .field("binding", &self.binding)
            .finish()
    }
}

impl DomSurface {
    /// Creates an unbound surface over the current window's document.
    #[must_use]
    pub fn new() -> Self {
        Self::with_document(web_sys::window().and_then(|w| w.document()))
    }

    /// Creates an unbound surface over `document`.
    ///
    /// Without a document, fallback containers cannot be created and the
    /// surface stays headless until a usable slot is bound.
    #[must_use]
    pub fn with_document(document: Option<Document>) -> Self {
        Self {
            document,
            container: None,
            video: None,
            binding: None,
        }
    }

    /// The document the surface creates elements in.
    #[must_use]
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// The element the ad renders into, once bound.
    #[must_use]
    pub fn container(&self) -> Option<&HtmlElement> {
        self.container.as_ref()
    }

    /// The host's video element, if it supplied one.
    #[must_use]
    pub fn video_slot(&self) -> Option<&HtmlVideoElement> {
        self.video.as_ref()
    }

    /// How the last `bind` resolved.
    #[must_use]
    pub fn binding(&self) -> Option<SlotBinding> {
        self.binding
    }

    fn create_container(&self) -> Result<HtmlElement, JsValue> {
        let doc = self
            .document
            .as_ref()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let el: HtmlElement = doc.create_element("div")?.dyn_into()?;
        el.set_id(FALLBACK_CONTAINER_ID);
        if let Some(body) = doc.body() {
            body.append_child(&el)?;
        }
        Ok(el)
    }
}

impl Default for DomSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl HostSurface for DomSurface {
    type Slot = JsValue;
    type VideoSlot = JsValue;

    fn bind(&mut self, slot: Option<JsValue>, video_slot: Option<JsValue>) -> SlotBinding {
        self.video = video_slot.and_then(|v| dom::element_with_tag(v, "video"));

        let binding = match slot.and_then(dom::element::<HtmlElement>) {
            Some(el) => {
                self.container = Some(el);
                SlotBinding::Provided
            }
            None => {
                // Reuse our own container across repeated `initAd` calls.
                if self.binding != Some(SlotBinding::Fallback) || self.container.is_none() {
                    self.container = self.create_container().ok();
                }
                SlotBinding::Fallback
            }
        };
        self.binding = Some(binding);
        binding
    }

    fn resize(&mut self, width: u32, height: u32, _view_mode: &ViewMode) {
        if let Some(el) = &self.container {
            let s = el.style();
            let _ = s.set_property("width", &px(width));
            let _ = s.set_property("height", &px(height));
        }
    }
}

/// Formats a CSS pixel length.
pub(crate) fn px(v: u32) -> String {
    format!("{v}px")
}
