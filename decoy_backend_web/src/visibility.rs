// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport visibility probe.
//!
//! The ad may sit inside nested iframes. [`frame_path`] walks `frameElement`
//! links from a window up to the outermost same-origin window, collecting
//! each frame's offset on the way. [`measure`] uses it to translate the
//! element's box into the top-level viewport; the operator panel uses it to
//! listen for scrolling on every window in between. A cross-origin boundary
//! hides `frameElement`, so the walk stops there and [`measure`] returns
//! `None`.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use decoy_core::visibility::percent_visible;
use kurbo::{Point, Rect, Vec2};
use wasm_bindgen::JsValue;
use web_sys::{DomRect, Element, Window};

/// A window that may be embedded in a same-origin parent window.
pub(crate) trait Embedded: Sized {
    /// The parent window and the origin of this window's frame in the
    /// parent's viewport, or `None` at the top or at an origin boundary.
    fn parent(&self) -> Option<(Self, Point)>;
}

impl Embedded for Window {
    fn parent(&self) -> Option<(Self, Point)> {
        let frame = self.frame_element().ok()??;
        let outer = frame.get_bounding_client_rect();
        let parent = frame.owner_document()?.default_view()?;
        Some((parent, Point::new(outer.left(), outer.top())))
    }
}

/// Windows from a starting window up to the outermost reachable one.
#[derive(Debug)]
pub(crate) struct FramePath<W> {
    /// Innermost first. Never empty.
    pub(crate) windows: Vec<W>,
    /// Offset of the innermost viewport within the outermost one.
    pub(crate) offset: Vec2,
}

impl<W> FramePath<W> {
    /// The last window reached.
    pub(crate) fn outermost(&self) -> Option<&W> {
        self.windows.last()
    }
}

/// Walks from `window` through its same-origin ancestors.
pub(crate) fn frame_path<W: Embedded>(window: W) -> FramePath<W> {
    let mut windows = Vec::new();
    let mut offset = Vec2::ZERO;
    let mut current = window;
    while let Some((parent, origin)) = current.parent() {
        offset += origin.to_vec2();
        windows.push(current);
        current = parent;
    }
    windows.push(current);
    FramePath { windows, offset }
}

/// Percentage of `target` inside the top-level viewport, or `None` when the
/// top-level window is not reachable.
#[must_use]
pub fn measure(target: &Element) -> Option<u8> {
    let window = target.owner_document()?.default_view()?;
    let path = frame_path(window);
    let top = path.outermost()?;
    if !is_top(top) {
        return None;
    }

    let rect = to_rect(&target.get_bounding_client_rect()) + path.offset;
    let width = top.inner_width().ok()?.as_f64()?;
    let height = top.inner_height().ok()?.as_f64()?;
    Some(percent_visible(rect, Rect::new(0.0, 0.0, width, height)))
}

/// Text shown in the visibility readout.
#[must_use]
pub fn readout(percent: Option<u8>) -> String {
    match percent {
        Some(p) => format!("{p}%"),
        None => String::from("n/a"),
    }
}

fn to_rect(r: &DomRect) -> Rect {
    Rect::new(r.left(), r.top(), r.right(), r.bottom())
}

fn is_top(window: &Window) -> bool {
    match window.top() {
        Ok(Some(top)) => JsValue::from(top) == JsValue::from(window.clone()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Window `depth` levels down a chain of same-origin frames.
    #[derive(Clone, Copy, Debug, PartialEq)]
    struct FakeWindow<'a> {
        depth: usize,
        /// Frame origins, innermost first.
        origins: &'a [Point],
    }

    impl Embedded for FakeWindow<'_> {
        fn parent(&self) -> Option<(Self, Point)> {
            let origin = *self.origins.get(self.depth)?;
            let parent = FakeWindow {
                depth: self.depth + 1,
                origins: self.origins,
            };
            Some((parent, origin))
        }
    }

    #[test]
    fn readout_text() {
        assert_eq!(readout(Some(0)), "0%");
        assert_eq!(readout(Some(73)), "73%");
        assert_eq!(readout(None), "n/a");
    }

    #[test]
    fn path_visits_every_window_and_sums_offsets() {
        let origins = [Point::new(10.0, 500.0), Point::new(0.0, 100.0)];
        let path = frame_path(FakeWindow {
            depth: 0,
            origins: &origins,
        });
        let depths: Vec<usize> = path.windows.iter().map(|w| w.depth).collect();
        assert_eq!(depths, [0, 1, 2]);
        assert_eq!(path.offset, Vec2::new(10.0, 600.0));
        assert_eq!(path.outermost().map(|w| w.depth), Some(2));

        let ad = Rect::new(0.0, 0.0, 300.0, 250.0);
        assert_eq!(ad + path.offset, Rect::new(10.0, 600.0, 310.0, 850.0));
    }

    #[test]
    fn unframed_window_is_its_own_path() {
        let path = frame_path(FakeWindow {
            depth: 0,
            origins: &[],
        });
        assert_eq!(path.windows.len(), 1);
        assert_eq!(path.offset, Vec2::ZERO);
    }
}
