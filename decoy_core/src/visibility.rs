// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport visibility.
//!
//! The readout shown next to the ad is the share of the ad's box that lies
//! inside the top-level viewport. Platforms measure the two rectangles in a
//! common coordinate space and call [`percent_visible`].

use kurbo::Rect;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Percentage of `target` inside `viewport`, rounded to the nearest integer.
///
/// Rectangles are normalized first. A target with zero area is reported as
/// `0`.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "percentage is clamped to 0..=100"
)]
pub fn percent_visible(target: Rect, viewport: Rect) -> u8 {
    let target = target.abs();
    let area = target.area();
    if area <= 0.0 || !area.is_finite() {
        return 0;
    }
    let inside = target.intersect(viewport.abs()).area();
    (inside / area * 100.0).round().clamp(0.0, 100.0) as u8
}
