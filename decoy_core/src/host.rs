// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host surface contract.
//!
//! An [`AdUnit`](crate::unit::AdUnit) never reaches for page globals. Whatever
//! it needs from the embedding page is provided through a [`HostSurface`]
//! passed in at construction:
//!
//! - **Binding**: `initAd` hands the surface the host's rendering slot and
//!   video slot from [`EnvironmentVars`]. The surface decides whether the slot
//!   is usable as a container or whether it has to create its own.
//! - **Layout**: `initAd` and `resizeAd` forward the new size and view mode.
//!
//! [`NullSurface`] is the headless implementation used by tests and native
//! hosts. Browser integrations implement the trait over DOM elements.

use alloc::string::String;

use crate::attributes::ViewMode;

/// How a rendering slot was bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotBinding {
    /// The host-provided slot is used as the container.
    Provided,
    /// The slot was missing or unusable; the surface created its own container.
    Fallback,
}

/// The `environmentVars` argument of `initAd`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvironmentVars<S, V> {
    /// Rendering surface supplied by the host.
    pub slot: Option<S>,
    /// Playback surface supplied by the host.
    pub video_slot: Option<V>,
}

impl<S, V> Default for EnvironmentVars<S, V> {
    fn default() -> Self {
        Self {
            slot: None,
            video_slot: None,
        }
    }
}

/// The `creativeData` argument of `initAd`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreativeData {
    /// The `AdParameters` text from the ad response, verbatim.
    pub ad_parameters: String,
}

/// Platform glue an ad unit renders through.
pub trait HostSurface {
    /// Host handle for the rendering slot.
    type Slot;
    /// Host handle for the video slot.
    type VideoSlot;

    /// Binds the slots received by `initAd`.
    ///
    /// Must not fail: an unusable slot degrades to [`SlotBinding::Fallback`].
    fn bind(
        &mut self,
        slot: Option<Self::Slot>,
        video_slot: Option<Self::VideoSlot>,
    ) -> SlotBinding;

    /// Applies a new size and view mode.
    fn resize(&mut self, width: u32, height: u32, view_mode: &ViewMode) {
        _ = (width, height, view_mode);
    }
}

/// A headless [`HostSurface`] that remembers what it was given.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NullSurface {
    bound: Option<SlotBinding>,
    has_video: bool,
    size: (u32, u32),
}

impl NullSurface {
    /// Creates an unbound surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The binding chosen on the last `bind`, if any.
    #[must_use]
    pub fn binding(&self) -> Option<SlotBinding> {
        self.bound
    }

    /// Whether a video slot was supplied on the last `bind`.
    #[must_use]
    pub fn has_video_slot(&self) -> bool {
        self.has_video
    }

    /// The last size applied via `resize`.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}

impl HostSurface for NullSurface {
    type Slot = ();
    type VideoSlot = ();

    fn bind(&mut self, slot: Option<()>, video_slot: Option<()>) -> SlotBinding {
        let binding = if slot.is_some() {
            SlotBinding::Provided
        } else {
            SlotBinding::Fallback
        };
        self.bound = Some(binding);
        self.has_video = video_slot.is_some();
        binding
    }

    fn resize(&mut self, width: u32, height: u32, _view_mode: &ViewMode) {
        self.size = (width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_surface_falls_back_without_slot() {
        let mut s = NullSurface::new();
        assert_eq!(s.binding(), None);
        assert_eq!(s.bind(None, Some(())), SlotBinding::Fallback);
        assert!(s.has_video_slot());
        assert_eq!(s.bind(Some(()), None), SlotBinding::Provided);
        assert!(!s.has_video_slot());
    }

    #[test]
    fn null_surface_tracks_size() {
        let mut s = NullSurface::new();
        s.resize(640, 360, &ViewMode::Fullscreen);
        assert_eq!(s.size(), (640, 360));
    }
}
