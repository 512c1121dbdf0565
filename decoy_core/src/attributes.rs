// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ad attributes.
//!
//! [`AttributeSet`] holds exactly one typed value per [`AttrKey`]. The key set
//! is fixed at construction: values change over the lifetime of an ad unit,
//! keys never do.
//!
//! Keys have two stable identities:
//!
//! - a **property name** ([`AttrKey::as_str`]) matching the VPAID getter
//!   suffix (`"skippableState"` for `getAdSkippableState`), used in logs and
//!   DOM ids;
//! - a **slot index** ([`AttrKey::index`]) used as the dirty-tracking key.

use alloc::borrow::ToOwned as _;
use alloc::string::String;
use core::fmt;

/// The view mode a host requests in `initAd` / `resizeAd`.
///
/// Unrecognized strings are preserved verbatim in [`Other`](Self::Other) so
/// that a host under test can see exactly what it sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// Regular in-player size.
    #[default]
    Normal,
    /// Reduced size, e.g. a thumbnail strip.
    Thumbnail,
    /// Fullscreen playback.
    Fullscreen,
    /// Any other host-supplied value.
    Other(String),
}

impl ViewMode {
    /// Parses a VPAID view-mode string. Never fails.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "normal" => Self::Normal,
            "thumbnail" => Self::Thumbnail,
            "fullscreen" => Self::Fullscreen,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Returns the VPAID string for this view mode.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Normal => "normal",
            Self::Thumbnail => "thumbnail",
            Self::Fullscreen => "fullscreen",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one entry of an [`AttributeSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttrKey {
    /// Companion banner description (text).
    Companions,
    /// Bitrate requested by the host, in kbps.
    DesiredBitrate,
    /// Total duration in seconds.
    Duration,
    /// Whether the ad is expanded.
    Expanded,
    /// Height in pixels.
    Height,
    /// Icon description (text).
    Icons,
    /// Whether the ad is linear.
    Linear,
    /// Remaining time in seconds.
    RemainingTime,
    /// Whether a skip is currently permitted.
    SkippableState,
    /// Current view mode.
    ViewMode,
    /// Width in pixels.
    Width,
    /// Volume, nominally 0–100.
    Volume,
}

impl AttrKey {
    /// Every key, in slot-index order.
    pub const ALL: [Self; 12] = [
        Self::Companions,
        Self::DesiredBitrate,
        Self::Duration,
        Self::Expanded,
        Self::Height,
        Self::Icons,
        Self::Linear,
        Self::RemainingTime,
        Self::SkippableState,
        Self::ViewMode,
        Self::Width,
        Self::Volume,
    ];

    /// Returns the slot index of this key.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// Returns the key stored at `idx`, if any.
    #[must_use]
    pub fn from_index(idx: u32) -> Option<Self> {
        Self::ALL.get(idx as usize).copied()
    }

    /// Returns the VPAID property name of this key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Companions => "companions",
            Self::DesiredBitrate => "desiredBitrate",
            Self::Duration => "duration",
            Self::Expanded => "expanded",
            Self::Height => "height",
            Self::Icons => "icons",
            Self::Linear => "linear",
            Self::RemainingTime => "remainingTime",
            Self::SkippableState => "skippableState",
            Self::ViewMode => "viewMode",
            Self::Width => "width",
            Self::Volume => "volume",
        }
    }

    /// Looks a key up by its VPAID property name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// Whether a change to this key affects the rendered size or placement.
    #[must_use]
    pub const fn affects_layout(self) -> bool {
        matches!(
            self,
            Self::Width | Self::Height | Self::ViewMode | Self::Expanded
        )
    }
}

impl fmt::Display for AttrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dynamically typed attribute value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrValue {
    /// Free text.
    Text(String),
    /// Any integer attribute; narrowed on assignment.
    Int(i64),
    /// A flag.
    Bool(bool),
    /// A view mode.
    ViewMode(ViewMode),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::ViewMode(m) => f.write_str(m.as_str()),
        }
    }
}

/// The full set of ad attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeSet {
    /// Companion banner description.
    pub companions: String,
    /// Bitrate requested by the host, in kbps.
    pub desired_bitrate: u32,
    /// Total duration in seconds.
    pub duration: i32,
    /// Whether the ad is expanded.
    pub expanded: bool,
    /// Height in pixels.
    pub height: u32,
    /// Icon description.
    pub icons: String,
    /// Whether the ad is linear.
    pub linear: bool,
    /// Remaining time in seconds.
    pub remaining_time: i32,
    /// Whether a skip is currently permitted.
    pub skippable_state: bool,
    /// Current view mode.
    pub view_mode: ViewMode,
    /// Width in pixels.
    pub width: u32,
    /// Volume. Stored as given; no clamping.
    pub volume: i32,
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self::initial()
    }
}

impl AttributeSet {
    /// The attribute values a fresh ad unit starts with.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            companions: String::new(),
            desired_bitrate: 256,
            duration: 30,
            expanded: false,
            height: 0,
            icons: String::new(),
            linear: true,
            remaining_time: 10,
            skippable_state: false,
            view_mode: ViewMode::Normal,
            width: 0,
            volume: 50,
        }
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: AttrKey) -> AttrValue {
        match key {
            AttrKey::Companions => AttrValue::Text(self.companions.clone()),
            AttrKey::DesiredBitrate => AttrValue::Int(i64::from(self.desired_bitrate)),
            AttrKey::Duration => AttrValue::Int(i64::from(self.duration)),
            AttrKey::Expanded => AttrValue::Bool(self.expanded),
            AttrKey::Height => AttrValue::Int(i64::from(self.height)),
            AttrKey::Icons => AttrValue::Text(self.icons.clone()),
            AttrKey::Linear => AttrValue::Bool(self.linear),
            AttrKey::RemainingTime => AttrValue::Int(i64::from(self.remaining_time)),
            AttrKey::SkippableState => AttrValue::Bool(self.skippable_state),
            AttrKey::ViewMode => AttrValue::ViewMode(self.view_mode.clone()),
            AttrKey::Width => AttrValue::Int(i64::from(self.width)),
            AttrKey::Volume => AttrValue::Int(i64::from(self.volume)),
        }
    }

    /// Stores `value` under `key`.
    ///
    /// Returns `false`, leaving the set untouched, when the value has the
    /// wrong type for the key or an integer does not fit the key's range.
    /// Text is accepted for [`AttrKey::ViewMode`] and parsed.
    #[must_use]
    pub fn set(&mut self, key: AttrKey, value: AttrValue) -> bool {
        match (key, value) {
            (AttrKey::Companions, AttrValue::Text(s)) => self.companions = s,
            (AttrKey::Icons, AttrValue::Text(s)) => self.icons = s,
            (AttrKey::Expanded, AttrValue::Bool(b)) => self.expanded = b,
            (AttrKey::Linear, AttrValue::Bool(b)) => self.linear = b,
            (AttrKey::SkippableState, AttrValue::Bool(b)) => self.skippable_state = b,
            (AttrKey::ViewMode, AttrValue::ViewMode(m)) => self.view_mode = m,
            (AttrKey::ViewMode, AttrValue::Text(s)) => self.view_mode = ViewMode::parse(&s),
            (AttrKey::DesiredBitrate, AttrValue::Int(v)) => match u32::try_from(v) {
                Ok(v) => self.desired_bitrate = v,
                Err(_) => return false,
            },
            (AttrKey::Height, AttrValue::Int(v)) => match u32::try_from(v) {
                Ok(v) => self.height = v,
                Err(_) => return false,
            },
            (AttrKey::Width, AttrValue::Int(v)) => match u32::try_from(v) {
                Ok(v) => self.width = v,
                Err(_) => return false,
            },
            (AttrKey::Duration, AttrValue::Int(v)) => match i32::try_from(v) {
                Ok(v) => self.duration = v,
                Err(_) => return false,
            },
            (AttrKey::RemainingTime, AttrValue::Int(v)) => match i32::try_from(v) {
                Ok(v) => self.remaining_time = v,
                Err(_) => return false,
            },
            (AttrKey::Volume, AttrValue::Int(v)) => match i32::try_from(v) {
                Ok(v) => self.volume = v,
                Err(_) => return false,
            },
            _ => return false,
        }
        true
    }

    /// Iterates over every `(key, value)` pair in slot-index order.
    pub fn iter(&self) -> impl Iterator<Item = (AttrKey, AttrValue)> + '_ {
        AttrKey::ALL.into_iter().map(|k| (k, self.get(k)))
    }
}
