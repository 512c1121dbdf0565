// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ad unit configuration presets.

use alloc::string::String;

use crate::attributes::{AttributeSet, ViewMode};

/// The VPAID version every preset reports from `handshakeVersion`.
pub const VPAID_VERSION: &str = "2.0";

/// Configuration for an [`AdUnit`](crate::unit::AdUnit).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdConfig {
    /// Attribute values the unit starts with.
    pub attributes: AttributeSet,
    /// Returned from `handshakeVersion` regardless of the host's version.
    pub vpaid_version: &'static str,
}

impl Default for AdConfig {
    fn default() -> Self {
        Self::linear()
    }
}

impl AdConfig {
    /// A linear, non-skippable ad with the stock attribute values.
    #[must_use]
    pub const fn linear() -> Self {
        Self {
            attributes: AttributeSet::initial(),
            vpaid_version: VPAID_VERSION,
        }
    }

    /// A linear ad that permits skipping from the start.
    #[must_use]
    pub const fn skippable_linear() -> Self {
        let mut config = Self::linear();
        config.attributes.skippable_state = true;
        config
    }

    /// A non-linear overlay with unknown duration.
    ///
    /// VPAID reports unknown times as `-2`.
    #[must_use]
    pub const fn nonlinear() -> Self {
        Self {
            attributes: AttributeSet {
                companions: String::new(),
                desired_bitrate: 256,
                duration: -2,
                expanded: false,
                height: 0,
                icons: String::new(),
                linear: false,
                remaining_time: -2,
                skippable_state: false,
                view_mode: ViewMode::Normal,
                width: 0,
                volume: 50,
            },
            vpaid_version: VPAID_VERSION,
        }
    }

    /// Looks a preset up by name: `"linear"`, `"skippable"`, `"nonlinear"`.
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(Self::linear()),
            "skippable" => Some(Self::skippable_linear()),
            "nonlinear" => Some(Self::nonlinear()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_linear() {
        assert_eq!(AdConfig::default(), AdConfig::linear());
        assert_eq!(AdConfig::default().vpaid_version, "2.0");
    }

    #[test]
    fn skippable_only_flips_skippable_state() {
        let mut expected = AttributeSet::initial();
        expected.skippable_state = true;
        assert_eq!(AdConfig::skippable_linear().attributes, expected);
    }

    #[test]
    fn nonlinear_has_unknown_times() {
        let c = AdConfig::nonlinear();
        assert!(!c.attributes.linear);
        assert_eq!(c.attributes.duration, -2);
        assert_eq!(c.attributes.remaining_time, -2);
    }

    #[test]
    fn presets_by_name() {
        assert_eq!(AdConfig::preset("skippable"), Some(AdConfig::skippable_linear()));
        assert_eq!(AdConfig::preset("bogus"), None);
    }
}
