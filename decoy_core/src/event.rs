// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event names and payloads.
//!
//! [`EventKind`] is the registry key: the closed set of VPAID event names a
//! creative emits, plus an [`Other`](EventKind::Other) bucket for names a host
//! subscribes to but the unit never emits.
//!
//! [`AdEvent`] is what a listener receives. Lifecycle events carry no
//! arguments; the four interactive events carry the positional arguments the
//! VPAID contract defines for them:
//!
//! | event | arguments |
//! |---|---|
//! | `AdClickThru` | `url`, `id`, `playerHandles` |
//! | `AdError` | `message` |
//! | `AdLog` | `message` |
//! | `AdInteraction` | `id` |

use alloc::borrow::ToOwned as _;
use alloc::string::String;
use core::fmt;

/// A VPAID event name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    /// `AdLoaded`
    Loaded,
    /// `AdStarted`
    Started,
    /// `AdStopped`
    Stopped,
    /// `AdVolumeChange`
    VolumeChange,
    /// `AdSizeChange`
    SizeChange,
    /// `AdPaused`
    Paused,
    /// `AdResumed`
    Resumed,
    /// `AdExpanded`
    Expanded,
    /// `AdSkipped`
    Skipped,
    /// `AdClickThru`
    ClickThru,
    /// `AdError`
    Error,
    /// `AdLog`
    Log,
    /// `AdInteraction`
    Interaction,
    /// A name outside the recognized set. Never emitted.
    Other(String),
}

impl EventKind {
    /// Every recognized (emittable) event kind.
    pub const RECOGNIZED: [Self; 13] = [
        Self::Loaded,
        Self::Started,
        Self::Stopped,
        Self::VolumeChange,
        Self::SizeChange,
        Self::Paused,
        Self::Resumed,
        Self::Expanded,
        Self::Skipped,
        Self::ClickThru,
        Self::Error,
        Self::Log,
        Self::Interaction,
    ];

    /// Maps a VPAID event name to a kind. Unknown names land in
    /// [`Other`](Self::Other); matching is case-sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "AdLoaded" => Self::Loaded,
            "AdStarted" => Self::Started,
            "AdStopped" => Self::Stopped,
            "AdVolumeChange" => Self::VolumeChange,
            "AdSizeChange" => Self::SizeChange,
            "AdPaused" => Self::Paused,
            "AdResumed" => Self::Resumed,
            "AdExpanded" => Self::Expanded,
            "AdSkipped" => Self::Skipped,
            "AdClickThru" => Self::ClickThru,
            "AdError" => Self::Error,
            "AdLog" => Self::Log,
            "AdInteraction" => Self::Interaction,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Returns the VPAID event name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Loaded => "AdLoaded",
            Self::Started => "AdStarted",
            Self::Stopped => "AdStopped",
            Self::VolumeChange => "AdVolumeChange",
            Self::SizeChange => "AdSizeChange",
            Self::Paused => "AdPaused",
            Self::Resumed => "AdResumed",
            Self::Expanded => "AdExpanded",
            Self::Skipped => "AdSkipped",
            Self::ClickThru => "AdClickThru",
            Self::Error => "AdError",
            Self::Log => "AdLog",
            Self::Interaction => "AdInteraction",
            Self::Other(name) => name,
        }
    }

    /// Whether the unit can ever emit this kind.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Whether this kind is raised by the operator rather than by a host call.
    ///
    /// Emitting an interactive kind with no listener is reported as a
    /// diagnostic instead of being skipped silently.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            Self::ClickThru | Self::Error | Self::Log | Self::Interaction
        )
    }
}

impl From<&str> for EventKind {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event delivered to a listener, with its positional arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdEvent<'a> {
    /// The unit finished `initAd`.
    Loaded,
    /// The unit handled `startAd`.
    Started,
    /// The unit handled `stopAd`.
    Stopped,
    /// The volume changed.
    VolumeChange,
    /// The size or view mode changed.
    SizeChange,
    /// Playback paused.
    Paused,
    /// Playback resumed.
    Resumed,
    /// The unit expanded.
    Expanded,
    /// The ad was skipped.
    Skipped,
    /// The operator clicked through.
    ClickThru {
        /// Landing page URL.
        url: &'a str,
        /// Click identifier.
        id: &'a str,
        /// Whether the player should open the URL itself.
        player_handles: bool,
    },
    /// The operator raised an error.
    Error {
        /// Error text.
        message: &'a str,
    },
    /// The operator raised a log line.
    Log {
        /// Log text.
        message: &'a str,
    },
    /// The operator raised an interaction.
    Interaction {
        /// Interaction identifier.
        id: &'a str,
    },
}

impl AdEvent<'_> {
    /// Returns the registry key this event is dispatched under.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Loaded => EventKind::Loaded,
            Self::Started => EventKind::Started,
            Self::Stopped => EventKind::Stopped,
            Self::VolumeChange => EventKind::VolumeChange,
            Self::SizeChange => EventKind::SizeChange,
            Self::Paused => EventKind::Paused,
            Self::Resumed => EventKind::Resumed,
            Self::Expanded => EventKind::Expanded,
            Self::Skipped => EventKind::Skipped,
            Self::ClickThru { .. } => EventKind::ClickThru,
            Self::Error { .. } => EventKind::Error,
            Self::Log { .. } => EventKind::Log,
            Self::Interaction { .. } => EventKind::Interaction,
        }
    }
}

impl fmt::Display for AdEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClickThru {
                url,
                id,
                player_handles,
            } => write!(f, "AdClickThru({url:?}, {id:?}, {player_handles})"),
            Self::Error { message } => write!(f, "AdError({message:?})"),
            Self::Log { message } => write!(f, "AdLog({message:?})"),
            Self::Interaction { id } => write!(f, "AdInteraction({id:?})"),
            other => f.write_str(other.kind().as_str()),
        }
    }
}
