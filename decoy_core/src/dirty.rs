// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Attribute writes are tracked with [`understory_dirty`], keyed by
//! [`AttrKey::index`](crate::attributes::AttrKey::index). Attributes have no
//! dependency edges, so every channel is local-only: only the explicitly
//! marked key appears in the drain output.
//!
//! # Channels
//!
//! - [`ATTRIBUTE`]: any value write. Presenters re-render the marked rows.
//! - [`LAYOUT`]: writes to width, height, view mode, or expanded. Presenters
//!   re-measure the creative's container.
//!
//! # Consumption
//!
//! Callers never query dirty state directly. Each
//! [`AdUnit::take_changes`](crate::unit::AdUnit::take_changes) call drains
//! both channels and surfaces the result as
//! [`AttributeChanges`](crate::changes::AttributeChanges), which presenters
//! [consume](crate::backend::AttributePresenter::apply).

use understory_dirty::Channel;

/// An attribute value was written.
pub const ATTRIBUTE: Channel = Channel::new(0);

/// A layout-affecting attribute was written.
pub const LAYOUT: Channel = Channel::new(1);
