// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Decoy splits platform-specific work into *backend* crates. Each backend
//! provides the following pieces:
//!
//! - **Surface**: Implements [`HostSurface`](crate::host::HostSurface) to
//!   bind the host's rendering and video slots.
//!
//! - **Presenter**: Implements the [`AttributePresenter`] trait to show the
//!   current attribute values in a platform-native view (e.g. DOM rows).
//!
//! - **Entry point**: Exposes the no-argument factory a host expects (on the
//!   web, a `getVPAIDAd` export) and adapts host callbacks to
//!   [`Listener`](crate::registry::Listener).
//!
//! # Crate boundaries
//!
//! `decoy_core` owns the data model, dispatch, and this contract module.
//! Backend crates depend on `decoy_core` and provide platform glue.

use crate::attributes::AttributeSet;
use crate::changes::AttributeChanges;

/// Applies attribute changes to a platform-native diagnostic view.
///
/// # Update loop pseudocode
///
/// ```rust,ignore
/// fn after_host_call(unit: &AdUnit<S>, presenter: &mut P) {
///     // Drain: collect the attributes written by the call
///     let changes = unit.take_changes();
///
///     // Present: re-render only what changed
///     if !changes.is_empty() {
///         presenter.apply(&unit.attributes(), &changes);
///     }
/// }
/// ```
pub trait AttributePresenter {
    /// Applies the given [`AttributeChanges`], reading current values from
    /// `attributes` as needed.
    fn apply(&mut self, attributes: &AttributeSet, changes: &AttributeChanges);
}
