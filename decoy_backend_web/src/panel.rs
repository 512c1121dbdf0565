// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Operator panel.
//!
//! [`DomPanel`] renders attribute readouts into elements with fixed ids
//! (`decoy-attr-<name>`, [`VISIBLE_ID`], and the log box) and wires the
//! operator's inputs and buttons to [`OperatorAction`]s. Elements with those
//! ids that the page already has are reused; missing ones are created inside
//! the panel root.
//!
//! Building a panel replaces any earlier panel root in the same document.
//! Listeners installed by the earlier panel check that their root is still
//! attached and go quiet once it is gone, so a new impression on the same
//! page only drives the newest unit.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::{String, ToString as _};
use alloc::vec::Vec;

use decoy_core::attributes::{AttrKey, AttributeSet};
use decoy_core::backend::AttributePresenter;
use decoy_core::changes::AttributeChanges;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use crate::dom;
use crate::log_box::LOG_ID;
use crate::visibility::{frame_path, readout};

/// Element id of the panel root.
pub const PANEL_ID: &str = "decoy-panel";

/// Element id of the visibility readout.
pub const VISIBLE_ID: &str = "decoy-visible";

/// Element id of the readout for `key`.
#[must_use]
pub fn attribute_id(key: AttrKey) -> String {
    format!("decoy-attr-{}", key.as_str())
}

/// Something the operator did on the panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperatorAction {
    /// The click-through button was pressed.
    ClickThru {
        /// Landing page URL input.
        url: String,
        /// Click id input.
        id: String,
        /// "Player handles" checkbox.
        player_handles: bool,
    },
    /// The error button was pressed.
    Error {
        /// Error message input.
        message: String,
    },
    /// The log button was pressed.
    Log {
        /// Log message input.
        message: String,
    },
    /// The interaction button was pressed.
    Interaction {
        /// Interaction id input.
        id: String,
    },
    /// The skippable checkbox was toggled.
    SetSkippable(bool),
    /// The page scrolled.
    Scroll,
}

type ActionHandler = Rc<dyn Fn(OperatorAction)>;

/// DOM readouts and controls for one ad unit.
pub struct DomPanel {
    document: Document,
    readouts: Vec<HtmlElement>,
    visible: HtmlElement,
    skippable: HtmlInputElement,
}

impl core::fmt::Debug for DomPanel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPanel")
            .field("readouts", &self.readouts.len())
            .finish_non_exhaustive()
    }
}

impl DomPanel {
    /// Builds the panel next to `container` and routes operator input to
    /// `on_action`.
    ///
    /// The panel lives in the container's document, which is the host page
    /// when the host supplied its own slot. `document` is used when the
    /// container is detached.
    pub fn build(
        document: &Document,
        container: &HtmlElement,
        on_action: impl Fn(OperatorAction) + 'static,
    ) -> Result<Self, JsValue> {
        let parent = panel_parent(document, container);
        let document = parent.owner_document().unwrap_or_else(|| document.clone());
        if let Some(stale) = document.get_element_by_id(PANEL_ID) {
            stale.remove();
        }
        let root: HtmlElement = create(&document, &parent, "div")?;
        root.set_id(PANEL_ID);

        let on_action = {
            let root = root.clone();
            gate(move || root.is_connected(), on_action)
        };

        let mut readouts = Vec::with_capacity(AttrKey::ALL.len());
        for key in AttrKey::ALL {
            readouts.push(labelled(&document, &root, &attribute_id(key), &format!("{key}: "))?);
        }
        let visible = labelled(&document, &root, VISIBLE_ID, "visible: ")?;
        visible.set_text_content(Some(&readout(None)));

        // Click-through.
        let row: Element = create(&document, &root, "div")?;
        let url = input(&document, &row, "decoy-click-url", "text", "click-through URL")?;
        let id = input(&document, &row, "decoy-click-id", "text", "click id")?;
        let handles = input(&document, &row, "decoy-click-handles", "checkbox", "")?;
        {
            let on_action = Rc::clone(&on_action);
            button(&document, &row, "decoy-click", "AdClickThru", move || {
                on_action(OperatorAction::ClickThru {
                    url: url.value(),
                    id: id.value(),
                    player_handles: handles.checked(),
                });
            })?;
        }
        prune(&row);

        // Error, log, interaction.
        let row: Element = create(&document, &root, "div")?;
        let message = input(&document, &row, "decoy-error-message", "text", "error message")?;
        {
            let on_action = Rc::clone(&on_action);
            button(&document, &row, "decoy-error", "AdError", move || {
                on_action(OperatorAction::Error {
                    message: message.value(),
                });
            })?;
        }
        prune(&row);
        let row: Element = create(&document, &root, "div")?;
        let message = input(&document, &row, "decoy-log-message", "text", "log message")?;
        {
            let on_action = Rc::clone(&on_action);
            button(&document, &row, "decoy-log-button", "AdLog", move || {
                on_action(OperatorAction::Log {
                    message: message.value(),
                });
            })?;
        }
        prune(&row);
        let row: Element = create(&document, &root, "div")?;
        let interaction = input(&document, &row, "decoy-interaction-id", "text", "interaction id")?;
        {
            let on_action = Rc::clone(&on_action);
            button(&document, &row, "decoy-interaction", "AdInteraction", move || {
                on_action(OperatorAction::Interaction {
                    id: interaction.value(),
                });
            })?;
        }
        prune(&row);

        // Skippable state.
        let row: Element = create(&document, &root, "div")?;
        let skippable = input(&document, &row, "decoy-skippable", "checkbox", "")?;
        if row.child_element_count() > 0 {
            row.prepend_with_str_1("skippable ")?;
        }
        {
            let on_action = Rc::clone(&on_action);
            let checkbox = skippable.clone();
            listen(&skippable, "change", move || {
                on_action(OperatorAction::SetSkippable(checkbox.checked()));
            })?;
        }
        prune(&row);

        // Log box.
        let log: HtmlTextAreaElement = find_or_create(&document, &root, "textarea", LOG_ID)?;
        log.set_read_only(true);
        log.set_rows(12);
        log.set_cols(80);

        // Scrolling any window between the ad and the top moves the ad
        // relative to the top-level viewport.
        if let Some(window) = container.owner_document().and_then(|d| d.default_view()) {
            for window in frame_path(window).windows {
                let on_action = Rc::clone(&on_action);
                listen(&window, "scroll", move || on_action(OperatorAction::Scroll))?;
            }
        }

        Ok(Self {
            document,
            readouts,
            visible,
            skippable,
        })
    }

    /// The document the panel was built in.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Writes the visibility readout.
    pub fn set_visibility(&self, percent: Option<u8>) {
        self.visible.set_text_content(Some(&readout(percent)));
    }
}

impl AttributePresenter for DomPanel {
    fn apply(&mut self, attributes: &AttributeSet, changes: &AttributeChanges) {
        for &key in &changes.keys {
            if let Some(el) = self.readouts.get(key.index() as usize) {
                el.set_text_content(Some(&attributes.get(key).to_string()));
            }
        }
        if changes.contains(AttrKey::SkippableState) {
            self.skippable.set_checked(attributes.skippable_state);
        }
    }
}

/// Wraps `on_action` so it only runs while `live` holds.
fn gate(
    live: impl Fn() -> bool + 'static,
    on_action: impl Fn(OperatorAction) + 'static,
) -> ActionHandler {
    Rc::new(move |action| {
        if live() {
            on_action(action);
        }
    })
}

/// The panel goes after the ad container, or into the body when the
/// container is detached.
fn panel_parent(document: &Document, container: &HtmlElement) -> Element {
    container
        .parent_element()
        .or_else(|| document.body().map(Into::into))
        .unwrap_or_else(|| container.clone().into())
}

/// Appends a new `tag` element to `parent`.
fn create<T: JsCast>(document: &Document, parent: &Element, tag: &str) -> Result<T, JsValue> {
    let el = document.create_element(tag)?;
    parent.append_child(&el)?;
    Ok(el.unchecked_into())
}

/// The page's `tag` element with `id`, or a new one appended to `parent`.
fn find_or_create<T: JsCast>(
    document: &Document,
    parent: &Element,
    tag: &str,
    id: &str,
) -> Result<T, JsValue> {
    if let Some(el) = document
        .get_element_by_id(id)
        .filter(|el| dom::has_tag(el, tag))
    {
        return Ok(el.unchecked_into());
    }
    let el: Element = create(document, parent, tag)?;
    el.set_id(id);
    Ok(el.unchecked_into())
}

/// A readout element with `id`. A new one gets its own row with `label`.
fn labelled(
    document: &Document,
    root: &Element,
    id: &str,
    label: &str,
) -> Result<HtmlElement, JsValue> {
    if let Some(el) = document.get_element_by_id(id) {
        return Ok(el.unchecked_into());
    }
    let row: HtmlElement = create(document, root, "div")?;
    row.set_text_content(Some(label));
    let el: HtmlElement = create(document, &row, "span")?;
    el.set_id(id);
    Ok(el)
}

/// Drops a control row whose controls all came from the page.
fn prune(row: &Element) {
    if row.child_element_count() == 0 {
        row.remove();
    }
}

fn input(
    document: &Document,
    parent: &Element,
    id: &str,
    kind: &str,
    placeholder: &str,
) -> Result<HtmlInputElement, JsValue> {
    let el: HtmlInputElement = find_or_create(document, parent, "input", id)?;
    el.set_type(kind);
    if !placeholder.is_empty() {
        el.set_placeholder(placeholder);
    }
    Ok(el)
}

fn button(
    document: &Document,
    parent: &Element,
    id: &str,
    label: &str,
    on_click: impl FnMut() + 'static,
) -> Result<(), JsValue> {
    let el: HtmlElement = find_or_create(document, parent, "button", id)?;
    el.set_text_content(Some(label));
    listen(&el, "click", on_click)
}

/// Adds an event listener that lives as long as the page.
fn listen(
    target: &EventTarget,
    event: &str,
    mut handler: impl FnMut() + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |_: web_sys::Event| handler()) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::{Cell, RefCell};

    #[test]
    fn attribute_ids_use_vpaid_names() {
        assert_eq!(attribute_id(AttrKey::SkippableState), "decoy-attr-skippableState");
        assert_eq!(attribute_id(AttrKey::DesiredBitrate), "decoy-attr-desiredBitrate");
        assert_eq!(attribute_id(AttrKey::Width), "decoy-attr-width");
    }

    #[test]
    fn replaced_panel_stops_forwarding() {
        let attached = Rc::new(Cell::new(true));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let handler = {
            let attached = Rc::clone(&attached);
            let seen = Rc::clone(&seen);
            gate(move || attached.get(), move |a| seen.borrow_mut().push(a))
        };

        handler(OperatorAction::Log {
            message: "first".to_string(),
        });
        attached.set(false);
        handler(OperatorAction::Log {
            message: "second".to_string(),
        });
        handler(OperatorAction::Scroll);

        assert_eq!(
            *seen.borrow(),
            [OperatorAction::Log {
                message: "first".to_string()
            }]
        );
    }
}
