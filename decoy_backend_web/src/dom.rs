// Copyright 2026 the Decoy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-window DOM helpers.
//!
//! A creative in a friendly iframe is handed nodes from its host's document.
//! Those fail `instanceof` checks against the creative's own window, so
//! element-ness is read from `nodeType` and `tagName` instead and the value
//! is cast without a runtime check.

use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

/// `Node.ELEMENT_NODE`
const ELEMENT_NODE: f64 = 1.0;

/// Reads `obj[key]`, treating `null`, `undefined`, and non-objects as absent.
pub(crate) fn property(obj: &JsValue, key: &str) -> Option<JsValue> {
    if !obj.is_object() {
        return None;
    }
    let value = Reflect::get(obj, &JsValue::from_str(key)).ok()?;
    (!value.is_null() && !value.is_undefined()).then_some(value)
}

/// Casts `value` to `T` if it is an element node from any window.
pub(crate) fn element<T: JsCast>(value: JsValue) -> Option<T> {
    let node_type = property(&value, "nodeType").and_then(|t| t.as_f64());
    is_element_node(node_type).then(|| value.unchecked_into())
}

/// Like [`element`], additionally requiring the tag name `tag`.
pub(crate) fn element_with_tag<T: JsCast>(value: JsValue, tag: &str) -> Option<T> {
    let name = property(&value, "tagName").and_then(|t| t.as_string());
    if !tag_matches(name.as_deref(), tag) {
        return None;
    }
    element(value)
}

/// Whether `el` has the tag name `tag`, ignoring case.
pub(crate) fn has_tag(el: &Element, tag: &str) -> bool {
    tag_matches(Some(&el.tag_name()), tag)
}

fn is_element_node(node_type: Option<f64>) -> bool {
    node_type == Some(ELEMENT_NODE)
}

fn tag_matches(name: Option<&str>, tag: &str) -> bool {
    name.is_some_and(|n| n.eq_ignore_ascii_case(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_element_nodes_pass() {
        assert!(is_element_node(Some(1.0)));
        // Text and document nodes.
        assert!(!is_element_node(Some(3.0)));
        assert!(!is_element_node(Some(9.0)));
        // Plain objects have no nodeType.
        assert!(!is_element_node(None));
    }

    #[test]
    fn tags_match_regardless_of_case() {
        assert!(tag_matches(Some("VIDEO"), "video"));
        assert!(tag_matches(Some("video"), "video"));
        assert!(!tag_matches(Some("DIV"), "video"));
        assert!(!tag_matches(None, "video"));
    }
}
