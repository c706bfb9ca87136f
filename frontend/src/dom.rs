//! DOM access for the guard.
//!
//! [`DomSurface`] applies navigation control patches to real elements.
//! Lookups are repeated on every call because the host page may re-render
//! its widgets at any time.

use upload_guard::{
    ControlPatch, GuardError, GuardResult, NavControl, NavigationSurface, StyleValue,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleDeclaration, Document, Element, HtmlButtonElement, HtmlElement};

/// Convert a JS exception into a [`GuardError`].
pub fn dom_error(err: JsValue) -> GuardError {
    let message = err
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(&err, &"message".into())
                .ok()
                .and_then(|v| v.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", err));
    GuardError::Dom(message)
}

/// Error value handed back to JavaScript callers.
pub fn to_js_error(err: GuardError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// First element matching `selector`.
pub fn query(document: &Document, selector: &str) -> GuardResult<Element> {
    document
        .query_selector(selector)
        .map_err(dom_error)?
        .ok_or_else(|| GuardError::MissingElement(selector.to_string()))
}

/// Whether `selector` matches anything. Invalid selectors match nothing.
pub fn exists(document: &Document, selector: &str) -> bool {
    matches!(document.query_selector(selector), Ok(Some(_)))
}

/// Navigation surface backed by the live document.
pub struct DomSurface {
    document: Document,
    disabled_class: String,
}

impl DomSurface {
    pub fn new(document: Document, disabled_class: impl Into<String>) -> Self {
        Self {
            document,
            disabled_class: disabled_class.into(),
        }
    }
}

impl NavigationSurface for DomSurface {
    fn apply(&mut self, control: &NavControl, patch: &ControlPatch) -> GuardResult<()> {
        let element = query(&self.document, &control.selector)?;

        if let Some(disabled) = patch.disabled {
            set_disabled(&element, disabled)?;
        }

        if patch.cursor.is_some() || patch.pointer_events.is_some() {
            let html = element.dyn_ref::<HtmlElement>().ok_or_else(|| {
                GuardError::Dom(format!("'{}' is not an HTML element", control.selector))
            })?;
            let style = html.style();
            if let Some(cursor) = patch.cursor {
                set_style(&style, "cursor", cursor)?;
            }
            if let Some(pointer_events) = patch.pointer_events {
                set_style(&style, "pointer-events", pointer_events)?;
            }
        }

        if let Some(add) = patch.disabled_class {
            let classes = element.class_list();
            let result = if add {
                classes.add_1(&self.disabled_class)
            } else {
                classes.remove_1(&self.disabled_class)
            };
            result.map_err(dom_error)?;
        }

        Ok(())
    }
}

fn set_disabled(element: &Element, disabled: bool) -> GuardResult<()> {
    if let Some(button) = element.dyn_ref::<HtmlButtonElement>() {
        button.set_disabled(disabled);
        return Ok(());
    }

    // non-button controls only get the attribute, for styling hooks
    let result = if disabled {
        element.set_attribute("disabled", "")
    } else {
        element.remove_attribute("disabled")
    };
    result.map_err(dom_error)
}

fn set_style(style: &CssStyleDeclaration, property: &str, value: StyleValue) -> GuardResult<()> {
    match value {
        StyleValue::Set(v) => style.set_property(property, v).map_err(dom_error),
        StyleValue::Clear => style.remove_property(property).map(|_| ()).map_err(dom_error),
    }
}
