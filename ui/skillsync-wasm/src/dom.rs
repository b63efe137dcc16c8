//! DOM helpers and the handful of long-lived element references.
//!
//! Page content is re-rendered as HTML strings into `#app`; only the
//! containers themselves are bound once at startup.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlInputElement, Window};

pub fn window() -> Window {
    gloo_utils::window()
}

pub fn document() -> Document {
    gloo_utils::document()
}

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

/// Trimmed value of an `<input>` (or `<select>`/`<textarea>` via `value`).
pub fn input_value(id: &str) -> Option<String> {
    let el = by_id(id)?;
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return Some(input.value().trim().to_owned());
    }
    if let Some(select) = el.dyn_ref::<web_sys::HtmlSelectElement>() {
        return Some(select.value());
    }
    el.dyn_ref::<web_sys::HtmlTextAreaElement>()
        .map(|area| area.value())
}

pub fn set_inner_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

pub fn set_html_by_id(id: &str, html: &str) {
    if let Some(el) = by_id(id) {
        el.set_inner_html(html);
    }
}

/// Escape text for interpolation into HTML element content or attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn ensure_container(id: &str) -> Result<Element, JsValue> {
    if let Some(el) = by_id(id) {
        return Ok(el);
    }
    let doc = document();
    let el = doc.create_element("div")?;
    el.set_id(id);
    doc.body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?
        .append_child(&el)?;
    Ok(el)
}

/// Containers the app renders into.
#[derive(Clone)]
pub struct Elements {
    pub app: Element,
    pub toasts: Element,
}

impl Elements {
    /// Binds `#app` and `#toasts`, creating them when the host page does not.
    pub fn bind() -> Result<Self, JsValue> {
        Ok(Self {
            app: ensure_container("app")?,
            toasts: ensure_container("toasts")?,
        })
    }
}
