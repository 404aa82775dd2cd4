//! Thin helper layer for repetitive DOM operations.
//!
//! Small wrappers for show / hide, element creation and event wiring so the
//! pages do not repeat `class_list()` and `Closure` boilerplate.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlElement};

use crate::constants::{CSS_HIDDEN, CSS_VISIBLE};

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document on window"))
}

pub fn by_id(id: &str) -> Option<Element> {
    web_sys::window()?.document()?.get_element_by_id(id)
}

/// Remove the `hidden` class so the element becomes visible.
pub fn show(el: &Element) {
    let _ = el.class_list().remove_1(CSS_HIDDEN);
    let _ = el.class_list().add_1(CSS_VISIBLE);
}

/// Hide the element by toggling CSS classes.
pub fn hide(el: &Element) {
    let _ = el.class_list().remove_1(CSS_VISIBLE);
    let _ = el.class_list().add_1(CSS_HIDDEN);
}

pub fn set_visible(el: &Element, visible: bool) {
    if visible {
        show(el);
    } else {
        hide(el);
    }
}

/// Create `<tag class="class">`.
pub fn el(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let element = document.create_element(tag)?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    Ok(element)
}

/// Create an element holding plain text.
pub fn text_el(document: &Document, tag: &str, class: &str, text: &str) -> Result<Element, JsValue> {
    let element = el(document, tag, class)?;
    element.set_text_content(Some(text));
    Ok(element)
}

/// `<button type="button">`; `id` may be empty.
pub fn button(document: &Document, id: &str, label: &str, class: &str) -> Result<Element, JsValue> {
    let button = text_el(document, "button", class, label)?;
    button.set_attribute("type", "button")?;
    if !id.is_empty() {
        button.set_id(id);
    }
    Ok(button)
}

pub fn clear(el: &Element) {
    el.set_inner_html("");
}

/// `parent.append_child(child)` for freshly built elements.
pub fn append(parent: &Element, child: &Element) -> Result<(), JsValue> {
    parent.append_child(child)?;
    Ok(())
}

/// Set text on the element with `id`, if it exists.
pub fn set_text_by_id(id: &str, text: &str) {
    if let Some(el) = by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_disabled(el: &Element, disabled: bool) {
    if let Some(button) = el.dyn_ref::<HtmlButtonElement>() {
        button.set_disabled(disabled);
    } else if disabled {
        let _ = el.set_attribute("disabled", "");
    } else {
        let _ = el.remove_attribute("disabled");
    }
}

/// Attach `handler` to `event` on `target`. The closure lives for the rest
/// of the page, so only use this on elements built once.
pub fn on<F>(target: &Element, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn on_click<F>(target: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    on(target, "click", move |event: Event| {
        event.prevent_default();
        handler();
    })
}

pub fn scroll_to_bottom(el: &Element) {
    el.set_scroll_top(el.scroll_height());
}

pub fn focus(el: &Element) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.focus();
    }
}
