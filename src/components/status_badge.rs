use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::constants::{
    CSS_BADGE_FAILED, CSS_BADGE_NEUTRAL, CSS_BADGE_PENDING, CSS_BADGE_RUNNING, CSS_BADGE_SUCCESS, STATUS_COMPLETED,
    STATUS_FAILED, STATUS_PENDING, STATUS_RUNNING, STATUS_SUCCESS,
};

/// Badge colour for a task status. Placeholders such as "Not uploaded" fall
/// through to the neutral badge.
pub fn badge_class(status: &str) -> &'static str {
    match status {
        STATUS_SUCCESS | STATUS_COMPLETED => CSS_BADGE_SUCCESS,
        STATUS_RUNNING => CSS_BADGE_RUNNING,
        STATUS_PENDING => CSS_BADGE_PENDING,
        STATUS_FAILED => CSS_BADGE_FAILED,
        _ => CSS_BADGE_NEUTRAL,
    }
}

pub fn create(document: &Document, status: &str) -> Result<Element, JsValue> {
    let badge = document.create_element("span")?;
    apply(&badge, status);
    Ok(badge)
}

/// Restyle an existing badge element for `status`.
pub fn apply(badge: &Element, status: &str) {
    badge.set_class_name(badge_class(status));
    badge.set_text_content(Some(status));
}
