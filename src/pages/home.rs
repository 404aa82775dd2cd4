use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::constants::{ATTR_DATA_TESTID, CSS_EMPTY_STATE};
use crate::dom_utils::{append, el, text_el};
use crate::routes::Route;

pub fn mount(document: &Document, container: &Element) -> Result<(), JsValue> {
    let hero = el(document, "section", "home-hero")?;
    hero.set_attribute(ATTR_DATA_TESTID, "home")?;
    append(&hero, &text_el(document, "h1", "page-title", "Welcome to OpenAgents sdk")?)?;
    append(&hero, &text_el(
        document,
        "p",
        "page-subtitle",
        "OpenAgents is a platform for creating and managing your agents.",
    )?)?;
    container.append_child(&hero)?;
    Ok(())
}

pub fn mount_not_found(document: &Document, container: &Element, path: &str) -> Result<(), JsValue> {
    let section = el(document, "section", CSS_EMPTY_STATE)?;
    section.set_attribute(ATTR_DATA_TESTID, "not-found")?;
    append(&section, &text_el(document, "h1", "page-title", "Page not found")?)?;
    append(&section, &text_el(document, "p", "page-subtitle", &format!("Nothing lives at {}.", path))?)?;
    let back = text_el(document, "a", "btn btn-outline", "Back to home")?;
    back.set_attribute("href", &Route::Home.href())?;
    section.append_child(&back)?;
    container.append_child(&section)?;
    Ok(())
}
