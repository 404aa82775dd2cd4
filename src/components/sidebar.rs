//! Left navigation: brand header, main nav and secondary nav.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

use crate::constants::{
    ATTR_DATA_ROUTE, BRAND_NAME, BRAND_PLAN, CSS_NAV_ITEM, CSS_NAV_ITEM_ACTIVE, ID_SIDEBAR, NAV_MAIN, NAV_SECONDARY,
};
use crate::dom_utils::{append, el, text_el};
use crate::routes::Route;

fn nav_list(document: &Document, class: &str, items: &[(&str, &str)]) -> Result<Element, JsValue> {
    let list = el(document, "ul", class)?;
    for (title, href) in items {
        let li = el(document, "li", "")?;
        let link = text_el(document, "a", CSS_NAV_ITEM, title)?;
        link.set_attribute("href", href)?;
        let root = Route::from_hash(href).root_segment().to_string();
        if !href.trim_start_matches('#').is_empty() {
            link.set_attribute(ATTR_DATA_ROUTE, &root)?;
        }
        li.append_child(&link)?;
        list.append_child(&li)?;
    }
    Ok(list)
}

pub fn create(document: &Document) -> Result<Element, JsValue> {
    let aside = el(document, "aside", "sidebar")?;
    aside.set_id(ID_SIDEBAR);

    let brand = el(document, "a", "sidebar-brand")?;
    brand.set_attribute("href", &Route::Home.href())?;
    append(&brand, &text_el(document, "span", "brand-logo", "M")?)?;
    let brand_text = el(document, "span", "brand-text")?;
    append(&brand_text, &text_el(document, "strong", "", BRAND_NAME)?)?;
    append(&brand_text, &text_el(document, "small", "", BRAND_PLAN)?)?;
    brand.append_child(&brand_text)?;
    aside.append_child(&brand)?;

    let main_nav = el(document, "nav", "sidebar-main")?;
    append(&main_nav, &nav_list(document, "nav-list", NAV_MAIN)?)?;
    aside.append_child(&main_nav)?;

    let secondary = el(document, "nav", "sidebar-secondary")?;
    append(&secondary, &nav_list(document, "nav-list", NAV_SECONDARY)?)?;
    aside.append_child(&secondary)?;

    Ok(aside)
}

/// Highlight the nav item owning the current route.
pub fn set_active(document: &Document, route: &Route) -> Result<(), JsValue> {
    let items = document.query_selector_all(&format!("#{} a[{}]", ID_SIDEBAR, ATTR_DATA_ROUTE))?;
    for i in 0..items.length() {
        let Some(node) = items.item(i) else { continue };
        let Ok(link) = node.dyn_into::<Element>() else { continue };
        let active = link.get_attribute(ATTR_DATA_ROUTE).as_deref() == Some(route.root_segment());
        link.set_class_name(if active { CSS_NAV_ITEM_ACTIVE } else { CSS_NAV_ITEM });
    }
    Ok(())
}
