use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::breadcrumb::BreadcrumbItem;
use crate::constants::{CSS_SEPARATOR, ID_BREADCRUMB};
use crate::dom_utils::{clear, el, text_el};

/// Render the trail into `#breadcrumb`. Paths are route paths and become
/// hash links; the current page is plain text.
pub fn render(document: &Document, items: &[BreadcrumbItem]) -> Result<(), JsValue> {
    let Some(nav) = document.get_element_by_id(ID_BREADCRUMB) else {
        return Ok(());
    };
    clear(&nav);

    let list = el(document, "ol", "breadcrumb-list")?;
    for (index, item) in items.iter().enumerate() {
        let li = el(document, "li", "breadcrumb-item")?;
        if item.is_current {
            let page = text_el(document, "span", "breadcrumb-page", &item.label)?;
            page.set_attribute("aria-current", "page")?;
            li.append_child(&page)?;
        } else {
            let link = text_el(document, "a", "breadcrumb-link", &item.label)?;
            link.set_attribute("href", &format!("#{}", item.path))?;
            li.append_child(&link)?;
        }
        list.append_child(&li)?;

        if index + 1 < items.len() {
            let sep = text_el(document, "li", CSS_SEPARATOR, "›")?;
            sep.set_attribute("aria-hidden", "true")?;
            list.append_child(&sep)?;
        }
    }
    nav.append_child(&list)?;
    Ok(())
}
