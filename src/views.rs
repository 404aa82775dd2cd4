// Renders the shell chrome and the active page from the current state.
//
// Pages are mounted once per route (tracked by the `data-route` attribute
// on the content area) and refreshed in place afterwards.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::breadcrumb::generate_breadcrumbs;
use crate::components::{breadcrumb_bar, sidebar};
use crate::constants::{APP_TITLE, ATTR_DATA_PAGE, ATTR_DATA_ROUTE, ID_PAGE_CONTENT};
use crate::dom_utils::clear;
use crate::pages;
use crate::routes::Route;
use crate::state::{AppState, APP_STATE};

pub fn render_active_view(document: &Document) -> Result<(), JsValue> {
    APP_STATE.with(|state| render_state(document, &state.borrow()))
}

pub fn render_state(document: &Document, state: &AppState) -> Result<(), JsValue> {
    let route = &state.route;

    let trail = generate_breadcrumbs(&route.path(), &state.breadcrumbs);
    breadcrumb_bar::render(document, &trail)?;
    sidebar::set_active(document, route)?;
    if let Some(current) = trail.last() {
        document.set_title(&format!("{} · {}", current.label, APP_TITLE));
    }

    let content = document
        .get_element_by_id(ID_PAGE_CONTENT)
        .ok_or_else(|| JsValue::from_str("Could not find page-content"))?;
    let route_key = route.path();
    if content.get_attribute(ATTR_DATA_ROUTE).as_deref() != Some(route_key.as_str()) {
        mount_page(document, &content, route)?;
        content.set_attribute(ATTR_DATA_ROUTE, &route_key)?;
        content.set_attribute(ATTR_DATA_PAGE, route.page_name())?;
    }

    match route {
        Route::Tasks => pages::tasks::refresh(document, &state.tasks),
        Route::TaskDetail(_) => match &state.task_detail {
            Some(detail) => pages::task_detail::refresh(document, detail),
            None => Ok(()),
        },
        Route::Playground => pages::playground::refresh(document, &state.playground),
        Route::Home | Route::NotFound(_) => Ok(()),
    }
}

fn mount_page(document: &Document, content: &Element, route: &Route) -> Result<(), JsValue> {
    log::debug!("mounting {} page", route.page_name());
    clear(content);
    match route {
        Route::Home => pages::home::mount(document, content),
        Route::Playground => pages::playground::mount(document, content),
        Route::Tasks => pages::tasks::mount(document, content),
        Route::TaskDetail(_) => pages::task_detail::mount(document, content),
        Route::NotFound(path) => pages::home::mount_not_found(document, content, path),
    }
}
