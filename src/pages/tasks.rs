//! Task list page.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event};

use crate::components::status_badge;
use crate::constants::{
    ATTR_DATA_COPY_TASK_ID, ATTR_DATA_TESTID, CSS_BUTTON_OUTLINE, CSS_CARD, CSS_EMPTY_STATE, CSS_LOADING,
    DESCRIPTION_PREVIEW_LEN, ID_TASKS_REFRESH_BTN, ID_TASKS_TABLE_BODY,
};
use crate::dom_utils::{append, button, clear, el, on, on_click, text_el};
use crate::messages::Message;
use crate::models::Task;
use crate::routes::Route;
use crate::state::{dispatch_global_message, TaskListState};
use crate::utils::truncate_graphemes;

const COLUMNS: [&str; 4] = ["Status", "Name", "Description", "Actions"];

pub fn mount(document: &Document, container: &Element) -> Result<(), JsValue> {
    let header = el(document, "div", "page-header")?;
    let titles = el(document, "div", "")?;
    append(&titles, &text_el(document, "h1", "page-title", "Tasks")?)?;
    append(&titles, &text_el(
        document,
        "p",
        "page-subtitle",
        "Fine-tuning tasks and the stage each one has reached.",
    )?)?;
    header.append_child(&titles)?;
    let refresh = button(document, ID_TASKS_REFRESH_BTN, "Refresh", CSS_BUTTON_OUTLINE)?;
    on_click(&refresh, || dispatch_global_message(Message::Navigate(Route::Tasks)))?;
    header.append_child(&refresh)?;
    container.append_child(&header)?;

    let card = el(document, "div", CSS_CARD)?;
    let table = el(document, "table", "data-table")?;
    table.set_attribute(ATTR_DATA_TESTID, "tasks-table")?;
    let thead = el(document, "thead", "")?;
    let head_row = el(document, "tr", "")?;
    for column in COLUMNS {
        append(&head_row, &text_el(document, "th", "", column)?)?;
    }
    thead.append_child(&head_row)?;
    table.append_child(&thead)?;

    let tbody = el(document, "tbody", "")?;
    tbody.set_id(ID_TASKS_TABLE_BODY);
    // One delegated listener for every "Copy task ID" button in the table.
    on(&tbody, "click", |event: Event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let Ok(Some(copy)) = target.closest(&format!("[{}]", ATTR_DATA_COPY_TASK_ID)) else {
            return;
        };
        if let Some(task_id) = copy.get_attribute(ATTR_DATA_COPY_TASK_ID) {
            dispatch_global_message(Message::CopyTaskId(task_id));
        }
    })?;
    table.append_child(&tbody)?;
    card.append_child(&table)?;
    container.append_child(&card)?;
    Ok(())
}

fn message_row(document: &Document, class: &str, text: &str) -> Result<Element, JsValue> {
    let row = el(document, "tr", "")?;
    let cell = text_el(document, "td", class, text)?;
    cell.set_attribute("colspan", &COLUMNS.len().to_string())?;
    row.append_child(&cell)?;
    Ok(row)
}

fn task_row(document: &Document, task: &Task) -> Result<Element, JsValue> {
    let row = el(document, "tr", "")?;
    row.set_attribute(ATTR_DATA_TESTID, &format!("task-row-{}", task.id))?;

    let status_cell = el(document, "td", "")?;
    append(&status_cell, &status_badge::create(document, task.status_label())?)?;
    row.append_child(&status_cell)?;

    let name_cell = el(document, "td", "cell-strong")?;
    let name = text_el(document, "a", "", &task.name)?;
    name.set_attribute("href", &Route::TaskDetail(task.id.clone()).href())?;
    name_cell.append_child(&name)?;
    row.append_child(&name_cell)?;

    let description = task.description.as_deref().unwrap_or_default();
    let description_cell = text_el(
        document,
        "td",
        "cell-muted",
        &truncate_graphemes(description, DESCRIPTION_PREVIEW_LEN),
    )?;
    description_cell.set_attribute("title", description)?;
    row.append_child(&description_cell)?;

    let actions = el(document, "td", "cell-actions")?;
    let copy = button(document, "", "Copy task ID", "btn btn-ghost")?;
    copy.set_attribute(ATTR_DATA_COPY_TASK_ID, &task.id)?;
    actions.append_child(&copy)?;
    let view = text_el(document, "a", "btn btn-ghost", "View details")?;
    view.set_attribute("href", &Route::TaskDetail(task.id.clone()).href())?;
    actions.append_child(&view)?;
    row.append_child(&actions)?;

    Ok(row)
}

pub fn refresh(document: &Document, state: &TaskListState) -> Result<(), JsValue> {
    let Some(tbody) = document.get_element_by_id(ID_TASKS_TABLE_BODY) else {
        return Ok(());
    };
    clear(&tbody);

    if state.loading && state.tasks.is_empty() {
        append(&tbody, &message_row(document, CSS_LOADING, "Loading tasks...")?)?;
        return Ok(());
    }
    if state.tasks.is_empty() {
        let text = match &state.error {
            Some(error) => format!("Could not load tasks: {}", error),
            None => "No results.".to_string(),
        };
        append(&tbody, &message_row(document, CSS_EMPTY_STATE, &text)?)?;
        return Ok(());
    }
    for task in &state.tasks {
        append(&tbody, &task_row(document, task)?)?;
    }
    Ok(())
}
