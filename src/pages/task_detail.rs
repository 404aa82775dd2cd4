//! Task detail page: overview, documents, sample upload, fine-tune and
//! deploy actions.
//!
//! `mount` builds the fixed layout and wires the controls once; `refresh`
//! copies the current [`TaskDetailState`] into it.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement, HtmlSelectElement};

use crate::components::status_badge;
use crate::constants::*;
use crate::dom_utils::{append, button, by_id, clear, el, on, on_click, set_disabled, set_text_by_id, set_visible, text_el};
use crate::messages::Message;
use crate::state::{dispatch_global_message, TaskDetailState};
use crate::utils::{format_optional_timestamp, format_percent};

fn field_row(document: &Document, label: &str, value: &Element) -> Result<Element, JsValue> {
    let row = el(document, "div", CSS_FIELD_ROW)?;
    append(&row, &text_el(document, "span", CSS_FIELD_LABEL, label)?)?;
    row.append_child(value)?;
    Ok(row)
}

fn value_span(document: &Document, id: &str) -> Result<Element, JsValue> {
    let span = el(document, "span", "field-value")?;
    span.set_id(id);
    Ok(span)
}

fn overview_card(document: &Document) -> Result<Element, JsValue> {
    let card = el(document, "section", CSS_CARD)?;
    append(&card, &text_el(document, "h2", "card-title", "Overview")?)?;

    let description = text_el(document, "p", "page-subtitle", "")?;
    description.set_id(ID_TASK_DESCRIPTION);
    card.append_child(&description)?;

    append(&card, &field_row(document, "Stage", &value_span(document, ID_TASK_STAGE_LABEL)?)?)?;

    let badge = el(document, "span", CSS_BADGE_NEUTRAL)?;
    badge.set_id(ID_TASK_STATUS_BADGE);
    append(&card, &field_row(document, "Status", &badge)?)?;

    let progress = el(document, "div", "progress")?;
    let bar = el(document, "div", "progress-bar")?;
    bar.set_id(ID_TASK_PROGRESS_BAR);
    progress.append_child(&bar)?;
    let progress_wrap = el(document, "div", "progress-wrap")?;
    progress_wrap.append_child(&progress)?;
    append(&progress_wrap, &value_span(document, ID_TASK_PROGRESS_TEXT)?)?;
    let progress_row = field_row(document, "Progress", &progress_wrap)?;
    progress_row.set_id(ID_TASK_PROGRESS_ROW);
    card.append_child(&progress_row)?;

    append(&card, &el(document, "hr", CSS_SEPARATOR)?)?;
    append(&card, &field_row(document, "Created", &value_span(document, ID_TASK_CREATED)?)?)?;
    append(&card, &field_row(document, "Updated", &value_span(document, ID_TASK_UPDATED)?)?)?;
    Ok(card)
}

fn documents_card(document: &Document) -> Result<Element, JsValue> {
    let card = el(document, "section", CSS_CARD)?;
    append(&card, &text_el(document, "h2", "card-title", "Documents")?)?;
    let list = el(document, "ul", "document-list")?;
    list.set_id(ID_TASK_DOCUMENTS);
    card.append_child(&list)?;
    Ok(card)
}

fn upload_card(document: &Document) -> Result<Element, JsValue> {
    let card = el(document, "section", CSS_CARD)?;
    append(&card, &text_el(document, "h2", "card-title", "Upload samples")?)?;
    append(&card, &text_el(
        document,
        "p",
        "page-subtitle",
        "Upload a PDF or a ZIP archive of source documents.",
    )?)?;

    let input = el(document, "input", CSS_HIDDEN)?;
    input.set_id(ID_SAMPLE_FILE_INPUT);
    input.set_attribute("type", "file")?;
    input.set_attribute("accept", SAMPLE_FILE_ACCEPT)?;
    on(&input, "change", |event: Event| {
        let name = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
            .map(|file| file.name());
        dispatch_global_message(Message::SampleFileSelected(name));
    })?;
    card.append_child(&input)?;

    let row = el(document, "div", "action-row")?;
    let choose = button(document, ID_SAMPLE_SELECT_BTN, "Choose file", CSS_BUTTON_OUTLINE)?;
    on_click(&choose, || {
        if let Some(input) = by_id(ID_SAMPLE_FILE_INPUT).and_then(|e| e.dyn_into::<HtmlElement>().ok()) {
            input.click();
        }
    })?;
    row.append_child(&choose)?;
    append(&row, &value_span(document, ID_SAMPLE_FILE_NAME)?)?;
    let upload = button(document, ID_SAMPLE_UPLOAD_BTN, "Upload", CSS_BUTTON)?;
    on_click(&upload, || dispatch_global_message(Message::UploadSample))?;
    row.append_child(&upload)?;
    card.append_child(&row)?;
    Ok(card)
}

fn fine_tune_card(document: &Document) -> Result<Element, JsValue> {
    let card = el(document, "section", CSS_CARD)?;
    card.set_id(ID_FINE_TUNE_SECTION);
    append(&card, &text_el(document, "h2", "card-title", "Fine-tune")?)?;
    let row = el(document, "div", "action-row")?;
    let select = el(document, "select", "select")?;
    select.set_id(ID_BASE_MODEL_SELECT);
    on(&select, "change", |event: Event| {
        if let Some(select) = event.target().and_then(|t| t.dyn_into::<HtmlSelectElement>().ok()) {
            dispatch_global_message(Message::SelectBaseModel(select.value()));
        }
    })?;
    row.append_child(&select)?;
    let start = button(document, ID_FINE_TUNE_BTN, "Start fine-tune", CSS_BUTTON)?;
    on_click(&start, || dispatch_global_message(Message::StartFineTune))?;
    row.append_child(&start)?;
    card.append_child(&row)?;
    Ok(card)
}

fn deploy_card(document: &Document) -> Result<Element, JsValue> {
    let card = el(document, "section", CSS_CARD)?;
    card.set_id(ID_DEPLOY_SECTION);
    append(&card, &text_el(document, "h2", "card-title", "Deploy")?)?;
    let deploy = button(document, ID_DEPLOY_BTN, "Deploy", CSS_BUTTON)?;
    on_click(&deploy, || dispatch_global_message(Message::Deploy))?;
    card.append_child(&deploy)?;
    Ok(card)
}

pub fn mount(document: &Document, container: &Element) -> Result<(), JsValue> {
    let header = el(document, "div", "page-header")?;
    let title = text_el(document, "h1", "page-title", "")?;
    title.set_id(ID_TASK_TITLE);
    header.append_child(&title)?;
    let refresh = button(document, ID_TASK_REFRESH_BTN, "Refresh", CSS_BUTTON_OUTLINE)?;
    on_click(&refresh, || dispatch_global_message(Message::RefreshTaskDetail))?;
    header.append_child(&refresh)?;
    container.append_child(&header)?;

    let loading = text_el(document, "div", CSS_LOADING, "Loading task...")?;
    loading.set_id(ID_TASK_LOADING);
    container.append_child(&loading)?;

    let body = el(document, "div", "detail-grid")?;
    body.set_id(ID_TASK_BODY);
    append(&body, &overview_card(document)?)?;
    append(&body, &documents_card(document)?)?;
    append(&body, &upload_card(document)?)?;
    append(&body, &fine_tune_card(document)?)?;
    append(&body, &deploy_card(document)?)?;
    container.append_child(&body)?;
    Ok(())
}

/// Forget the picked sample once it has been uploaded.
pub fn clear_sample_input() {
    if let Some(input) = by_id(ID_SAMPLE_FILE_INPUT).and_then(|e| e.dyn_into::<HtmlInputElement>().ok()) {
        input.set_value("");
    }
}

fn refresh_documents(document: &Document, detail: &TaskDetailState) -> Result<(), JsValue> {
    let Some(list) = document.get_element_by_id(ID_TASK_DOCUMENTS) else {
        return Ok(());
    };
    clear(&list);
    if detail.loading_documents && detail.documents.is_empty() {
        append(&list, &text_el(document, "li", CSS_LOADING, "Loading documents...")?)?;
    } else if detail.documents.is_empty() {
        append(&list, &text_el(document, "li", CSS_EMPTY_STATE, "No documents uploaded")?)?;
    } else {
        for doc in &detail.documents {
            let item = text_el(document, "li", "document-item", &doc.filename)?;
            item.set_attribute(ATTR_DATA_TESTID, &format!("document-{}", doc.id))?;
            list.append_child(&item)?;
        }
    }
    Ok(())
}

fn refresh_base_models(document: &Document, detail: &TaskDetailState) -> Result<(), JsValue> {
    let Some(select) = document
        .get_element_by_id(ID_BASE_MODEL_SELECT)
        .and_then(|e| e.dyn_into::<HtmlSelectElement>().ok())
    else {
        return Ok(());
    };
    clear(&select);
    let placeholder = text_el(document, "option", "", "Select a base model")?;
    placeholder.set_attribute("value", "")?;
    select.append_child(&placeholder)?;
    for model in &detail.base_models {
        let option = text_el(document, "option", "", model.as_str())?;
        option.set_attribute("value", model.as_str())?;
        select.append_child(&option)?;
    }
    select.set_value(&detail.selected_base_model);
    Ok(())
}

pub fn refresh(document: &Document, detail: &TaskDetailState) -> Result<(), JsValue> {
    let loaded = detail.task.as_ref();
    if let Some(loading) = by_id(ID_TASK_LOADING) {
        set_visible(&loading, loaded.is_none());
    }
    if let Some(body) = by_id(ID_TASK_BODY) {
        set_visible(&body, loaded.is_some());
    }
    let Some(task) = loaded else {
        set_text_by_id(ID_TASK_TITLE, &format!("Task {}", detail.task_id));
        return Ok(());
    };

    set_text_by_id(ID_TASK_TITLE, &task.name);
    set_text_by_id(ID_TASK_DESCRIPTION, task.description.as_deref().unwrap_or_default());
    set_text_by_id(ID_TASK_STAGE_LABEL, task.stage.label());
    if let Some(badge) = by_id(ID_TASK_STATUS_BADGE) {
        status_badge::apply(&badge, task.status_label());
    }

    if let Some(row) = by_id(ID_TASK_PROGRESS_ROW) {
        set_visible(&row, task.shows_progress());
    }
    let percent = format_percent(task.progress());
    if let Some(bar) = by_id(ID_TASK_PROGRESS_BAR) {
        bar.set_attribute("style", &format!("width: {}", percent))?;
    }
    set_text_by_id(ID_TASK_PROGRESS_TEXT, &percent);
    set_text_by_id(ID_TASK_CREATED, &format_optional_timestamp(task.created_at.as_deref()));
    set_text_by_id(ID_TASK_UPDATED, &format_optional_timestamp(task.updated_at.as_deref()));

    refresh_documents(document, detail)?;

    set_text_by_id(
        ID_SAMPLE_FILE_NAME,
        detail.selected_file_name.as_deref().unwrap_or("No file chosen"),
    );
    if let Some(upload) = by_id(ID_SAMPLE_UPLOAD_BTN) {
        set_disabled(&upload, detail.uploading || detail.selected_file_name.is_none());
        upload.set_text_content(Some(if detail.uploading { "Uploading..." } else { "Upload" }));
    }

    if let Some(section) = by_id(ID_FINE_TUNE_SECTION) {
        set_visible(&section, task.can_start_fine_tune());
    }
    refresh_base_models(document, detail)?;
    if let Some(start) = by_id(ID_FINE_TUNE_BTN) {
        set_disabled(&start, detail.fine_tuning || detail.selected_base_model.is_empty());
        start.set_text_content(Some(if detail.fine_tuning { "Starting..." } else { "Start fine-tune" }));
    }

    if let Some(section) = by_id(ID_DEPLOY_SECTION) {
        set_visible(&section, task.can_deploy());
    }
    if let Some(deploy) = by_id(ID_DEPLOY_BTN) {
        set_disabled(&deploy, detail.deploying);
        deploy.set_text_content(Some(if detail.deploying { "Deploying..." } else { "Deploy" }));
    }
    Ok(())
}
