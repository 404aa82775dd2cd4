//! Chat playground: talk to a deployed fine-tune.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlInputElement, HtmlSelectElement, KeyboardEvent};

use crate::chat::{ChatRole, ChatTurn, ConversationLog};
use crate::constants::*;
use crate::dom_utils::{append, button, by_id, clear, el, focus, on, on_click, scroll_to_bottom, set_disabled, set_visible, text_el};
use crate::messages::Message;
use crate::state::{dispatch_global_message, PlaygroundState, APP_STATE};

fn chat_input() -> Option<HtmlInputElement> {
    by_id(ID_CHAT_INPUT)?.dyn_into().ok()
}

/// Take the typed text and dispatch it. The input is left alone while a
/// reply is streaming so nothing typed is lost.
fn submit() {
    let Some(input) = chat_input() else { return };
    let text = input.value();
    if text.trim().is_empty() {
        return;
    }
    let busy = APP_STATE.with(|state| state.borrow().playground.streaming);
    if busy {
        return;
    }
    input.set_value("");
    dispatch_global_message(Message::SendChatMessage(text));
}

pub fn mount(document: &Document, container: &Element) -> Result<(), JsValue> {
    let page = el(document, "div", "playground")?;

    let messages = el(document, "div", "chat-messages")?;
    messages.set_id(ID_CHAT_MESSAGES);
    messages.set_attribute("aria-live", "polite")?;
    page.append_child(&messages)?;

    let empty = text_el(
        document,
        "div",
        CSS_EMPTY_STATE,
        "Pick a deployed model and send a message to start chatting.",
    )?;
    empty.set_id(ID_CHAT_EMPTY);
    page.append_child(&empty)?;

    let typing = text_el(document, "div", "chat-typing", "Assistant is thinking...")?;
    typing.set_id(ID_CHAT_TYPING);
    page.append_child(&typing)?;

    let composer = el(document, "div", "chat-composer")?;

    let select = el(document, "select", "select")?;
    select.set_id(ID_CHAT_MODEL_SELECT);
    on(&select, "change", |event: Event| {
        if let Some(select) = event.target().and_then(|t| t.dyn_into::<HtmlSelectElement>().ok()) {
            dispatch_global_message(Message::SelectPlaygroundTask(select.value()));
        }
    })?;
    composer.append_child(&select)?;

    let input = el(document, "input", "input")?;
    input.set_id(ID_CHAT_INPUT);
    input.set_attribute("type", "text")?;
    input.set_attribute("placeholder", "Type your message...")?;
    input.set_attribute("autocomplete", "off")?;
    on(&input, "keydown", |event: Event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else { return };
        if key.key() == "Enter" && !key.shift_key() && !key.is_composing() {
            event.prevent_default();
            submit();
        }
    })?;
    composer.append_child(&input)?;

    let send = button(document, ID_CHAT_SEND_BTN, "Send", CSS_BUTTON)?;
    on_click(&send, submit)?;
    composer.append_child(&send)?;

    let reset = button(document, ID_CHAT_RESET_BTN, "New chat", CSS_BUTTON_OUTLINE)?;
    on_click(&reset, || dispatch_global_message(Message::ResetConversation))?;
    composer.append_child(&reset)?;

    page.append_child(&composer)?;
    container.append_child(&page)?;
    focus(&input);
    Ok(())
}

fn turn_row(document: &Document, turn: &ChatTurn) -> Result<Element, JsValue> {
    let (class, initial) = match turn.role {
        ChatRole::User => (CSS_CHAT_ROW_USER, "U"),
        ChatRole::Assistant => (CSS_CHAT_ROW_ASSISTANT, "A"),
    };
    let row = el(document, "div", class)?;
    row.set_attribute(ATTR_DATA_TURN_ID, &turn.id)?;
    append(&row, &text_el(document, "span", "chat-avatar", initial)?)?;
    append(&row, &text_el(
        document,
        "div",
        &format!("chat-bubble {}", CSS_PRESERVE_WHITESPACE),
        &turn.content,
    )?)?;
    Ok(row)
}

/// Bring `#chat-messages` in line with the log. Rows are keyed by turn id, so
/// a growing assistant reply only rewrites its own bubble.
fn render_turns(document: &Document, container: &Element, log: &ConversationLog) -> Result<(), JsValue> {
    let rows = container.children();
    let mut keep = 0;
    for (index, turn) in log.turns().iter().enumerate() {
        let Some(row) = rows.item(index as u32) else { break };
        if row.get_attribute(ATTR_DATA_TURN_ID).as_deref() != Some(turn.id.as_str()) {
            break;
        }
        if let Some(bubble) = row.last_element_child() {
            if bubble.text_content().as_deref() != Some(turn.content.as_str()) {
                bubble.set_text_content(Some(&turn.content));
            }
        }
        keep = index + 1;
    }

    while container.child_element_count() as usize > keep {
        match container.last_element_child() {
            Some(extra) => extra.remove(),
            None => break,
        }
    }
    for turn in &log.turns()[keep..] {
        append(&container, &turn_row(document, turn)?)?;
    }
    Ok(())
}

fn render_conversation(document: &Document, pg: &PlaygroundState) -> Result<(), JsValue> {
    let Some(container) = document.get_element_by_id(ID_CHAT_MESSAGES) else {
        return Ok(());
    };
    render_turns(document, &container, &pg.log)?;

    if let Some(empty) = by_id(ID_CHAT_EMPTY) {
        set_visible(&empty, pg.log.is_empty());
    }
    let waiting = pg.streaming && pg.log.last().map(|t| t.role) == Some(ChatRole::User);
    if let Some(typing) = by_id(ID_CHAT_TYPING) {
        set_visible(&typing, waiting);
    }
    scroll_to_bottom(&container);
    Ok(())
}

/// Redraw only the message list; called for every streamed chunk.
pub fn refresh_conversation(document: &Document) -> Result<(), JsValue> {
    APP_STATE.with(|state| render_conversation(document, &state.borrow().playground))
}

fn refresh_models(document: &Document, pg: &PlaygroundState) -> Result<(), JsValue> {
    let Some(select) = document
        .get_element_by_id(ID_CHAT_MODEL_SELECT)
        .and_then(|e| e.dyn_into::<HtmlSelectElement>().ok())
    else {
        return Ok(());
    };
    clear(&select);
    if pg.tasks.is_empty() {
        let text = if pg.loading { "Loading models..." } else { "No deployed models" };
        let option = text_el(document, "option", "", text)?;
        option.set_attribute("value", "")?;
        select.append_child(&option)?;
    }
    for task in &pg.tasks {
        let option = text_el(document, "option", "", task.lora_name().unwrap_or(&task.name))?;
        option.set_attribute("value", &task.id)?;
        select.append_child(&option)?;
    }
    select.set_value(pg.selected_task_id.as_deref().unwrap_or_default());
    set_disabled(&select, pg.tasks.is_empty());
    Ok(())
}

pub fn refresh(document: &Document, pg: &PlaygroundState) -> Result<(), JsValue> {
    refresh_models(document, pg)?;
    render_conversation(document, pg)?;
    if let Some(send) = by_id(ID_CHAT_SEND_BTN) {
        set_disabled(&send, pg.streaming);
    }
    if let Some(reset) = by_id(ID_CHAT_RESET_BTN) {
        set_disabled(&reset, pg.streaming || pg.log.is_empty());
    }
    Ok(())
}
