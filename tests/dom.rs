//! Browser tests for the DOM-rendering components.
//!
//! Run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use finetune_console::breadcrumb::{generate_breadcrumbs, BreadcrumbContext};
use finetune_console::components::{breadcrumb_bar, status_badge};
use finetune_console::models::Task;
use finetune_console::{dom_utils, pages};
use finetune_console::state::TaskListState;
use wasm_bindgen_test::*;
use web_sys::{Document, Element};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Attach a fresh `<div>` to the body; callers remove it when done.
fn scratch(document: &Document, id: &str) -> Element {
    let div = document.create_element(if id == "breadcrumb" { "nav" } else { "div" }).unwrap();
    div.set_id(id);
    document.body().unwrap().append_child(&div).unwrap();
    div
}

fn task(id: &str, name: &str) -> Task {
    Task {
        id: id.into(),
        name: name.into(),
        description: Some("Answers billing questions".into()),
        ..Default::default()
    }
}

#[wasm_bindgen_test]
fn status_badge_carries_status_colour() {
    let document = document();
    let badge = status_badge::create(&document, "running").unwrap();
    assert_eq!(badge.class_name(), "badge badge-blue");
    assert_eq!(badge.text_content().unwrap(), "running");

    status_badge::apply(&badge, "failed");
    assert_eq!(badge.class_name(), "badge badge-red");
}

#[wasm_bindgen_test]
fn breadcrumb_bar_links_all_but_last() {
    let document = document();
    let nav = scratch(&document, "breadcrumb");

    let mut ctx = BreadcrumbContext::new();
    ctx.set_info([(BreadcrumbContext::task_key("abc123"), "Support bot")]);
    let trail = generate_breadcrumbs("/tasks/abc123", &ctx);
    breadcrumb_bar::render(&document, &trail).unwrap();

    let links = nav.query_selector_all("a.breadcrumb-link").unwrap();
    assert_eq!(links.length(), 2);
    let current = nav.query_selector("[aria-current=page]").unwrap().unwrap();
    assert_eq!(current.text_content().unwrap(), "Support bot");
    let tasks_link = nav.query_selector("a[href='#/tasks']").unwrap();
    assert!(tasks_link.is_some());

    nav.remove();
}

#[wasm_bindgen_test]
fn tasks_page_renders_rows_and_empty_state() {
    let document = document();
    let container = scratch(&document, "tasks-scratch");
    pages::tasks::mount(&document, &container).unwrap();

    let mut state = TaskListState {
        loading: true,
        ..Default::default()
    };
    pages::tasks::refresh(&document, &state).unwrap();
    let body = document.get_element_by_id("tasks-table-body").unwrap();
    assert_eq!(body.text_content().unwrap(), "Loading tasks...");

    state.loading = false;
    pages::tasks::refresh(&document, &state).unwrap();
    assert_eq!(body.text_content().unwrap(), "No results.");

    state.tasks = vec![task("7", "Support bot"), task("8", "Triage")];
    pages::tasks::refresh(&document, &state).unwrap();
    assert_eq!(body.child_element_count(), 2);
    let row = body.query_selector("[data-testid=task-row-7]").unwrap().unwrap();
    assert!(row.text_content().unwrap().contains("Support bot"));
    let copy = row.query_selector("[data-copy-task-id]").unwrap().unwrap();
    assert_eq!(copy.get_attribute("data-copy-task-id").as_deref(), Some("7"));
    let link = row.query_selector("a").unwrap().unwrap();
    assert_eq!(link.get_attribute("href").as_deref(), Some("#/tasks/7"));

    container.remove();
}

#[wasm_bindgen_test]
fn pages_mount_their_nested_layout() {
    let document = document();
    let container = scratch(&document, "mount-scratch");

    pages::home::mount(&document, &container).unwrap();
    let hero = container.query_selector("[data-testid=home]").unwrap().unwrap();
    assert_eq!(hero.child_element_count(), 2);

    container.set_inner_html("");
    pages::task_detail::mount(&document, &container).unwrap();
    let grid = document.get_element_by_id("task-body").unwrap();
    assert_eq!(grid.child_element_count(), 5);
    assert!(document.get_element_by_id("task-progress-text").is_some());

    let nested = document.create_element("div").unwrap();
    dom_utils::append(&container, &nested).unwrap();
    assert_eq!(container.last_element_child().unwrap(), nested);

    container.remove();
}
