use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub mod breadcrumb;
pub mod chat;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod reducers;
pub mod routes;
pub mod state;
pub mod update;
pub mod utils;

mod command_executors;
pub mod components;
mod constants;
pub mod dom_utils;
mod logger;
pub mod pages;
mod toast;
mod ui;
mod views;

use messages::Message;
use routes::Route;

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logger::init();
    network::init_api_config();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("should have a document on window"))?;

    ui::setup::create_base_ui(&document)?;
    listen_for_hash_changes(&window)?;

    let hash = window.location().hash()?;
    log::info!("starting at {:?}", Route::from_hash(&hash).path());
    state::dispatch_global_message(Message::Navigate(Route::from_hash(&hash)));
    Ok(())
}

fn listen_for_hash_changes(window: &web_sys::Window) -> Result<(), JsValue> {
    let on_change = Closure::wrap(Box::new(move |_: web_sys::Event| {
        let hash = web_sys::window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default();
        state::dispatch_global_message(Message::Navigate(Route::from_hash(&hash)));
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback("hashchange", on_change.as_ref().unchecked_ref())?;
    on_change.forget();
    Ok(())
}
