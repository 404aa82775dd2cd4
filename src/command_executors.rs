use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlInputElement;

use crate::constants::ID_SAMPLE_FILE_INPUT;
use crate::error::ApiError;
use crate::messages::{Command, Message};
use crate::network::{pump, ApiClient};
use crate::state::dispatch_global_message;

pub fn execute(cmd: Command) {
    match cmd {
        Command::Toast { kind, message } => crate::toast::show(&message, kind),
        Command::CopyToClipboard(text) => spawn_local(async move {
            match copy_to_clipboard(&text).await {
                Ok(()) => crate::toast::success("Task ID copied to clipboard."),
                Err(e) => {
                    log::error!("clipboard write failed: {:?}", e);
                    crate::toast::error("Could not copy the task ID.");
                }
            }
        }),
        cmd @ (Command::FetchTasks
        | Command::FetchPlaygroundTasks
        | Command::FetchTask(_)
        | Command::FetchDocuments(_)
        | Command::FetchBaseModels) => execute_fetch_command(cmd),
        cmd @ (Command::UploadSample { .. } | Command::StartFineTune { .. } | Command::Deploy { .. }) => {
            execute_task_action(cmd)
        }
        Command::StreamChat {
            task_id,
            session,
            request,
        } => spawn_local(async move {
            let result = match ApiClient::open_chat_stream(&task_id, &request).await {
                Ok(mut source) => pump(&mut source, |chunk| crate::state::apply_chat_chunk(session, chunk)).await,
                Err(e) => Err(e),
            };
            dispatch_global_message(Message::ChatStreamEnded { session, result });
        }),
        Command::UpdateUI(ui_fn) => ui_fn(),
    }
}

pub fn execute_fetch_command(cmd: Command) {
    match cmd {
        Command::FetchTasks => spawn_local(async {
            dispatch_global_message(match ApiClient::list_tasks().await {
                Ok(tasks) => Message::TasksLoaded(tasks),
                Err(e) => Message::TasksLoadFailed(e),
            });
        }),
        Command::FetchPlaygroundTasks => spawn_local(async {
            dispatch_global_message(match ApiClient::list_tasks().await {
                Ok(tasks) => Message::PlaygroundTasksLoaded(tasks),
                Err(e) => Message::PlaygroundTasksLoadFailed(e),
            });
        }),
        Command::FetchTask(task_id) => spawn_local(async move {
            dispatch_global_message(match ApiClient::get_task(&task_id).await {
                Ok(task) => Message::TaskLoaded { task_id, task },
                Err(error) => Message::TaskLoadFailed { task_id, error },
            });
        }),
        Command::FetchDocuments(task_id) => spawn_local(async move {
            dispatch_global_message(match ApiClient::list_documents(&task_id).await {
                Ok(documents) => Message::DocumentsLoaded { task_id, documents },
                Err(error) => Message::DocumentsLoadFailed { task_id, error },
            });
        }),
        Command::FetchBaseModels => spawn_local(async {
            dispatch_global_message(match ApiClient::list_base_models().await {
                Ok(models) => Message::BaseModelsLoaded(models),
                Err(e) => Message::BaseModelsLoadFailed(e),
            });
        }),
        other => log::warn!("not a fetch command: {:?}", other),
    }
}

pub fn execute_task_action(cmd: Command) {
    match cmd {
        Command::UploadSample { task_id } => spawn_local(async move {
            let result = upload_selected_sample(&task_id).await;
            dispatch_global_message(Message::UploadFinished { task_id, result });
        }),
        Command::StartFineTune { task_id, base_model } => spawn_local(async move {
            let result = ApiClient::start_fine_tune(&task_id, &base_model).await;
            dispatch_global_message(Message::FineTuneFinished { task_id, result });
        }),
        Command::Deploy { task_id } => spawn_local(async move {
            let result = ApiClient::deploy(&task_id).await;
            dispatch_global_message(Message::DeployFinished { task_id, result });
        }),
        other => log::warn!("not a task action: {:?}", other),
    }
}

fn selected_file_input() -> Option<HtmlInputElement> {
    crate::dom_utils::by_id(ID_SAMPLE_FILE_INPUT)?.dyn_into().ok()
}

async fn upload_selected_sample(task_id: &str) -> Result<(), ApiError> {
    let file = selected_file_input()
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
        .ok_or_else(|| ApiError::Request("no sample file selected".into()))?;
    log::info!("uploading {} ({} bytes) to task {}", file.name(), file.size(), task_id);
    ApiClient::upload_sample(task_id, &file).await
}

/// `navigator.clipboard.writeText(text)`, looked up dynamically so insecure
/// contexts without the Clipboard API get an error instead of a panic.
async fn copy_to_clipboard(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let clipboard = Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() {
        return Err(JsValue::from_str("clipboard API unavailable"));
    }
    let write_text: Function = Reflect::get(&clipboard, &JsValue::from_str("writeText"))?.dyn_into()?;
    let promise: Promise = write_text.call1(&clipboard, &JsValue::from_str(text))?.dyn_into()?;
    JsFuture::from(promise).await?;
    Ok(())
}
