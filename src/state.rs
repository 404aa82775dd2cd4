use std::cell::RefCell;

use wasm_bindgen::JsValue;

use crate::breadcrumb::BreadcrumbContext;
use crate::chat::{ConversationLog, StreamProgress};
use crate::messages::{Command, Message};
use crate::models::{BaseModel, Document, Task};
use crate::routes::Route;

#[derive(Debug, Default)]
pub struct TaskListState {
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Everything the task detail page shows for one task.
#[derive(Debug, Default)]
pub struct TaskDetailState {
    pub task_id: String,
    pub task: Option<Task>,
    pub loading_task: bool,
    pub documents: Vec<Document>,
    pub loading_documents: bool,
    pub base_models: Vec<BaseModel>,
    pub selected_base_model: String,
    /// Name of the file picked in the sample input; the file itself stays in
    /// the `<input type=file>` until upload.
    pub selected_file_name: Option<String>,
    pub uploading: bool,
    pub fine_tuning: bool,
    pub deploying: bool,
}

impl TaskDetailState {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            loading_task: true,
            loading_documents: true,
            ..Default::default()
        }
    }
}

/// Chat playground session.
///
/// `session` is bumped on every reset; stream chunks tagged with an older
/// session are discarded.
#[derive(Debug, Default)]
pub struct PlaygroundState {
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub selected_task_id: Option<String>,
    pub log: ConversationLog,
    pub streaming: bool,
    pub session: u64,
}

impl PlaygroundState {
    pub fn selected_task(&self) -> Option<&Task> {
        let id = self.selected_task_id.as_deref()?;
        self.tasks.iter().find(|t| t.id == id)
    }
}

#[derive(Debug, Default)]
pub struct AppState {
    pub route: Route,
    pub breadcrumbs: BreadcrumbContext,
    pub tasks: TaskListState,
    pub task_detail: Option<TaskDetailState>,
    pub playground: PlaygroundState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, msg: Message) -> Vec<Command> {
        crate::update::update(self, msg)
    }

    /// Re-render the current page from state.
    pub fn refresh_ui_after_state_change() -> Result<(), JsValue> {
        let document = crate::dom_utils::document()?;
        crate::views::render_active_view(&document)
    }
}

// We use thread_local to store our app state
thread_local! {
    pub static APP_STATE: RefCell<AppState> = RefCell::new(AppState::new());
}

pub fn dispatch_global_message(msg: Message) {
    // 1. Perform state updates and collect commands
    let commands = APP_STATE.with(|state| state.borrow_mut().dispatch(msg));

    // 2. Refresh the view before running side effects, so loading flags set
    //    by the reducer are visible while requests are in flight.
    if let Err(e) = AppState::refresh_ui_after_state_change() {
        log::error!("failed to refresh UI: {:?}", e);
    }

    // 3. Execute commands after state borrow is dropped
    for cmd in commands {
        match cmd {
            Command::UpdateUI(ui_fn) => ui_fn(),
            other => crate::command_executors::execute(other),
        }
    }
}

/// Fold one streamed chunk into the playground log and redraw the
/// conversation. Chunks from a stale session end that stream.
pub fn apply_chat_chunk(session: u64, chunk: &str) -> StreamProgress {
    let progress = APP_STATE.with(|state| {
        crate::reducers::playground::apply_chunk(&mut state.borrow_mut().playground, session, chunk)
    });
    if let Ok(document) = crate::dom_utils::document() {
        if let Err(e) = crate::pages::playground::refresh_conversation(&document) {
            log::error!("failed to render conversation: {:?}", e);
        }
    }
    progress
}
