use crate::chat::ChatCompletionRequest;
use crate::error::ApiError;
use crate::models::{BaseModel, Document, Task};
use crate::network::StreamEnd;
use crate::routes::Route;
use crate::toast::ToastKind;

#[derive(Debug)]
pub enum Message {
    /// The location hash changed (or the app just started).
    Navigate(Route),

    // Task list
    TasksLoaded(Vec<Task>),
    TasksLoadFailed(ApiError),
    CopyTaskId(String),

    // Task detail
    TaskLoaded {
        task_id: String,
        task: Task,
    },
    TaskLoadFailed {
        task_id: String,
        error: ApiError,
    },
    DocumentsLoaded {
        task_id: String,
        documents: Vec<Document>,
    },
    DocumentsLoadFailed {
        task_id: String,
        error: ApiError,
    },
    BaseModelsLoaded(Vec<BaseModel>),
    BaseModelsLoadFailed(ApiError),
    RefreshTaskDetail,
    /// File name of the sample picked in the file input, if any.
    SampleFileSelected(Option<String>),
    UploadSample,
    UploadFinished {
        task_id: String,
        result: Result<(), ApiError>,
    },
    SelectBaseModel(String),
    StartFineTune,
    FineTuneFinished {
        task_id: String,
        result: Result<(), ApiError>,
    },
    Deploy,
    DeployFinished {
        task_id: String,
        result: Result<(), ApiError>,
    },

    // Playground
    PlaygroundTasksLoaded(Vec<Task>),
    PlaygroundTasksLoadFailed(ApiError),
    SelectPlaygroundTask(String),
    SendChatMessage(String),
    ChatStreamEnded {
        session: u64,
        result: Result<StreamEnd, ApiError>,
    },
    ResetConversation,
}

pub enum Command {
    /// Execute a UI update function after state changes
    UpdateUI(Box<dyn FnOnce() + 'static>),

    Toast {
        kind: ToastKind,
        message: String,
    },
    CopyToClipboard(String),

    FetchTasks,
    FetchPlaygroundTasks,
    FetchTask(String),
    FetchDocuments(String),
    FetchBaseModels,

    /// Upload the file currently chosen in the sample file input.
    UploadSample {
        task_id: String,
    },
    StartFineTune {
        task_id: String,
        base_model: String,
    },
    Deploy {
        task_id: String,
    },

    /// Open a chat completion stream and fold it into the playground log
    /// for as long as `session` is current.
    StreamChat {
        task_id: String,
        session: u64,
        request: ChatCompletionRequest,
    },
}

impl Command {
    pub fn toast(kind: ToastKind, message: impl Into<String>) -> Self {
        Command::Toast {
            kind,
            message: message.into(),
        }
    }

    pub fn error_toast(message: impl Into<String>) -> Self {
        Self::toast(ToastKind::Error, message)
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::UpdateUI(_) => f.write_str("UpdateUI(..)"),
            Command::Toast { kind, message } => f
                .debug_struct("Toast")
                .field("kind", kind)
                .field("message", message)
                .finish(),
            Command::CopyToClipboard(text) => f.debug_tuple("CopyToClipboard").field(text).finish(),
            Command::FetchTasks => f.write_str("FetchTasks"),
            Command::FetchPlaygroundTasks => f.write_str("FetchPlaygroundTasks"),
            Command::FetchTask(id) => f.debug_tuple("FetchTask").field(id).finish(),
            Command::FetchDocuments(id) => f.debug_tuple("FetchDocuments").field(id).finish(),
            Command::FetchBaseModels => f.write_str("FetchBaseModels"),
            Command::UploadSample { task_id } => f.debug_struct("UploadSample").field("task_id", task_id).finish(),
            Command::StartFineTune { task_id, base_model } => f
                .debug_struct("StartFineTune")
                .field("task_id", task_id)
                .field("base_model", base_model)
                .finish(),
            Command::Deploy { task_id } => f.debug_struct("Deploy").field("task_id", task_id).finish(),
            Command::StreamChat { task_id, session, .. } => f
                .debug_struct("StreamChat")
                .field("task_id", task_id)
                .field("session", session)
                .finish_non_exhaustive(),
        }
    }
}
