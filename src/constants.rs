//! Constants for the console
//!
//! Centralizes element ids, CSS class names and API status strings so the
//! pages, reducers and tests agree on them.

// Shell layout
pub const ID_APP_SHELL: &str = "app-shell";
pub const ID_SIDEBAR: &str = "app-sidebar";
pub const ID_BREADCRUMB: &str = "breadcrumb";
pub const ID_PAGE_CONTENT: &str = "page-content";
pub const ATTR_DATA_PAGE: &str = "data-page";
pub const ATTR_DATA_TESTID: &str = "data-testid";
pub const ATTR_DATA_ROUTE: &str = "data-route";
pub const ATTR_DATA_TURN_ID: &str = "data-turn-id";
pub const ATTR_DATA_COPY_TASK_ID: &str = "data-copy-task-id";
pub const ID_APP_STYLES: &str = "app-styles";

// CSS Class Names
pub const CSS_HIDDEN: &str = "hidden";
pub const CSS_VISIBLE: &str = "visible";
pub const CSS_CARD: &str = "card";
pub const CSS_FIELD_ROW: &str = "field-row";
pub const CSS_FIELD_LABEL: &str = "field-label";
pub const CSS_SEPARATOR: &str = "separator";
pub const CSS_BUTTON: &str = "btn";
pub const CSS_BUTTON_OUTLINE: &str = "btn btn-outline";
pub const CSS_NAV_ITEM: &str = "nav-item";
pub const CSS_NAV_ITEM_ACTIVE: &str = "nav-item active";
pub const CSS_EMPTY_STATE: &str = "empty-state";
pub const CSS_LOADING: &str = "loading-indicator";
pub const CSS_PRESERVE_WHITESPACE: &str = "preserve-whitespace";

// Badge colours, keyed by status family
pub const CSS_BADGE_SUCCESS: &str = "badge badge-green";
pub const CSS_BADGE_RUNNING: &str = "badge badge-blue";
pub const CSS_BADGE_PENDING: &str = "badge badge-yellow";
pub const CSS_BADGE_FAILED: &str = "badge badge-red";
pub const CSS_BADGE_NEUTRAL: &str = "badge badge-gray";

// Task list page
pub const ID_TASKS_TABLE_BODY: &str = "tasks-table-body";
pub const ID_TASKS_REFRESH_BTN: &str = "tasks-refresh-btn";

// Task detail page
pub const ID_TASK_TITLE: &str = "task-title";
pub const ID_TASK_LOADING: &str = "task-loading";
pub const ID_TASK_BODY: &str = "task-body";
pub const ID_TASK_REFRESH_BTN: &str = "task-refresh-btn";
pub const ID_TASK_DESCRIPTION: &str = "task-description";
pub const ID_TASK_STAGE_LABEL: &str = "task-stage-label";
pub const ID_TASK_STATUS_BADGE: &str = "task-status-badge";
pub const ID_TASK_PROGRESS_ROW: &str = "task-progress-row";
pub const ID_TASK_PROGRESS_BAR: &str = "task-progress-bar";
pub const ID_TASK_PROGRESS_TEXT: &str = "task-progress-text";
pub const ID_TASK_CREATED: &str = "task-created";
pub const ID_TASK_UPDATED: &str = "task-updated";
pub const ID_TASK_DOCUMENTS: &str = "task-documents";
pub const ID_SAMPLE_FILE_INPUT: &str = "sample-file-input";
pub const ID_SAMPLE_SELECT_BTN: &str = "sample-select-btn";
pub const ID_SAMPLE_UPLOAD_BTN: &str = "sample-upload-btn";
pub const ID_SAMPLE_FILE_NAME: &str = "sample-file-name";
pub const ID_FINE_TUNE_SECTION: &str = "fine-tune-section";
pub const ID_BASE_MODEL_SELECT: &str = "base-model-select";
pub const ID_FINE_TUNE_BTN: &str = "fine-tune-btn";
pub const ID_DEPLOY_SECTION: &str = "deploy-section";
pub const ID_DEPLOY_BTN: &str = "deploy-btn";
pub const SAMPLE_FILE_ACCEPT: &str = ".pdf,.zip";

// Playground page
pub const ID_CHAT_MESSAGES: &str = "chat-messages";
pub const ID_CHAT_MODEL_SELECT: &str = "chat-model-select";
pub const ID_CHAT_INPUT: &str = "chat-input";
pub const ID_CHAT_SEND_BTN: &str = "chat-send-btn";
pub const ID_CHAT_RESET_BTN: &str = "chat-reset-btn";
pub const ID_CHAT_EMPTY: &str = "chat-empty";
pub const ID_CHAT_TYPING: &str = "chat-typing";
pub const CSS_CHAT_ROW_USER: &str = "chat-row user";
pub const CSS_CHAT_ROW_ASSISTANT: &str = "chat-row assistant";

// Task status values reported by the service
pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_RUNNING: &str = "running";
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_FAILED: &str = "failed";

// Fallback labels when a stage has not reported a status yet
pub const STATUS_NOT_UPLOADED: &str = "Not uploaded";
pub const STATUS_NOT_GENERATED: &str = "Not generated";
pub const STATUS_NOT_FINE_TUNED: &str = "Not fine-tuned";
pub const STATUS_NOT_DEPLOYED: &str = "Not deployed";
pub const STATUS_UNKNOWN_STAGE: &str = "Unknown stage";

// Branding / navigation
pub const APP_TITLE: &str = "OpenAgents SDK";
pub const BRAND_NAME: &str = "Microsoft";
pub const BRAND_PLAN: &str = "Enterprise";
pub const NAV_MAIN: &[(&str, &str)] = &[("Playground", "#/playground"), ("Tasks", "#/tasks")];
pub const NAV_SECONDARY: &[(&str, &str)] = &[("Support", "#"), ("Feedback", "#")];

// Table cell budget for task descriptions (grapheme clusters)
pub const DESCRIPTION_PREVIEW_LEN: usize = 120;
