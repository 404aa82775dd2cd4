//! Task list reducer.

use crate::messages::{Command, Message};
use crate::state::AppState;

/// Handles task-list messages. Returns true if the message was handled.
pub fn update(state: &mut AppState, msg: &Message, commands: &mut Vec<Command>) -> bool {
    match msg {
        Message::TasksLoaded(tasks) => {
            log::debug!("loaded {} tasks", tasks.len());
            state.tasks.tasks = tasks.clone();
            state.tasks.loading = false;
            state.tasks.error = None;
            true
        }
        Message::TasksLoadFailed(error) => {
            log::error!("failed to load tasks: {}", error);
            state.tasks.loading = false;
            state.tasks.error = Some(error.to_string());
            commands.push(Command::error_toast(format!("Failed to load tasks: {}", error)));
            true
        }
        Message::CopyTaskId(task_id) => {
            commands.push(Command::CopyToClipboard(task_id.clone()));
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::Task;

    fn task(id: &str) -> Task {
        Task {
            id: id.into(),
            name: format!("task {}", id),
            ..Default::default()
        }
    }

    #[test]
    fn loaded_tasks_replace_list() {
        let mut state = AppState::new();
        state.tasks.loading = true;
        state.tasks.error = Some("old".into());
        let mut cmds = Vec::new();
        assert!(update(&mut state, &Message::TasksLoaded(vec![task("1"), task("2")]), &mut cmds));
        assert_eq!(state.tasks.tasks.len(), 2);
        assert!(!state.tasks.loading);
        assert!(state.tasks.error.is_none());
        assert!(cmds.is_empty());
    }

    #[test]
    fn failure_is_recorded_and_toasted() {
        let mut state = AppState::new();
        state.tasks.loading = true;
        let mut cmds = Vec::new();
        let err = ApiError::Http { status: 500, message: "Server error: 500 Internal Server Error".into() };
        assert!(update(&mut state, &Message::TasksLoadFailed(err), &mut cmds));
        assert!(!state.tasks.loading);
        assert_eq!(state.tasks.error.as_deref(), Some("Server error: 500 Internal Server Error"));
        assert!(matches!(cmds.as_slice(), [Command::Toast { .. }]));
    }

    #[test]
    fn copy_goes_to_clipboard() {
        let mut state = AppState::new();
        let mut cmds = Vec::new();
        assert!(update(&mut state, &Message::CopyTaskId("abc".into()), &mut cmds));
        assert!(matches!(cmds.as_slice(), [Command::CopyToClipboard(id)] if id == "abc"));
    }

    #[test]
    fn other_messages_pass_through() {
        let mut state = AppState::new();
        let mut cmds = Vec::new();
        assert!(!update(&mut state, &Message::RefreshTaskDetail, &mut cmds));
    }
}
