//! Playground reducer: model selection, sending a turn and folding the
//! streamed reply into the conversation log.

use crate::chat::{reduce_chunk, ChatCompletionRequest, StreamProgress};
use crate::error::SendError;
use crate::messages::{Command, Message};
use crate::network::StreamEnd;
use crate::state::{AppState, PlaygroundState};
use crate::toast::ToastKind;

/// Start a new, empty conversation. Any stream still running for the old
/// session is ignored from here on.
pub fn reset_session(pg: &mut PlaygroundState) {
    pg.log.clear();
    pg.streaming = false;
    pg.session = pg.session.wrapping_add(1);
}

/// Record the user's turn and build the streaming request for it.
///
/// Blank input and a second send while a reply is streaming are rejected
/// without touching the log. Without a deployed model the user turn is
/// still recorded but no request is produced.
pub fn send_message(pg: &mut PlaygroundState, input: &str) -> Result<Command, SendError> {
    if input.trim().is_empty() {
        return Err(SendError::EmptyInput);
    }
    if pg.streaming {
        return Err(SendError::StreamInFlight);
    }

    pg.log.push_user(input);

    let (task_id, model) = pg
        .selected_task()
        .and_then(|task| Some((task.id.clone(), task.lora_name()?.to_string())))
        .ok_or(SendError::NoModelSelected)?;

    pg.streaming = true;
    Ok(Command::StreamChat {
        task_id,
        session: pg.session,
        request: ChatCompletionRequest::streaming(model, &pg.log),
    })
}

/// Apply one decoded chunk of the reply stream for `session`.
pub fn apply_chunk(pg: &mut PlaygroundState, session: u64, chunk: &str) -> StreamProgress {
    if session != pg.session || !pg.streaming {
        log::debug!("dropping chunk for inactive chat session {}", session);
        return StreamProgress::Finished;
    }
    reduce_chunk(&mut pg.log, chunk)
}

/// Handles playground messages. Returns true if the message was handled.
pub fn update(state: &mut AppState, msg: &Message, commands: &mut Vec<Command>) -> bool {
    let pg = &mut state.playground;
    match msg {
        Message::PlaygroundTasksLoaded(tasks) => {
            pg.tasks = tasks.iter().filter(|t| t.is_deployed()).cloned().collect();
            pg.loading = false;
            let still_listed = pg.selected_task().is_some();
            if !still_listed {
                pg.selected_task_id = pg.tasks.first().map(|t| t.id.clone());
            }
            log::debug!("{} deployed models available", pg.tasks.len());
        }
        Message::PlaygroundTasksLoadFailed(error) => {
            pg.loading = false;
            log::error!("failed to load deployed models: {}", error);
            commands.push(Command::error_toast(format!("Failed to load models: {}", error)));
        }
        Message::SelectPlaygroundTask(task_id) => {
            if pg.tasks.iter().any(|t| &t.id == task_id) {
                pg.selected_task_id = Some(task_id.clone());
            }
        }
        Message::SendChatMessage(input) => match send_message(pg, input) {
            Ok(command) => commands.push(command),
            Err(SendError::EmptyInput) => {}
            Err(SendError::StreamInFlight) => {
                commands.push(Command::toast(ToastKind::Info, "Wait for the current reply to finish."));
            }
            Err(err @ SendError::NoModelSelected) => {
                log::error!("chat send rejected: {}", err);
                commands.push(Command::error_toast("Select a deployed model before sending."));
            }
        },
        Message::ChatStreamEnded { session, result } => {
            if *session != pg.session {
                return true;
            }
            pg.streaming = false;
            match result {
                Ok(StreamEnd::Completed) => log::debug!("chat reply complete"),
                Ok(StreamEnd::Exhausted) => log::debug!("chat stream ended without a stop event"),
                Err(error) => {
                    log::error!("chat stream failed: {}", error);
                    commands.push(Command::error_toast(format!("Chat failed: {}", error)));
                }
            }
        }
        Message::ResetConversation => {
            if pg.streaming {
                return true;
            }
            reset_session(pg);
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatRole;
    use crate::error::ApiError;
    use crate::models::{FineTuneInfo, StageInfo, Task};

    fn deployed(id: &str, lora: &str) -> Task {
        Task {
            id: id.into(),
            name: format!("task {}", id),
            fine_tune_info: Some(FineTuneInfo {
                lora_name: Some(lora.into()),
                ..Default::default()
            }),
            deployment_info: Some(StageInfo {
                status: Some("success".into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn ready() -> PlaygroundState {
        PlaygroundState {
            tasks: vec![deployed("t1", "support-lora")],
            selected_task_id: Some("t1".into()),
            ..Default::default()
        }
    }

    const HE: &str = "data: {\"choices\":[{\"delta\":{\"content\":\"He\"}}]}\n";
    const LLO: &str = "data: {\"choices\":[{\"delta\":{\"content\":\"llo\"}}]}\n";
    const STOP: &str = "data: {\"choices\":[{\"finish_reason\":\"stop\"}]}\n";

    #[test]
    fn send_builds_streaming_request() {
        let mut pg = ready();
        let cmd = send_message(&mut pg, "hi").unwrap();
        assert!(pg.streaming);
        assert_eq!(pg.log.len(), 1);
        match cmd {
            Command::StreamChat { task_id, session, request } => {
                assert_eq!(task_id, "t1");
                assert_eq!(session, pg.session);
                assert_eq!(request.model, "support-lora");
                assert!(request.stream);
                assert!(!request.chat_template_kwargs.enable_thinking);
                assert_eq!(request.messages, pg.log.turns());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn full_round_trip_he_llo_stop() {
        let mut pg = ready();
        let session = pg.session;
        send_message(&mut pg, "hi").unwrap();
        assert_eq!(apply_chunk(&mut pg, session, HE), StreamProgress::Continue);
        assert_eq!(apply_chunk(&mut pg, session, LLO), StreamProgress::Continue);
        assert_eq!(apply_chunk(&mut pg, session, STOP), StreamProgress::Finished);
        let turns = pg.log.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!((turns[0].role, turns[0].content.as_str()), (ChatRole::User, "hi"));
        assert_eq!((turns[1].role, turns[1].content.as_str()), (ChatRole::Assistant, "Hello"));
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut pg = ready();
        assert_eq!(send_message(&mut pg, "   \n").unwrap_err(), SendError::EmptyInput);
        assert!(pg.log.is_empty());
        assert!(!pg.streaming);
    }

    #[test]
    fn user_text_is_kept_verbatim() {
        let mut pg = ready();
        send_message(&mut pg, "  two spaces ").unwrap();
        assert_eq!(pg.log.turns()[0].content, "  two spaces ");
    }

    #[test]
    fn no_model_records_turn_but_sends_nothing() {
        let mut pg = PlaygroundState::default();
        assert_eq!(send_message(&mut pg, "hello").unwrap_err(), SendError::NoModelSelected);
        assert_eq!(pg.log.len(), 1);
        assert_eq!(pg.log.turns()[0].role, ChatRole::User);
        assert!(!pg.streaming);

        let mut state = AppState::new();
        let mut cmds = Vec::new();
        update(&mut state, &Message::SendChatMessage("hello".into()), &mut cmds);
        assert!(matches!(cmds.as_slice(), [Command::Toast { kind: ToastKind::Error, .. }]));
        assert_eq!(state.playground.log.len(), 1);
    }

    #[test]
    fn task_without_lora_name_counts_as_no_model() {
        let mut pg = ready();
        pg.tasks[0].fine_tune_info = None;
        assert_eq!(send_message(&mut pg, "hello").unwrap_err(), SendError::NoModelSelected);
    }

    #[test]
    fn one_stream_at_a_time() {
        let mut pg = ready();
        send_message(&mut pg, "first").unwrap();
        assert_eq!(send_message(&mut pg, "second").unwrap_err(), SendError::StreamInFlight);
        assert_eq!(pg.log.len(), 1);
    }

    #[test]
    fn stale_session_chunks_are_dropped() {
        let mut pg = ready();
        let old = pg.session;
        send_message(&mut pg, "hi").unwrap();
        reset_session(&mut pg);
        assert_eq!(apply_chunk(&mut pg, old, HE), StreamProgress::Finished);
        assert!(pg.log.is_empty());
    }

    #[test]
    fn stream_end_clears_flag_only_for_current_session() {
        let mut state = AppState::new();
        state.playground = ready();
        send_message(&mut state.playground, "hi").unwrap();
        let session = state.playground.session;
        let mut cmds = Vec::new();

        update(&mut state, &Message::ChatStreamEnded { session: session + 7, result: Ok(StreamEnd::Completed) }, &mut cmds);
        assert!(state.playground.streaming);

        let err = ApiError::Stream("reset".into());
        update(&mut state, &Message::ChatStreamEnded { session, result: Err(err) }, &mut cmds);
        assert!(!state.playground.streaming);
        assert!(matches!(cmds.as_slice(), [Command::Toast { kind: ToastKind::Error, .. }]));
    }

    #[test]
    fn loaded_tasks_keep_only_deployed_and_autoselect() {
        let mut state = AppState::new();
        let mut pending = deployed("t0", "x");
        pending.deployment_info = Some(StageInfo {
            status: Some("running".into()),
            ..Default::default()
        });
        let tasks = vec![pending, deployed("t1", "a"), deployed("t2", "b")];
        let mut cmds = Vec::new();
        update(&mut state, &Message::PlaygroundTasksLoaded(tasks), &mut cmds);
        let ids: Vec<_> = state.playground.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["t1", "t2"]);
        assert_eq!(state.playground.selected_task_id.as_deref(), Some("t1"));

        update(&mut state, &Message::SelectPlaygroundTask("t2".into()), &mut cmds);
        assert_eq!(state.playground.selected_task_id.as_deref(), Some("t2"));
        update(&mut state, &Message::SelectPlaygroundTask("t0".into()), &mut cmds);
        assert_eq!(state.playground.selected_task_id.as_deref(), Some("t2"));
    }

    #[test]
    fn reset_is_refused_while_streaming() {
        let mut state = AppState::new();
        state.playground = ready();
        send_message(&mut state.playground, "hi").unwrap();
        let mut cmds = Vec::new();
        update(&mut state, &Message::ResetConversation, &mut cmds);
        assert_eq!(state.playground.log.len(), 1);

        state.playground.streaming = false;
        update(&mut state, &Message::ResetConversation, &mut cmds);
        assert!(state.playground.log.is_empty());
    }
}
