//! Replays a captured completion stream, one read at a time, through the
//! public chat API.

use finetune_console::chat::{reduce_chunk, ChatCompletionRequest, ChatRole, ConversationLog, StreamProgress};

const TRANSCRIPT: &str = include_str!("fixtures/chat_stream.txt");

fn reads() -> Vec<&'static str> {
    TRANSCRIPT.split("---\n").collect()
}

/// Feed reads until the reducer reports the end; returns how many were used.
fn replay(log: &mut ConversationLog) -> usize {
    for (index, read) in reads().into_iter().enumerate() {
        if reduce_chunk(log, read).is_finished() {
            return index + 1;
        }
    }
    reads().len()
}

#[test]
fn transcript_builds_one_assistant_turn() {
    let mut log = ConversationLog::new();
    log.push_user("What does fine-tuning do?");

    let used = replay(&mut log);

    assert_eq!(used, 4, "reads after [DONE] must not be consumed");
    assert_eq!(log.len(), 2);
    let reply = log.last().unwrap();
    assert_eq!(reply.role, ChatRole::Assistant);
    assert_eq!(reply.content, "Fine-tuning adapts a base model to your data.");
}

#[test]
fn transcript_on_empty_log_adds_nothing() {
    let mut log = ConversationLog::new();
    replay(&mut log);
    assert!(log.is_empty());
}

#[test]
fn follow_up_request_resends_history() {
    let mut log = ConversationLog::new();
    log.push_user("What does fine-tuning do?");
    replay(&mut log);
    log.push_user("And deployment?");

    let body = serde_json::to_value(ChatCompletionRequest::streaming("support-lora", &log)).unwrap();
    let roles: Vec<&str> = body["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["role"].as_str().unwrap())
        .collect();
    assert_eq!(roles, ["user", "assistant", "user"]);
    assert_eq!(body["stream"], true);
    assert_eq!(body["model"], "support-lora");
}

#[test]
fn second_stream_opens_a_new_turn() {
    let mut log = ConversationLog::new();
    log.push_user("first");
    replay(&mut log);
    log.push_user("second");
    replay(&mut log);

    let contents: Vec<&str> = log.turns().iter().map(|t| t.content.as_str()).collect();
    assert_eq!(
        contents,
        [
            "first",
            "Fine-tuning adapts a base model to your data.",
            "second",
            "Fine-tuning adapts a base model to your data.",
        ]
    );
    assert_eq!(reduce_chunk(&mut log, "data: [DONE]\n"), StreamProgress::Finished);
}
