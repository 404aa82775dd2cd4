use serde::Serialize;

use super::conversation::{ChatTurn, ConversationLog};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChatTemplateKwargs {
    pub enable_thinking: bool,
}

/// Body of `POST /api/tasks/{id}/v1/chat/completions`.
///
/// The whole conversation is resent on every turn; the service is stateless.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatTurn>,
    pub chat_template_kwargs: ChatTemplateKwargs,
    pub stream: bool,
}

impl ChatCompletionRequest {
    pub fn streaming(model: impl Into<String>, log: &ConversationLog) -> Self {
        Self {
            model: model.into(),
            messages: log.turns().to_vec(),
            chat_template_kwargs: ChatTemplateKwargs::default(),
            stream: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_matches_wire_shape() {
        let mut log = ConversationLog::new();
        let id = log.push_user("hello").id.clone();
        let body = serde_json::to_value(ChatCompletionRequest::streaming("support-lora", &log)).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "support-lora",
                "messages": [{"role": "user", "content": "hello", "id": id}],
                "chat_template_kwargs": {"enable_thinking": false},
                "stream": true
            })
        );
    }
}
