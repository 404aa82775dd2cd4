//! Conversation log for the playground.
//!
//! Turns are kept in conversation order. An assistant turn is created by the
//! first streamed fragment after a user turn and then grown in place until
//! the next user turn.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// One message in the conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
    pub id: String,
}

impl ChatTurn {
    /// Create a turn with a freshly generated id.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            id: format!("{}-{}", role.as_str(), Uuid::new_v4()),
        }
    }
}

/// What [`ConversationLog::append_fragment`] did with a fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The fragment opened a new assistant turn.
    Started,
    /// The fragment was appended to the trailing assistant turn.
    Extended,
    /// The log was empty, nothing to attach the fragment to.
    Ignored,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConversationLog {
    turns: Vec<ChatTurn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    /// Append a user turn and return a reference to it.
    pub fn push_user(&mut self, content: impl Into<String>) -> &ChatTurn {
        self.push(ChatTurn::new(ChatRole::User, content))
    }

    /// Append an arbitrary turn (used when restoring or in tests).
    pub fn push(&mut self, turn: ChatTurn) -> &ChatTurn {
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    /// Merge a streamed assistant fragment into the log.
    pub fn append_fragment(&mut self, fragment: &str) -> AppendOutcome {
        match self.turns.last().map(|turn| turn.role) {
            Some(ChatRole::User) => {
                self.turns.push(ChatTurn::new(ChatRole::Assistant, fragment));
                AppendOutcome::Started
            }
            Some(ChatRole::Assistant) => {
                if let Some(last) = self.turns.last_mut() {
                    last.content.push_str(fragment);
                }
                AppendOutcome::Extended
            }
            None => {
                log::warn!("dropping assistant fragment: conversation has no user turn");
                AppendOutcome::Ignored
            }
        }
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn log_with(roles: &[ChatRole]) -> ConversationLog {
        let mut log = ConversationLog::new();
        for (i, role) in roles.iter().enumerate() {
            log.push(ChatTurn::new(*role, format!("turn {}", i)));
        }
        log
    }

    #[test]
    fn first_fragment_opens_assistant_turn() {
        let mut log = log_with(&[ChatRole::User]);
        assert_eq!(log.append_fragment("He"), AppendOutcome::Started);
        assert_eq!(log.len(), 2);
        let last = log.last().unwrap();
        assert_eq!(last.role, ChatRole::Assistant);
        assert_eq!(last.content, "He");
        assert!(last.id.starts_with("assistant-"));
    }

    #[test]
    fn continuation_grows_last_turn_in_place() {
        let mut log = log_with(&[ChatRole::User]);
        log.append_fragment("He");
        let id = log.last().unwrap().id.clone();
        assert_eq!(log.append_fragment("llo"), AppendOutcome::Extended);
        assert_eq!(log.len(), 2);
        assert_eq!(log.last().unwrap().content, "Hello");
        assert_eq!(log.last().unwrap().id, id);
    }

    #[test]
    fn empty_log_ignores_fragment() {
        let mut log = ConversationLog::new();
        assert_eq!(log.append_fragment("orphan"), AppendOutcome::Ignored);
        assert!(log.is_empty());
    }

    #[test]
    fn ids_are_unique() {
        let mut log = ConversationLog::new();
        log.push_user("a");
        log.append_fragment("b");
        log.push_user("c");
        log.append_fragment("d");
        let mut ids: Vec<_> = log.turns().iter().map(|t| t.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn roles_serialize_lowercase() {
        let turn = ChatTurn { role: ChatRole::Assistant, content: "x".into(), id: "1".into() };
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["role"], "assistant");
    }

    fn role_strategy() -> impl Strategy<Value = ChatRole> {
        prop_oneof![Just(ChatRole::User), Just(ChatRole::Assistant)]
    }

    proptest! {
        #[test]
        fn fragment_after_user_adds_one_turn(
            mut roles in prop::collection::vec(role_strategy(), 0..8),
            fragment in "[a-zA-Z0-9 ]{1,16}",
        ) {
            roles.push(ChatRole::User);
            let mut log = log_with(&roles);
            let before = log.clone();
            log.append_fragment(&fragment);
            prop_assert_eq!(log.len(), before.len() + 1);
            prop_assert_eq!(&log.turns()[..before.len()], before.turns());
            let last = log.last().unwrap();
            prop_assert_eq!(last.role, ChatRole::Assistant);
            prop_assert_eq!(&last.content, &fragment);
        }

        #[test]
        fn fragment_after_assistant_concatenates(
            mut roles in prop::collection::vec(role_strategy(), 0..8),
            fragment in "[a-zA-Z0-9 ]{1,16}",
        ) {
            roles.push(ChatRole::Assistant);
            let mut log = log_with(&roles);
            let before = log.clone();
            log.append_fragment(&fragment);
            prop_assert_eq!(log.len(), before.len());
            let n = before.len();
            prop_assert_eq!(&log.turns()[..n - 1], &before.turns()[..n - 1]);
            let expected = format!("{}{}", before.turns()[n - 1].content, fragment);
            prop_assert_eq!(&log.turns()[n - 1].content, &expected);
        }
    }
}
