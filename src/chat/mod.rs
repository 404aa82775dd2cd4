//! Playground chat: the conversation log, the request body and the reducer
//! that folds streamed completion chunks into the log.

pub mod conversation;
pub mod request;
pub mod stream;

pub use conversation::{AppendOutcome, ChatRole, ChatTurn, ConversationLog};
pub use request::ChatCompletionRequest;
pub use stream::{reduce_chunk, StreamProgress};
