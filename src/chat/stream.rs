//! Reducer for streamed chat-completion responses.
//!
//! Each chunk handed to [`reduce_chunk`] is the lossy text decoding of one
//! read from the response body. Lines are processed independently: a
//! payload split across two reads fails to parse and is dropped, it is not
//! buffered for the next chunk.

use serde::Deserialize;

use super::conversation::{AppendOutcome, ConversationLog};

pub const DATA_PREFIX: &str = "data:";
pub const DONE_SENTINEL: &str = "[DONE]";
pub const FINISH_REASON_STOP: &str = "stop";

/// Whether the caller should keep reading the stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamProgress {
    Continue,
    Finished,
}

impl StreamProgress {
    pub fn is_finished(self) -> bool {
        self == StreamProgress::Finished
    }
}

#[derive(Debug, Deserialize)]
struct StreamEvent {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Option<StreamDelta>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

/// Apply every event in `chunk` to `log`.
///
/// Returns [`StreamProgress::Finished`] as soon as the `[DONE]` sentinel or a
/// `finish_reason` of `"stop"` is seen; later lines of the chunk are ignored.
pub fn reduce_chunk(log: &mut ConversationLog, chunk: &str) -> StreamProgress {
    for raw_line in chunk.lines() {
        let line = raw_line.trim();
        if line == DONE_SENTINEL {
            log::debug!("chat stream: received {}", DONE_SENTINEL);
            return StreamProgress::Finished;
        }

        // Comments, keep-alives and blank separators.
        let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
            continue;
        };
        let payload = payload.trim_start();
        if payload == DONE_SENTINEL {
            log::debug!("chat stream: received data {}", DONE_SENTINEL);
            return StreamProgress::Finished;
        }

        let event: StreamEvent = match serde_json::from_str(payload) {
            Ok(event) => event,
            Err(err) => {
                log::warn!("chat stream: dropping malformed event ({}): {}", err, payload);
                continue;
            }
        };

        let Some(choice) = event.choices.into_iter().next() else {
            continue;
        };

        if let Some(fragment) = choice
            .delta
            .and_then(|delta| delta.content)
            .filter(|content| !content.is_empty())
        {
            if log.append_fragment(&fragment) == AppendOutcome::Started {
                log::trace!("chat stream: assistant turn started");
            }
        }

        if choice.finish_reason.as_deref() == Some(FINISH_REASON_STOP) {
            log::debug!("chat stream: finish_reason=stop");
            return StreamProgress::Finished;
        }
    }

    StreamProgress::Continue
}
