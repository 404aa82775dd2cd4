//! Reading a streamed response body chunk by chunk.

use js_sys::{Reflect, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::ReadableStreamDefaultReader;

use crate::chat::StreamProgress;
use crate::error::ApiError;

/// Source of decoded text chunks.
///
/// `next_chunk` yields `Ok(None)` once the body is exhausted.
#[allow(async_fn_in_trait)]
pub trait ChunkSource {
    async fn next_chunk(&mut self) -> Result<Option<String>, ApiError>;

    /// Stop reading and give the underlying stream back.
    async fn release(&mut self);
}

/// How a stream ended when no error occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamEnd {
    /// The consumer saw a terminal event.
    Completed,
    /// The body ended before any terminal event.
    Exhausted,
}

/// Feed every chunk of `source` to `on_chunk` until it reports
/// [`StreamProgress::Finished`], the body ends, or a read fails. The source
/// is released in all three cases.
pub async fn pump<S, F>(source: &mut S, mut on_chunk: F) -> Result<StreamEnd, ApiError>
where
    S: ChunkSource,
    F: FnMut(&str) -> StreamProgress,
{
    let outcome = loop {
        match source.next_chunk().await {
            Ok(Some(chunk)) => {
                if on_chunk(&chunk).is_finished() {
                    break Ok(StreamEnd::Completed);
                }
            }
            Ok(None) => break Ok(StreamEnd::Exhausted),
            Err(err) => break Err(err),
        }
    };
    source.release().await;
    outcome
}

/// [`ChunkSource`] over a fetch response body.
pub struct ReaderSource {
    reader: ReadableStreamDefaultReader,
    released: bool,
}

impl ReaderSource {
    pub fn new(reader: ReadableStreamDefaultReader) -> Self {
        Self { reader, released: false }
    }
}

fn field(target: &JsValue, name: &str) -> Result<JsValue, ApiError> {
    Reflect::get(target, &JsValue::from_str(name)).map_err(ApiError::stream)
}

impl ChunkSource for ReaderSource {
    async fn next_chunk(&mut self) -> Result<Option<String>, ApiError> {
        if self.released {
            return Ok(None);
        }
        let result = JsFuture::from(self.reader.read()).await.map_err(ApiError::stream)?;
        if field(&result, "done")?.as_bool().unwrap_or(false) {
            return Ok(None);
        }
        let value = field(&result, "value")?;
        let bytes = match value.dyn_into::<Uint8Array>() {
            Ok(array) => array.to_vec(),
            Err(other) => return Err(ApiError::Stream(format!("unexpected chunk type: {:?}", other))),
        };
        // Each read is decoded on its own; a multi-byte sequence split
        // across reads becomes U+FFFD.
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }

    async fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(err) = JsFuture::from(self.reader.cancel()).await {
            log::debug!("cancel on finished stream: {:?}", err);
        }
        #[allow(clippy::let_unit_value)]
        let _ = self.reader.release_lock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{reduce_chunk, ChatRole, ConversationLog};
    use futures::executor::block_on;
    use std::collections::VecDeque;

    struct ScriptedSource {
        chunks: VecDeque<Result<Option<String>, ApiError>>,
        reads: usize,
        released: usize,
    }

    impl ScriptedSource {
        fn new(chunks: Vec<Result<Option<String>, ApiError>>) -> Self {
            Self { chunks: chunks.into(), reads: 0, released: 0 }
        }

        fn text(chunks: &[&str]) -> Self {
            let mut script: Vec<_> = chunks.iter().map(|c| Ok(Some(c.to_string()))).collect();
            script.push(Ok(None));
            Self::new(script)
        }
    }

    impl ChunkSource for ScriptedSource {
        async fn next_chunk(&mut self) -> Result<Option<String>, ApiError> {
            self.reads += 1;
            self.chunks.pop_front().unwrap_or(Ok(None))
        }

        async fn release(&mut self) {
            self.released += 1;
        }
    }

    fn user_log() -> ConversationLog {
        let mut log = ConversationLog::new();
        log.push_user("hi");
        log
    }

    const HE: &str = "data: {\"choices\":[{\"delta\":{\"content\":\"He\"}}]}\n";
    const LLO: &str = "data: {\"choices\":[{\"delta\":{\"content\":\"llo\"}}]}\n";
    const STOP: &str = "data: {\"choices\":[{\"finish_reason\":\"stop\"}]}\n";

    #[test]
    fn stops_reading_after_stop_and_releases() {
        let mut log = user_log();
        let mut source = ScriptedSource::text(&[HE, LLO, STOP, HE]);
        let end = block_on(pump(&mut source, |chunk| reduce_chunk(&mut log, chunk)));
        assert_eq!(end, Ok(StreamEnd::Completed));
        assert_eq!(source.reads, 3);
        assert_eq!(source.released, 1);
        assert_eq!(log.len(), 2);
        assert_eq!(log.last().unwrap().role, ChatRole::Assistant);
        assert_eq!(log.last().unwrap().content, "Hello");
    }

    #[test]
    fn done_sentinel_ends_the_whole_stream() {
        let mut log = user_log();
        let mut source = ScriptedSource::text(&[HE, "[DONE]\n", LLO]);
        let end = block_on(pump(&mut source, |chunk| reduce_chunk(&mut log, chunk)));
        assert_eq!(end, Ok(StreamEnd::Completed));
        assert_eq!(source.reads, 2);
        assert_eq!(log.last().unwrap().content, "He");
    }

    #[test]
    fn end_of_body_without_terminal_event() {
        let mut log = user_log();
        let mut source = ScriptedSource::text(&[HE, LLO]);
        let end = block_on(pump(&mut source, |chunk| reduce_chunk(&mut log, chunk)));
        assert_eq!(end, Ok(StreamEnd::Exhausted));
        assert_eq!(source.released, 1);
        assert_eq!(log.last().unwrap().content, "Hello");
    }

    #[test]
    fn read_failure_keeps_partial_reply() {
        let mut log = user_log();
        let mut source = ScriptedSource::new(vec![
            Ok(Some(HE.to_string())),
            Err(ApiError::Stream("connection reset".into())),
            Ok(Some(LLO.to_string())),
        ]);
        let end = block_on(pump(&mut source, |chunk| reduce_chunk(&mut log, chunk)));
        assert_eq!(end, Err(ApiError::Stream("connection reset".into())));
        assert_eq!(source.released, 1);
        assert_eq!(log.last().unwrap().content, "He");
    }

    #[test]
    fn consumer_can_stop_the_pump() {
        let mut source = ScriptedSource::text(&["a", "b", "c"]);
        let mut seen = Vec::new();
        let end = block_on(pump(&mut source, |chunk| {
            seen.push(chunk.to_string());
            if chunk == "b" {
                StreamProgress::Finished
            } else {
                StreamProgress::Continue
            }
        }));
        assert_eq!(end, Ok(StreamEnd::Completed));
        assert_eq!(seen, ["a", "b"]);
    }
}
