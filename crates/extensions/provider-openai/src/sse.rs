//! Server-sent event decoding for streamed completions.

use tracing::debug;

use quell_protocols::CapabilityError;

use crate::api::StreamChunk;

/// Splits a byte stream into `data:` events and extracts content deltas.
///
/// Events may be split across network chunks, so partial lines are kept
/// as raw bytes until their newline arrives. A multi-byte character cut in
/// two by the network is only decoded once both halves are buffered.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    done: bool,
}

impl SseDecoder {
    /// Feed raw bytes and return every content delta they complete.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<Result<String, CapabilityError>> {
        if self.done {
            return Vec::new();
        }
        self.buffer.extend_from_slice(bytes);

        let mut deltas = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=newline).collect();
            let line = match String::from_utf8(raw) {
                Ok(line) => line,
                Err(e) => {
                    deltas.push(Err(CapabilityError::StreamError(format!(
                        "invalid UTF-8 in stream event: {e}"
                    ))));
                    continue;
                }
            };
            let Some(data) = line.trim_end().strip_prefix("data:") else {
                continue;
            };
            let data = data.trim_start();
            if data == "[DONE]" {
                self.done = true;
                self.buffer.clear();
                break;
            }
            match serde_json::from_str::<StreamChunk>(data) {
                Ok(chunk) => deltas.extend(
                    chunk
                        .choices
                        .into_iter()
                        .filter_map(|choice| choice.delta.content)
                        .filter(|content| !content.is_empty())
                        .map(Ok),
                ),
                Err(e) => debug!(error = %e, "Skipping unparseable stream event"),
            }
        }
        deltas
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}
