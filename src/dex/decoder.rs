use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

use super::events::DexEvent;
use super::types::Pubkey;

const PROGRAM_PREFIX: &str = "Program ";
const PROGRAM_DATA_PREFIX: &str = "Program data: ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid base64 event data: {0}")]
    Base64(String),

    #[error("empty event payload")]
    Empty,

    #[error("unknown event tag {0}")]
    UnknownTag(u8),

    #[error("truncated event payload: needed {needed} bytes, {remaining} left")]
    Truncated { needed: usize, remaining: usize },

    #[error("invalid side byte {0}")]
    InvalidSide(u8),

    #[error("fractional exponent {0} out of range")]
    Exponent(u64),

    #[error("log line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<DecodeError>,
    },
}

/// Turns the ordered log lines of one transaction into protocol events.
///
/// Handlers hold this as `Arc<dyn EventDecoder>` so a fake can stand in
/// during tests.
pub trait EventDecoder: Send + Sync {
    fn parse_events_from_logs(&self, logs: &[String]) -> Result<Vec<DexEvent>, DecodeError>;
}

/// Decodes `Program data:` lines emitted by a single program.
///
/// Walks the runtime's `invoke` / `success` / `failed` lines to know which
/// program is currently executing, so data logged by CPI targets or by
/// other top-level instructions is skipped. Any malformed payload from the
/// watched program fails the whole decode.
#[derive(Debug, Clone)]
pub struct LogDecoder {
    program_id: String,
}

impl LogDecoder {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id: program_id.to_string(),
        }
    }
}

impl EventDecoder for LogDecoder {
    fn parse_events_from_logs(&self, logs: &[String]) -> Result<Vec<DexEvent>, DecodeError> {
        let mut stack: Vec<&str> = Vec::new();
        let mut events = Vec::new();

        for (line_no, line) in logs.iter().enumerate() {
            if let Some(data) = line.strip_prefix(PROGRAM_DATA_PREFIX) {
                if stack.last().copied() == Some(self.program_id.as_str()) {
                    let event = decode_program_data(data).map_err(|e| DecodeError::AtLine {
                        line: line_no,
                        source: Box::new(e),
                    })?;
                    events.push(event);
                }
                continue;
            }

            let Some(rest) = line.strip_prefix(PROGRAM_PREFIX) else {
                continue;
            };
            let mut words = rest.split_whitespace();
            let (Some(program), Some(action)) = (words.next(), words.next()) else {
                continue;
            };
            // "Program log: ...", "Program return: ..." and friends
            if program.ends_with(':') {
                continue;
            }
            match action {
                "invoke" => stack.push(program),
                "success" | "failed:" => {
                    stack.pop();
                }
                _ => {}
            }
        }

        Ok(events)
    }
}

/// A `Program data:` line may carry several space-separated base64 chunks
/// (one per `sol_log_data` slice); they are concatenated into one payload.
fn decode_program_data(data: &str) -> Result<DexEvent, DecodeError> {
    let mut payload = Vec::new();
    for chunk in data.split_whitespace() {
        let bytes = STANDARD
            .decode(chunk)
            .map_err(|e| DecodeError::Base64(e.to_string()))?;
        payload.extend_from_slice(&bytes);
    }
    DexEvent::from_bytes(&payload)
}
