//! Parsing of the prompt-generation reply.
//!
//! The service returns `{"response": "<text>"}` where the text may end in
//! a `RANGE:` block holding a JSON array of parameter targets. A malformed
//! block is logged and ignored; the plain text still comes through.

use crate::Result;
use serde::Deserialize;
use tracing::debug;

const RANGE_MARKER: &str = "RANGE:";

/// One suggested parameter move from the service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParamTarget {
    #[serde(default)]
    pub parameter: String,
    #[serde(default)]
    pub target: f32,
}

/// A parsed reply: the suggestion text plus any parameter targets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PromptResponse {
    pub text: String,
    pub targets: Vec<ParamTarget>,
}

#[derive(Deserialize)]
struct GenerateReply {
    response: String,
}

/// Parse a raw reply body into text and parameter targets.
pub fn parse_reply(body: &str) -> Result<PromptResponse> {
    let reply: GenerateReply = serde_json::from_str(body)?;
    Ok(split_range_block(&reply.response))
}

/// Split generated text into the plain suggestion and the `RANGE:` targets.
///
/// Absent or unparseable range blocks yield an empty target list.
pub fn split_range_block(text: &str) -> PromptResponse {
    let Some(pos) = text.find(RANGE_MARKER) else {
        return PromptResponse {
            text: text.to_string(),
            targets: Vec::new(),
        };
    };

    let plain = &text[..pos];
    let block = text[pos + RANGE_MARKER.len()..].trim();

    let targets = match serde_json::from_str(block) {
        Ok(targets) => targets,
        Err(err) => {
            debug!(%err, "failed to parse RANGE block");
            Vec::new()
        }
    };

    PromptResponse {
        text: plain.to_string(),
        targets,
    }
}
