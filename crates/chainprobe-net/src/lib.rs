//! Boundary serialization for the prompt-generation service.
//!
//! The probe core exposes its metrics as a [`chainprobe_analysis::MetricSet`];
//! this crate turns a snapshot of those values into the outbound request
//! payload (every metric as a stringified float, keyed by name) and parses
//! the service reply, including the optional trailing `RANGE:` block of
//! parameter targets.
//!
//! The HTTP transport itself is the caller's concern; this crate only
//! defines the wire shapes.

mod error;
mod payload;
mod response;

pub use error::{NetError, Result};
pub use payload::ProbeRequest;
pub use response::{parse_reply, split_range_block, ParamTarget, PromptResponse};
