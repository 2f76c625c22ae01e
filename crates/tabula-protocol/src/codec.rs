//! Encode/decode contract (§4.2): decode produces a validated frame or a
//! `BadFrame(reason, raw)` signal; encode is total and stable.

use crate::Frame;

/// A frame failed to decode: unknown `type`, invalid enum value, or a
/// missing mandatory field. Carries the raw text for diagnostics.
#[derive(Debug, Clone)]
pub struct DecodeError {
    pub reason: String,
    pub raw: String,
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bad frame: {}", self.reason)
    }
}
impl std::error::Error for DecodeError {}

/// Decode a single text frame. Unknown fields are ignored (serde's
/// default); missing mandatory fields or an unrecognized `type` fail with
/// `DecodeError`.
pub fn decode(raw: &str) -> Result<Frame, DecodeError> {
    serde_json::from_str(raw).map_err(|e| DecodeError {
        reason: e.to_string(),
        raw: raw.to_string(),
    })
}

/// Encode a frame. Every in-scheme `Frame` serializes; `expect` here
/// reflects that totality, not an unchecked external input.
pub fn encode(frame: &Frame) -> String {
    serde_json::to_string(frame).expect("Frame serialization is total")
}
