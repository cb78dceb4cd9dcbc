//! Raw CAN frame ingestion and normalization.
//!
//! Upstream transports deliver frames in whatever shape their decoder
//! produced: identifiers as numbers or hex strings, payload bytes as
//! numbers or strings, fields missing entirely. Everything is
//! canonicalized once at this boundary; a [`RawFrame`] is immutable
//! after construction.

use serde::Deserialize;

/// Default direction tag for frames that arrive without one.
const DEFAULT_FRAME_KIND: &str = "Rx";

/// A frame identifier as delivered by upstream: numeric or string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FrameId {
    /// Numeric identifier, converted to uppercase hex on ingestion.
    Num(u64),
    /// Pre-formatted identifier, trimmed and uppercased on ingestion.
    Text(String),
}

/// A payload byte as delivered by upstream: numeric or string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FrameByte {
    /// Numeric byte value; out-of-range values normalize to `"00"`.
    Num(i64),
    /// Hex string byte value; unparseable values normalize to `"00"`.
    Text(String),
}

/// One raw frame event as pushed by the transport layer.
///
/// Every field is optional; any shape is tolerated via best-effort
/// normalization in [`RawFrame::from_event`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawFrameEvent {
    /// Milliseconds since recording start.
    pub time_offset_ms: Option<f64>,
    /// Bus identifier.
    pub id: Option<FrameId>,
    /// Payload bytes.
    pub bytes: Option<Vec<FrameByte>>,
    /// Direction/type tag, e.g. `"Rx"` or `"Tx"`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// One normalized bus message observation.
///
/// Created on ingestion, immutable thereafter, owned exclusively by the
/// recorder's raw-frame buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    /// Time offset in milliseconds since recording start.
    pub time_offset_ms: u64,
    /// Uppercase hex identifier, unpadded (zero-padded at export time).
    pub id: String,
    /// Direction/type tag.
    pub kind: String,
    /// Payload bytes as two-character uppercase hex pairs.
    pub bytes: Vec<String>,
}

impl RawFrame {
    /// Normalize an upstream event into a canonical frame.
    pub fn from_event(event: RawFrameEvent) -> Self {
        let time_offset_ms = match event.time_offset_ms {
            Some(ms) if ms.is_finite() && ms >= 0.0 => ms as u64,
            _ => 0,
        };

        let id = match event.id {
            Some(FrameId::Num(n)) => format!("{n:X}"),
            Some(FrameId::Text(s)) => s.trim().to_uppercase(),
            None => String::new(),
        };

        let bytes = event
            .bytes
            .unwrap_or_default()
            .into_iter()
            .map(normalize_byte)
            .collect();

        let kind = event
            .kind
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| DEFAULT_FRAME_KIND.to_string());

        Self {
            time_offset_ms,
            id,
            kind,
            bytes,
        }
    }
}

/// Canonicalize one payload byte to a two-character uppercase hex pair.
///
/// Invalid entries (negative, > 0xFF, unparseable strings) become `"00"`.
fn normalize_byte(byte: FrameByte) -> String {
    match byte {
        FrameByte::Num(n) if (0..=0xFF).contains(&n) => format!("{n:02X}"),
        FrameByte::Text(s) => match u8::from_str_radix(s.trim(), 16) {
            Ok(n) => format!("{n:02X}"),
            Err(_) => "00".to_string(),
        },
        FrameByte::Num(_) => "00".to_string(),
    }
}
