//! Raw frame trace serialization.
//!
//! Fixed-width columns in arrival order, one line per frame, preceded
//! by a two-line descriptive header. Identifiers are zero-padded to 8
//! hex characters here, not at ingestion.

use std::fmt::Write;

use crate::recorder::RawFrame;

const HEADER: &str = ";  Voltlog raw CAN frame trace\n\
                      ;  No.   Offset(s) Typ Identifier DLC Data\n";

/// Render all frames as a UTF-8 fixed-width trace file.
pub(crate) fn render_trace(frames: &[RawFrame]) -> String {
    let mut out = String::from(HEADER);
    for (index, frame) in frames.iter().enumerate() {
        out.push_str(&render_line(index + 1, frame));
        out.push('\n');
    }
    out
}

/// One trace line: sequence number, offset seconds (3 decimals, width
/// 8), type (width 3), identifier (8 hex chars), DLC (width 2), bytes
/// (space-joined pairs, width 23).
fn render_line(seq: usize, frame: &RawFrame) -> String {
    let offset_s = format!("{:.3}", frame.time_offset_ms as f64 / 1000.0);
    let data = frame.bytes.join(" ");
    let mut line = String::new();
    // write! to a String cannot fail; ignore the fmt::Result.
    let _ = write!(
        line,
        "{seq:>6} {offset_s:<8} {kind:<3} {id:0>8} {dlc:>2} {data:<23}",
        kind = frame.kind,
        id = frame.id,
        dlc = frame.bytes.len(),
    );
    line
}
