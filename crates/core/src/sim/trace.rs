//! Access Trace Loader.
//!
//! Reads plain-text access traces. Each non-empty line holds one access:
//!
//! ```text
//!   # kind  address
//!   R 0x80001000
//!   W 2147487808
//!   E 0x80001040
//! ```
//!
//! The kind is one of `R`, `W`, `E`, `P` (read, write, evict, prefetch); the address is
//! decimal or `0x`-prefixed hexadecimal. Anything after a `#` is a comment.

use std::fs;
use std::path::Path;

use crate::common::data::{AccessEvent, AccessKind};
use crate::common::error::TraceError;

/// Loads and parses a trace file.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if the file cannot be read and [`TraceError::Parse`]
/// for the first malformed line.
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<AccessEvent>, TraceError> {
    let text = fs::read_to_string(path)?;
    parse_trace(&text)
}

/// Parses trace text into access events, in order.
///
/// # Errors
///
/// Returns [`TraceError::Parse`] with the one-based line number of the first
/// malformed line.
pub fn parse_trace(text: &str) -> Result<Vec<AccessEvent>, TraceError> {
    let mut events = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        events.push(parse_line(line).map_err(|reason| TraceError::Parse {
            line: idx + 1,
            reason,
        })?);
    }
    Ok(events)
}

fn parse_line(line: &str) -> Result<AccessEvent, String> {
    let mut fields = line.split_whitespace();
    let (Some(kind), Some(addr)) = (fields.next(), fields.next()) else {
        return Err(format!("expected `<kind> <address>`, got `{line}`"));
    };
    if let Some(extra) = fields.next() {
        return Err(format!("unexpected trailing field `{extra}`"));
    }
    let kind =
        AccessKind::from_mnemonic(kind).ok_or_else(|| format!("unknown access kind `{kind}`"))?;
    let addr = parse_addr(addr).ok_or_else(|| format!("invalid address `{addr}`"))?;
    Ok(AccessEvent::new(addr, kind))
}

fn parse_addr(token: &str) -> Option<u64> {
    if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        u64::from_str_radix(&hex.replace('_', ""), 16).ok()
    } else {
        token.replace('_', "").parse().ok()
    }
}

/// Renders events in the trace format accepted by [`parse_trace`].
pub fn format_trace(events: &[AccessEvent]) -> String {
    let mut out = String::with_capacity(events.len() * 16);
    for event in events {
        out.push_str(&event.to_string());
        out.push('\n');
    }
    out
}
