//! # Trace Format Tests
//!
//! Parsing of `<kind> <address>` lines, comments, error locations, and file loading.

use std::io::Write;

use phasedet_core::common::{AccessEvent, AccessKind, TraceError};
use phasedet_core::sim::trace::{format_trace, load_trace, parse_trace};
use pretty_assertions::assert_eq;

#[test]
fn parses_kinds_comments_and_blank_lines() {
    let text = "# captured from L1\nR 0x1000\n\nw 4096   # store\nE 0x2000\nP 0x3000\n";
    let events = parse_trace(text).unwrap();
    assert_eq!(
        events,
        vec![
            AccessEvent::read(0x1000),
            AccessEvent::write(4096),
            AccessEvent::new(0x2000, AccessKind::Evict),
            AccessEvent::new(0x3000, AccessKind::Prefetch),
        ]
    );
}

#[test]
fn error_reports_one_based_line() {
    let err = parse_trace("R 0x10\n# fine\nX 0x20\n").unwrap_err();
    match err {
        TraceError::Parse { line, reason } => {
            assert_eq!(line, 3);
            assert!(reason.contains('X'), "reason: {reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn malformed_lines_are_rejected() {
    for bad in ["R", "R 0x10 extra", "R 0xZZ", "W -5"] {
        assert!(
            matches!(parse_trace(bad), Err(TraceError::Parse { line: 1, .. })),
            "accepted `{bad}`"
        );
    }
}

#[test]
fn formatted_trace_parses_back() {
    let events = vec![
        AccessEvent::read(0x8000_0000),
        AccessEvent::new(0x40, AccessKind::Evict),
    ];
    let text = format_trace(&events);
    assert_eq!(text, "R 0x80000000\nE 0x40\n");
    assert_eq!(parse_trace(&text).unwrap(), events);
}

#[test]
fn loads_trace_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "R 0x100\nR 0x140\n").unwrap();
    let events = load_trace(file.path()).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1], AccessEvent::read(0x140));
}

#[test]
fn missing_trace_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_trace(dir.path().join("missing.trace")),
        Err(TraceError::Io(_))
    ));
}
