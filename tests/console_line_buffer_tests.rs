//! Line buffer tests

use avalanche_diag::console::line_buffer::{LineBuffer, LINE_SIZE};

#[test]
fn test_line_buffer_push() {
    let mut buf = LineBuffer::new();

    assert!(buf.push(b'h'));
    assert!(buf.push(b'e'));
    assert!(buf.push(b'l'));
    assert!(buf.push(b'p'));

    assert_eq!(buf.as_str(), "help");
    assert_eq!(buf.len(), 4);
}

#[test]
fn test_line_buffer_backspace() {
    let mut buf = LineBuffer::new();

    buf.push(b'h');
    buf.push(b'e');
    buf.push(b'l');
    buf.push(b'p');
    buf.backspace();
    buf.backspace();

    assert_eq!(buf.as_str(), "he");
}

#[test]
fn test_line_buffer_backspace_empty() {
    let mut buf = LineBuffer::new();

    buf.backspace(); // should not panic
    assert_eq!(buf.as_str(), "");
    assert_eq!(buf.len(), 0);
}

#[test]
fn test_line_buffer_clear() {
    let mut buf = LineBuffer::new();

    buf.push(b'h');
    buf.push(b'i');
    buf.clear();

    assert_eq!(buf.as_str(), "");
    assert!(buf.is_empty());
}

#[test]
fn test_line_buffer_overflow_keeps_terminator_slot() {
    let mut buf = LineBuffer::new();

    // Push more characters than the buffer holds
    for i in 0..LINE_SIZE + 10 {
        buf.push(b'a' + (i % 26) as u8);
    }

    // One slot stays reserved for the terminator
    assert_eq!(buf.len(), LINE_SIZE - 1);
    assert!(!buf.push(b'z'));
}

#[test]
fn test_take_resets_buffer() {
    let mut buf = LineBuffer::new();

    buf.push(b'x');
    buf.push(b'y');

    let line = buf.take();
    assert_eq!(line.as_str(), "xy");
    assert_eq!(line.len(), 2);
    assert!(!line.is_empty());

    // Buffer is empty again, line is unaffected by further edits
    assert!(buf.is_empty());
    buf.push(b'z');
    assert_eq!(line.as_str(), "xy");
}

#[test]
fn test_take_empty_buffer_yields_empty_line() {
    let mut buf = LineBuffer::new();

    let line = buf.take();
    assert_eq!(line.as_str(), "");
    assert!(line.is_empty());
}
