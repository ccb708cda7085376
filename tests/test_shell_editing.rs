//! Line editing tests.
//!
//! Tests backspace, escape-sequence swallowing, line noise, line length
//! limits and line terminators as seen through the console.

#[allow(clippy::duplicate_mod)]
#[path = "helpers.rs"]
mod helpers;

const ERASE: &str = "\x08 \x08";

// ============================================================================
// Backspace
// ============================================================================

#[test]
fn test_backspace_erases_last_character() {
    let (mut shell, console, _params) = helpers::create_test_shell();

    helpers::type_input(&mut shell, &console, "statusx");
    helpers::press_backspace_n(&mut shell, &console, 1);
    assert_eq!(shell.line(), b"status");

    let output = console.take_output();
    assert_eq!(output, format!("statusx{}", ERASE));

    helpers::type_input(&mut shell, &console, "\r");
    helpers::assert_contains_all(&console.take_output(), &["ok\r\n"]);
}

#[test]
fn test_backspace_on_empty_line_is_silent() {
    let (mut shell, console, _params) = helpers::create_test_shell();

    helpers::press_backspace_n(&mut shell, &console, 3);
    assert!(console.take_output().is_empty());
    assert!(shell.line().is_empty());
}

#[test]
fn test_backspace_stops_at_line_start() {
    let (mut shell, console, _params) = helpers::create_test_shell();

    helpers::type_input(&mut shell, &console, "ab");
    helpers::press_backspace_n(&mut shell, &console, 5);

    let output = console.take_output();
    assert_eq!(output.matches(ERASE).count(), 2);
    assert!(shell.line().is_empty());
}

#[test]
fn test_erase_shown_with_echo_off() {
    let (mut shell, console, _params) = helpers::create_test_shell();
    shell.set_echo(false);

    helpers::type_input(&mut shell, &console, "ab");
    helpers::press_backspace_n(&mut shell, &console, 1);
    assert_eq!(console.take_output(), ERASE);
}

#[test]
fn test_retype_after_backspace() {
    let (mut shell, console, _params) = helpers::create_test_shell();

    helpers::type_input(&mut shell, &console, "gaix");
    helpers::press_backspace_n(&mut shell, &console, 2);
    helpers::type_input(&mut shell, &console, "in");
    assert_eq!(shell.line(), b"gain");
}

// ============================================================================
// Escape Sequences
// ============================================================================

#[test]
fn test_arrow_key_is_swallowed() {
    let (mut shell, console, _params) = helpers::create_test_shell();

    helpers::type_input(&mut shell, &console, "stat");
    helpers::type_bytes(&mut shell, &console, b"\x1b[A");
    helpers::type_input(&mut shell, &console, "us");
    assert_eq!(shell.line(), b"status");
    assert_eq!(console.take_output(), "status");
}

#[test]
fn test_escape_tail_is_not_interpreted() {
    let (mut shell, console, _params) = helpers::create_test_shell();

    // CR and DEL right after ESC are discarded, not acted upon
    helpers::type_input(&mut shell, &console, "ab");
    helpers::type_bytes(&mut shell, &console, &[0x1B, b'\r', 0x7F]);
    assert_eq!(shell.line(), b"ab");
    assert_eq!(console.take_output(), "ab");
}

#[test]
fn test_escape_split_across_polls() {
    let (mut shell, console, _params) = helpers::create_test_shell();

    helpers::type_bytes(&mut shell, &console, &[0x1B]);
    helpers::type_bytes(&mut shell, &console, b"[");
    helpers::type_bytes(&mut shell, &console, b"B");
    helpers::type_input(&mut shell, &console, "x");
    assert_eq!(shell.line(), b"x");
}

#[test]
fn test_escape_swallows_exactly_two_bytes() {
    let (mut shell, console, _params) = helpers::create_test_shell();

    helpers::type_bytes(&mut shell, &console, b"\x1b[3~");
    assert_eq!(shell.line(), b"~");
}

// ============================================================================
// Line Noise
// ============================================================================

#[test]
fn test_noise_bytes_ignored() {
    let (mut shell, console, _params) = helpers::create_test_shell();

    helpers::type_bytes(&mut shell, &console, &[0x00, b's', 0xFF, b't', 0x00]);
    assert_eq!(shell.line(), b"st");
    assert_eq!(console.take_output(), "st");
}

// ============================================================================
// Line Length
// ============================================================================

#[test]
fn test_overflow_is_truncated() {
    let (mut shell, console, _params) = helpers::create_test_shell();

    let long = "x".repeat(70);
    helpers::type_input(&mut shell, &console, &long);
    assert_eq!(shell.line().len(), 63);

    // Every byte is still echoed
    assert_eq!(console.take_output(), long);
}

#[test]
fn test_overflow_dispatches_truncated_line() {
    let (mut shell, console, _params) = helpers::create_test_shell();

    let output = helpers::run_line(&mut shell, &console, &"y".repeat(80));
    let expected = format!("Unknown command: {}\r\n", "y".repeat(63));
    helpers::assert_contains_all(&output, &[&expected]);
}

#[test]
fn test_backspace_after_overflow() {
    let (mut shell, console, _params) = helpers::create_test_shell();

    helpers::type_input(&mut shell, &console, &"z".repeat(70));
    helpers::press_backspace_n(&mut shell, &console, 1);
    assert_eq!(shell.line().len(), 62);
}

// ============================================================================
// Line Terminators
// ============================================================================

#[test]
fn test_lf_terminates() {
    let (mut shell, console, _params) = helpers::create_test_shell();

    helpers::type_input(&mut shell, &console, "status\n");
    assert_eq!(console.take_output(), "status\r\nok\r\n$ ");
}

#[test]
fn test_crlf_runs_once() {
    let (mut shell, console, _params) = helpers::create_test_shell();

    helpers::type_input(&mut shell, &console, "status\r\n");
    let output = console.take_output();
    assert_eq!(output, "status\r\nok\r\n$ ");
}

#[test]
fn test_crlf_split_across_polls() {
    let (mut shell, console, _params) = helpers::create_test_shell();

    helpers::type_input(&mut shell, &console, "status\r");
    console.clear_output();
    helpers::type_input(&mut shell, &console, "\n");
    assert!(console.take_output().is_empty());
}

#[test]
fn test_cr_cr_is_two_submissions() {
    let (mut shell, console, _params) = helpers::create_test_shell();

    // Second CR is a blank line, which replays the successful command
    helpers::type_input(&mut shell, &console, "status\r\r");
    let output = console.take_output();
    assert_eq!(output.matches("ok\r\n").count(), 2);
}
