//! Shared test helpers to reduce duplication across integration tests.

#![allow(dead_code)]

#[allow(clippy::duplicate_mod)]
#[path = "fixtures/mod.rs"]
mod fixtures;

pub use fixtures::{MockListener, MockStream, Mode, Params, RemotePeer, TEST_CAPACITY};
use poll_shell::{NetListener, Shell, StreamSelector};

/// Shell with only a console.
pub type ConsoleShell = Shell<'static, MockStream>;

/// Shell with a console and the scripted network transport.
pub type NetworkShell = Shell<'static, MockStream, MockListener>;

// ============================================================================
// Shell Creation Helpers
// ============================================================================

/// Console-only shell over the argument-printing registry, activated, with
/// the initial prompt already cleared.
pub fn create_test_shell() -> (ConsoleShell, MockStream, Params) {
    let (registry, params) = fixtures::test_registry();
    let console = MockStream::new();
    let mut shell = Shell::new(registry, StreamSelector::console_only(console.clone()));
    shell.activate().unwrap();
    console.clear_output();
    (shell, console, params)
}

/// Console-only shell over the registry with built-in commands.
pub fn create_builtin_shell() -> (ConsoleShell, MockStream, Params) {
    let (registry, params) = fixtures::builtin_registry();
    let console = MockStream::new();
    let mut shell = Shell::new(registry, StreamSelector::console_only(console.clone()));
    shell.activate().unwrap();
    console.clear_output();
    (shell, console, params)
}

/// Shell with console and network listener; nothing is active yet.
pub fn create_network_shell() -> (NetworkShell, MockStream, MockListener) {
    let (registry, _params) = fixtures::test_registry();
    let console = MockStream::new();
    let listener = MockListener::new();
    let shell = Shell::new(
        registry,
        StreamSelector::with_network(console.clone(), listener.clone()),
    );
    (shell, console, listener)
}

// ============================================================================
// Input Helpers
// ============================================================================

/// Queue `text` on `stream` and run one poll cycle.
pub fn type_input<L: NetListener>(
    shell: &mut Shell<'static, MockStream, L>,
    stream: &MockStream,
    text: &str,
) {
    stream.push_input(text);
    shell.tick().unwrap();
}

/// Queue raw bytes on `stream` and run one poll cycle.
pub fn type_bytes<L: NetListener>(
    shell: &mut Shell<'static, MockStream, L>,
    stream: &MockStream,
    bytes: &[u8],
) {
    stream.push_bytes(bytes);
    shell.tick().unwrap();
}

/// Submit a full line (CR terminated) and return the output it produced.
pub fn run_line(shell: &mut ConsoleShell, console: &MockStream, line: &str) -> String {
    console.clear_output();
    type_input(shell, console, line);
    type_input(shell, console, "\r");
    console.take_output()
}

/// Press enter on an empty line and return the output.
pub fn press_enter(shell: &mut ConsoleShell, console: &MockStream) -> String {
    console.clear_output();
    type_input(shell, console, "\r");
    console.take_output()
}

/// Press the backspace key (DEL) `n` times.
pub fn press_backspace_n(shell: &mut ConsoleShell, console: &MockStream, n: usize) {
    for _ in 0..n {
        type_bytes(shell, console, &[0x7F]);
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert output contains all expected strings.
pub fn assert_contains_all(output: &str, expected: &[&str]) {
    for text in expected {
        assert!(
            output.contains(text),
            "Expected {:?} in output, got: {:?}",
            text,
            output
        );
    }
}

/// Assert output contains none of the strings.
pub fn assert_contains_none(output: &str, unexpected: &[&str]) {
    for text in unexpected {
        assert!(
            !output.contains(text),
            "Unexpected {:?} in output: {:?}",
            text,
            output
        );
    }
}

/// Assert output ends with the prompt.
pub fn assert_prompt(output: &str) {
    assert!(
        output.ends_with("$ "),
        "Expected output to end with the prompt, got: {:?}",
        output
    );
}
