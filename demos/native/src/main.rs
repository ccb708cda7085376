//! Native demo: the shell on the terminal and on TCP port 3030.
//!
//! ```bash
//! cargo run
//! # in another terminal
//! nc localhost 3030
//! ```
//!
//! Typing on the local terminal takes the shell back from a network client.
//! `quit` exits. Set `RUST_LOG=debug` to see stream switching.

mod io;

use io::{RawModeGuard, StdioConsole};
use poll_shell::{
    ByteStream, CommandMeta, Context, DefaultConfig, ParamValue, Parameter, Registry,
    RegistryError, Shell, ShellConfig, StreamError, StreamSelector, TcpShellListener,
};
use std::fmt::Write;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

static RUNNING: AtomicBool = AtomicBool::new(true);
static STARTED: OnceLock<Instant> = OnceLock::new();

// =============================================================================
// Parameter Types
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, ParamValue)]
enum DriveMode {
    Manual,
    Cruise,
    Park,
}

// =============================================================================
// Parameters
// =============================================================================

static LED: Parameter<u32> = Parameter::new("led", "LED brightness (0-255)", 128);
static GAIN: Parameter<f32> = Parameter::new("gain", "Controller gain", 1.5);
static ARMED: Parameter<bool> = Parameter::new("armed", "Motor arming switch", false);
static MODE: Parameter<DriveMode> = Parameter::new("mode", "Drive mode", DriveMode::Manual);

// =============================================================================
// Commands
// =============================================================================

fn uptime(ctx: &mut Context<'_>, _args: &[&str]) {
    let elapsed = STARTED.get().map_or(Duration::ZERO, |start| start.elapsed());
    let _ = write!(ctx, "up {:.1} s", elapsed.as_secs_f32());
    ctx.println("");
}

fn version(ctx: &mut Context<'_>, _args: &[&str]) {
    ctx.print(poll_shell::NAME);
    ctx.print(" ");
    ctx.println(poll_shell::VERSION);
}

fn quit(ctx: &mut Context<'_>, _args: &[&str]) {
    ctx.println("Bye");
    RUNNING.store(false, Ordering::Relaxed);
}

const UPTIME: CommandMeta = CommandMeta {
    name: "uptime",
    description: "Time since start",
    handler: uptime,
};

const VERSION: CommandMeta = CommandMeta {
    name: "version",
    description: "Show version information",
    handler: version,
};

const QUIT: CommandMeta = CommandMeta {
    name: "quit",
    description: "Exit the demo",
    handler: quit,
};

fn setup_error(e: RegistryError) -> std::io::Error {
    std::io::Error::other(e.to_string())
}

fn stream_error(e: StreamError) -> std::io::Error {
    std::io::Error::other(e.to_string())
}

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    STARTED.get_or_init(Instant::now);

    let mut registry: Registry<'_, 16> = Registry::new();
    registry.register_builtins().map_err(setup_error)?;
    for command in [&UPTIME, &VERSION, &QUIT] {
        registry.register_command(command).map_err(setup_error)?;
    }
    registry.register_parameter(&LED).map_err(setup_error)?;
    registry.register_parameter(&GAIN).map_err(setup_error)?;
    registry.register_parameter(&ARMED).map_err(setup_error)?;
    registry.register_parameter(&MODE).map_err(setup_error)?;

    let listener = TcpShellListener::bind_default()?;
    let _raw = RawModeGuard::new()?;

    let mut shell: Shell<'_, StdioConsole, TcpShellListener> = Shell::new(
        &registry,
        StreamSelector::with_network(StdioConsole::spawn(), listener),
    );

    // Nothing is active until the first key press or connection
    let console = shell.stream().console_mut();
    console
        .println("poll-shell demo, also listening on TCP")
        .and_then(|()| console.print(DefaultConfig::PROMPT))
        .map_err(stream_error)?;

    while RUNNING.load(Ordering::Relaxed) {
        shell.tick().map_err(stream_error)?;
        std::thread::sleep(POLL_INTERVAL);
    }

    log::info!(
        "final values: led={} gain={} armed={} mode={:?}",
        LED.get(),
        GAIN.get(),
        ARMED.get(),
        MODE.get()
    );
    Ok(())
}
