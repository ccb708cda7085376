#![no_std]
#![no_main]

use poll_shell::config::MinimalConfig;
use poll_shell::{
    ByteStream, CommandMeta, Context, NoNetwork, Parameter, Registry, Shell, StreamError,
    StreamSelector,
};
use panic_halt as _;

// Console that never has input and discards output - measures only struct size
pub struct NullConsole;

impl ByteStream for NullConsole {
    fn available(&mut self) -> usize {
        0
    }

    fn read_byte(&mut self) -> Option<u8> {
        None
    }

    fn write_bytes(&mut self, _bytes: &[u8]) -> Result<(), StreamError> {
        Ok(())
    }
}

fn status_cmd(ctx: &mut Context<'_>, _args: &[&str]) {
    ctx.println("OK");
}

static GAIN: Parameter<f32> = Parameter::new("gain", "Loop gain", 1.0);

const STATUS: CommandMeta = CommandMeta {
    name: "status",
    description: "Show status",
    handler: status_cmd,
};

// Entry point
#[cortex_m_rt::entry]
fn main() -> ! {
    let mut registry: Registry<'_, 8> = Registry::new();
    let _ = registry.register_builtins();
    let _ = registry.register_command(&STATUS);
    let _ = registry.register_parameter(&GAIN);

    let mut shell: Shell<'_, NullConsole, NoNetwork, MinimalConfig> =
        Shell::new(&registry, StreamSelector::console_only(NullConsole));

    // Use black_box to prevent optimizer from removing the code
    let _ = core::hint::black_box(shell.activate());

    // Feed one line so editing and dispatch code is included
    for &byte in b"gain=2\r" {
        let _ = core::hint::black_box(shell.process_byte(byte));
    }

    loop {
        let _ = core::hint::black_box(shell.tick());
        cortex_m::asm::nop();
    }
}

// Required: exception handler
#[cortex_m_rt::exception]
unsafe fn HardFault(_ef: &cortex_m_rt::ExceptionFrame) -> ! {
    loop {
        cortex_m::asm::nop();
    }
}
