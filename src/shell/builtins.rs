//! Built-in commands: `help`, `params` and `echo`.
//!
//! Registered with `Registry::register_builtins()`.

use super::Context;
use crate::command::CommandMeta;

/// `help` - list plain commands with their descriptions.
pub static HELP: CommandMeta = CommandMeta {
    name: "help",
    description: "Displays the help about commands",
    handler: help,
};

/// `params [show]` - list parameters, or print all current values.
pub static PARAMS: CommandMeta = CommandMeta {
    name: "params",
    description: "Displays the available parameters. Usage: params [show]",
    handler: params,
};

/// `echo [on|off]` - set or toggle character echo.
pub static ECHO: CommandMeta = CommandMeta {
    name: "echo",
    description: "Switch echo mode. Usage: echo [on|off]",
    handler: echo,
};

/// All built-ins in registration order.
pub static ALL: [&CommandMeta; 3] = [&HELP, &PARAMS, &ECHO];

fn help(ctx: &mut Context<'_>, _args: &[&str]) {
    ctx.println("Available commands:");
    for node in ctx.list_matching(false) {
        ctx.print(node.name());
        ctx.println(":");
        ctx.print("\t");
        ctx.println(node.description());
    }
}

fn params(ctx: &mut Context<'_>, args: &[&str]) {
    if args.first() == Some(&"show") {
        ctx.show_all_parameters();
        return;
    }

    ctx.println("Available parameters:");
    for node in ctx.list_matching(true) {
        ctx.print(node.name());
        ctx.println(":");
        ctx.print("\t");
        ctx.print(node.description());
        if let Some(type_name) = node.parameter_type() {
            ctx.print(" (");
            ctx.print(type_name);
            ctx.print(")");
        }
        ctx.println("");
    }
}

fn echo(ctx: &mut Context<'_>, args: &[&str]) {
    let enabled = match args.first().copied() {
        Some("on") => true,
        Some("off") => false,
        _ => !ctx.echo(),
    };

    ctx.set_echo(enabled);
    ctx.println(if enabled { "Echo enabled" } else { "Echo disabled" });
}
