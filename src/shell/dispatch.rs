//! Command dispatch.
//!
//! Resolves a command name against the registry and invokes it. A name that
//! is not registered but contains `=` is treated as a parameter assignment.

use super::Context;
use crate::error::DispatchError;

/// Assignment operator for `name=value`.
pub const ASSIGN: char = '=';

/// Resolve `name` and run its handler.
///
/// 1. Exact registry match: invoke with `args`.
/// 2. Otherwise split at the first `=`; if the left side is a registered
///    parameter, invoke it with the right side as the only argument.
///    Anything else on the left is `UnknownParameter`.
/// 3. No `=` at all: `UnknownCommand` carrying the name as typed.
pub fn execute<'l>(
    ctx: &mut Context<'_>,
    name: &'l str,
    args: &[&str],
) -> Result<(), DispatchError<'l>> {
    if let Some(node) = ctx.find(name) {
        node.invoke(ctx, args);
        return Ok(());
    }

    let Some((param, value)) = name.split_once(ASSIGN) else {
        return Err(DispatchError::UnknownCommand(name));
    };

    match ctx.find(param) {
        Some(node) if node.is_parameter() => {
            node.invoke(ctx, &[value]);
            Ok(())
        }
        _ => Err(DispatchError::UnknownParameter(param)),
    }
}
