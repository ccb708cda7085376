//! Text-to-value conversion for runtime parameters.
//!
//! Conversion never fails: text that does not parse yields the type's
//! fallback (zero, or `false`), like C's `atoi`/`atof`.

use core::fmt::{self, Write};

/// Value type storable in a `Parameter`.
///
/// Implemented for the common numeric types and `bool`; use
/// `#[derive(ParamValue)]` for unit-variant enums.
pub trait ParamValue: Copy + Send {
    /// Type hint shown in the parameter listing.
    const TYPE_NAME: &'static str;

    /// Convert an argument token, falling back to a defined default.
    fn from_token(token: &str) -> Self;

    /// Render the value (the right-hand side of `name=value`).
    fn write_value(&self, out: &mut dyn Write) -> fmt::Result;
}

macro_rules! impl_param_value {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl ParamValue for $ty {
                const TYPE_NAME: &'static str = $name;

                fn from_token(token: &str) -> Self {
                    token.trim().parse().unwrap_or_default()
                }

                fn write_value(&self, out: &mut dyn Write) -> fmt::Result {
                    write!(out, "{}", self)
                }
            }
        )*
    };
}

impl_param_value! {
    i32 => "i32",
    u32 => "u32",
    i64 => "i64",
    f32 => "f32",
    f64 => "f64",
}

impl ParamValue for bool {
    const TYPE_NAME: &'static str = "bool";

    /// `true`/`on`/`yes` or any non-zero integer.
    fn from_token(token: &str) -> Self {
        match token.trim() {
            "true" | "on" | "yes" => true,
            other => other.parse::<i64>().map(|n| n != 0).unwrap_or(false),
        }
    }

    fn write_value(&self, out: &mut dyn Write) -> fmt::Result {
        out.write_str(if *self { "true" } else { "false" })
    }
}
