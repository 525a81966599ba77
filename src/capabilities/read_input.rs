//! [`ReadString`] and [`ReadNumber`] capabilities: prompt for and read one
//! line of console input.
//!
//! Script syntax:
//! - `local name = lt.ReadString("Name: ")`
//! - `local age = lt.ReadNumber("Age: ")`

use crate::capability::{CallFrame, Capability, Context};
use crate::error::CapabilityError;
use mlua::{Lua, Value};

/// Writes the prompt, if any, without a newline and reads one line.
fn prompt_and_read(ctx: &Context, prompt: Option<&[u8]>) -> Result<Vec<u8>, CapabilityError> {
    if let Some(prompt) = prompt {
        ctx.emit(prompt);
    }
    Ok(ctx.read_line()?)
}

/// Reads a line and returns it without its line ending.
pub struct ReadString {
    pub prompt: Option<Vec<u8>>,
}

impl Capability for ReadString {
    const NAME: &'static str = "ReadString";
    const RETURNS: usize = 1;

    fn parse(frame: &CallFrame) -> Result<Self, CapabilityError> {
        Ok(ReadString {
            prompt: frame.opt_string(0)?,
        })
    }

    fn execute(self, lua: &Lua, ctx: &Context) -> mlua::Result<Vec<Value>> {
        let line = prompt_and_read(ctx, self.prompt.as_deref())?;
        Ok(vec![Value::String(lua.create_string(&line)?)])
    }
}

/// Reads a line and returns it as a number. Input that does not start with a
/// number reads as 0.
pub struct ReadNumber {
    pub prompt: Option<Vec<u8>>,
}

impl Capability for ReadNumber {
    const NAME: &'static str = "ReadNumber";
    const RETURNS: usize = 1;

    fn parse(frame: &CallFrame) -> Result<Self, CapabilityError> {
        Ok(ReadNumber {
            prompt: frame.opt_string(0)?,
        })
    }

    fn execute(self, _lua: &Lua, ctx: &Context) -> mlua::Result<Vec<Value>> {
        let line = prompt_and_read(ctx, self.prompt.as_deref())?;
        Ok(vec![Value::Number(parse_number(&line))])
    }
}

/// Parse the longest numeric prefix of `line` after leading whitespace, the
/// way C's `atof` does: decimal with an optional exponent, or hexadecimal
/// with a `0x` prefix and optional fraction. No numeric prefix gives 0.
pub fn parse_number(line: &[u8]) -> f64 {
    let text = String::from_utf8_lossy(line);
    let text = text.trim_start();
    let (sign, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (-1.0, &text[1..]),
        Some(b'+') => (1.0, &text[1..]),
        _ => (1.0, text),
    };
    if let Some(value) = parse_hex_prefix(unsigned) {
        return sign * value;
    }
    (1..=text.len())
        .rev()
        .filter(|&end| text.is_char_boundary(end))
        .find_map(|end| text[..end].parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// `0x1A`, `0X1f.8`: `None` unless at least one hex digit follows the prefix.
fn parse_hex_prefix(text: &str) -> Option<f64> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))?;
    let mut value = 0.0;
    let mut scale: Option<f64> = None;
    let mut any_digit = false;
    for ch in digits.chars() {
        if ch == '.' && scale.is_none() {
            scale = Some(1.0);
            continue;
        }
        let Some(digit) = ch.to_digit(16) else { break };
        any_digit = true;
        match scale.as_mut() {
            None => value = value * 16.0 + f64::from(digit),
            Some(scale) => {
                *scale /= 16.0;
                value += f64::from(digit) * *scale;
            }
        }
    }
    any_digit.then_some(value)
}
