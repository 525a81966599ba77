//! [`Color`] capability: sets the console's foreground and background colors
//! from a console attribute code.
//!
//! Script syntax: `lt.Color(0x1F)` (white on blue)

use crate::capability::{Availability, CallFrame, Capability, Context};
use crate::error::CapabilityError;
use crossterm::QueueableCommand;
use crossterm::style::{Color as TermColor, SetBackgroundColor, SetForegroundColor};
use mlua::{Lua, Value};

/// Applies a console attribute code: the low nibble selects the foreground,
/// the next nibble the background. Within a nibble bit 0 is blue, bit 1 green,
/// bit 2 red, and bit 3 intensity.
pub struct Color {
    pub attribute: u16,
}

impl Color {
    /// Terminal colors for `attribute`, as `(foreground, background)`.
    pub fn colors(attribute: u16) -> (TermColor, TermColor) {
        (nibble_color(attribute), nibble_color(attribute >> 4))
    }
}

fn nibble_color(bits: u16) -> TermColor {
    match bits & 0x0F {
        0x0 => TermColor::Black,
        0x1 => TermColor::DarkBlue,
        0x2 => TermColor::DarkGreen,
        0x3 => TermColor::DarkCyan,
        0x4 => TermColor::DarkRed,
        0x5 => TermColor::DarkMagenta,
        0x6 => TermColor::DarkYellow,
        0x7 => TermColor::Grey,
        0x8 => TermColor::DarkGrey,
        0x9 => TermColor::Blue,
        0xA => TermColor::Green,
        0xB => TermColor::Cyan,
        0xC => TermColor::Red,
        0xD => TermColor::Magenta,
        0xE => TermColor::Yellow,
        _ => TermColor::White,
    }
}

impl Capability for Color {
    const NAME: &'static str = "Color";
    const RETURNS: usize = 1;
    const AVAILABILITY: Availability = Availability::Console;

    fn parse(frame: &CallFrame) -> Result<Self, CapabilityError> {
        Ok(Color {
            attribute: frame.number(0)? as i64 as u16,
        })
    }

    fn execute(self, _lua: &Lua, ctx: &Context) -> mlua::Result<Vec<Value>> {
        let (foreground, background) = Self::colors(self.attribute);
        let mut out = ctx.writer();
        out.queue(SetForegroundColor(foreground))
            .and_then(|out| out.queue(SetBackgroundColor(background)))
            .map_err(CapabilityError::Io)?;
        Ok(Vec::new())
    }
}
