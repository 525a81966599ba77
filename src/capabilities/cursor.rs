//! [`SetCursorPos`] capability: moves the console cursor.
//!
//! Script syntax: `lt.SetCursorPos(column, row)`

use crate::capability::{Availability, CallFrame, Capability, Context};
use crate::error::CapabilityError;
use crossterm::QueueableCommand;
use crossterm::cursor::MoveTo;
use mlua::{Lua, Value};

/// Moves the cursor to a zero-based column and row.
///
/// Coordinates are console coordinates (signed 16-bit); negative values are
/// clamped to 0.
pub struct SetCursorPos {
    pub column: u16,
    pub row: u16,
}

fn coordinate(n: f64) -> u16 {
    (n as i16).max(0) as u16
}

impl Capability for SetCursorPos {
    const NAME: &'static str = "SetCursorPos";
    const RETURNS: usize = 2;
    const AVAILABILITY: Availability = Availability::Console;

    fn parse(frame: &CallFrame) -> Result<Self, CapabilityError> {
        let column = frame.number(0)?;
        let row = frame.number(1)?;
        Ok(SetCursorPos {
            column: coordinate(column),
            row: coordinate(row),
        })
    }

    fn execute(self, _lua: &Lua, ctx: &Context) -> mlua::Result<Vec<Value>> {
        ctx.writer()
            .queue(MoveTo(self.column, self.row))
            .map_err(CapabilityError::Io)?;
        Ok(Vec::new())
    }
}
