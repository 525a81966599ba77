//! [`Sleep`] capability: blocks the whole host for a number of milliseconds.
//!
//! Script syntax: `lt.Sleep(500)`

use crate::capability::{Availability, CallFrame, Capability, Context};
use crate::error::CapabilityError;
use mlua::{Lua, Value};
use std::thread;
use std::time::Duration;

/// Suspends the process. Nothing else runs while it sleeps.
pub struct Sleep {
    pub duration: Duration,
}

impl Capability for Sleep {
    const NAME: &'static str = "Sleep";
    const RETURNS: usize = 1;
    const AVAILABILITY: Availability = Availability::Console;

    fn parse(frame: &CallFrame) -> Result<Self, CapabilityError> {
        // Same range as a native millisecond count: negative and NaN become 0.
        let millis = frame.number(0)? as u32;
        Ok(Sleep {
            duration: Duration::from_millis(u64::from(millis)),
        })
    }

    fn execute(self, _lua: &Lua, _ctx: &Context) -> mlua::Result<Vec<Value>> {
        thread::sleep(self.duration);
        Ok(Vec::new())
    }
}
