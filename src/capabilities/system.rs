//! [`System`] capability: hands a command line to the OS shell.
//!
//! Script syntax: `lt.System("cls")`
//!
//! The string reaches the shell unmodified, so scripts can use pipes,
//! redirection, and variable expansion. This is also full shell injection for
//! anything a script splices into the command.

use crate::capability::{CallFrame, Capability, Context};
use crate::error::CapabilityError;
use mlua::{Lua, Value};
use std::ffi::OsString;
use std::process::Command;
use tracing::{debug, warn};

/// Runs a command through `sh -c` (or `cmd /C` on Windows) and waits for it.
///
/// The child inherits the host's standard streams. Its exit status is not
/// returned to the script, and a shell that cannot be started is not an error.
pub struct System {
    pub command: OsString,
}

fn shell(command: &OsString) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    }
}

impl Capability for System {
    const NAME: &'static str = "System";
    const RETURNS: usize = 1;

    fn parse(frame: &CallFrame) -> Result<Self, CapabilityError> {
        Ok(System {
            command: super::os_string(frame.string(0)?),
        })
    }

    fn execute(self, _lua: &Lua, _ctx: &Context) -> mlua::Result<Vec<Value>> {
        match shell(&self.command).status() {
            Ok(status) if !status.success() => {
                debug!(command = ?self.command, %status, "shell command exited unsuccessfully");
            }
            Ok(_) => {}
            Err(err) => warn!(command = ?self.command, error = %err, "failed to start shell"),
        }
        Ok(Vec::new())
    }
}
