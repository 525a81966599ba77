//! [`OpenFile`] capability: runs another Lua file in the same interpreter.
//!
//! Script syntax: `lt.OpenFile("scripts/menu.lua")`

use crate::capability::{CallFrame, Capability, Context};
use crate::error::CapabilityError;
use crate::runner;
use mlua::{Lua, Value};
use std::path::PathBuf;

/// Loads and executes a script through the runner.
///
/// The nested script shares globals and the `lt` table with its caller. If
/// it fails, the failure is reported and the caller continues.
pub struct OpenFile {
    pub path: PathBuf,
}

impl Capability for OpenFile {
    const NAME: &'static str = "OpenFile";
    const RETURNS: usize = 1;

    fn parse(frame: &CallFrame) -> Result<Self, CapabilityError> {
        Ok(OpenFile {
            path: PathBuf::from(super::os_string(frame.string(0)?)),
        })
    }

    fn execute(self, lua: &Lua, ctx: &Context) -> mlua::Result<Vec<Value>> {
        runner::run_file(lua, ctx, &self.path);
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use crate::host::testing::{host, output, script_error};
    use std::fs;

    fn lua_path(path: &std::path::Path) -> String {
        path.display().to_string().replace('\\', "\\\\")
    }

    #[test]
    fn test_nested_scripts_share_interpreter() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.lua");
        let second = dir.path().join("second.lua");
        let third = dir.path().join("third.lua");
        fs::write(
            &first,
            format!("trail = 'a'\nlt.OpenFile(\"{}\")\ntrail = trail .. 'd'\n", lua_path(&second)),
        )
        .unwrap();
        fs::write(
            &second,
            format!("trail = trail .. 'b'\nlt.OpenFile(\"{}\")\n", lua_path(&third)),
        )
        .unwrap();
        fs::write(&third, "assert(type(lt.ReadFile) == 'function')\ntrail = trail .. 'c'\n").unwrap();

        let (host, captured) = host("");
        assert!(host.run_file(&first).is_completed());
        let trail: String = host.lua().globals().get("trail").unwrap();
        assert_eq!(trail, "abcd");
        assert!(output(&captured).is_empty());
    }

    #[test]
    fn test_nested_failure_is_reported_and_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let outer = dir.path().join("outer.lua");
        let inner = dir.path().join("inner.lua");
        fs::write(&inner, "error('inner broke', 0)\n").unwrap();
        fs::write(
            &outer,
            format!("lt.OpenFile(\"{}\")\nreached = true\n", lua_path(&inner)),
        )
        .unwrap();

        let (host, captured) = host("");
        assert!(host.run_file(&outer).is_completed());
        let reached: bool = host.lua().globals().get("reached").unwrap();
        assert!(reached);
        assert_eq!(output(&captured), "inner broke\n");
    }

    #[test]
    fn test_wrong_kind() {
        let (host, _) = host("");
        assert_eq!(script_error(&host, "lt.OpenFile, 42"), "expected string");
    }
}
