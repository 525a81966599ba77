//! [`ReadFile`] capability: returns a file's contents as a string.
//!
//! Script syntax: `local text = lt.ReadFile("save.txt")`

use crate::capability::{CallFrame, Capability, Context};
use crate::error::CapabilityError;
use mlua::{Lua, Value};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// Reads at most [`HostConfig::read_file_limit`](crate::HostConfig::read_file_limit)
/// bytes from the start of a file.
///
/// Anything past the limit is silently dropped, and the result also ends at
/// the first NUL byte.
pub struct ReadFile {
    pub path: PathBuf,
}

impl Capability for ReadFile {
    const NAME: &'static str = "ReadFile";
    const RETURNS: usize = 1;

    fn parse(frame: &CallFrame) -> Result<Self, CapabilityError> {
        Ok(ReadFile {
            path: PathBuf::from(super::os_string(frame.string(0)?)),
        })
    }

    fn execute(self, lua: &Lua, ctx: &Context) -> mlua::Result<Vec<Value>> {
        let file = File::open(&self.path).map_err(|source| CapabilityError::UnableToOpenFile {
            path: self.path.clone(),
            source,
        })?;

        let mut contents = Vec::new();
        file.take(ctx.config().read_file_limit as u64)
            .read_to_end(&mut contents)
            .map_err(CapabilityError::Io)?;
        if let Some(nul) = contents.iter().position(|&b| b == 0) {
            contents.truncate(nul);
        }

        Ok(vec![Value::String(lua.create_string(&contents)?)])
    }
}

#[cfg(test)]
mod tests {
    use crate::config::HostConfig;
    use crate::host::testing::{host, host_with, script_error};
    use mlua::Function;
    use std::fs;

    #[test]
    fn test_reads_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "line one\nline two\n").unwrap();

        let (host, _) = host("");
        let read: Function = host.lua().load("return lt.ReadFile").eval().unwrap();
        let text: mlua::String = read.call(path.display().to_string()).unwrap();
        assert_eq!(&*text.as_bytes(), b"line one\nline two\n");
    }

    #[test]
    fn test_truncates_at_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.txt");
        fs::write(&path, "0123456789").unwrap();

        let config = HostConfig {
            read_file_limit: 4,
            ..HostConfig::default()
        };
        let (host, _) = host_with(config, "");
        let read: Function = host.lua().load("return lt.ReadFile").eval().unwrap();
        let text: String = read.call(path.display().to_string()).unwrap();
        assert_eq!(text, "0123");
    }

    #[test]
    fn test_default_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.txt");
        fs::write(&path, vec![b'x'; 70_000]).unwrap();

        let (host, _) = host("");
        let read: Function = host.lua().load("return lt.ReadFile").eval().unwrap();
        let text: mlua::String = read.call(path.display().to_string()).unwrap();
        assert_eq!(text.as_bytes().len(), 65535);
    }

    #[test]
    fn test_stops_at_nul() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nul.bin");
        fs::write(&path, b"before\0after").unwrap();

        let (host, _) = host("");
        let read: Function = host.lua().load("return lt.ReadFile").eval().unwrap();
        let text: String = read.call(path.display().to_string()).unwrap();
        assert_eq!(text, "before");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");

        let (host, _) = host("");
        let read: Function = host.lua().load("return lt.ReadFile").eval().unwrap();
        let err = read
            .call::<mlua::String>(path.display().to_string())
            .unwrap_err();
        assert_eq!(crate::runner::describe(&err), "Unable to open file");

        let path = path.display().to_string().replace('\\', "\\\\");
        assert_eq!(
            script_error(&host, &format!("lt.ReadFile, \"{path}\"")),
            "Unable to open file"
        );
    }

    #[test]
    fn test_wrong_kind() {
        let (host, _) = host("");
        assert_eq!(script_error(&host, "lt.ReadFile, 5"), "expected string");
        assert_eq!(script_error(&host, "lt.ReadFile"), "expected string");
    }
}
