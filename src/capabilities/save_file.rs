//! [`SaveFile`] capability: replaces a file's contents with a string.
//!
//! Script syntax: `lt.SaveFile("save.txt", text)`

use crate::capability::{CallFrame, Capability, Context};
use crate::error::CapabilityError;
use mlua::{Lua, Value};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Creates or truncates `path`, then writes `content` byte for byte.
pub struct SaveFile {
    pub path: PathBuf,
    pub content: Vec<u8>,
}

impl Capability for SaveFile {
    const NAME: &'static str = "SaveFile";
    const RETURNS: usize = 2;

    fn parse(frame: &CallFrame) -> Result<Self, CapabilityError> {
        let path = frame.string(0)?;
        let content = frame.string(1)?;
        Ok(SaveFile {
            path: PathBuf::from(super::os_string(path)),
            content,
        })
    }

    fn execute(self, _lua: &Lua, _ctx: &Context) -> mlua::Result<Vec<Value>> {
        let mut file = File::create(&self.path).map_err(|source| CapabilityError::UnableToOpenFile {
            path: self.path.clone(),
            source,
        })?;
        file.write_all(&self.content).map_err(CapabilityError::Io)?;
        Ok(Vec::new())
    }
}
