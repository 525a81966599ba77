//! # Luatext
//!
//! Embeds a Lua 5.4 interpreter and exposes a small set of host capabilities
//! to scripts: console colors and cursor positioning, sleeping, running shell
//! commands, reading and writing whole text files, and reading console input.
//!
//! ## Quick start
//!
//! ```no_run
//! use luatext::{Host, HostConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let host = Host::new(HostConfig::default())?;
//!     // Runs scripts/main.lua; a failing script is reported, not returned.
//!     host.run_entry();
//!     Ok(())
//! }
//! ```
//!
//! ## Capabilities
//!
//! Everything lives in the global `lt` table. Names are case-sensitive.
//!
//! | Function | Arguments | Returns |
//! |----------|-----------|---------|
//! | `lt.Sleep(ms)` | number | placeholder |
//! | `lt.Color(attribute)` | number | placeholder |
//! | `lt.SetCursorPos(column, row)` | number, number | two placeholders |
//! | `lt.OpenFile(path)` | string | placeholder |
//! | `lt.System(command)` | string | placeholder |
//! | `lt.ReadFile(path)` | string | file contents (at most 65535 bytes) |
//! | `lt.SaveFile(path, content)` | string, string | two placeholders |
//! | `lt.ReadString([prompt])` | optional string | the line read |
//! | `lt.ReadNumber([prompt])` | optional string | the line read, as a number |
//!
//! `Sleep`, `Color`, and `SetCursorPos` are only installed when the host has a
//! console ([`Platform::detect`]). On other hosts they are absent from `lt`
//! and calling them fails like calling any undefined field.
//!
//! A call with an argument of the wrong kind raises `expected number` or
//! `expected string` before doing anything. A file that cannot be opened
//! raises `Unable to open file`. Scripts can catch both with `pcall`.
//!
//! ## Capturing output
//!
//! [`Host::with_io`] replaces stdin and stdout, which is how the tests drive
//! `ReadString` and inspect failure reports:
//!
//! ```no_run
//! use luatext::{Host, HostConfig};
//! use std::io::Cursor;
//! use std::sync::{Arc, Mutex};
//!
//! fn main() -> anyhow::Result<()> {
//!     let captured = Arc::new(Mutex::new(Vec::<u8>::new()));
//!     let sink = captured.clone();
//!
//!     let host = Host::with_io(HostConfig::default(), Cursor::new("Ada\n"), move |data| {
//!         sink.lock().unwrap().extend_from_slice(data);
//!     })?;
//!
//!     host.lua()
//!         .load("print('hi ' .. lt.ReadString('name? '))")
//!         .exec()
//!         .map_err(|err| anyhow::anyhow!("{err}"))?;
//!     println!("{}", String::from_utf8_lossy(&captured.lock().unwrap()));
//!     Ok(())
//! }
//! ```
//!
//! ## Implementing a custom capability
//!
//! ```no_run
//! use luatext::capability::{CallFrame, Capability, Context};
//! use luatext::CapabilityError;
//! use mlua::{Lua, Value};
//!
//! pub struct Beep;
//!
//! impl Capability for Beep {
//!     const NAME: &'static str = "Beep";
//!     const RETURNS: usize = 1;
//!
//!     fn parse(_frame: &CallFrame) -> Result<Self, CapabilityError> {
//!         Ok(Beep)
//!     }
//!
//!     fn execute(self, _lua: &Lua, ctx: &Context) -> mlua::Result<Vec<Value>> {
//!         ctx.emit(b"\x07"); // BEL character
//!         Ok(Vec::new())
//!     }
//! }
//! ```

pub mod capabilities;
pub mod capability;
pub mod config;
pub mod error;
pub mod host;
pub mod registry;
pub mod runner;

pub use capability::{Availability, CallFrame, Capability, Context, Descriptor};
pub use capabilities::{
    Color, OpenFile, ReadFile, ReadNumber, ReadString, SaveFile, SetCursorPos, Sleep, System,
};
pub use config::HostConfig;
pub use error::CapabilityError;
pub use host::Host;
pub use registry::{NAMESPACE, Platform, REGISTRY};
pub use runner::Outcome;
