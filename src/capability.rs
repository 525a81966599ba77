//! The [`Capability`] trait, the [`Context`] capabilities receive when invoked,
//! and the [`CallFrame`] view over a call's arguments.

use crate::config::HostConfig;
use crate::error::CapabilityError;
use mlua::{Lua, MultiValue, Value};
use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

pub(crate) type OutputHandler = Arc<dyn Fn(&[u8]) + Send + Sync>;

/// Execution context passed to [`Capability::execute`].
///
/// One context is created per [`crate::Host`] and shared by every capability
/// call made from any script running in that host. It owns the console
/// streams and the configured limits.
pub struct Context {
    pub(crate) output_handler: OutputHandler,
    pub(crate) input: RefCell<Box<dyn BufRead>>,
    pub(crate) config: HostConfig,
}

impl Context {
    pub(crate) fn new(
        config: HostConfig,
        input: Box<dyn BufRead>,
        output_handler: OutputHandler,
    ) -> Self {
        Context {
            output_handler,
            input: RefCell::new(input),
            config,
        }
    }

    /// Pass bytes through the output handler (stdout unless the host was built
    /// with a custom sink).
    pub fn emit(&self, data: &[u8]) {
        (self.output_handler)(data);
    }

    /// An [`io::Write`] adapter over [`emit`](Self::emit), for APIs that
    /// write into a stream.
    pub fn writer(&self) -> OutputWriter<'_> {
        OutputWriter { ctx: self }
    }

    /// Read one line from the input source.
    ///
    /// The trailing `\n` (and a preceding `\r`) is stripped and the line is
    /// cut to [`HostConfig::input_line_limit`] bytes. End of input yields an
    /// empty line.
    pub fn read_line(&self) -> io::Result<Vec<u8>> {
        let mut line = Vec::new();
        self.input.borrow_mut().read_until(b'\n', &mut line)?;
        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }
        line.truncate(self.config.input_line_limit);
        Ok(line)
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }
}

/// Writes everything it receives through [`Context::emit`].
pub struct OutputWriter<'a> {
    ctx: &'a Context,
}

impl Write for OutputWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.ctx.emit(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// The arguments of a single capability call.
///
/// Lua values arrive untyped; the accessors here are the only way capabilities
/// read them, and each one checks the value's kind before converting it.
/// Indices are zero-based.
#[derive(Debug, Default)]
pub struct CallFrame {
    args: Vec<Value>,
}

impl CallFrame {
    pub fn new(args: MultiValue) -> Self {
        CallFrame {
            args: args.into_iter().collect(),
        }
    }

    /// The argument at `index` as a number. Integers and floats are both
    /// accepted; numeric strings are not.
    pub fn number(&self, index: usize) -> Result<f64, CapabilityError> {
        match self.args.get(index) {
            Some(Value::Integer(n)) => Ok(*n as f64),
            Some(Value::Number(n)) => Ok(*n),
            _ => Err(CapabilityError::ExpectedNumber),
        }
    }

    /// The argument at `index` as raw string bytes. Numbers are not accepted.
    pub fn string(&self, index: usize) -> Result<Vec<u8>, CapabilityError> {
        match self.args.get(index) {
            Some(Value::String(s)) => Ok(s.as_bytes().to_vec()),
            _ => Err(CapabilityError::ExpectedString),
        }
    }

    /// Like [`string`](Self::string), but a missing or `nil` argument is
    /// `None` rather than an error.
    pub fn opt_string(&self, index: usize) -> Result<Option<Vec<u8>>, CapabilityError> {
        match self.args.get(index) {
            None | Some(Value::Nil) => Ok(None),
            Some(_) => self.string(index).map(Some),
        }
    }
}

/// Where a capability can be installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Installed on every platform.
    Everywhere,
    /// Installed only when the host has a console it can drive.
    Console,
}

/// A single host operation callable from Lua as `lt.<NAME>`.
///
/// Implement this trait to add a new capability. Then:
///
/// 1. Re-export the struct from `src/capabilities/mod.rs`.
/// 2. Add one entry to the `REGISTRY` in [`crate::registry`]:
///    `Descriptor::of::<MyCap>()`.
pub trait Capability: Sized + 'static {
    /// Name under the `lt` table. Scripts depend on the exact spelling.
    const NAME: &'static str;

    /// Number of values every call returns. Slots the capability does not
    /// fill are `nil`.
    const RETURNS: usize;

    const AVAILABILITY: Availability = Availability::Everywhere;

    /// Validate the call's arguments. Nothing observable may happen here.
    fn parse(frame: &CallFrame) -> Result<Self, CapabilityError>;

    /// Perform the capability's effect and return the values it produces.
    fn execute(self, lua: &Lua, ctx: &Context) -> mlua::Result<Vec<Value>>;

    /// Parse, execute, and pad the results to [`RETURNS`](Self::RETURNS).
    /// This is the function pointer stored in the registry.
    fn invoke(lua: &Lua, ctx: &Context, frame: CallFrame) -> mlua::Result<MultiValue> {
        let capability = Self::parse(&frame)?;
        let mut values = capability.execute(lua, ctx)?;
        values.resize(Self::RETURNS, Value::Nil);
        Ok(MultiValue::from_iter(values))
    }
}

pub type InvokeFn = fn(&Lua, &Context, CallFrame) -> mlua::Result<MultiValue>;

/// One row of the registration table.
#[derive(Clone, Copy)]
pub struct Descriptor {
    pub name: &'static str,
    pub availability: Availability,
    pub returns: usize,
    pub invoke: InvokeFn,
}

impl Descriptor {
    pub const fn of<C: Capability>() -> Self {
        Descriptor {
            name: C::NAME,
            availability: C::AVAILABILITY,
            returns: C::RETURNS,
            invoke: C::invoke,
        }
    }
}

impl std::fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Descriptor")
            .field("name", &self.name)
            .field("availability", &self.availability)
            .field("returns", &self.returns)
            .finish_non_exhaustive()
    }
}
