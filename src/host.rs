use crate::capability::{Context, OutputHandler};
use crate::config::HostConfig;
use crate::registry::{self, Platform};
use crate::runner::{self, Outcome};
use anyhow::{Result, anyhow};
use mlua::Lua;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

/// One Lua interpreter with the `lt` capabilities installed.
///
/// Creating a `Host` is the bootstrap step: the interpreter and its standard
/// library are created, and the registration table filtered for the current
/// platform is bound under [`registry::NAMESPACE`]. Everything a capability
/// needs is reached through the host's [`Context`]; there is no global state.
pub struct Host {
    lua: Lua,
    ctx: Rc<Context>,
    platform: Platform,
}

impl Host {
    /// Create a host that reads lines from stdin and writes to stdout.
    pub fn new(config: HostConfig) -> Result<Self> {
        Self::with_io(config, io::BufReader::new(io::stdin()), |data| {
            let mut stdout = io::stdout().lock();
            let _ = stdout.write_all(data);
            let _ = stdout.flush();
        })
    }

    /// Create a host with a custom line source and output handler.
    ///
    /// The handler receives every byte capabilities and failure reports
    /// would otherwise write to stdout.
    pub fn with_io<I, F>(config: HostConfig, input: I, handler: F) -> Result<Self>
    where
        I: BufRead + 'static,
        F: Fn(&[u8]) + Send + Sync + 'static,
    {
        let platform = match config.console {
            Some(console) => Platform { console },
            None => Platform::detect(),
        };
        let handler: OutputHandler = Arc::new(handler);
        let ctx = Rc::new(Context::new(config, Box::new(input), handler));

        let lua = Lua::new();
        // mlua errors are not Send + Sync here, so they are flattened into the message.
        registry::install(&lua, &ctx, platform).map_err(|err| {
            anyhow!(
                "Failed to install the '{}' table: {err}",
                registry::NAMESPACE
            )
        })?;

        Ok(Host { lua, ctx, platform })
    }

    /// Run the configured entry script.
    pub fn run_entry(&self) -> Outcome {
        let path = self.ctx.config().entry_script.clone();
        self.run_file(path)
    }

    /// Run a script file. Failures are reported, not returned as errors.
    pub fn run_file(&self, path: impl AsRef<Path>) -> Outcome {
        runner::run_file(&self.lua, &self.ctx, path.as_ref())
    }

    pub fn lua(&self) -> &Lua {
        &self.lua
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// A host fed from `input`, with console capabilities installed and all
    /// output captured.
    pub(crate) fn host(input: &str) -> (Host, Arc<Mutex<Vec<u8>>>) {
        host_with(HostConfig::default(), input)
    }

    pub(crate) fn host_with(config: HostConfig, input: &str) -> (Host, Arc<Mutex<Vec<u8>>>) {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = captured.clone();
        let config = HostConfig {
            console: config.console.or(Some(true)),
            ..config
        };
        let host = Host::with_io(config, io::Cursor::new(input.as_bytes().to_vec()), move |data| {
            sink.lock().unwrap().extend_from_slice(data);
        })
        .unwrap();
        (host, captured)
    }

    pub(crate) fn output(captured: &Arc<Mutex<Vec<u8>>>) -> String {
        String::from_utf8_lossy(&captured.lock().unwrap()).into_owned()
    }

    /// The error value a script receives from `pcall(<args>)`, which must be
    /// a string.
    pub(crate) fn script_error(host: &Host, args: &str) -> String {
        let (ok, kind, err): (bool, String, String) = host
            .lua()
            .load(format!(
                "local ok, err = pcall({args}) return ok, type(err), tostring(err)"
            ))
            .eval()
            .unwrap();
        assert!(!ok, "pcall({args}) succeeded");
        assert_eq!(kind, "string", "error from pcall({args}) is {err:?}");
        err
    }
}
