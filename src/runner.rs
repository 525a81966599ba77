//! Script runner: loads a Lua file into the host's interpreter and reports
//! any failure instead of propagating it.

use crate::capability::Context;
use mlua::Lua;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// How a script run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// The script failed; `message` is what was reported.
    Failed { message: String },
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }
}

/// Load and execute `path` inside `lua`.
///
/// Load errors, syntax errors, and unhandled runtime errors are written to
/// the context's output as a single line and then swallowed. With
/// `pause_on_error` set, the runner also waits for one line of input.
pub fn run_file(lua: &Lua, ctx: &Context, path: &Path) -> Outcome {
    debug!(path = %path.display(), "running script");
    match exec_file(lua, path) {
        Ok(()) => Outcome::Completed,
        Err(err) => {
            let message = describe(&err);
            warn!(path = %path.display(), error = %message, "script failed");
            report(ctx, &message);
            Outcome::Failed { message }
        }
    }
}

fn exec_file(lua: &Lua, path: &Path) -> mlua::Result<()> {
    let source = fs::read(path)
        .map_err(|_| mlua::Error::RuntimeError(format!("cannot open {}", path.display())))?;
    lua.load(&source[..])
        .set_name(format!("@{}", path.display()))
        .exec()
}

/// The human-readable message behind `err`.
///
/// Callback wrappers are unwrapped down to the error that caused them, and
/// the stack traceback Lua appends to runtime errors is dropped.
pub fn describe(err: &mlua::Error) -> String {
    match err {
        mlua::Error::CallbackError { cause, .. } => describe(cause),
        mlua::Error::RuntimeError(message) => strip_traceback(message).to_owned(),
        mlua::Error::SyntaxError { message, .. } => strip_traceback(message).to_owned(),
        mlua::Error::ExternalError(inner) => inner.to_string(),
        other => other.to_string(),
    }
}

fn strip_traceback(message: &str) -> &str {
    match message.find("\nstack traceback:") {
        Some(idx) => &message[..idx],
        None => message,
    }
}

fn report(ctx: &Context, message: &str) {
    ctx.emit(format!("{message}\n").as_bytes());
    if ctx.config().pause_on_error {
        ctx.emit(b"Press Enter to continue...");
        let _ = ctx.read_line();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CapabilityError;
    use std::sync::Arc;

    #[test]
    fn test_strip_traceback() {
        assert_eq!(
            strip_traceback("main.lua:3: boom\nstack traceback:\n\t[C]: in ?"),
            "main.lua:3: boom"
        );
        assert_eq!(strip_traceback("plain"), "plain");
    }

    #[test]
    fn test_describe_unwraps_callback_errors() {
        let err = mlua::Error::CallbackError {
            traceback: "stack traceback:\n\t[C]: in ?".to_string(),
            cause: Arc::new(CapabilityError::ExpectedNumber.into()),
        };
        assert_eq!(describe(&err), "expected number");
    }

    #[test]
    fn test_describe_runtime_error() {
        let lua = Lua::new();
        let err = lua.load("error('boom', 0)").exec().unwrap_err();
        assert_eq!(describe(&err), "boom");
    }

    #[test]
    fn test_describe_syntax_error() {
        let lua = Lua::new();
        let err = lua.load("local = 1").set_name("=bad").exec().unwrap_err();
        assert!(describe(&err).starts_with("bad:1:"), "got: {}", describe(&err));
    }
}
