//! Failures raised by capabilities into the running script.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A failure signaled by a capability.
///
/// The `Display` text of each variant is the string scripts receive when
/// they catch the error with `pcall`, so the messages are fixed.
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("expected number")]
    ExpectedNumber,

    #[error("expected string")]
    ExpectedString,

    #[error("Unable to open file")]
    UnableToOpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<CapabilityError> for mlua::Error {
    fn from(err: CapabilityError) -> Self {
        mlua::Error::external(err)
    }
}
