//! Host configuration.
//!
//! Holds the entry script path and the size limits capabilities enforce.

use std::path::PathBuf;

/// Script run at startup when no other path is given.
pub const DEFAULT_ENTRY_SCRIPT: &str = "scripts/main.lua";

/// Maximum number of bytes `ReadFile` returns. Longer files are truncated.
pub const READ_FILE_LIMIT: usize = 65535;

/// Maximum number of bytes `ReadString`/`ReadNumber` keep from one input line.
pub const INPUT_LINE_LIMIT: usize = 256;

#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Script loaded by [`crate::Host::run_entry`].
    pub entry_script: PathBuf,

    /// Wait for an input line after reporting a script failure.
    pub pause_on_error: bool,

    pub read_file_limit: usize,

    pub input_line_limit: usize,

    /// Forces console capabilities on or off instead of detecting support.
    pub console: Option<bool>,
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig {
            entry_script: PathBuf::from(DEFAULT_ENTRY_SCRIPT),
            pause_on_error: false,
            read_file_limit: READ_FILE_LIMIT,
            input_line_limit: INPUT_LINE_LIMIT,
            console: None,
        }
    }
}
