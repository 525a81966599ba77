mod color;
mod cursor;
mod open_file;
mod read_file;
mod read_input;
mod save_file;
mod sleep;
mod system;

pub use color::Color;
pub use cursor::SetCursorPos;
pub use open_file::OpenFile;
pub use read_file::ReadFile;
pub use read_input::{ReadNumber, ReadString};
pub use save_file::SaveFile;
pub use sleep::Sleep;
pub use system::System;

use std::ffi::OsString;

/// Script strings are raw bytes; keep them intact where the OS allows it.
#[cfg(unix)]
pub(crate) fn os_string(bytes: Vec<u8>) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes)
}

#[cfg(not(unix))]
pub(crate) fn os_string(bytes: Vec<u8>) -> OsString {
    OsString::from(String::from_utf8_lossy(&bytes).into_owned())
}
