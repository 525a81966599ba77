//! The registration table: every capability the host can expose, and the
//! platform check that decides which of them a given host installs.

use crate::capabilities::{
    Color, OpenFile, ReadFile, ReadNumber, ReadString, SaveFile, SetCursorPos, Sleep, System,
};
use crate::capability::{Availability, CallFrame, Context, Descriptor};
use crate::runner;
use mlua::{Function, Lua, MultiValue, Table, Value};
use std::io::{self, IsTerminal};
use std::rc::Rc;

/// Global table scripts reach the capabilities through.
pub const NAMESPACE: &str = "lt";

/// To add a new capability, add one entry here using [`Descriptor::of`].
pub static REGISTRY: &[Descriptor] = &[
    Descriptor::of::<Sleep>(),
    Descriptor::of::<Color>(),
    Descriptor::of::<SetCursorPos>(),
    Descriptor::of::<OpenFile>(),
    Descriptor::of::<System>(),
    Descriptor::of::<ReadFile>(),
    Descriptor::of::<SaveFile>(),
    Descriptor::of::<ReadString>(),
    Descriptor::of::<ReadNumber>(),
];

/// What the current host can support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub console: bool,
}

impl Platform {
    /// Windows always has a console API; elsewhere console control needs
    /// stdout to be a terminal.
    pub fn detect() -> Self {
        Platform {
            console: cfg!(windows) || io::stdout().is_terminal(),
        }
    }

    pub fn supports(&self, availability: Availability) -> bool {
        match availability {
            Availability::Everywhere => true,
            Availability::Console => self.console,
        }
    }
}

/// The registry rows installed on `platform`, in table order.
pub fn available(platform: Platform) -> impl Iterator<Item = &'static Descriptor> {
    REGISTRY
        .iter()
        .filter(move |descriptor| platform.supports(descriptor.availability))
}

// Wraps a raw capability, which returns `true, results...` or `false, message`,
// so that failures are raised with the bare message string and no position.
const RAISE_SHIM: &str = r#"
local raw = ...
local pack, unpack, error = table.pack, table.unpack, error
return function(...)
    local r = pack(raw(...))
    if not r[1] then
        error(r[2], 0)
    end
    return unpack(r, 2, r.n)
end
"#;

/// Build the namespace table for `platform` and bind it as a global.
///
/// Capabilities the platform does not support are left out entirely, so
/// calling one fails the same way as calling any other missing field.
pub(crate) fn install(lua: &Lua, ctx: &Rc<Context>, platform: Platform) -> mlua::Result<Table> {
    let table = lua.create_table()?;
    for descriptor in available(platform) {
        let ctx = Rc::clone(ctx);
        let invoke = descriptor.invoke;
        let raw = lua.create_function(move |lua, args: MultiValue| {
            match invoke(lua, &ctx, CallFrame::new(args)) {
                Ok(values) => Ok(MultiValue::from_iter(
                    std::iter::once(Value::Boolean(true)).chain(values),
                )),
                Err(err) => {
                    let message = lua.create_string(runner::describe(&err))?;
                    Ok(MultiValue::from_iter([
                        Value::Boolean(false),
                        Value::String(message),
                    ]))
                }
            }
        })?;
        let function: Function = lua
            .load(RAISE_SHIM)
            .set_name(format!("={NAMESPACE}.{}", descriptor.name))
            .call(raw)?;
        table.set(descriptor.name, function)?;
        tracing::debug!(name = descriptor.name, "installed capability");
    }
    lua.globals().set(NAMESPACE, table.clone())?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::{host, script_error};
    use std::collections::HashSet;

    fn find(name: &str) -> Option<&'static Descriptor> {
        REGISTRY.iter().find(|descriptor| descriptor.name == name)
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = REGISTRY.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), REGISTRY.len());
    }

    #[test]
    fn test_return_counts() {
        let expected = [
            ("Sleep", 1),
            ("Color", 1),
            ("SetCursorPos", 2),
            ("OpenFile", 1),
            ("System", 1),
            ("ReadFile", 1),
            ("SaveFile", 2),
            ("ReadString", 1),
            ("ReadNumber", 1),
        ];
        for (name, returns) in expected {
            let descriptor = find(name).unwrap_or_else(|| panic!("missing {name}"));
            assert_eq!(descriptor.returns, returns, "{name}");
        }
        assert!(find("sleep").is_none());
    }

    #[test]
    fn test_console_capabilities_are_gated() {
        let headless: Vec<_> = available(Platform { console: false })
            .map(|d| d.name)
            .collect();
        assert!(!headless.contains(&"Sleep"));
        assert!(!headless.contains(&"Color"));
        assert!(!headless.contains(&"SetCursorPos"));
        assert!(headless.contains(&"ReadFile"));

        assert_eq!(available(Platform { console: true }).count(), REGISTRY.len());
    }

    #[test]
    fn test_errors_reach_scripts_as_strings() {
        let (host, _) = host("");
        assert_eq!(script_error(&host, "lt.ReadFile, 5"), "expected string");
        let (matches, found): (bool, i64) = host
            .lua()
            .load(
                "local ok, err = pcall(lt.ReadFile, 5)\n\
                 return err == 'expected string', string.find(err, 'string')",
            )
            .eval()
            .unwrap();
        assert!(matches);
        assert_eq!(found, 10);
    }

    #[test]
    fn test_results_pass_through_unchanged() {
        let (host, _) = host("");
        let (count, first): (i64, Value) = host
            .lua()
            .load("return select('#', lt.SetCursorPos(0, 0)), (lt.SetCursorPos(0, 0))")
            .eval()
            .unwrap();
        assert_eq!(count, 2);
        assert!(first.is_nil());
    }
}
