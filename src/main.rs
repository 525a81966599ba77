use anyhow::{Context, Result};
use clap::Parser;
use luatext::{Host, HostConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "luatext",
    about = "Run a Lua script with console, process, and file capabilities",
    version
)]
struct Args {
    /// Script to run at startup
    #[arg(short, long, default_value = luatext::config::DEFAULT_ENTRY_SCRIPT)]
    script: PathBuf,

    /// Wait for Enter after reporting a script error
    #[arg(long)]
    pause_on_error: bool,

    /// Leave out Sleep, Color, and SetCursorPos even on a terminal
    #[arg(long)]
    no_console: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout belongs to the script.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("luatext=error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = HostConfig {
        entry_script: args.script,
        pause_on_error: args.pause_on_error,
        console: args.no_console.then_some(false),
        ..HostConfig::default()
    };

    let host = Host::new(config).context("Failed to start the Lua host")?;

    // A failing script has already been reported; the process still exits cleanly.
    host.run_entry();

    Ok(())
}
