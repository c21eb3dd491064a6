//! A CLI for inspecting and editing classic Mac resource files.

mod cli;
mod cmds;

use crate::cli::Cli;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // --verbose enables debug output; RUST_LOG overrides either way.
    let level = if cli.verbose() {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_module("rsrcdev", level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .init();

    cli.run()?;
    Ok(())
}
