use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod frame;
pub mod run;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a bridge instance over stdin/stdout JSON envelopes.
    Run(RunArgs),
    /// Frame a payload and print the wire bytes.
    Frame(FrameArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Run(args) => run::run(args),
        Command::Frame(args) => frame::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Session identifier supplied by the embedding host. Absent: standalone mode.
    #[arg(long, value_name = "ID")]
    pub session_id: Option<String>,

    /// Terminal command line to inject into the guest's stdin before the loop.
    #[arg(long, value_name = "LINE")]
    pub command: Option<String>,

    /// Pause between injected stdin characters, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 10)]
    pub inject_delay_ms: u64,

    /// Exit after routing N inbound envelopes.
    #[arg(long, value_name = "N")]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct FrameArgs {
    /// Raw string payload.
    #[arg(long, conflicts_with = "file")]
    pub data: Option<String>,

    /// Read payload from file.
    #[arg(long, conflicts_with = "data")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build information.
    #[arg(long)]
    pub extended: bool,
}
