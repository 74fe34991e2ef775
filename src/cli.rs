use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "vaultgate")]
#[command(version, about = "Decide at startup whether to enter the login or the setup flow")]
pub struct Cli {
    /// Config file (default: <data dir>/config.toml, optional)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Application data directory (default: platform local data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run the startup bootstrap (default)
    Run,

    /// Record that authentication setup has been completed
    MarkConfigured,

    /// Forget the setup record so the next launch enters the setup flow
    Reset,

    /// Print whether setup has been completed
    Status,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Run)
    }
}
