use std::process::ExitCode;

use clap::Parser;
use vaultgate_lib::{bootstrap, cli::Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match bootstrap::run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("vaultgate: {err:#}");
            ExitCode::FAILURE
        }
    }
}
