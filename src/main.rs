use std::process::ExitCode;

use clap::Parser;
use groupsweep::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Purge(args) => cli::purge::run(args).await,
    }
}
