mod bracket;
mod export;
mod fixture;
mod input;
mod pools;
mod stats;

use clap::{Parser, Subcommand};
use thiserror::Error;

use std::io;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(version, about)]
pub struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Assign all participants to new pools.
    Pools(pools::Assign),
    /// Move a single participant into another pool.
    Move(pools::Move),
    /// Draw the single elimination bracket of every pool.
    Bracket(bracket::Command),
    /// Print the fixture sheet of every pool.
    Fixture(fixture::Command),
    /// Print the spreadsheet rows of every pool.
    Export(export::Command),
    /// Print the number of participants per district.
    Stats(stats::Command),
    /// List the options accepted by `pools --options`.
    Options,
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Options(#[from] roster_core::options::Error),
    #[error(transparent)]
    Roster(#[from] roster_core::Error),
}

fn main() {
    pretty_env_logger::init();

    let args = Args::parse();

    let res = match args.command {
        Command::Pools(command) => command.run(),
        Command::Move(command) => command.run(),
        Command::Bracket(command) => command.run(),
        Command::Fixture(command) => command.run(),
        Command::Export(command) => command.run(),
        Command::Stats(command) => command.run(),
        Command::Options => pools::list_options(),
    };

    if let Err(err) = res {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
