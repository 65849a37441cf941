use clap::Args;
use roster_core::stats::{district_counts, TOP_DISTRICTS};

use std::path::PathBuf;

use crate::input::Roster;
use crate::Result;

#[derive(Debug, Args)]
pub struct Command {
    /// The JSON file containing the participants.
    file: PathBuf,
    /// Show every district instead of the largest ones.
    #[clap(long)]
    all: bool,
}

impl Command {
    pub fn run(&self) -> Result<()> {
        let roster = Roster::read(&self.file)?;

        if roster.participants.is_empty() {
            println!("No participants");
            return Ok(());
        }

        let total = roster.participants.len();
        let limit = if self.all { usize::MAX } else { TOP_DISTRICTS };

        println!("District | Participants | Share");
        for count in district_counts(&roster.participants).iter().take(limit) {
            println!(
                "{} | {} | {:.0}%",
                count.district,
                count.count,
                count.percent(total)
            );
        }

        Ok(())
    }
}
