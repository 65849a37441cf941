use clap::Args;
use roster_core::fixture::sheet_name;
use roster_core::FixtureSheet;

use std::path::PathBuf;

use crate::input::Roster;
use crate::Result;

#[derive(Debug, Args)]
pub struct Command {
    /// The JSON file containing the participants.
    file: PathBuf,
    /// The weight category printed on every page.
    #[clap(long)]
    weight: Option<String>,
}

impl Command {
    pub fn run(&self) -> Result<()> {
        let roster = Roster::read(&self.file)?;
        let pools = roster.pools_or_assign();

        for pool in &pools {
            let participants = pool.participants(&roster.participants);
            let sheet = match &self.weight {
                Some(weight) => FixtureSheet::new_with_category(&participants, weight.as_str()),
                None => FixtureSheet::new(&participants),
            };

            println!("Sheet: {}", sheet_name(&pool.name));

            for page in sheet.pages() {
                println!("{}", page.caption());

                for (index, half) in page.halves().iter().enumerate() {
                    println!("{} / Half {}", pool.name, index + 1);
                    println!("S.No | District Code | Player Name");

                    for line in half {
                        let entrant = line.entrant;
                        println!("{}) {} {}", line.serial, entrant.district, entrant.name);
                    }
                }

                println!("{}", "-".repeat(80));
            }
        }

        Ok(())
    }
}
