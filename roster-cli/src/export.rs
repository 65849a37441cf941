use clap::Args;
use roster_core::export::{self, Category, HEADER};

use std::path::PathBuf;

use crate::input::Roster;
use crate::Result;

#[derive(Debug, Args)]
pub struct Command {
    /// The JSON file containing the participants.
    file: PathBuf,
    #[clap(long, default_value = "")]
    age: String,
    #[clap(long, default_value = "")]
    weight: String,
    /// Print the sheets as JSON instead of tab separated values.
    #[clap(long)]
    json: bool,
}

impl Command {
    pub fn run(&self) -> Result<()> {
        let roster = Roster::read(&self.file)?;
        let pools = roster.pools_or_assign();

        let category = Category::new(self.age.as_str(), self.weight.as_str());
        let sheets = export::export(&roster.participants, &pools, &category);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&sheets)?);
            return Ok(());
        }

        for sheet in &sheets {
            println!("# {}", sheet.name);
            println!("{}", HEADER.join("\t"));

            for row in &sheet.rows {
                println!("{}", row.cells().join("\t"));
            }
        }

        Ok(())
    }
}
