use clap::Args;
use roster_core::render::{Advancement, Input, Layout, Renderer};
use roster_core::{Bracket, EntrantSpot, Participant, Pool};

use std::path::PathBuf;

use crate::input::Roster;
use crate::Result;

#[derive(Debug, Args)]
pub struct Command {
    /// The JSON file containing the participants.
    file: PathBuf,
    /// Only draw the bracket of the pool with this name.
    #[clap(long)]
    pool: Option<String>,
}

impl Command {
    pub fn run(&self) -> Result<()> {
        let roster = Roster::read(&self.file)?;
        let pools = roster.pools_or_assign();

        let selected: Vec<&Pool> = match &self.pool {
            Some(name) => match pools.get(name) {
                Some(pool) => vec![pool],
                None => return Err(roster_core::Error::UnknownPool(name.clone()).into()),
            },
            None => pools.iter().collect(),
        };

        for pool in selected {
            let entrants = pool.participants(&roster.participants);
            let bracket = match Bracket::try_new(entrants.into_iter()) {
                Ok(bracket) => bracket,
                Err(err) => {
                    println!("{}: {}", pool.name, err);
                    continue;
                }
            };

            println!(
                "{}: {} entrants, {} slots, {} byes",
                pool.name,
                bracket.entrants().len(),
                bracket.slots().len(),
                bracket.byes()
            );

            let mut renderer = TextRenderer::default();
            bracket.render(&mut renderer);
            print!("{}", renderer.output);
        }

        Ok(())
    }
}

/// Renders a bracket as plain text, one line per match, prefixed with the vertical position of
/// the match output.
#[derive(Debug, Default)]
struct TextRenderer {
    output: String,
}

impl<'a> Renderer<&'a Participant> for TextRenderer {
    fn render(&mut self, layout: Layout<'_, &'a Participant>) {
        for round in layout.rounds() {
            self.output.push_str(&format!("  Round {}\n", round.number()));

            for node in round.matches() {
                let [first, second] = node.inputs();

                let line = match node.advancement() {
                    Advancement::Match => {
                        format!("{} vs {}", describe(&layout, first), describe(&layout, second))
                    }
                    Advancement::Walkover { side } => {
                        format!("{} (bye)", describe(&layout, &node.inputs()[side]))
                    }
                    Advancement::Empty => String::from("(empty)"),
                };

                self.output
                    .push_str(&format!("    {:>7.2} | {}\n", node.output(), line));
            }
        }

        if let Some(position) = layout.winner() {
            self.output.push_str(&format!("  Winner {:>7.2}\n", position));
        }
    }
}

fn describe(layout: &Layout<'_, &Participant>, input: &Input) -> String {
    match layout.entrant(input.spot) {
        EntrantSpot::Entrant(participant) => {
            format!("{} ({})", participant.name, participant.district)
        }
        EntrantSpot::Empty => String::from("bye"),
        EntrantSpot::TBD => String::from("TBD"),
    }
}
