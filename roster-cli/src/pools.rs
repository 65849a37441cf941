use clap::Args;
use roster_core::options::RosterOptionValues;
use roster_core::pools::UNASSIGNED;
use roster_core::{assign_manually, ParticipantId, PoolPartitioner, Pools, Target};

use std::path::PathBuf;

use crate::input::Roster;
use crate::Result;

#[derive(Debug, Args)]
pub struct Assign {
    /// The JSON file containing the participants.
    file: PathBuf,
    /// Print the participant records with their new pools as JSON.
    #[clap(long)]
    json: bool,
    /// Partitioner options as a JSON object, e.g. '{"pool_count": 4}'.
    #[clap(long)]
    options: Option<String>,
    #[clap(long)]
    min_pools: Option<u64>,
    /// Use a fixed number of pools instead of deriving it from the largest district.
    #[clap(long)]
    pool_count: Option<u64>,
    #[clap(long)]
    pool_prefix: Option<String>,
}

impl Assign {
    pub fn run(&self) -> Result<()> {
        let roster = Roster::read(&self.file)?;

        let partitioner = PoolPartitioner::new_with_options(self.option_values()?);
        let assignment = partitioner.assign(&roster.participants);

        for placement in assignment.fallbacks() {
            eprintln!(
                "warning: {} was placed into {} together with another participant from {}",
                placement.participant, placement.pool, placement.district
            );
        }

        print_pools(&roster, assignment.pools(), self.json)
    }

    /// Returns the `--options` object overridden by the individual flags, merged with the
    /// defaults of the partitioner.
    fn option_values(&self) -> Result<RosterOptionValues> {
        let mut values = match &self.options {
            Some(json) => serde_json::from_str(json)?,
            None => RosterOptionValues::new(),
        };

        if let Some(min_pools) = self.min_pools {
            values.set("min_pools", min_pools);
        }
        if let Some(pool_count) = self.pool_count {
            values.set("pool_count", pool_count);
        }
        if let Some(pool_prefix) = &self.pool_prefix {
            values.set("pool_prefix", pool_prefix.as_str());
        }

        Ok(values.merge(PoolPartitioner::options())?)
    }
}

#[derive(Debug, Args)]
pub struct Move {
    /// The JSON file containing the participants and their current pools.
    file: PathBuf,
    /// The id of the participant to move.
    participant: String,
    /// The name of the target pool or "unassigned".
    pool: String,
    #[clap(long)]
    json: bool,
}

impl Move {
    pub fn run(&self) -> Result<()> {
        let roster = Roster::read(&self.file)?;
        let pools = move_participant(&roster, &self.participant, &self.pool)?;

        print_pools(&roster, &pools, self.json)
    }
}

fn move_participant(roster: &Roster, participant: &str, pool: &str) -> Result<Pools> {
    let pools = assign_manually(
        &roster.participants,
        &roster.pools,
        &ParticipantId::from(participant),
        &Target::from(pool),
    )?;

    Ok(pools)
}

/// Lists the options accepted by `roster pools --options`.
pub fn list_options() -> Result<()> {
    println!("Key | Default | Description");
    for (key, option) in PoolPartitioner::options().sorted() {
        println!("{} | {} | {}", key, option.value, option.name);
    }

    Ok(())
}

fn print_pools(roster: &Roster, pools: &Pools, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&roster.records(pools))?);
        return Ok(());
    }

    for pool in pools {
        println!("{} ({})", pool.name, pool.len());
        for participant in pool.participants(&roster.participants) {
            println!(
                "  {} | {} | {}",
                participant.id, participant.district, participant.name
            );
        }
    }

    let unassigned = pools.unassigned(&roster.participants);
    if !unassigned.is_empty() {
        println!("{} ({})", UNASSIGNED, unassigned.len());
        for participant in unassigned {
            println!(
                "  {} | {} | {}",
                participant.id, participant.district, participant.name
            );
        }
    }

    for collision in pools.collisions(&roster.participants) {
        eprintln!(
            "warning: {} and {} from {} share {}",
            collision.participants[0],
            collision.participants[1],
            collision.district,
            collision.pool
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use roster_core::options::OptionValue;
    use roster_core::{Participant, Pools};

    use std::path::PathBuf;

    use super::{move_participant, Assign};
    use crate::input::Roster;
    use crate::Error;

    fn roster() -> Roster {
        let participants = vec![
            Participant::new("x", "X", "TVY"),
            Participant::new("y", "Y", "TVY"),
            Participant::new("z", "Z", "CBE"),
        ];
        let pools = Pools::from_assignments(vec![
            (participants[0].id.clone(), Some("Pool 1")),
            (participants[1].id.clone(), Some("Pool 2")),
            (participants[2].id.clone(), Some("Pool 2")),
        ]);

        Roster {
            participants,
            pools,
        }
    }

    fn assign(options: Option<&str>, pool_count: Option<u64>) -> Assign {
        Assign {
            file: PathBuf::from("participants.json"),
            json: false,
            options: options.map(String::from),
            min_pools: None,
            pool_count,
            pool_prefix: None,
        }
    }

    #[test]
    fn test_move_participant() {
        let roster = roster();

        let pools = move_participant(&roster, "z", "Pool 1").unwrap();
        assert_eq!(pools.pool_of(&"z".into()).unwrap().name, "Pool 1");

        let pools = move_participant(&roster, "y", "unassigned").unwrap();
        assert!(pools.pool_of(&"y".into()).is_none());
    }

    #[test]
    fn test_move_participant_conflict() {
        let roster = roster();

        let err = move_participant(&roster, "x", "Pool 2").unwrap_err();
        assert!(matches!(
            err,
            Error::Roster(roster_core::Error::DistrictConflict { .. })
        ));
        assert_eq!(
            err.to_string(),
            "pool \"Pool 2\" already has a participant from TVY"
        );
    }

    #[test]
    fn test_option_values() {
        let mut values = assign(Some(r#"{"pool_count": 3, "pool_prefix": "Group"}"#), Some(4))
            .option_values()
            .unwrap();

        assert_eq!(values.take("pool_count"), Some(OptionValue::U64(4)));
        assert_eq!(values.take("pool_prefix"), Some(OptionValue::from("Group")));
        assert_eq!(values.take("min_pools"), Some(OptionValue::U64(2)));
    }

    #[test]
    fn test_option_values_invalid() {
        let err = assign(Some(r#"{"pool_size": 3}"#), None)
            .option_values()
            .unwrap_err();
        assert!(matches!(err, Error::Options(_)));

        let err = assign(Some(r#"{"pool_count": -1}"#), None)
            .option_values()
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
