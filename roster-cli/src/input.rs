use roster_core::{Participant, ParticipantId, PoolPartitioner, Pools};
use serde::{Deserialize, Serialize};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{Error, Result};

/// A single participant record as stored in a participant file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub name: String,
    pub district: String,
    #[serde(default)]
    pub pool: Option<String>,
}

/// The participants of a file together with their current pool assignments.
#[derive(Clone, Debug)]
pub struct Roster {
    pub participants: Vec<Participant>,
    pub pools: Pools,
}

impl Roster {
    pub fn read<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        let records: Vec<Record> = serde_json::from_reader(BufReader::new(file))?;

        log::debug!("Read {} participants from {}", records.len(), path.display());

        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        let pools = Pools::from_assignments(
            records
                .iter()
                .map(|record| (ParticipantId::from(record.id.as_str()), record.pool.clone())),
        );

        let participants = records
            .into_iter()
            .map(|record| Participant::new(record.id, record.name, record.district))
            .collect();

        Self {
            participants,
            pools,
        }
    }

    /// Returns the pools stored in the file. If no participant has a pool yet, all participants
    /// are assigned automatically.
    pub fn pools_or_assign(&self) -> Pools {
        if !self.pools.is_empty() {
            return self.pools.clone();
        }

        log::info!("No pool assignments found, assigning automatically");

        let assignment = PoolPartitioner::new().assign(&self.participants);
        for placement in assignment.fallbacks() {
            eprintln!(
                "warning: {} was placed into {} together with another participant from {}",
                placement.participant, placement.pool, placement.district
            );
        }

        assignment.into_pools()
    }

    /// Returns the records of all participants with the pool assignments of `pools`.
    pub fn records(&self, pools: &Pools) -> Vec<Record> {
        self.participants
            .iter()
            .map(|participant| Record {
                id: participant.id.to_string(),
                name: participant.name.clone(),
                district: participant.district.clone(),
                pool: pools.pool_of(&participant.id).map(|pool| pool.name.clone()),
            })
            .collect()
    }
}
