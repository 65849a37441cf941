//! # Pool Partitioner
//!
//! Distributes participants into pools so that no two participants from the same district share
//! a pool.
//!
//! Participants are grouped by district (keeping their original order), the number of pools is
//! taken from the largest district group and the participants are then placed district by
//! district using a round-robin cursor over the pools. For every participant the pools are
//! scanned starting at the cursor until a pool without a participant from the same district is
//! found. Every pool is visited at most once; if every pool already contains the district the
//! participant is placed in the cursor pool anyway and the placement is reported as a
//! [`PlacementKind::FallbackPlaced`].
//!
//! Manual reassignments are done using [`assign_manually`], which rejects a move into a pool that
//! already contains the district.
use crate::options::{RosterOptionValues, RosterOptions};
use crate::{Error, Participant, ParticipantId, Result};

use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::fmt::{self, Display, Formatter};
use std::slice::Iter;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The name of the pseudo-pool containing all participants without a pool.
pub const UNASSIGNED: &str = "unassigned";

/// The default minimum number of pools.
pub const MIN_POOLS: usize = 2;

/// A named group of participants competing against each other.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pool {
    pub name: String,
    pub members: Vec<ParticipantId>,
}

impl Pool {
    /// Creates a new empty `Pool` with the given `name`.
    pub fn new<T>(name: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Returns `true` if the participant with the given `id` is a member of this `Pool`.
    #[inline]
    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.members.contains(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the participants of this pool in pool order. Members missing from `participants`
    /// are skipped.
    pub fn participants<'a>(&self, participants: &'a [Participant]) -> Vec<&'a Participant> {
        self.members
            .iter()
            .filter_map(|id| participants.iter().find(|p| &p.id == id))
            .collect()
    }
}

/// A mapping from pool names to participant ids.
///
/// Pools keep the order they were created in. A participant id appears in at most one pool.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Pools {
    pools: Vec<Pool>,
}

impl Pools {
    /// Creates a new empty `Pools` mapping.
    #[inline]
    pub fn new() -> Self {
        Self { pools: Vec::new() }
    }

    /// Rebuilds a mapping from the pool each participant is assigned to. `None` and
    /// [`UNASSIGNED`] leave the participant unassigned. Pools are created in the order they are
    /// first seen.
    pub fn from_assignments<I, P>(assignments: I) -> Self
    where
        I: IntoIterator<Item = (ParticipantId, Option<P>)>,
        P: Into<String>,
    {
        let mut this = Self::new();

        for (id, pool) in assignments {
            let name = match pool {
                Some(name) => name.into(),
                None => continue,
            };

            if name == UNASSIGNED {
                continue;
            }

            // A participant only ever belongs to one pool.
            this.remove_member(&id);

            match this.get_mut(&name) {
                Some(pool) => pool.members.push(id),
                None => this.pools.push(Pool {
                    name,
                    members: vec![id],
                }),
            }
        }

        this
    }

    /// Returns the pool with the given `name`.
    pub fn get(&self, name: &str) -> Option<&Pool> {
        self.pools.iter().find(|pool| pool.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Pool> {
        self.pools.iter_mut().find(|pool| pool.name == name)
    }

    /// Returns the pool the participant with the given `id` belongs to.
    pub fn pool_of(&self, id: &ParticipantId) -> Option<&Pool> {
        self.pools.iter().find(|pool| pool.contains(id))
    }

    /// Returns the number of pools.
    #[inline]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, Pool> {
        self.pools.iter()
    }

    /// Returns the names of all pools.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.pools.iter().map(|pool| pool.name.as_str())
    }

    /// Returns all `participants` that are not a member of any pool, in their original order.
    pub fn unassigned<'a>(&self, participants: &'a [Participant]) -> Vec<&'a Participant> {
        participants
            .iter()
            .filter(|p| self.pool_of(&p.id).is_none())
            .collect()
    }

    /// Returns every pair of participants that share both a pool and a district.
    pub fn collisions(&self, participants: &[Participant]) -> Vec<Collision> {
        let districts: HashMap<&ParticipantId, &str> = participants
            .iter()
            .map(|p| (&p.id, p.district.as_str()))
            .collect();

        let mut collisions = Vec::new();
        for pool in &self.pools {
            for (index, first) in pool.members.iter().enumerate() {
                let district = match districts.get(first) {
                    Some(district) => *district,
                    None => continue,
                };

                for second in &pool.members[index + 1..] {
                    if districts.get(second) == Some(&district) {
                        collisions.push(Collision {
                            pool: pool.name.clone(),
                            district: district.to_owned(),
                            participants: [first.clone(), second.clone()],
                        });
                    }
                }
            }
        }

        collisions
    }

    fn remove_member(&mut self, id: &ParticipantId) {
        for pool in self.pools.iter_mut() {
            pool.members.retain(|member| member != id);
        }
    }
}

impl<'a> IntoIterator for &'a Pools {
    type Item = &'a Pool;
    type IntoIter = Iter<'a, Pool>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<Pool>> for Pools {
    #[inline]
    fn from(pools: Vec<Pool>) -> Self {
        Self { pools }
    }
}

/// Two participants from the same district sharing a pool.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Collision {
    pub pool: String,
    pub district: String,
    pub participants: [ParticipantId; 2],
}

/// Assigns participants to pools. See the [module documentation](self) for the algorithm.
#[derive(Clone, Debug)]
pub struct PoolPartitioner {
    options: PartitionerOptions,
}

impl PoolPartitioner {
    /// Creates a new `PoolPartitioner` using the default options.
    pub fn new() -> Self {
        Self::new_with_options(Self::options())
    }

    /// Creates a new `PoolPartitioner` using the given `options`. Values with an unexpected type
    /// are ignored and replaced with their defaults.
    ///
    /// If you don't need to specify the options consider using [`new`].
    ///
    /// [`new`]: Self::new
    pub fn new_with_options<O>(options: O) -> Self
    where
        O: Into<RosterOptionValues>,
    {
        let options = PartitionerOptions::new(options.into());
        log::debug!("Using options: {:?}", options);

        Self { options }
    }

    /// Returns the [`RosterOptions`] accepted by the partitioner.
    pub fn options() -> RosterOptions {
        RosterOptions::builder()
            .option("min_pools", "Minimum number of pools", MIN_POOLS as u64)
            .option(
                "pool_count",
                "Fixed number of pools, 0 derives it from the largest district",
                0_u64,
            )
            .option("pool_prefix", "Prefix of the pool names", "Pool")
            .build()
    }

    /// Returns the number of pools used for `len` participants whose largest district group has
    /// `largest` members.
    ///
    /// The count never exceeds `len` (or the default floor of 2 pools for smaller inputs), since
    /// any further pool would stay empty. A derived count is never below `largest`.
    pub fn pool_count(&self, largest: usize, len: usize) -> usize {
        match self.options.pool_count {
            0 => largest
                .max(self.options.min_pools)
                .min(len.max(MIN_POOLS))
                .max(1),
            n => n.min(len).max(1),
        }
    }

    /// Assigns all `participants` to freshly created pools. The returned [`Assignment`] replaces
    /// all previous pool assignments of `participants`.
    ///
    /// Assigning an empty list of participants is not an error, but results in an empty
    /// [`Assignment`].
    pub fn assign(&self, participants: &[Participant]) -> Assignment {
        if participants.is_empty() {
            log::warn!("No participants to assign to pools");
            return Assignment::default();
        }

        // Group by district in order of first appearance.
        let mut groups: Vec<(&str, Vec<&Participant>)> = Vec::new();
        let mut group_indexes: HashMap<&str, usize> = HashMap::new();
        for participant in participants {
            let district = participant.district.as_str();

            let index = *group_indexes.entry(district).or_insert_with(|| {
                groups.push((district, Vec::new()));
                groups.len() - 1
            });

            groups[index].1.push(participant);
        }

        let largest = groups
            .iter()
            .map(|(_, members)| members.len())
            .max()
            .unwrap_or(0);
        let num_pools = self.pool_count(largest, participants.len());

        log::debug!(
            "Assigning {} participants from {} districts to {} pools",
            participants.len(),
            groups.len(),
            num_pools
        );

        let mut pools: Vec<Pool> = (1..=num_pools)
            .map(|index| Pool::new(format!("{} {}", self.options.pool_prefix, index)))
            .collect();
        let mut districts: Vec<HashSet<&str>> = vec![HashSet::new(); num_pools];
        let mut placements = Vec::with_capacity(participants.len());

        let mut cursor = 0;
        for (district, members) in &groups {
            let district: &str = district;

            for participant in members {
                let (index, kind) = match free_pool(&districts, cursor, district) {
                    Some(index) => (index, PlacementKind::Placed),
                    None => {
                        log::warn!(
                            "No pool without {} left for {}, placing into {}",
                            district,
                            participant.id,
                            pools[cursor].name
                        );

                        (cursor, PlacementKind::FallbackPlaced)
                    }
                };

                pools[index].members.push(participant.id.clone());
                districts[index].insert(district);

                placements.push(Placement {
                    participant: participant.id.clone(),
                    district: district.to_owned(),
                    pool: pools[index].name.clone(),
                    kind,
                });

                cursor = (index + 1) % num_pools;
            }
        }

        Assignment {
            pools: Pools::from(pools),
            placements,
        }
    }
}

impl Default for PoolPartitioner {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Scans every pool once, starting at `cursor`, for a pool without `district`.
fn free_pool(districts: &[HashSet<&str>], cursor: usize, district: &str) -> Option<usize> {
    (0..districts.len())
        .map(|step| (cursor + step) % districts.len())
        .find(|&index| !districts[index].contains(district))
}

#[derive(Clone, Debug)]
struct PartitionerOptions {
    min_pools: usize,
    pool_count: usize,
    pool_prefix: String,
}

impl PartitionerOptions {
    fn new(mut options: RosterOptionValues) -> Self {
        let mut this = Self::default();

        if let Some(val) = options.take("min_pools") {
            this.min_pools = saturating_usize(val.unwrap_u64_or(MIN_POOLS as u64));
        }

        if let Some(val) = options.take("pool_count") {
            this.pool_count = saturating_usize(val.unwrap_u64_or(0));
        }

        if let Some(val) = options.take("pool_prefix") {
            this.pool_prefix = val.unwrap_string_or_else(|| String::from("Pool"));
        }

        this
    }
}

fn saturating_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

impl Default for PartitionerOptions {
    fn default() -> Self {
        Self {
            min_pools: MIN_POOLS,
            pool_count: 0,
            pool_prefix: String::from("Pool"),
        }
    }
}

/// The result of [`PoolPartitioner::assign`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assignment {
    pools: Pools,
    placements: Vec<Placement>,
}

impl Assignment {
    #[inline]
    pub fn pools(&self) -> &Pools {
        &self.pools
    }

    #[inline]
    pub fn into_pools(self) -> Pools {
        self.pools
    }

    /// Returns the placement of every participant, in the order they were placed.
    #[inline]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Returns all placements that could not avoid a district collision.
    pub fn fallbacks(&self) -> impl Iterator<Item = &Placement> + '_ {
        self.placements
            .iter()
            .filter(|placement| placement.kind == PlacementKind::FallbackPlaced)
    }

    /// Returns `true` if no participants were assigned.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// The pool a single participant was placed in.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    pub participant: ParticipantId,
    pub district: String,
    pub pool: String,
    pub kind: PlacementKind,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlacementKind {
    /// Placed into a pool without another participant from the same district.
    Placed,
    /// Every pool already contained the district; placed into the cursor pool anyway.
    FallbackPlaced,
}

/// The target of a manual reassignment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// The [`UNASSIGNED`] pseudo-pool.
    Unassigned,
    Pool(String),
}

impl FromStr for Target {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl<'a> From<&'a str> for Target {
    fn from(s: &'a str) -> Self {
        if s == UNASSIGNED {
            Self::Unassigned
        } else {
            Self::Pool(s.to_owned())
        }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unassigned => f.write_str(UNASSIGNED),
            Self::Pool(name) => f.write_str(name),
        }
    }
}

/// Moves the participant with the id `participant` into `target`, returning the new mapping.
///
/// Moving a participant to [`Target::Unassigned`] always succeeds. Moving a participant into
/// the pool it is already a member of returns an unchanged mapping.
///
/// # Errors
///
/// Returns [`Error::DistrictConflict`] if another participant from the same district is already
/// a member of the target pool. Returns [`Error::UnknownParticipant`] if `participant` is not in
/// `participants` and [`Error::UnknownPool`] if the target pool does not exist. `pools` is never
/// modified.
pub fn assign_manually(
    participants: &[Participant],
    pools: &Pools,
    participant: &ParticipantId,
    target: &Target,
) -> Result<Pools> {
    let moving = participants
        .iter()
        .find(|p| &p.id == participant)
        .ok_or_else(|| Error::UnknownParticipant(participant.clone()))?;

    let name = match target {
        Target::Unassigned => {
            log::debug!("Moving {} out of its pool", participant);

            let mut pools = pools.clone();
            pools.remove_member(participant);
            return Ok(pools);
        }
        Target::Pool(name) => name,
    };

    let pool = pools
        .get(name)
        .ok_or_else(|| Error::UnknownPool(name.clone()))?;

    if pool.contains(participant) {
        return Ok(pools.clone());
    }

    let conflict = pool
        .participants(participants)
        .iter()
        .any(|p| p.district == moving.district);

    if conflict {
        log::debug!(
            "Rejecting move of {} into {}: district {} already present",
            participant,
            name,
            moving.district
        );

        return Err(Error::DistrictConflict {
            district: moving.district.clone(),
            pool: name.clone(),
        });
    }

    log::debug!("Moving {} into {}", participant, name);

    let mut pools = pools.clone();
    pools.remove_member(participant);
    if let Some(pool) = pools.get_mut(name) {
        pool.members.push(participant.clone());
    }

    Ok(pools)
}
