//! # roster-core
//!
//! This crate contains the engine used to turn the registered participants of a competition into
//! pools and single elimination brackets. It contains two components:
//! - [`PoolPartitioner`]: Assigns participants to pools so that no two participants from the same
//! district share a pool while keeping the pool sizes balanced.
//! - [`Bracket`]: Seeds the entrants of a single pool into a single elimination bracket, filling
//! the missing spots with byes.
//!
//! Important types:
//! - [`Participant`]: A registered participant with a district affiliation.
//! - [`Pools`]: A mapping from pool names to participant ids.
//! - [`Entrants`]: A wrapper around `Vec<T>` where `T` is an entrant in a bracket.
//! - [`Match`]: A *match* or *heat* of two parties.
//! - [`EntrantSpot`]: A *spot* within a match, which can contain an entrant, be permanently empty
//! (a bye) or contain a to-be-done spot.
//! - [`render::Layout`]: The connector geometry required to draw a [`Bracket`].
//! - [`FixtureSheet`]: The paginated printable listing of the entrants of a pool.
//! - [`export::Sheet`]: The spreadsheet rows of a pool.
//! - [`stats::DistrictCount`]: The number of participants from a district.
//!
//! Both components are pure functions over in-memory data. They never perform I/O and never
//! persist anything.
//!
//! ## Feature Flags
//!
//! `serde`: Adds `Serialize` and `Deserialize` impls to almost all types.
//!
pub mod bracket;
pub mod export;
pub mod fixture;
pub mod options;
pub mod pools;
pub mod render;
pub mod stats;

mod utils;

pub use bracket::Bracket;
pub use fixture::FixtureSheet;
pub use pools::{
    assign_manually, Assignment, Placement, PlacementKind, Pool, PoolPartitioner, Pools, Target,
};

use thiserror::Error;

use std::fmt::{self, Display, Formatter};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::result;
use std::vec::IntoIter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The opaque, unique identifier of a [`Participant`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ParticipantId(pub String);

impl ParticipantId {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ParticipantId {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<String> for ParticipantId {
    #[inline]
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'a> From<&'a str> for ParticipantId {
    #[inline]
    fn from(id: &'a str) -> Self {
        Self(id.to_owned())
    }
}

/// A registered participant of a competition.
///
/// The engine only reads participants. The pool a participant belongs to is owned by the caller
/// and computed by the [`PoolPartitioner`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// The district the participant is affiliated with. Two participants with the same district
    /// should never share a pool.
    pub district: String,
}

impl Participant {
    /// Creates a new `Participant`.
    pub fn new<I, N, D>(id: I, name: N, district: D) -> Self
    where
        I: Into<ParticipantId>,
        N: Into<String>,
        D: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            district: district.into(),
        }
    }
}

/// A wrapper around a `Vec<T>` where `T` should be considered an entrant of a [`Bracket`].
///
/// This is a wrapper around a `Vec<T>` and has the same layout as a `Vec<T>`.
#[derive(Clone, Debug, Default)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Entrants<T> {
    entrants: Vec<T>,
}

impl<T> FromIterator<T> for Entrants<T> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let entrants = iter.into_iter().collect();

        Self { entrants }
    }
}

impl<T> IntoIterator for Entrants<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entrants.into_iter()
    }
}

impl<T> Deref for Entrants<T> {
    type Target = Vec<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.entrants
    }
}

impl<T> DerefMut for Entrants<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.entrants
    }
}

impl<T, U> PartialEq<U> for Entrants<T>
where
    T: PartialEq,
    U: AsRef<[T]>,
{
    #[inline]
    fn eq(&self, other: &U) -> bool {
        self.entrants == other.as_ref()
    }
}

impl<T> From<Vec<T>> for Entrants<T> {
    #[inline]
    fn from(entrants: Vec<T>) -> Self {
        Self { entrants }
    }
}

/// An `Result<T>` using [`enum@Error`] as an error type.
pub type Result<T> = result::Result<T, Error>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("no participants")]
    EmptyInput,
    #[error("pool \"{pool}\" already has a participant from {district}")]
    DistrictConflict { district: String, pool: String },
    #[error("unknown participant {0}")]
    UnknownParticipant(ParticipantId),
    #[error("unknown pool \"{0}\"")]
    UnknownPool(String),
}

/// A match consisting of 2 parties.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Match<T> {
    pub entrants: [EntrantSpot<T>; 2],
}

impl<T> Match<T> {
    #[inline]
    pub fn new(entrants: [EntrantSpot<T>; 2]) -> Self {
        Self { entrants }
    }

    /// Returns `true` if at least one side of this `Match` is a bye. No game is played in a
    /// walkover match.
    #[inline]
    pub fn is_walkover(&self) -> bool {
        self.entrants[0].is_empty() || self.entrants[1].is_empty()
    }
}

impl<T> Index<usize> for Match<T> {
    type Output = EntrantSpot<T>;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.entrants[index]
    }
}

impl<T> IndexMut<usize> for Match<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.entrants[index]
    }
}

/// A spot for an Entrant in the bracket.
///
/// [`Empty`] is the bye sentinel: the spot is permanently empty and the opponent advances without
/// playing. [`TBD`] is filled by the winner of a previous match.
///
/// [`Empty`]: Self::Empty
/// [`TBD`]: Self::TBD
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EntrantSpot<T> {
    Entrant(T),
    Empty,
    TBD,
}

impl<T> EntrantSpot<T> {
    /// Creates a new `EntrantSpot` from an [`Option`]. A `Some(T)` value will translate into
    /// a `Entrant(T)` value, a `None` value will translate into a `Empty` value.
    pub fn new(entrant: Option<T>) -> Self {
        match entrant {
            Some(entrant) => Self::Entrant(entrant),
            None => Self::Empty,
        }
    }

    /// Returns `true` if the `EntrantSpot` is [`Entrant`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use roster_core::EntrantSpot;
    /// let spot = EntrantSpot::Entrant(());
    /// assert!(spot.is_entrant());
    /// ```
    /// [`Entrant`]: Self::Entrant
    pub fn is_entrant(&self) -> bool {
        matches!(self, Self::Entrant(_))
    }

    /// Returns `true` if the `EntrantSpot` is [`Empty`], i.e. a bye.
    ///
    /// # Examples
    ///
    /// ```
    /// # use roster_core::EntrantSpot;
    /// let spot: EntrantSpot<()> = EntrantSpot::Empty;
    /// assert!(spot.is_empty());
    /// ```
    ///
    /// [`Empty`]: Self::Empty
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the contained entrant, or `None` for [`Self::Empty`] and [`Self::TBD`].
    pub fn entrant(self) -> Option<T> {
        match self {
            Self::Entrant(entrant) => Some(entrant),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EntrantSpot, Match, Participant, ParticipantId};

    #[macro_export]
    macro_rules! entrants {
        ($($x:expr),*) => {
            vec![$($x),*].into_iter()
        };
    }

    #[macro_export]
    macro_rules! option_values {
        ($($key:expr => $val:expr),*$(,)?) => {{
            let mut options = $crate::options::RosterOptionValues::new();
            $(
                options.set($key, $val);
            )*

            options
        }};
    }

    #[macro_export]
    macro_rules! participants {
        ($($id:expr => $district:expr),*$(,)?) => {
            vec![$($crate::Participant::new($id, $id, $district)),*]
        };
    }

    #[test]
    fn test_participant_new() {
        let participant = Participant::new("p1", "Kavin Kumar", "CBE");

        assert_eq!(participant.id, ParticipantId::from("p1"));
        assert_eq!(participant.id.to_string(), "p1");
        assert_eq!(participant.name, "Kavin Kumar");
        assert_eq!(participant.district, "CBE");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_participant_serde() {
        use serde_test::{assert_tokens, Token};

        assert_tokens(&ParticipantId::from("p1"), &[Token::Str("p1")]);
        assert_tokens(
            &Participant::new("p1", "Kavin Kumar", "CBE"),
            &[
                Token::Struct {
                    name: "Participant",
                    len: 3,
                },
                Token::Str("id"),
                Token::Str("p1"),
                Token::Str("name"),
                Token::Str("Kavin Kumar"),
                Token::Str("district"),
                Token::Str("CBE"),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn test_entrant_spot() {
        let spot = EntrantSpot::new(Some(3));
        assert!(spot.is_entrant());
        assert_eq!(spot.entrant(), Some(3));

        let spot = EntrantSpot::<u32>::new(None);
        assert!(spot.is_empty());
        assert_eq!(spot.entrant(), None);

        assert_eq!(EntrantSpot::<u32>::new(None), EntrantSpot::Empty);
        assert_eq!(EntrantSpot::<u32>::TBD.entrant(), None);
    }

    #[test]
    fn test_match_is_walkover() {
        assert!(!Match::new([EntrantSpot::Entrant(0), EntrantSpot::Entrant(1)]).is_walkover());
        assert!(!Match::<u32>::new([EntrantSpot::TBD, EntrantSpot::TBD]).is_walkover());
        assert!(Match::new([EntrantSpot::Entrant(0), EntrantSpot::Empty]).is_walkover());
        assert!(Match::<u32>::new([EntrantSpot::Empty, EntrantSpot::Empty]).is_walkover());
    }
}
