//! # Bracket Builder
//!
//! Lays out the entrants of a single pool as a single elimination [`Bracket`]. The number of
//! slots is always rounded up to the next power of two, the missing spots are filled with byes
//! ([`EntrantSpot::Empty`]).
//!
//! Seeding splits the entrant list into a top half of `ceil(n / 2)` entrants and a bottom half of
//! the remaining entrants and recurses into both halves until a single slot is left. This spreads
//! the byes over distinct first round matches: as long as there are at least 2 entrants no bye
//! ever meets another bye.
use crate::render::{Layout, Renderer};
use crate::utils::NumExt;
use crate::{EntrantSpot, Entrants, Error, Match, Result};

use std::ops::Range;

/// A seeded single elimination bracket.
#[derive(Clone, Debug)]
pub struct Bracket<T> {
    entrants: Entrants<T>,
    slots: Vec<EntrantSpot<usize>>,
    matches: Vec<Match<usize>>,
}

impl<T> Bracket<T> {
    /// Creates a new `Bracket` with the given `entrants`.
    ///
    /// Creating a `Bracket` without any entrants is valid, but the returned `Bracket` contains no
    /// slots and no matches. Use [`try_new`] to reject empty input instead.
    ///
    /// [`try_new`]: Self::try_new
    pub fn new<I>(entrants: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        let entrants: Entrants<T> = entrants.collect();

        log::debug!("Creating new Bracket with {} entrants", entrants.len());

        // Note: `0.next_power_of_two()` returns 1, which is incorrect for an empty bracket.
        if entrants.is_empty() {
            return Self {
                entrants,
                slots: Vec::new(),
                matches: Vec::new(),
            };
        }

        let size = entrants.len().next_power_of_two();

        let mut slots = Vec::with_capacity(size);
        seed(0..entrants.len(), size, &mut slots);
        debug_assert_eq!(slots.len(), size);

        let matches = fill_matches(&slots);

        log::debug!(
            "Created new Bracket with {} slots, {} byes and {} matches",
            slots.len(),
            size - entrants.len(),
            matches.len()
        );

        Self {
            entrants,
            slots,
            matches,
        }
    }

    /// Creates a new `Bracket` with the given `entrants`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] if `entrants` is empty.
    pub fn try_new<I>(entrants: I) -> Result<Self>
    where
        I: Iterator<Item = T>,
    {
        let this = Self::new(entrants);

        if this.entrants.is_empty() {
            Err(Error::EmptyInput)
        } else {
            Ok(this)
        }
    }

    /// Returns a reference to the entrants in the bracket.
    #[inline]
    pub fn entrants(&self) -> &Entrants<T> {
        &self.entrants
    }

    /// Returns the entrant at `index` in the [`Entrants`] of this bracket.
    #[inline]
    pub fn entrant(&self, index: usize) -> Option<&T> {
        self.entrants.get(index)
    }

    /// Resolves an `EntrantSpot` referring to an entrant index into a spot referring to the
    /// entrant itself. Indexes out of bounds resolve to [`EntrantSpot::Empty`].
    pub fn resolve(&self, spot: EntrantSpot<usize>) -> EntrantSpot<&T> {
        match spot {
            EntrantSpot::Entrant(index) => EntrantSpot::new(self.entrant(index)),
            EntrantSpot::Empty => EntrantSpot::Empty,
            EntrantSpot::TBD => EntrantSpot::TBD,
        }
    }

    /// Returns `true` if the bracket has no entrants.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entrants.is_empty()
    }

    /// Returns the seeded slots of the first round. Every slot is either an
    /// [`EntrantSpot::Entrant`] with an index into [`entrants`] or an [`EntrantSpot::Empty`] bye.
    ///
    /// [`entrants`]: Self::entrants
    #[inline]
    pub fn slots(&self) -> &[EntrantSpot<usize>] {
        &self.slots
    }

    /// Returns the number of byes in the first round.
    #[inline]
    pub fn byes(&self) -> usize {
        self.slots.len() - self.entrants.len()
    }

    /// Returns all matches of the bracket. The matches of the first round come first, the final
    /// is the last match.
    #[inline]
    pub fn matches(&self) -> &[Match<usize>] {
        &self.matches
    }

    /// Returns the number of rounds in the bracket. A bracket with a single entrant has no
    /// rounds.
    #[inline]
    pub fn num_rounds(&self) -> usize {
        self.slots.len().ilog2_ceil()
    }

    /// Returns the range of [`matches`] that belong to the round `round`. Rounds start at `1`.
    /// Returns `0..0` if the round does not exist.
    ///
    /// [`matches`]: Self::matches
    pub fn round(&self, round: usize) -> Range<usize> {
        if round == 0 || round > self.num_rounds() {
            return 0..0;
        }

        let mut start = 0;
        let mut len = self.slots.len() / 2;
        for _ in 1..round {
            start += len;
            len /= 2;
        }

        start..start + len
    }

    /// Returns the index of the match and the spot within that match the winner of the match at
    /// `index` advances into. Returns `None` for the final or if `index` is out-of-bounds.
    pub fn next_match(&self, index: usize) -> Option<(usize, usize)> {
        next_match(self.slots.len() / 2, self.matches.len(), index)
    }

    /// Returns the rendering [`Layout`] of this bracket.
    #[inline]
    pub fn layout(&self) -> Layout<'_, T> {
        Layout::new(self)
    }

    /// Renders the bracket using the given [`Renderer`].
    pub fn render<R>(&self, renderer: &mut R)
    where
        R: Renderer<T>,
    {
        renderer.render(self.layout());
    }
}

/// Recursively seeds the entrant indexes in `range` into `size` slots. `size` must be a power of
/// two and at least `range.len()`.
fn seed(range: Range<usize>, size: usize, slots: &mut Vec<EntrantSpot<usize>>) {
    if size == 1 {
        debug_assert!(range.len() <= 1);

        slots.push(EntrantSpot::new((!range.is_empty()).then_some(range.start)));
        return;
    }

    let mid = range.start + range.len().upper_half();

    seed(range.start..mid, size / 2, slots);
    seed(mid..range.end, size / 2, slots);
}

/// Builds the full match tree from the seeded `slots` and forwards the entrants of all walkover
/// matches into the second round.
fn fill_matches(slots: &[EntrantSpot<usize>]) -> Vec<Match<usize>> {
    let initial_matches = slots.len() / 2;

    // A single entrant never plays.
    if initial_matches == 0 {
        return Vec::new();
    }

    let num_matches = slots.len() - 1;

    let mut matches = Vec::with_capacity(num_matches);
    matches.extend(
        slots
            .chunks_exact(2)
            .map(|pair| Match::new([pair[0], pair[1]])),
    );

    while matches.len() < num_matches {
        matches.push(Match::new([EntrantSpot::TBD, EntrantSpot::TBD]));
    }

    for index in 0..initial_matches {
        let spot = match matches[index].entrants {
            [EntrantSpot::Entrant(entrant), EntrantSpot::Empty]
            | [EntrantSpot::Empty, EntrantSpot::Entrant(entrant)] => EntrantSpot::Entrant(entrant),
            [EntrantSpot::Empty, EntrantSpot::Empty] => EntrantSpot::Empty,
            _ => continue,
        };

        if let Some((next, position)) = next_match(initial_matches, num_matches, index) {
            log::debug!("Forwarding walkover of match {} into match {}", index, next);

            matches[next][position] = spot;
        }
    }

    matches
}

#[inline]
fn next_match(initial_matches: usize, num_matches: usize, index: usize) -> Option<(usize, usize)> {
    if index + 1 < num_matches {
        Some((initial_matches + index / 2, index % 2))
    } else {
        None
    }
}
