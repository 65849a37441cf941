//! # Bracket Rendering
//!
//! The `render` module provides the connector geometry required to draw a [`Bracket`] with any
//! rendering back-end (vector graphics, text, tables).
//!
//! All vertical positions are given in *slot units*: the first round slot `i` sits at position
//! `i as f64`. A renderer is free to scale and offset them. The geometry is built round by round:
//! - A played match forwards its winner at the midpoint between its two inputs.
//! - A walkover (one side is a bye) forwards the surviving entrant straight through at its own
//! position.
//! - A match between two byes forwards an empty placeholder at the midpoint.
//!
//! The single position left after the last round is the output point of the bracket winner.
//!
//! ```text
//! slot 0 ──┐
//!          ├── 0.5 ──┐
//! slot 1 ──┘         │
//!                    ├── 1.25
//! slot 2 ─────── 2 ──┘
//! slot 3 (bye)
//! ```
use crate::{Bracket, EntrantSpot};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A renderer used to render a [`Bracket`].
pub trait Renderer<T> {
    fn render(&mut self, layout: Layout<'_, T>);
}

/// The rendering geometry of a [`Bracket`].
#[derive(Clone, Debug)]
pub struct Layout<'a, T> {
    bracket: &'a Bracket<T>,
    rounds: Vec<Round>,
    winner: Option<f64>,
}

impl<'a, T> Layout<'a, T> {
    /// Computes the `Layout` of the given `bracket`.
    pub fn new(bracket: &'a Bracket<T>) -> Self {
        let slots = bracket.slots();

        if slots.is_empty() {
            return Self {
                bracket,
                rounds: Vec::new(),
                winner: None,
            };
        }

        let mut positions: Vec<f64> = (0..slots.len()).map(|slot| slot as f64).collect();
        let mut rounds = Vec::with_capacity(bracket.num_rounds());

        let mut number = 1;
        while positions.len() > 1 {
            let range = bracket.round(number);
            debug_assert_eq!(range.len() * 2, positions.len());

            let mut matches = Vec::with_capacity(range.len());
            for (offset, index) in range.enumerate() {
                let r#match = &bracket.matches()[index];

                let inputs = [
                    Input {
                        spot: r#match[0],
                        position: positions[offset * 2],
                    },
                    Input {
                        spot: r#match[1],
                        position: positions[offset * 2 + 1],
                    },
                ];

                let (advancement, output) = advance(&inputs);

                matches.push(MatchNode {
                    index,
                    round: number,
                    inputs,
                    output,
                    advancement,
                });
            }

            log::debug!("Laid out round {} with {} matches", number, matches.len());

            positions = matches.iter().map(|node| node.output).collect();
            rounds.push(Round { number, matches });
            number += 1;
        }

        Self {
            bracket,
            rounds,
            winner: positions.first().copied(),
        }
    }

    /// Returns the [`Bracket`] this `Layout` was computed from.
    #[inline]
    pub fn bracket(&self) -> &'a Bracket<T> {
        self.bracket
    }

    /// Returns all rounds, starting with the first round.
    #[inline]
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Returns the number of rounds.
    #[inline]
    pub fn num_rounds(&self) -> usize {
        self.rounds.len()
    }

    /// Returns the number of slots in the first round. All positions are within `0..height`.
    #[inline]
    pub fn height(&self) -> usize {
        self.bracket.slots().len()
    }

    /// Returns the position of the output point of the bracket winner. A renderer may draw a
    /// closing stub from here. Returns `None` for an empty bracket.
    #[inline]
    pub fn winner(&self) -> Option<f64> {
        self.winner
    }

    /// Resolves the given spot into a spot referring to the entrant.
    #[inline]
    pub fn entrant(&self, spot: EntrantSpot<usize>) -> EntrantSpot<&'a T> {
        self.bracket.resolve(spot)
    }
}

/// All matches of a single round in a [`Layout`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Round {
    number: usize,
    matches: Vec<MatchNode>,
}

impl Round {
    /// Returns the number of this round. The first round is `1`.
    #[inline]
    pub fn number(&self) -> usize {
        self.number
    }

    #[inline]
    pub fn matches(&self) -> &[MatchNode] {
        &self.matches
    }
}

/// A leaf element in the layout representing a *match* or *heat*.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchNode {
    index: usize,
    round: usize,
    inputs: [Input; 2],
    output: f64,
    advancement: Advancement,
}

impl MatchNode {
    /// Returns the index of this match within [`Bracket::matches`].
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn round(&self) -> usize {
        self.round
    }

    #[inline]
    pub fn inputs(&self) -> &[Input; 2] {
        &self.inputs
    }

    /// Returns the vertical position the result of this match advances at.
    #[inline]
    pub fn output(&self) -> f64 {
        self.output
    }

    #[inline]
    pub fn advancement(&self) -> Advancement {
        self.advancement
    }
}

/// One side of a [`MatchNode`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Input {
    /// The entrant index, a bye or the winner of a previous match.
    pub spot: EntrantSpot<usize>,
    /// The vertical position of this input.
    pub position: f64,
}

/// How the result of a [`MatchNode`] advances into the next round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Advancement {
    /// Both sides are occupied; the winner advances at the midpoint.
    Match,
    /// The input at `side` advances without playing at its own position.
    Walkover { side: usize },
    /// Both sides are byes; an empty placeholder advances at the midpoint.
    Empty,
}

impl Advancement {
    /// Returns `true` if a game is actually played.
    #[inline]
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

fn advance(inputs: &[Input; 2]) -> (Advancement, f64) {
    let midpoint = (inputs[0].position + inputs[1].position) / 2.0;

    match (inputs[0].spot.is_empty(), inputs[1].spot.is_empty()) {
        (false, false) => (Advancement::Match, midpoint),
        (false, true) => (Advancement::Walkover { side: 0 }, inputs[0].position),
        (true, false) => (Advancement::Walkover { side: 1 }, inputs[1].position),
        (true, true) => (Advancement::Empty, midpoint),
    }
}

#[cfg(test)]
mod tests {
    use crate::{entrants, Bracket, EntrantSpot};

    use super::{advance, Advancement, Input, Layout, Renderer};

    #[derive(Debug, Default)]
    struct TestRenderer {
        rounds: Vec<Vec<(Advancement, f64)>>,
        winner: Option<f64>,
    }

    impl<T> Renderer<T> for TestRenderer {
        fn render(&mut self, layout: Layout<'_, T>) {
            for round in layout.rounds() {
                self.rounds.push(
                    round
                        .matches()
                        .iter()
                        .map(|node| (node.advancement(), node.output()))
                        .collect(),
                );
            }

            self.winner = layout.winner();
        }
    }

    #[test]
    fn test_layout_empty() {
        let bracket = Bracket::<u32>::new(entrants![]);
        let layout = bracket.layout();

        assert_eq!(layout.num_rounds(), 0);
        assert_eq!(layout.winner(), None);
    }

    #[test]
    fn test_layout_single_entrant() {
        let bracket = Bracket::new(entrants!["a"]);
        let layout = bracket.layout();

        assert_eq!(layout.num_rounds(), 0);
        assert_eq!(layout.height(), 1);
        assert_eq!(layout.winner(), Some(0.0));
    }

    #[test]
    fn test_layout_power_of_two() {
        let bracket = Bracket::new(0..4);

        let mut renderer = TestRenderer::default();
        bracket.render(&mut renderer);

        assert_eq!(
            renderer.rounds,
            vec![
                vec![(Advancement::Match, 0.5), (Advancement::Match, 2.5)],
                vec![(Advancement::Match, 1.5)],
            ]
        );
        assert_eq!(renderer.winner, Some(1.5));
    }

    #[test]
    fn test_layout_with_byes() {
        let bracket = Bracket::new(entrants!["a", "b", "c", "d", "e"]);

        let mut renderer = TestRenderer::default();
        bracket.render(&mut renderer);

        assert_eq!(
            renderer.rounds,
            vec![
                vec![
                    (Advancement::Match, 0.5),
                    (Advancement::Walkover { side: 0 }, 2.0),
                    (Advancement::Walkover { side: 0 }, 4.0),
                    (Advancement::Walkover { side: 0 }, 6.0),
                ],
                vec![(Advancement::Match, 1.25), (Advancement::Match, 5.0)],
                vec![(Advancement::Match, 3.125)],
            ]
        );
        assert_eq!(renderer.winner, Some(3.125));

        let layout = bracket.layout();
        let second_round = &layout.rounds()[1];
        assert_eq!(second_round.number(), 2);

        let node = &second_round.matches()[0];
        assert_eq!(node.index(), 4);
        assert_eq!(node.inputs()[0].spot, EntrantSpot::TBD);
        assert_eq!(node.inputs()[0].position, 0.5);
        assert_eq!(layout.entrant(node.inputs()[1].spot), EntrantSpot::Entrant(&"c"));
        assert_eq!(node.inputs()[1].position, 2.0);
    }

    #[test]
    fn test_layout_matches_every_round() {
        for n in 2..=40_usize {
            let bracket = Bracket::new(0..n);
            let layout = bracket.layout();

            assert_eq!(layout.num_rounds(), bracket.num_rounds());

            for (round, expected) in layout.rounds().iter().zip(1..) {
                assert_eq!(round.number(), expected);
                assert_eq!(round.matches().len(), bracket.round(expected).len());
            }

            // Byes never meet each other, so nothing is ever forwarded as empty.
            assert!(layout
                .rounds()
                .iter()
                .flat_map(|round| round.matches())
                .all(|node| node.advancement() != Advancement::Empty));
        }
    }

    #[test]
    fn test_advance() {
        let input = |spot, position| Input { spot, position };

        assert_eq!(
            advance(&[input(EntrantSpot::Entrant(0), 0.0), input(EntrantSpot::TBD, 3.0)]),
            (Advancement::Match, 1.5)
        );
        assert_eq!(
            advance(&[input(EntrantSpot::Empty, 0.0), input(EntrantSpot::Entrant(1), 1.0)]),
            (Advancement::Walkover { side: 1 }, 1.0)
        );
        assert_eq!(
            advance(&[input(EntrantSpot::Empty, 2.0), input(EntrantSpot::Empty, 3.0)]),
            (Advancement::Empty, 2.5)
        );
    }
}
