//! Holds the base trait for a game that [`crate::minimax::MinimaxBot`] can solve.
//! To search your own game, implement [`GameState`] for it.

use std::fmt::Debug;
use std::hash::Hash;

/// The value of a finished game.
///
/// Utilities are ordered from the minimizer's best outcome to the
/// maximizer's best outcome, so `max`/`min` pick the preferred result
/// for each side.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(i8)]
pub enum Utility {
    SecondWins = -1,
    Draw = 0,
    FirstWins = 1,
}

impl Utility {
    /// The signed score: `1`, `0` or `-1`.
    pub const fn value(self) -> i8 {
        self as i8
    }
}

/// The two players of a zero-sum game.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Player {
    Maximizing,
    Minimizing,
}

impl Player {
    /// The opposite player.
    pub const fn flip(&self) -> Self {
        match self {
            Self::Maximizing => Self::Minimizing,
            Self::Minimizing => Self::Maximizing,
        }
    }

    /// Whether this player strictly prefers `a` over `b`.
    ///
    /// Ties are never preferred, so the first move found with the best
    /// value keeps its place.
    pub fn prefers(&self, a: Utility, b: Utility) -> bool {
        match self {
            Self::Maximizing => a > b,
            Self::Minimizing => a < b,
        }
    }
}

/// A two-player, zero-sum game that can be solved by exhaustive minimax.
///
/// States are values: expanding a state never mutates it, so sibling
/// branches of the search share nothing.
pub trait GameState: Sized + Clone + Hash + Eq + Send + Sync {
    /// A move that takes one state to the next.
    type Move: Copy + Eq + Debug + Send + Sync;

    /// Returns the [`Player`] whose turn it is.
    fn turn(&self) -> Player;

    /// Returns true once the game is over.
    fn is_terminal(&self) -> bool;

    /// The value of a finished game. Only meaningful when
    /// [`GameState::is_terminal`] is true.
    fn utility(&self) -> Utility;

    /// Every legal move paired with the state it produces.
    ///
    /// The order must be deterministic: the search breaks ties in favor of
    /// the move yielded first.
    fn children(&self) -> impl IntoIterator<Item = (Self::Move, Self)>;
}
