//! Exhaustive [minimax](https://en.wikipedia.org/wiki/Minimax) search for
//! two-player zero-sum games, with 3x3 tic-tac-toe built in.
//!
//! The engine, [`minimax::MinimaxBot`], works on any game that implements
//! [`game::GameState`]. [`board::Board`] is the tic-tac-toe implementation.
//!
//! ```
//! use minimax::{best_move, Board, Move};
//!
//! // X to move can complete the top row.
//! let board: Board = "XX. OO. ...".parse().unwrap();
//! assert_eq!(best_move(&board), Some(Move::new(0, 2)));
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod minimax;

pub use board::{Board, Mark, Move};
pub use config::SearchConfig;
pub use error::{BoardError, InvalidMoveError};
pub use game::{GameState, Player, Utility};
pub use minimax::{MinimaxBot, SearchResult};

/// The optimal move for the player to move on `board`, or `None` if the
/// game is over. Searches on the calling thread.
pub fn best_move(board: &Board) -> Option<Move> {
    MinimaxBot::with_config(SearchConfig::sequential()).best_move(board)
}
