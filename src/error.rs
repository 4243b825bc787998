use thiserror::Error;

/// A move that cannot be played on the board it was applied to.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMoveError {
    #[error("move ({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },
}

/// A board that could not be constructed or parsed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid mark character: {0:?}")]
    InvalidMark(char),

    #[error("expected 9 cells, found {0}")]
    WrongCellCount(usize),

    #[error("{first} first marks and {second} second marks cannot alternate")]
    Imbalanced { first: usize, second: usize },
}
