//! The game of 3x3 tic-tac-toe.
//!
//! [`Board`] is an immutable grid of [`Mark`]s. The player to move is
//! derived from the marks already placed, and [`Board::apply_move`] returns a
//! new board rather than editing the old one.

use std::fmt;
use std::str::FromStr;

use crate::error::{BoardError, InvalidMoveError};
use crate::game::{GameState, Player, Utility};

/// Board width and height.
pub const SIZE: usize = 3;

/// The contents of a single cell.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Mark {
    First,
    Second,
    Empty,
}

impl Mark {
    fn to_char(self) -> char {
        match self {
            Self::First => 'X',
            Self::Second => 'O',
            Self::Empty => '.',
        }
    }

    fn from_char(c: char) -> Result<Self, BoardError> {
        match c {
            'X' | 'x' => Ok(Self::First),
            'O' | 'o' => Ok(Self::Second),
            '.' | '_' => Ok(Self::Empty),
            _ => Err(BoardError::InvalidMark(c)),
        }
    }
}

/// A cell coordinate, `(row, col)`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// Scan order matters: rows, then columns, then diagonals.
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// A 3x3 tic-tac-toe board, row-major.
///
/// First always moves first, so a valid board holds either as many
/// First marks as Second marks, or exactly one more.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Board {
    cells: [[Mark; SIZE]; SIZE],
}

impl Board {
    /// An empty board with First to move.
    pub const fn new() -> Self {
        Self {
            cells: [[Mark::Empty; SIZE]; SIZE],
        }
    }

    /// Builds a board from its rows, checking that the marks could have
    /// been placed alternately starting with First.
    pub fn from_rows(cells: [[Mark; SIZE]; SIZE]) -> Result<Self, BoardError> {
        let board = Self { cells };
        let (first, second) = board.counts();
        if first == second || first == second + 1 {
            Ok(board)
        } else {
            Err(BoardError::Imbalanced { first, second })
        }
    }

    pub fn rows(&self) -> &[[Mark; SIZE]; SIZE] {
        &self.cells
    }

    /// The mark at `(row, col)`, or `None` off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Mark> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    fn counts(&self) -> (usize, usize) {
        self.cells
            .iter()
            .flatten()
            .fold((0, 0), |(first, second), mark| match mark {
                Mark::First => (first + 1, second),
                Mark::Second => (first, second + 1),
                Mark::Empty => (first, second),
            })
    }

    /// The mark that will be placed next. First moves whenever the counts
    /// are level.
    pub fn whose_turn(&self) -> Mark {
        let (first, second) = self.counts();
        if first > second {
            Mark::Second
        } else {
            Mark::First
        }
    }

    /// Every empty cell, in row-major order.
    pub fn legal_moves(&self) -> Vec<Move> {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| Move::new(row, col)))
            .filter(|mv| self.cells[mv.row][mv.col] == Mark::Empty)
            .collect()
    }

    /// The mark owning a complete line, if any.
    pub fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|&line| {
            let [a, b, c] = line.map(|(row, col)| self.cells[row][col]);
            (a != Mark::Empty && a == b && b == c).then_some(a)
        })
    }

    /// True once someone has won or no empty cell remains.
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.cells.iter().flatten().all(|&m| m != Mark::Empty)
    }

    /// Scores a finished game from First's point of view.
    pub fn utility(&self) -> Utility {
        debug_assert!(self.is_terminal(), "utility of an unfinished game");
        match self.winner() {
            Some(Mark::First) => Utility::FirstWins,
            Some(Mark::Second) => Utility::SecondWins,
            _ => Utility::Draw,
        }
    }

    /// Places the mark of the player to move at `mv`.
    pub fn apply_move(&self, mv: Move) -> Result<Self, InvalidMoveError> {
        match self.get(mv.row, mv.col) {
            None => Err(InvalidMoveError::OutOfBounds {
                row: mv.row,
                col: mv.col,
            }),
            Some(Mark::Empty) => Ok(self.place(mv)),
            Some(_) => Err(InvalidMoveError::Occupied {
                row: mv.row,
                col: mv.col,
            }),
        }
    }

    // Caller guarantees `mv` is an empty cell on the board.
    fn place(&self, mv: Move) -> Self {
        let mut next = *self;
        next.cells[mv.row][mv.col] = self.whose_turn();
        next
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for mark in row {
                write!(f, "{}", mark.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses nine cells of `X`, `O` and `.` (or `_`), ignoring whitespace
    /// and the row separators `/` and `|`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let marks = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/' && *c != '|')
            .map(Mark::from_char)
            .collect::<Result<Vec<_>, _>>()?;
        if marks.len() != SIZE * SIZE {
            return Err(BoardError::WrongCellCount(marks.len()));
        }

        let mut cells = [[Mark::Empty; SIZE]; SIZE];
        for (i, mark) in marks.into_iter().enumerate() {
            cells[i / SIZE][i % SIZE] = mark;
        }
        Self::from_rows(cells)
    }
}

impl GameState for Board {
    type Move = Move;

    fn turn(&self) -> Player {
        match self.whose_turn() {
            Mark::Second => Player::Minimizing,
            _ => Player::Maximizing,
        }
    }

    fn is_terminal(&self) -> bool {
        Board::is_terminal(self)
    }

    fn utility(&self) -> Utility {
        Board::utility(self)
    }

    fn children(&self) -> impl IntoIterator<Item = (Move, Self)> {
        self.legal_moves()
            .into_iter()
            .map(move |mv| (mv, self.place(mv)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn empty_board() {
        let b = Board::new();
        assert_eq!(b.whose_turn(), Mark::First);
        assert_eq!(b.legal_moves().len(), 9);
        assert_eq!(b.winner(), None);
        assert!(!b.is_terminal());
    }

    #[test]
    fn turn_alternates() {
        assert_eq!(board("X.. ... ...").whose_turn(), Mark::Second);
        assert_eq!(board("XO. ... ...").whose_turn(), Mark::First);
        assert_eq!(Board::new().turn(), Player::Maximizing);
        assert_eq!(board("X.. ... ...").turn(), Player::Minimizing);
    }

    #[test]
    fn legal_moves_are_row_major() {
        let moves = board("X.O .X. O..").legal_moves();
        assert_eq!(
            moves,
            vec![
                Move::new(0, 1),
                Move::new(1, 0),
                Move::new(1, 2),
                Move::new(2, 1),
                Move::new(2, 2),
            ]
        );
    }

    #[test]
    fn winner_on_every_line_kind() {
        assert_eq!(board("XXX OO. ...").winner(), Some(Mark::First));
        assert_eq!(board("XXO .XO X.O").winner(), Some(Mark::Second));
        assert_eq!(board("XO. OX. ..X").winner(), Some(Mark::First));
        assert_eq!(board("XXO .O. OX.").winner(), Some(Mark::Second));
        assert_eq!(board("XO. ... ...").winner(), None);
    }

    #[test]
    fn winner_scans_rows_before_columns() {
        // Both players own a line; the earlier line in scan order decides.
        assert_eq!(board("XXX OOO ...").winner(), Some(Mark::First));
        assert_eq!(board("OOO XXX X..").winner(), Some(Mark::Second));
        assert_eq!(board("XO. XO. XO.").winner(), Some(Mark::First));
        assert_eq!(board("OX. OX. OX.").winner(), Some(Mark::Second));
        assert_eq!(board("X.O X.O X.O").winner(), Some(Mark::First));
    }

    #[test]
    fn marks_display_as_letters() {
        assert_eq!(Mark::First.to_string(), "X");
        assert_eq!(Mark::Second.to_string(), "O");
        assert_eq!(Mark::Empty.to_string(), ".");
    }

    #[test]
    fn full_board_without_winner_is_a_draw() {
        let b = board("XOX XOO OXX");
        assert_eq!(b.winner(), None);
        assert!(b.is_terminal());
        assert_eq!(b.utility(), Utility::Draw);
        assert!(b.legal_moves().is_empty());
    }

    #[test]
    fn utility_follows_winner() {
        assert_eq!(board("XXX OO. ...").utility(), Utility::FirstWins);
        assert_eq!(board("OOO XX. X..").utility(), Utility::SecondWins);
    }

    #[test]
    fn apply_move_places_whose_turn() {
        let b = Board::new().apply_move(Move::new(1, 1)).unwrap();
        assert_eq!(b.get(1, 1), Some(Mark::First));
        let b = b.apply_move(Move::new(0, 0)).unwrap();
        assert_eq!(b.get(0, 0), Some(Mark::Second));
        assert_eq!(b.whose_turn(), Mark::First);
    }

    #[test]
    fn apply_move_leaves_input_untouched() {
        let before = board("X.. ... ...");
        let after = before.apply_move(Move::new(2, 2)).unwrap();
        assert_eq!(before.get(2, 2), Some(Mark::Empty));
        assert_eq!(after.get(2, 2), Some(Mark::Second));
    }

    #[test]
    fn apply_move_rejects_bad_moves() {
        assert_eq!(
            Board::new().apply_move(Move::new(3, 0)),
            Err(InvalidMoveError::OutOfBounds { row: 3, col: 0 })
        );
        assert_eq!(
            Board::new().apply_move(Move::new(0, 7)),
            Err(InvalidMoveError::OutOfBounds { row: 0, col: 7 })
        );
        assert_eq!(
            board("X.. ... ...").apply_move(Move::new(0, 0)),
            Err(InvalidMoveError::Occupied { row: 0, col: 0 })
        );
    }

    #[test]
    fn children_match_legal_moves() {
        let b = board("XO. ... ...");
        let children: Vec<_> = b.children().into_iter().collect();
        assert_eq!(children.len(), 7);
        for (mv, child) in children {
            assert_eq!(child, b.apply_move(mv).unwrap());
        }
    }

    #[test]
    fn parse_and_display() {
        let b: Board = "XO./.X./...".parse().unwrap();
        assert_eq!(b.to_string(), "XO.\n.X.\n...\n");
        assert_eq!(b.to_string().parse::<Board>().unwrap(), b);
        assert_eq!("X|O|_ _|_|_ _|_|_".parse::<Board>().unwrap().get(0, 1), Some(Mark::Second));
    }

    #[test]
    fn parse_errors() {
        assert_eq!("XO? ... ...".parse::<Board>(), Err(BoardError::InvalidMark('?')));
        assert_eq!("XO. ...".parse::<Board>(), Err(BoardError::WrongCellCount(6)));
        assert_eq!(
            "XX. ... ...".parse::<Board>(),
            Err(BoardError::Imbalanced { first: 2, second: 0 })
        );
        assert_eq!(
            "O.. ... ...".parse::<Board>(),
            Err(BoardError::Imbalanced { first: 0, second: 1 })
        );
    }
}
