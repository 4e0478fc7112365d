// Core game types shared by the analyzer, search and I/O layers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column letters used by the move designator (`A1`, `C4`, ...)
pub const COLUMN_LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The two competing agents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Max,
    Min,
}

impl Player {
    /// Returns the player who moves next
    pub fn opponent(self) -> Player {
        match self {
            Player::Max => Player::Min,
            Player::Min => Player::Max,
        }
    }

    /// Signs a move score from MAX's point of view
    pub fn signed(self, score: i32) -> i32 {
        match self {
            Player::Max => score,
            Player::Min => -score,
        }
    }
}

/// Zero-based board coordinate; row 0 is the top of the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }

    /// Renders the output designator: column letter followed by the 1-based row
    ///
    /// Columns past `Z` have no letter; boards that large are rejected at parse time.
    pub fn designator(&self) -> String {
        let letter = COLUMN_LETTERS.get(self.col).map(|&b| b as char).unwrap_or('?');
        format!("{}{}", letter, self.row + 1)
    }

    /// Parses a designator such as `B3` back into a coordinate
    pub fn from_designator(s: &str) -> Option<Coord> {
        let mut chars = s.trim().chars();
        let letter = chars.next()?.to_ascii_uppercase();
        let col = COLUMN_LETTERS.iter().position(|&b| b as char == letter)?;
        let row: usize = chars.as_str().parse().ok()?;
        if row == 0 {
            return None;
        }
        Some(Coord { row: row - 1, col })
    }

    /// The four orthogonal neighbours that lie inside an `n`×`n` board
    pub fn neighbors(&self, n: usize) -> impl Iterator<Item = Coord> {
        let Coord { row, col } = *self;
        let up = row.checked_sub(1).map(|r| Coord::new(r, col));
        let left = col.checked_sub(1).map(|c| Coord::new(row, c));
        let right = (col + 1 < n).then(|| Coord::new(row, col + 1));
        let down = (row + 1 < n).then(|| Coord::new(row + 1, col));
        [up, left, right, down].into_iter().flatten()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.designator())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_designator_uses_letter_then_one_based_row() {
        assert_eq!(Coord::new(0, 0).designator(), "A1");
        assert_eq!(Coord::new(4, 2).designator(), "C5");
        assert_eq!(Coord::new(9, 25).designator(), "Z10");
    }

    #[test]
    fn test_from_designator() {
        assert_eq!(Coord::from_designator("C5"), Some(Coord::new(4, 2)));
        assert_eq!(Coord::from_designator("a1"), Some(Coord::new(0, 0)));
        assert_eq!(Coord::from_designator("A0"), None);
        assert_eq!(Coord::from_designator("1A"), None);
        assert_eq!(Coord::from_designator(""), None);
    }

    #[test]
    fn test_neighbors_clip_to_board() {
        let corner: Vec<_> = Coord::new(0, 0).neighbors(3).collect();
        assert_eq!(corner, vec![Coord::new(0, 1), Coord::new(1, 0)]);

        let center: Vec<_> = Coord::new(1, 1).neighbors(3).collect();
        assert_eq!(center.len(), 4);
    }

    #[test]
    fn test_player_opponent_and_sign() {
        assert_eq!(Player::Max.opponent(), Player::Min);
        assert_eq!(Player::Min.opponent(), Player::Max);
        assert_eq!(Player::Max.signed(9), 9);
        assert_eq!(Player::Min.signed(9), -9);
    }
}
