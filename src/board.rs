// Board representation and validation
//
// The board is stored row-major as ASCII bytes. Normal tokens are the digits
// '0'..'9'; crushed cells hold the `EMPTY` sentinel.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::types::{Coord, COLUMN_LETTERS};

/// Placeholder left behind by a crush
pub const EMPTY: u8 = b'*';

/// Largest board whose columns can be named by a single letter
pub const MAX_BOARD_SIZE: usize = COLUMN_LETTERS.len();

/// Tokens are single digits, so at most ten distinct kinds exist
pub const MAX_ALPHABET: usize = 10;

/// An N×N grid of tokens
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Board {
    size: usize,
    cells: Vec<u8>,
}

impl Board {
    /// Builds a board from text rows, accepting any digit token
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        Self::from_rows_with_alphabet(rows, MAX_ALPHABET)
    }

    /// Builds a board from text rows, accepting digits below `alphabet` and `EMPTY`
    ///
    /// Fails fast on any row of the wrong length or any unexpected symbol.
    pub fn from_rows_with_alphabet<S: AsRef<str>>(rows: &[S], alphabet: usize) -> Result<Self> {
        let size = rows.len();
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(Error::InvalidDimension {
                size,
                max: MAX_BOARD_SIZE,
            });
        }
        if alphabet == 0 || alphabet > MAX_ALPHABET {
            return Err(Error::InvalidAlphabet {
                size: alphabet,
                max: MAX_ALPHABET,
            });
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let got = line.chars().count();
            if got != size {
                return Err(Error::RowLength {
                    row,
                    expected: size,
                    got,
                });
            }

            for (col, symbol) in line.chars().enumerate() {
                if !Self::is_valid_symbol(symbol, alphabet) {
                    return Err(Error::UnexpectedSymbol { symbol, row, col });
                }
                cells.push(symbol as u8);
            }
        }

        Ok(Board { size, cells })
    }

    fn is_valid_symbol(symbol: char, alphabet: usize) -> bool {
        if symbol == EMPTY as char {
            return true;
        }
        match symbol.to_digit(10) {
            Some(d) => (d as usize) < alphabet,
            None => false,
        }
    }

    /// A board where every cell has already been crushed
    pub fn empty(size: usize) -> Self {
        Board {
            size,
            cells: vec![EMPTY; size * size],
        }
    }

    /// Fills an `size`×`size` board with tokens drawn uniformly from the first `alphabet` digits
    pub fn random<R: Rng + ?Sized>(size: usize, alphabet: usize, rng: &mut R) -> Self {
        let alphabet = alphabet.clamp(1, MAX_ALPHABET) as u8;
        let cells = (0..size * size)
            .map(|_| b'0' + rng.random_range(0..alphabet))
            .collect();
        Board { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, coord: Coord) -> usize {
        coord.row * self.size + coord.col
    }

    /// Returns true if the coordinate lies on the board
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    /// Token at `coord`; the coordinate must be on the board
    #[inline]
    pub fn get(&self, coord: Coord) -> u8 {
        self.cells[self.index(coord)]
    }

    #[inline]
    pub fn is_empty_at(&self, coord: Coord) -> bool {
        self.get(coord) == EMPTY
    }

    #[inline]
    pub(crate) fn set(&mut self, coord: Coord, token: u8) {
        let idx = self.index(coord);
        self.cells[idx] = token;
    }

    /// Number of cells still holding a normal token
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY).count()
    }

    /// True when every cell is the empty sentinel
    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(|&c| c == EMPTY)
    }

    /// All coordinates in row-major order
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let n = self.size;
        (0..n).flat_map(move |row| (0..n).map(move |col| Coord::new(row, col)))
    }

    /// Tokens of one column, top to bottom
    pub fn column(&self, col: usize) -> Vec<u8> {
        (0..self.size)
            .map(|row| self.get(Coord::new(row, col)))
            .collect()
    }

    /// Row `row` rendered as text
    pub fn row_string(&self, row: usize) -> String {
        let start = row * self.size;
        self.cells[start..start + self.size]
            .iter()
            .map(|&b| b as char)
            .collect()
    }

    /// All rows rendered as text, top to bottom
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.size).map(|row| self.row_string(row)).collect()
    }
}

impl TryFrom<Vec<String>> for Board {
    type Error = Error;

    fn try_from(rows: Vec<String>) -> Result<Self> {
        Board::from_rows(&rows)
    }
}

impl From<Board> for Vec<String> {
    fn from(board: Board) -> Self {
        board.to_rows()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            writeln!(f, "{}", self.row_string(row))?;
        }
        Ok(())
    }
}
