// Text input and output for one turn
//
// Input:  N, p, time budget, then N rows of N tokens.
// Output: the move designator (empty when no move exists), then the settled board.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::agent::Decision;
use crate::board::{Board, MAX_ALPHABET, MAX_BOARD_SIZE};
use crate::error::{Error, Result};

/// A parsed turn description
#[derive(Debug, Clone, PartialEq)]
pub struct GameInput {
    pub size: usize,
    pub alphabet: usize,
    pub time_left: f64,
    pub board: Board,
}

fn header_line<'a>(lines: &[&'a str], index: usize, what: &'static str) -> Result<&'a str> {
    lines.get(index).copied().ok_or(Error::MissingLine {
        what,
        line: index + 1,
    })
}

fn parse_number<T: FromStr>(lines: &[&str], index: usize, what: &'static str) -> Result<T> {
    let raw = header_line(lines, index, what)?;
    raw.parse().map_err(|_| Error::InvalidNumber {
        what,
        value: raw.to_string(),
        line: index + 1,
    })
}

/// Parses the input format, failing fast on any inconsistency
pub fn parse_input(text: &str) -> Result<GameInput> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    let size: usize = parse_number(&lines, 0, "board size")?;
    if size == 0 || size > MAX_BOARD_SIZE {
        return Err(Error::InvalidDimension {
            size,
            max: MAX_BOARD_SIZE,
        });
    }

    let alphabet: usize = parse_number(&lines, 1, "token count")?;
    if alphabet == 0 || alphabet > MAX_ALPHABET {
        return Err(Error::InvalidAlphabet {
            size: alphabet,
            max: MAX_ALPHABET,
        });
    }

    let time_left: f64 = parse_number(&lines, 2, "time budget")?;

    let mut rows = Vec::with_capacity(size);
    for i in 0..size {
        rows.push(header_line(&lines, 3 + i, "board row")?);
    }
    let board = Board::from_rows_with_alphabet(&rows, alphabet)?;

    Ok(GameInput {
        size,
        alphabet,
        time_left,
        board,
    })
}

/// Renders a decision: designator line then the board after the move
pub fn format_output(decision: &Decision) -> String {
    let mut out = String::new();
    if let Some(mv) = decision.chosen {
        out.push_str(&mv.designator());
    }
    out.push('\n');
    out.push_str(&decision.board_after.to_string());
    out
}

/// Reads and parses an input file
pub fn read_input<P: AsRef<Path>>(path: P) -> Result<GameInput> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("read input file {}", path.display()), e))?;
    parse_input(&text)
}

/// Writes a decision to an output file, replacing any previous content
pub fn write_output<P: AsRef<Path>>(path: P, decision: &Decision) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, format_output(decision))
        .map_err(|e| Error::io(format!("write output file {}", path.display()), e))
}
