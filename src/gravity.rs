// Crushing and re-settling
//
// Crushed cells become `EMPTY`; then every column is compacted so surviving
// tokens fall to the bottom in their original order and empties rise to the top.

use crate::board::{Board, EMPTY};
use crate::grid::Group;
use crate::types::Coord;

/// Crushes `cells` and settles the result, leaving `board` untouched
///
/// # Panics
/// If any coordinate in `cells` is off the board.
pub fn apply(board: &Board, cells: &[Coord]) -> Board {
    let mut next = board.clone();
    for &cell in cells {
        assert!(board.contains(cell), "crush outside the board: {:?}", cell);
        next.set(cell, EMPTY);
    }
    settle(&mut next);
    next
}

/// Crushes a whole group
pub fn apply_group(board: &Board, group: &Group) -> Board {
    apply(board, &group.cells)
}

/// Compacts every column downward in place
fn settle(board: &mut Board) {
    let n = board.size();
    for col in 0..n {
        // Write surviving tokens bottom-up, then fill what is left with empties
        let mut write = n;
        for row in (0..n).rev() {
            let token = board.get(Coord::new(row, col));
            if token != EMPTY {
                write -= 1;
                board.set(Coord::new(write, col), token);
            }
        }
        for row in 0..write {
            board.set(Coord::new(row, col), EMPTY);
        }
    }
}
