// Connected-group analysis
//
// A group is a maximal 4-connected set of cells sharing one non-empty token.
// Selecting any cell of a group crushes the whole group.

use crate::board::Board;
use crate::types::Coord;

/// One maximal connected component of equal tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub token: u8,
    /// Cells of the group; `cells[0]` is the seed the fill started from
    pub cells: Vec<Coord>,
}

impl Group {
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Payoff for crushing this group: size squared
    pub fn score(&self) -> i32 {
        let n = self.cells.len() as i32;
        n * n
    }

    /// The cell a player selects to crush this group
    pub fn anchor(&self) -> Coord {
        self.cells[0]
    }
}

/// Visited marks sized to the board, reused across fills of one scan
struct Visited {
    size: usize,
    marks: Vec<bool>,
}

impl Visited {
    fn new(size: usize) -> Self {
        Visited {
            size,
            marks: vec![false; size * size],
        }
    }

    fn is_marked(&self, coord: Coord) -> bool {
        self.marks[coord.row * self.size + coord.col]
    }

    /// Marks `coord`; returns false if it was already marked
    fn mark(&mut self, coord: Coord) -> bool {
        let idx = coord.row * self.size + coord.col;
        !std::mem::replace(&mut self.marks[idx], true)
    }
}

/// Iterative flood fill from `seed` over cells equal to the seed's token
fn flood_fill(board: &Board, seed: Coord, visited: &mut Visited) -> Group {
    let token = board.get(seed);
    let n = board.size();
    let mut cells = Vec::new();
    let mut stack = vec![seed];
    visited.mark(seed);

    while let Some(cell) = stack.pop() {
        cells.push(cell);
        for next in cell.neighbors(n) {
            if board.get(next) == token && visited.mark(next) {
                stack.push(next);
            }
        }
    }

    Group { token, cells }
}

/// Finds every group on the board, scanning rows then columns
///
/// Each non-empty cell belongs to exactly one returned group, so the sizes sum
/// to the number of occupied cells. Order is deterministic.
pub fn find_groups(board: &Board) -> Vec<Group> {
    let mut visited = Visited::new(board.size());
    let mut groups = Vec::new();

    for coord in board.coords() {
        if board.is_empty_at(coord) || visited.is_marked(coord) {
            continue;
        }
        groups.push(flood_fill(board, coord, &mut visited));
    }

    groups
}

/// Returns the group containing `coord`, or `None` for an empty or off-board cell
///
/// Runs a fresh fill, independent of any earlier scan.
pub fn find_group_at(board: &Board, coord: Coord) -> Option<Group> {
    if !board.contains(coord) || board.is_empty_at(coord) {
        return None;
    }
    let mut visited = Visited::new(board.size());
    Some(flood_fill(board, coord, &mut visited))
}

/// Number of legal moves: one per group
pub fn count_moves(board: &Board) -> usize {
    find_groups(board).len()
}
