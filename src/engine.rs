//! Transform engine: rotation, push and merge.
//!
//! Only the rightward push/merge is implemented directly. Every other direction
//! rotates the grid anticlockwise into that orientation, applies the rightward
//! operation and rotates back, so all four moves share one merge routine.

use crate::grid::Grid;
use std::fmt;

/// A move direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// Order used by the next-moves preview.
    pub const ALL: [Self; 4] = [Self::Up, Self::Left, Self::Down, Self::Right];

    /// Order the driver cycles through.
    pub const DRIVER_CYCLE: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Anticlockwise quarter turns that bring this direction's target edge to the right.
    pub const fn rotations(self) -> usize {
        match self {
            Self::Right => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Up => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Up => "Up",
            Self::Left => "Left",
            Self::Down => "Down",
            Self::Right => "Right",
        };
        f.write_str(s)
    }
}

/// Grid rotated 90° anticlockwise. Four applications give back the input.
pub fn rotate(grid: &Grid) -> Grid {
    let n = grid.size();
    let mut out = Grid::new(n);
    for r in 0..n {
        for c in 0..n {
            out.set(r, c, grid.get(c, n - 1 - r));
        }
    }
    out
}

fn rotate_times(grid: &mut Grid, times: usize) {
    for _ in 0..times % 4 {
        *grid = rotate(grid);
    }
}

/// Runs `op` on the grid while it is turned so that `dir` points right.
fn with_orientation(grid: &mut Grid, dir: Direction, op: impl FnOnce(&mut Grid)) {
    let k = dir.rotations();
    rotate_times(grid, k);
    op(grid);
    rotate_times(grid, 4 - k);
}

fn push_line_right(line: &mut [u64]) {
    let n = line.len();
    let mut write = n;
    for read in (0..n).rev() {
        if line[read] != 0 {
            write -= 1;
            line[write] = line[read];
        }
    }
    line[..write].fill(0);
}

/// Merge one already-pushed line toward its right edge. Returns points gained.
fn merge_line_right(line: &mut [u64], base: u64) -> u64 {
    let mut gained = 0u64;
    let mut j = line.len();
    // `j - 1` is the cell under inspection; scanning stops at the first blank.
    while j > 1 && line[j - 1] != 0 {
        if line[j - 1] == line[j - 2] {
            let merged = line[j - 1].saturating_mul(base);
            line[j - 1] = merged;
            line[j - 2] = 0;
            gained = gained.saturating_add(merged);
            j -= 2;
        } else {
            j -= 1;
        }
    }
    gained
}

fn push_right(grid: &mut Grid) {
    for r in 0..grid.size() {
        push_line_right(grid.row_mut(r));
    }
}

fn merge_lines_right(grid: &mut Grid, base: u64, score: &mut u64) {
    for r in 0..grid.size() {
        let gained = merge_line_right(grid.row_mut(r), base);
        *score = score.saturating_add(gained);
    }
}

/// Compact every line toward the `dir` edge without merging.
pub fn push(grid: &mut Grid, dir: Direction) {
    with_orientation(grid, dir, push_right);
}

/// Full move: push, merge equal neighbours once each (nearest the edge first), push again.
/// A merged tile is `base` times the pair's value and that value is added to `score`.
pub fn merge(grid: &mut Grid, dir: Direction, base: u64, score: &mut u64) {
    push(grid, dir);
    with_orientation(grid, dir, |g| merge_lines_right(g, base, score));
    push(grid, dir);
}
