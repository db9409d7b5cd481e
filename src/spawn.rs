//! Tile spawner: drop a new tile on a uniformly chosen blank cell.

use crate::grid::Grid;
use rand::Rng;

/// One in this many spawns is `base^2` instead of `base`.
const BIG_TILE_ODDS: u32 = 10;

/// Where a tile landed and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawned {
    pub row: usize,
    pub col: usize,
    pub value: u64,
}

/// Value of a fresh tile: `base^2` with probability 1/10, `base` otherwise.
pub fn new_tile_value<R: Rng + ?Sized>(rng: &mut R, base: u64) -> u64 {
    if rng.gen_ratio(1, BIG_TILE_ODDS) {
        base * base
    } else {
        base
    }
}

/// Write a new tile into a random blank cell. Every blank has equal probability.
/// No-op (returns None) on a full grid.
pub fn spawn<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R, base: u64) -> Option<Spawned> {
    let empty = grid.empty_count();
    if empty == 0 {
        return None;
    }
    let pick = rng.gen_range(0..empty);
    let value = new_tile_value(rng, base);
    let n = grid.size();
    let index = grid
        .cells()
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v == 0)
        .nth(pick)
        .map(|(i, _)| i)?;
    let (row, col) = (index / n, index % n);
    grid.set(row, col, value);
    Some(Spawned { row, col, value })
}
