//! Grid: square matrix of tile values, plus the read-only queries on it
//! (game over, max tile, sums, counts).

use std::fmt;

/// Exponent of the base that counts as a win (p^11, i.e. 2048 for base 2).
pub const WIN_EXPONENT: u32 = 11;

/// Square `size x size` board. 0 is an empty cell; anything else is a power of the base.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    /// Row-major cells.
    cells: Vec<u64>,
}

impl Grid {
    /// Empty grid of the given dimension.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Build a grid from rows. Returns None if the rows are not square.
    #[cfg(test)]
    pub fn from_rows(rows: &[&[u64]]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|r| r.len() != size) {
            return None;
        }
        Some(Self {
            size,
            cells: rows.iter().flat_map(|r| r.iter().copied()).collect(),
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u64 {
        self.cells[row * self.size + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u64) {
        self.cells[row * self.size + col] = value;
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> &[u64] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [u64] {
        &mut self.cells[row * self.size..(row + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u64]> {
        self.cells.chunks(self.size)
    }

    pub fn cells(&self) -> &[u64] {
        &self.cells
    }

    /// Zero every cell.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Highest tile, 0 if the grid is empty.
    pub fn max_value(&self) -> u64 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    pub fn sum_tiles(&self) -> u64 {
        self.cells.iter().sum()
    }

    /// Number of cells holding exactly `value` (0 counts blanks).
    pub fn count_tiles(&self, value: u64) -> usize {
        self.cells.iter().filter(|&&c| c == value).count()
    }

    pub fn empty_count(&self) -> usize {
        self.count_tiles(0)
    }

    /// True when the grid is full and no two neighbours (horizontal or vertical) are equal.
    pub fn is_game_over(&self) -> bool {
        if self.empty_count() != 0 {
            return false;
        }
        let n = self.size;
        if (0..n).any(|r| self.row(r).windows(2).any(|w| w[0] == w[1])) {
            return false;
        }
        for r in 0..n - 1 {
            if (0..n).any(|c| self.get(r, c) == self.get(r + 1, c)) {
                return false;
            }
        }
        true
    }

    /// Whether the max tile has reached `base^11`.
    pub fn has_won(&self, base: u64) -> bool {
        match base.checked_pow(WIN_EXPONENT) {
            Some(target) => self.max_value() >= target,
            None => false,
        }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[u64]]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(Grid::from_rows(&[&[2, 4], &[2]]).is_none());
    }

    #[test]
    fn test_game_over_packed_no_neighbours() {
        let g = grid(&[&[2, 4], &[4, 2]]);
        assert!(g.is_game_over());
    }

    #[test]
    fn test_not_game_over_with_blank_even_without_merges() {
        let g = grid(&[&[2, 4], &[4, 0]]);
        assert!(!g.is_game_over());
        let g = grid(&[&[0, 2], &[2, 2]]);
        assert!(!g.is_game_over());
    }

    #[test]
    fn test_not_game_over_horizontal_pair() {
        let g = grid(&[&[2, 2, 4], &[4, 8, 16], &[32, 64, 128]]);
        assert!(!g.is_game_over());
    }

    #[test]
    fn test_not_game_over_vertical_pair() {
        let g = grid(&[&[2, 4, 8], &[16, 4, 32], &[64, 128, 256]]);
        assert!(!g.is_game_over());
    }

    #[test]
    fn test_queries() {
        let g = grid(&[&[2, 0, 4, 2], &[0, 0, 0, 0], &[8, 2, 0, 0], &[0, 0, 0, 16]]);
        assert_eq!(g.max_value(), 16);
        assert_eq!(g.sum_tiles(), 34);
        assert_eq!(g.count_tiles(2), 3);
        assert_eq!(g.empty_count(), 10);
        assert_eq!(Grid::new(4).max_value(), 0);
    }

    #[test]
    fn test_has_won() {
        let mut g = Grid::new(4);
        g.set(0, 0, 1024);
        assert!(!g.has_won(2));
        g.set(3, 3, 2048);
        assert!(g.has_won(2));
        g.set(3, 3, 177_147); // 3^11
        assert!(g.has_won(3));
    }
}
