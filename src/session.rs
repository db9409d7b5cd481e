//! Session: owns grid, score, move count, undo snapshot and the random source,
//! and steps through the Playing / preview / stats / finished modes on each command.

use crate::GameConfig;
use crate::engine::{self, Direction};
use crate::grid::Grid;
use crate::spawn;
use rand::rngs::StdRng;
use tracing::{debug, info};

/// Commands produced by key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Reset,
    Undo,
    Preview,
    Stats,
    Quit,
    /// "y" answer to the preview prompt. Ignored while playing.
    Yes,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    Quit,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Playing,
    /// Waiting for the y/n answer to "show with a random tile?".
    ChoosingPreview,
    Previewing(Preview),
    ShowingStats(Stats),
    Finished(Ending),
}

/// One hypothetical move in a preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewOutcome {
    pub direction: Direction,
    pub grid: Grid,
    pub score: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub outcomes: Vec<PreviewOutcome>,
    /// Highest tile over all four merged grids (before any simulated spawn).
    pub best_tile: u64,
    pub with_spawn: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub max_tile: u64,
    pub sum: u64,
    pub blanks: usize,
    /// (tile value, count) for each power of the base present on the board, ascending.
    pub histogram: Vec<(u64, usize)>,
    pub moves: u32,
}

/// Final score line shown on quit or game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub score: u64,
    pub max_tile: u64,
    pub won: bool,
}

/// Result of one attempted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub changed: bool,
    pub gained: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    grid: Grid,
    score: u64,
}

#[derive(Debug)]
pub struct Session {
    base: u64,
    grid: Grid,
    score: u64,
    moves: u32,
    previous: Snapshot,
    rng: StdRng,
    mode: Mode,
}

impl Session {
    /// New session with a freshly seeded grid. `rng` is the only random source for the process.
    pub fn new(config: &GameConfig, rng: StdRng) -> Self {
        let grid = Grid::new(config.size);
        let mut session = Self {
            base: config.base,
            previous: Snapshot {
                grid: grid.clone(),
                score: 0,
            },
            grid,
            score: 0,
            moves: 0,
            rng,
            mode: Mode::Playing,
        };
        session.initialize();
        session
    }

    /// Session over a given grid (no seeding).
    #[cfg(test)]
    pub fn from_grid(base: u64, grid: Grid, rng: StdRng) -> Self {
        Self {
            base,
            previous: Snapshot {
                grid: grid.clone(),
                score: 0,
            },
            grid,
            score: 0,
            moves: 0,
            rng,
            mode: Mode::Playing,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.mode, Mode::Finished(_))
    }

    /// Clear the grid, seed two tiles, zero the score.
    fn initialize(&mut self) {
        self.grid.clear();
        spawn::spawn(&mut self.grid, &mut self.rng, self.base);
        spawn::spawn(&mut self.grid, &mut self.rng, self.base);
        self.score = 0;
        self.previous = Snapshot {
            grid: self.grid.clone(),
            score: 0,
        };
        info!(size = self.grid.size(), base = self.base, "new game");
    }

    /// Handle one command in the current mode.
    pub fn handle(&mut self, command: Command) {
        match self.mode {
            Mode::Finished(_) => return,
            Mode::ChoosingPreview => {
                let preview = self.preview(command == Command::Yes);
                info!(best_tile = preview.best_tile, with_spawn = preview.with_spawn, "preview");
                self.mode = Mode::Previewing(preview);
            }
            Mode::Playing | Mode::Previewing(_) | Mode::ShowingStats(_) => {
                self.mode = Mode::Playing;
                self.handle_playing(command);
            }
        }
        if !self.is_finished() && self.grid.is_game_over() {
            info!(score = self.score, max_tile = self.grid.max_value(), "game over");
            self.mode = Mode::Finished(Ending::GameOver);
        }
    }

    fn handle_playing(&mut self, command: Command) {
        match command {
            Command::Move(dir) => {
                self.apply_move(dir);
            }
            Command::Reset => self.reset(),
            Command::Undo => self.undo(),
            Command::Preview => self.mode = Mode::ChoosingPreview,
            Command::Stats => self.mode = Mode::ShowingStats(self.stats()),
            Command::Quit => {
                info!(score = self.score, "quit");
                self.mode = Mode::Finished(Ending::Quit);
            }
            Command::Yes | Command::None => {}
        }
    }

    /// Snapshot, merge, and on a change count the move and spawn a tile.
    /// An unchanged grid is a rejected move: nothing but the snapshot is touched.
    pub fn apply_move(&mut self, dir: Direction) -> MoveOutcome {
        self.previous = Snapshot {
            grid: self.grid.clone(),
            score: self.score,
        };
        engine::merge(&mut self.grid, dir, self.base, &mut self.score);
        let changed = self.grid != self.previous.grid;
        if changed {
            self.moves += 1;
            if let Some(s) = spawn::spawn(&mut self.grid, &mut self.rng, self.base) {
                debug!(%dir, row = s.row, col = s.col, value = s.value, "moved");
            }
        } else {
            debug!(%dir, "move rejected");
        }
        MoveOutcome {
            changed,
            gained: self.score - self.previous.score,
        }
    }

    /// Put back the grid and score from before the last attempted move.
    /// The move counter is floored at zero.
    pub fn undo(&mut self) {
        self.grid = self.previous.grid.clone();
        self.score = self.previous.score;
        self.moves = self.moves.saturating_sub(1);
        debug!(moves = self.moves, "undo");
    }

    /// Put back the pre-move grid only; points from the reverted move are kept.
    pub(crate) fn revert_grid(&mut self) {
        self.grid = self.previous.grid.clone();
    }

    pub fn reset(&mut self) {
        self.initialize();
        self.moves = 0;
        self.mode = Mode::Playing;
    }

    /// All four moves from the current grid, without touching the session's grid or score.
    pub fn preview(&mut self, with_spawn: bool) -> Preview {
        let mut best_tile = 0;
        let outcomes = Direction::ALL
            .into_iter()
            .map(|direction| {
                let mut grid = self.grid.clone();
                let mut score = self.score;
                engine::merge(&mut grid, direction, self.base, &mut score);
                best_tile = best_tile.max(grid.max_value());
                if with_spawn {
                    spawn::spawn(&mut grid, &mut self.rng, self.base);
                }
                PreviewOutcome {
                    direction,
                    grid,
                    score,
                }
            })
            .collect();
        Preview {
            outcomes,
            best_tile,
            with_spawn,
        }
    }

    pub fn stats(&self) -> Stats {
        let max_tile = self.grid.max_value();
        let mut histogram = Vec::new();
        let mut value = self.base;
        while value <= max_tile {
            let count = self.grid.count_tiles(value);
            if count != 0 {
                histogram.push((value, count));
            }
            match value.checked_mul(self.base) {
                Some(next) => value = next,
                None => break,
            }
        }
        Stats {
            max_tile,
            sum: self.grid.sum_tiles(),
            blanks: self.grid.empty_count(),
            histogram,
            moves: self.moves,
        }
    }

    pub fn report(&self) -> Report {
        Report {
            score: self.score,
            max_tile: self.grid.max_value(),
            won: self.grid.has_won(self.base),
        }
    }
}
