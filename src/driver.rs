//! Unattended driver: cycles up, right, down, left and backs out any move that
//! pushes the tile sum past the target, until the sum lands exactly on it.
//! A demo/self-test, separate from the interactive game-over rule.

use crate::engine::Direction;
use crate::render;
use crate::session::Session;
use std::io::{self, Write};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverOutcome {
    /// Tile sum hit the target.
    Reached,
    /// Step cap ran out first.
    StepLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverReport {
    pub steps: u64,
    pub outcome: DriverOutcome,
    pub score: u64,
    pub sum: u64,
}

/// Tile sum the driver stops at: `base^3` (8 for base 2).
pub fn target_sum(base: u64) -> u64 {
    base.saturating_pow(3)
}

/// Run the driver on `session`, writing a move-by-move log to `out`.
/// `max_steps == 0` means no cap.
pub fn run<W: Write>(
    session: &mut Session,
    out: &mut W,
    width: usize,
    max_steps: u64,
) -> io::Result<DriverReport> {
    let target = target_sum(session.base());
    render::write_board(out, session.grid(), session.score(), width)?;
    write!(out, "\nSum of tiles is {}", session.grid().sum_tiles())?;

    let mut steps = 0u64;
    let outcome = loop {
        if session.grid().sum_tiles() == target {
            break DriverOutcome::Reached;
        }
        if max_steps != 0 && steps >= max_steps {
            break DriverOutcome::StepLimit;
        }
        let dir = Direction::DRIVER_CYCLE[(steps % 4) as usize];
        steps += 1;

        let moved = session.apply_move(dir);
        if moved.changed {
            writeln!(out, "\nMove {}\n", dir)?;
            render::write_board(out, session.grid(), session.score(), width)?;
        }
        let sum = session.grid().sum_tiles();
        debug!(
            step = steps,
            %dir,
            changed = moved.changed,
            gained = moved.gained,
            sum,
            "driver step"
        );
        write!(out, "\nSum of tiles is {}", sum)?;
        if sum > target {
            session.revert_grid();
            writeln!(out, "\nUndo\n")?;
            render::write_board(out, session.grid(), session.score(), width)?;
        }
    };

    match outcome {
        DriverOutcome::Reached => writeln!(out, "\nGame Over! Sum of tiles is now {}", target)?,
        DriverOutcome::StepLimit => writeln!(out, "\nStopped after {} steps", steps)?,
    }
    let report = DriverReport {
        steps,
        outcome,
        score: session.score(),
        sum: session.grid().sum_tiles(),
    };
    info!(
        steps = report.steps,
        outcome = ?report.outcome,
        score = report.score,
        sum = report.sum,
        "driver finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session(rows: &[&[u64]], seed: u64) -> Session {
        Session::from_grid(2, Grid::from_rows(rows).unwrap(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_target_sum() {
        assert_eq!(target_sum(2), 8);
        assert_eq!(target_sum(3), 27);
    }

    #[test]
    fn test_already_at_target_does_nothing() {
        let mut s = session(&[&[4, 0, 0, 0], &[0; 4], &[0; 4], &[0, 0, 0, 4]], 1);
        let mut out = Vec::new();
        let report = run(&mut s, &mut out, 4, 100).unwrap();
        assert_eq!(report.steps, 0);
        assert_eq!(report.outcome, DriverOutcome::Reached);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Game Over! Sum of tiles is now 8"));
    }

    #[test]
    fn test_reaches_target_from_fresh_boards() {
        for seed in 0..20 {
            let mut s = session(&[&[2, 0, 0, 0], &[0; 4], &[0; 4], &[0, 0, 0, 2]], seed);
            let mut out = Vec::new();
            let report = run(&mut s, &mut out, 4, 10_000).unwrap();
            assert_eq!(report.outcome, DriverOutcome::Reached, "seed {seed}");
            assert_eq!(report.sum, 8);
            assert_eq!(s.grid().sum_tiles(), 8);
        }
    }

    fn move_lines(out: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(out)
            .lines()
            .filter(|l| l.starts_with("Move "))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_rejected_move_still_advances_cycle() {
        // Up cannot move a tile already on the top row, so the next step is Right.
        let mut s = session(&[&[2, 0, 0, 0], &[0; 4], &[0; 4], &[0; 4]], 3);
        let mut out = Vec::new();
        let report = run(&mut s, &mut out, 4, 2).unwrap();
        assert_eq!(report.outcome, DriverOutcome::StepLimit);
        assert_eq!(report.steps, 2);
        assert_eq!(move_lines(&out), vec!["Move Right"]);
        assert_eq!(s.grid().get(0, 3), 2);
        assert_eq!(s.moves(), 1);
    }

    #[test]
    fn test_overshooting_moves_are_reverted_in_cycle_order() {
        // Base 3, target 27: every direction merges two pairs to reach 27 and the
        // spawn then pushes it over, so each move is undone and the board never changes.
        let start = Grid::from_rows(&[&[3, 3, 9], &[3, 3, 0], &[0, 0, 0]]).unwrap();
        let mut s = Session::from_grid(3, start.clone(), StdRng::seed_from_u64(5));
        let mut out = Vec::new();
        let report = run(&mut s, &mut out, 4, 8).unwrap();

        assert_eq!(report.outcome, DriverOutcome::StepLimit);
        assert_eq!(report.steps, 8);
        assert_eq!(
            move_lines(&out),
            vec![
                "Move Up", "Move Right", "Move Down", "Move Left", "Move Up", "Move Right",
                "Move Down", "Move Left",
            ]
        );
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().filter(|l| *l == "Undo").count(), 8);
        assert!(text.contains("Stopped after 8 steps"));
        assert_eq!(s.grid(), &start);
        assert_eq!(report.sum, 21);
        // Each reverted move merged two 3-pairs into 9s; the points stay.
        assert_eq!(report.score, 8 * 18);
    }
}
