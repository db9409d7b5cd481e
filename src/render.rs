//! Plain-text rendering shared by the terminal UI, the driver and the final report.

use crate::engine::Direction;
use crate::grid::Grid;
use crate::session::{Ending, Preview, Report, Stats};
use std::io::{self, Write};

/// Title banner.
pub const TITLE: [&str; 5] = [
    r" ____   ___  _  _    ___  ",
    r"|___ \ / _ \| || |  ( _ ) ",
    r"  __) | | | | || |_ / _ \ ",
    r" / __/| |_| |__   _| (_) |",
    r"|_____|\___/   |_|  \___/ ",
];

pub const HELP: &str =
    "w:Up  a:Left  s:Down  d:Right  n:Next Moves  r:Reset Game  u:Undo  v:View Stats  q:Quit";

pub const START_PROMPT: &str =
    "Press u to start user-played game, any other key to start driver code";

pub const PREVIEW_PROMPT: &str = "Show with addition of random tile? (y/n): ";

/// Space between the first board row and the score.
const SCORE_GAP: &str = "        ";

/// One cell padded to `width`: blanks are a right-aligned `-`.
pub fn cell(value: u64, width: usize) -> String {
    if value == 0 {
        format!("{:>width$} ", "-")
    } else {
        format!("{:>width$} ", value)
    }
}

/// Board rows; the first row carries the score when one is given.
pub fn board_lines(grid: &Grid, score: Option<u64>, width: usize) -> Vec<String> {
    grid.rows()
        .enumerate()
        .map(|(i, row)| {
            let mut line: String = row.iter().map(|&v| cell(v, width)).collect();
            if let (0, Some(score)) = (i, score) {
                line.push_str(SCORE_GAP);
                line.push_str(&score_label(score));
            }
            line
        })
        .collect()
}

pub fn score_label(score: u64) -> String {
    format!("Score: {}", score)
}

pub const fn direction_heading(dir: Direction) -> &'static str {
    match dir {
        Direction::Up => "UP:",
        Direction::Left => "LEFT:",
        Direction::Down => "DOWN:",
        Direction::Right => "RIGHT:",
    }
}

pub fn best_tile_line(preview: &Preview) -> String {
    format!("Highest tile attainable in next move: {}", preview.best_tile)
}

pub fn stats_lines(stats: &Stats) -> Vec<String> {
    let mut lines = vec![
        format!("Highest tile: {}", stats.max_tile),
        format!("Sum of all tiles: {}", stats.sum),
        format!("Number of blank tiles: {}", stats.blanks),
    ];
    lines.extend(
        stats
            .histogram
            .iter()
            .map(|(value, count)| format!("Tiles of value {}: {}", value, count)),
    );
    lines.push(format!("Total moves: {}", stats.moves));
    lines
}

pub const fn ending_banner(ending: Ending) -> &'static str {
    match ending {
        Ending::Quit => "QUIT!",
        Ending::GameOver => "GAME OVER!",
    }
}

pub fn report_lines(report: &Report) -> Vec<String> {
    vec![
        format!("Your total score is: {}", report.score),
        format!("Your highest tile is: {}", report.max_tile),
        if report.won { "YOU WIN!" } else { "YOU LOSE" }.to_string(),
    ]
}

pub fn write_board<W: Write>(out: &mut W, grid: &Grid, score: u64, width: usize) -> io::Result<()> {
    for line in board_lines(grid, Some(score), width) {
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

/// Title, final board, ending banner and score report.
pub fn write_final<W: Write>(
    out: &mut W,
    grid: &Grid,
    ending: Ending,
    report: &Report,
    width: usize,
) -> io::Result<()> {
    for line in TITLE {
        writeln!(out, "{}", line)?;
    }
    writeln!(out)?;
    write_board(out, grid, report.score, width)?;
    writeln!(out, "\n{}", ending_banner(ending))?;
    for line in report_lines(report) {
        writeln!(out, "{}", line)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_formatting() {
        assert_eq!(cell(0, 4), "   - ");
        assert_eq!(cell(2, 4), "   2 ");
        assert_eq!(cell(2048, 4), "2048 ");
        assert_eq!(cell(16384, 4), "16384 ");
    }

    #[test]
    fn test_board_lines_score_on_first_row() {
        let g = Grid::from_rows(&[&[2, 0], &[0, 4]]).unwrap();
        let lines = board_lines(&g, Some(12), 4);
        assert_eq!(lines[0], format!("   2    - {}Score: 12", SCORE_GAP));
        assert_eq!(lines[1], "   -    4 ");
        let bare = board_lines(&g, None, 2);
        assert_eq!(bare[0], " 2  - ");
    }

    #[test]
    fn test_stats_lines() {
        let stats = Stats {
            max_tile: 4,
            sum: 8,
            blanks: 13,
            histogram: vec![(2, 2), (4, 1)],
            moves: 3,
        };
        let lines = stats_lines(&stats);
        assert_eq!(lines[0], "Highest tile: 4");
        assert_eq!(lines[3], "Tiles of value 2: 2");
        assert_eq!(lines.last().unwrap(), "Total moves: 3");
    }

    #[test]
    fn test_write_final() {
        let g = Grid::from_rows(&[&[2048, 0], &[0, 0]]).unwrap();
        let report = Report {
            score: 20_000,
            max_tile: 2048,
            won: true,
        };
        let mut out = Vec::new();
        write_final(&mut out, &g, Ending::Quit, &report, 4).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("QUIT!"));
        assert!(text.contains("Your total score is: 20000"));
        assert!(text.contains("Your highest tile is: 2048"));
        assert!(text.contains("YOU WIN!"));
    }
}
