//! UI: title banner, board, help line, and the panel for the current session mode.

use crate::grid::Grid;
use crate::render::{self, HELP, PREVIEW_PROMPT, TITLE};
use crate::session::{Mode, Preview, Session, Stats};
use crate::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Draw the whole screen for the session's current mode.
pub fn draw(frame: &mut Frame, session: &Session, theme: &Theme, tile_width: usize) {
    let n = session.grid().size() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE.len() as u16 + 1), // banner + gap
            Constraint::Length(n + 2),                  // board + border
            Constraint::Length(1),                      // help
            Constraint::Min(0),                         // mode panel
        ])
        .split(frame.area());

    draw_title(frame, theme, chunks[0]);
    let board = Paragraph::new(board_text(
        session.grid(),
        Some(session.score()),
        session.base(),
        theme,
        tile_width,
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(theme.bg))
            .border_style(Style::default().fg(theme.div_line))
            .title(Span::styled(" 2048 ", Style::default().fg(theme.title))),
    );
    frame.render_widget(board, chunks[1]);
    frame.render_widget(
        Paragraph::new(Span::styled(HELP, Style::default().fg(theme.inactive_fg))),
        chunks[2],
    );

    let panel = chunks[3];
    match session.mode() {
        Mode::Playing => {}
        Mode::ChoosingPreview => {
            let prompt = Line::from(Span::styled(
                PREVIEW_PROMPT,
                Style::default().fg(theme.main_fg),
            ));
            frame.render_widget(Paragraph::new(vec![Line::from(""), prompt]), panel);
        }
        Mode::Previewing(preview) => {
            draw_preview(frame, preview, session.base(), theme, tile_width, panel);
        }
        Mode::ShowingStats(stats) => draw_stats(frame, stats, theme, panel),
        Mode::Finished(ending) => {
            let mut lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    render::ending_banner(*ending),
                    Style::default().fg(Color::White).bg(Color::Red),
                )),
            ];
            lines.extend(
                render::report_lines(&session.report())
                    .into_iter()
                    .map(|l| Line::from(Span::styled(l, Style::default().fg(theme.main_fg)))),
            );
            frame.render_widget(Paragraph::new(lines), panel);
        }
    }
}

fn draw_title(frame: &mut Frame, theme: &Theme, area: Rect) {
    let style = Style::default().fg(theme.title).add_modifier(Modifier::BOLD);
    let lines: Vec<Line> = TITLE
        .iter()
        .map(|l| Line::from(Span::styled(*l, style)))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// Board rows as styled lines; cells coloured by exponent, score on the first row.
fn board_text(
    grid: &Grid,
    score: Option<u64>,
    base: u64,
    theme: &Theme,
    tile_width: usize,
) -> Vec<Line<'static>> {
    grid.rows()
        .enumerate()
        .map(|(i, row)| {
            let mut spans: Vec<Span> = row
                .iter()
                .map(|&v| {
                    Span::styled(
                        render::cell(v, tile_width),
                        Style::default().fg(theme.tile_color(v, base)),
                    )
                })
                .collect();
            if let (0, Some(score)) = (i, score) {
                spans.push(Span::raw("    "));
                spans.push(Span::styled(
                    render::score_label(score),
                    Style::default().fg(theme.main_fg),
                ));
            }
            Line::from(spans)
        })
        .collect()
}

fn draw_preview(
    frame: &mut Frame,
    preview: &Preview,
    base: u64,
    theme: &Theme,
    tile_width: usize,
    area: Rect,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Fill(1); 4])
        .split(rows[0]);
    let heading = Style::default().fg(theme.title);
    for (outcome, col) in preview.outcomes.iter().zip(cols.iter()) {
        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(render::direction_heading(outcome.direction), heading),
                Span::raw(" "),
                Span::styled(
                    render::score_label(outcome.score),
                    Style::default().fg(theme.main_fg),
                ),
            ]),
        ];
        lines.extend(board_text(&outcome.grid, None, base, theme, tile_width));
        frame.render_widget(Paragraph::new(lines), *col);
    }
    frame.render_widget(
        Paragraph::new(Span::styled(
            render::best_tile_line(preview),
            Style::default().fg(theme.main_fg),
        )),
        rows[1],
    );
}

fn draw_stats(frame: &mut Frame, stats: &Stats, theme: &Theme, area: Rect) {
    let style = Style::default().fg(theme.main_fg);
    let mut lines = vec![Line::from("")];
    lines.extend(
        render::stats_lines(stats)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, style))),
    );
    frame.render_widget(Paragraph::new(lines), area);
}

/// Startup screen: banner and the mode prompt.
pub fn draw_start(frame: &mut Frame, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(TITLE.len() as u16 + 1), Constraint::Min(0)])
        .split(frame.area());
    draw_title(frame, theme, chunks[0]);
    frame.render_widget(
        Paragraph::new(Span::styled(
            render::START_PROMPT,
            Style::default().fg(theme.main_fg),
        )),
        chunks[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Direction as Move;
    use crate::session::Command;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(session: &Session) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal
            .draw(|f| draw(f, session, &Theme::default(), 4))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn session() -> Session {
        let grid = Grid::from_rows(&[&[2, 2, 0, 0], &[0; 4], &[0; 4], &[0, 0, 0, 8]]).unwrap();
        Session::from_grid(2, grid, StdRng::seed_from_u64(9))
    }

    #[test]
    fn test_draw_playing() {
        let text = screen_text(&session());
        assert!(text.contains("Score: 0"));
        assert!(text.contains("n:Next Moves"));
        assert!(text.contains("   8 "));
    }

    #[test]
    fn test_draw_preview() {
        let mut s = session();
        s.handle(Command::Preview);
        assert!(screen_text(&s).contains("(y/n)"));
        s.handle(Command::None);
        let text = screen_text(&s);
        assert!(text.contains("UP:"));
        assert!(text.contains("RIGHT: Score: 4"));
        assert!(text.contains("Highest tile attainable in next move: 8"));
    }

    #[test]
    fn test_draw_stats_and_finish() {
        let mut s = session();
        s.handle(Command::Stats);
        assert!(screen_text(&s).contains("Number of blank tiles: 13"));
        s.handle(Command::Move(Move::Left));
        s.handle(Command::Quit);
        let text = screen_text(&s);
        assert!(text.contains("QUIT!"));
        assert!(text.contains("YOU LOSE"));
    }

    #[test]
    fn test_draw_start() {
        let mut terminal = Terminal::new(TestBackend::new(100, 10)).unwrap();
        terminal.draw(|f| draw_start(f, &Theme::default())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Press u to start"));
    }
}
