//! App: terminal init, startup prompt, blocking key loop.

use crate::input::{is_user_mode_key, key_to_command};
use crate::session::{Ending, Mode, Session};
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::DefaultTerminal;
use tracing::info;

/// How the terminal session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// Any key other than `u` at the prompt: run the driver on plain stdout.
    Driver,
    /// Interactive game ended by quit or game over.
    Finished(Ending),
}

pub struct App {
    session: Session,
    theme: Theme,
    tile_width: usize,
}

impl App {
    pub fn new(session: Session, theme: Theme, tile_width: usize) -> Self {
        Self {
            session,
            theme,
            tile_width,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Raw mode + alternate screen for the prompt and the game; restored before returning.
    pub fn run(&mut self) -> Result<Exit> {
        use crossterm::{
            execute,
            terminal::{
                EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
            },
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::DefaultTerminal::new(backend)?;

        let result = self.run_loop(&mut terminal);

        // Restore
        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;

        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<Exit> {
        terminal.draw(|f| crate::ui::draw_start(f, &self.theme))?;
        if !is_user_mode_key(read_key_press()?) {
            info!("driver mode selected");
            return Ok(Exit::Driver);
        }
        info!("interactive mode selected");

        loop {
            terminal.draw(|f| crate::ui::draw(f, &self.session, &self.theme, self.tile_width))?;
            let key = read_key_press()?;
            self.session.handle(key_to_command(key));
            if let Mode::Finished(ending) = self.session.mode() {
                info!(moves = self.session.moves(), ?ending, "game finished");
                return Ok(Exit::Finished(*ending));
            }
        }
    }
}

/// Block until a key press. Releases, repeats and non-key events are skipped.
fn read_key_press() -> Result<KeyEvent> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(key);
            }
        }
    }
}
