//! Lobby system: menu, board and result screens in one TUI.

mod board_view;
mod controller;
mod screen;
mod screens;

pub use board_view::{disk_color, disk_width, peg_lines};
pub use controller::{ActiveScreen, LobbyController};
pub use screen::{Screen, ScreenTransition};
pub use screens::{BoardScreen, MenuScreen, VictoryScreen};

use std::io;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, instrument};

use crate::ScoreStore;
use crate::session::Leaderboard;

/// Runs the lobby on the real terminal, restoring it afterwards.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn to.
#[instrument(skip(leaderboard))]
pub fn run_lobby<S: ScoreStore>(leaderboard: Leaderboard<S>) -> anyhow::Result<()> {
    info!("Starting Strictly Hanoi lobby");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut controller = LobbyController::new(leaderboard);
    let result = controller.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        error!(error = %e, "Lobby exited with an error");
    }
    result
}
