//! Screen trait and transition type for the lobby state machine.

use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::session::{Completion, GameSession, Leaderboard};
use crate::ScoreStore;

/// The result of handling an input event on a screen.
///
/// Screens return this from [`Screen::handle_key`] to drive the
/// [`LobbyController`](crate::LobbyController) state machine.
#[derive(Debug, Clone)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Navigate back to the menu.
    GoToMenu,
    /// Play the given session on the board screen.
    Play(GameSession),
    /// The current board was solved; show the result.
    GoToVictory(Completion),
    /// Exit the application cleanly.
    Quit,
}

/// Trait implemented by each screen in the lobby state machine.
///
/// Each screen owns its own state, renders its UI, and handles key events.
/// The controller calls these methods in the event loop.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key<S: ScoreStore>(
        &mut self,
        key: KeyEvent,
        leaderboard: &Leaderboard<S>,
    ) -> ScreenTransition;
}
