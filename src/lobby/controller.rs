//! Lobby controller: the state machine driving the multi-screen TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use tracing::{debug, info, instrument, warn};

use crate::ScoreStore;
use crate::lobby::screen::{Screen, ScreenTransition};
use crate::lobby::screens::{BoardScreen, MenuScreen, VictoryScreen};
use crate::session::Leaderboard;

/// Active screen in the lobby state machine.
#[derive(Debug)]
pub enum ActiveScreen {
    /// Name entry, difficulty selection and leaderboard.
    Menu(MenuScreen),
    /// The puzzle.
    Board(BoardScreen),
    /// Result of a solved puzzle.
    Victory(VictoryScreen),
}

/// Controller that drives the lobby state machine.
///
/// Call [`LobbyController::run`] to start the event loop.
#[derive(Debug)]
pub struct LobbyController<S> {
    leaderboard: Leaderboard<S>,
    last_player: String,
}

impl<S: ScoreStore> LobbyController<S> {
    /// Creates a new lobby controller.
    #[instrument(skip(leaderboard))]
    pub fn new(leaderboard: Leaderboard<S>) -> Self {
        info!(available = leaderboard.is_available(), "Creating LobbyController");
        Self {
            leaderboard,
            last_player: String::new(),
        }
    }

    /// The leaderboard shared by all screens.
    pub fn leaderboard(&self) -> &Leaderboard<S> {
        &self.leaderboard
    }

    /// The menu every run starts on.
    #[instrument(skip(self))]
    pub fn first_screen(&self) -> ActiveScreen {
        ActiveScreen::Menu(MenuScreen::new(&self.leaderboard, &self.last_player))
    }

    /// Runs the lobby event loop until the user quits.
    #[instrument(skip(self, terminal))]
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting lobby event loop");
        let mut screen = self.first_screen();

        loop {
            terminal.draw(|f| match &screen {
                ActiveScreen::Menu(s) => s.render(f),
                ActiveScreen::Board(s) => s.render(f),
                ActiveScreen::Victory(s) => s.render(f),
            })?;

            // Poll for input with short timeout to keep the loop responsive.
            if !event::poll(Duration::from_millis(100))? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            // Skip key release events (crossterm fires both press and release).
            if key.kind == KeyEventKind::Release {
                continue;
            }

            screen = match self.step(screen, key) {
                Some(next) => next,
                None => {
                    info!("Lobby quitting");
                    return Ok(());
                }
            };
        }
    }

    /// Feeds one key to the active screen and applies the resulting transition.
    ///
    /// Returns `None` when the user quits.
    #[instrument(skip(self, screen, key))]
    pub fn step(&mut self, mut screen: ActiveScreen, key: KeyEvent) -> Option<ActiveScreen> {
        let transition = match &mut screen {
            ActiveScreen::Menu(s) => s.handle_key(key, &self.leaderboard),
            ActiveScreen::Board(s) => s.handle_key(key, &self.leaderboard),
            ActiveScreen::Victory(s) => s.handle_key(key, &self.leaderboard),
        };
        self.apply_transition(transition, screen)
    }

    /// Applies a screen transition, returning the next screen or `None` to quit.
    #[instrument(skip(self, transition, current))]
    fn apply_transition(
        &mut self,
        transition: ScreenTransition,
        current: ActiveScreen,
    ) -> Option<ActiveScreen> {
        debug!(transition = ?transition, "Applying screen transition");
        match transition {
            ScreenTransition::Stay => Some(current),

            ScreenTransition::GoToMenu => {
                if let Some(player) = player_of(&current) {
                    self.last_player = player;
                }
                info!("Navigating to Menu");
                Some(self.first_screen())
            }

            ScreenTransition::Play(session) => {
                info!(
                    player = %session.player(),
                    difficulty = %session.difficulty(),
                    "Navigating to Board"
                );
                self.last_player = session.player().clone();
                Some(ActiveScreen::Board(BoardScreen::new(session)))
            }

            ScreenTransition::GoToVictory(completion) => match current {
                ActiveScreen::Board(board) => {
                    info!(score = completion.score(), "Navigating to Victory");
                    Some(ActiveScreen::Victory(VictoryScreen::new(
                        board.into_session(),
                        completion,
                    )))
                }
                other => {
                    warn!("Victory reported outside a board, staying put");
                    Some(other)
                }
            },

            ScreenTransition::Quit => None,
        }
    }
}

fn player_of(screen: &ActiveScreen) -> Option<String> {
    match screen {
        ActiveScreen::Menu(_) => None,
        ActiveScreen::Board(s) => Some(s.session().player().clone()),
        ActiveScreen::Victory(s) => Some(s.player().to_string()),
    }
}
