//! Victory screen, shown once the board is solved.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::{debug, info, instrument, warn};

use crate::ScoreStore;
use crate::lobby::screen::{Screen, ScreenTransition};
use crate::session::{Completion, GameSession, Leaderboard};

/// Choices offered after a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VictoryOption {
    PlayAgain,
    NextLevel,
    Menu,
}

impl VictoryOption {
    fn label(self) -> &'static str {
        match self {
            Self::PlayAgain => "Play Again",
            Self::NextLevel => "Next Level →",
            Self::Menu => "Menu",
        }
    }
}

/// State for the victory screen.
#[derive(Debug)]
pub struct VictoryScreen {
    session: GameSession,
    completion: Completion,
    options: Vec<VictoryOption>,
    list_state: ListState,
}

impl VictoryScreen {
    /// Creates the victory screen for a finished session.
    #[instrument(skip(session, completion), fields(score = completion.score()))]
    pub fn new(session: GameSession, completion: Completion) -> Self {
        let mut options = vec![VictoryOption::PlayAgain];
        if completion.next_level().is_some() {
            options.push(VictoryOption::NextLevel);
        }
        options.push(VictoryOption::Menu);
        debug!(options = options.len(), "Initializing VictoryScreen");

        let mut state = ListState::default();
        state.select(Some(0));
        Self {
            session,
            completion,
            options,
            list_state: state,
        }
    }

    /// Player of the finished session.
    pub fn player(&self) -> &str {
        self.session.player()
    }

    /// Whether the next tier is on offer.
    pub fn offers_next_level(&self) -> bool {
        self.options.contains(&VictoryOption::NextLevel)
    }

    fn selected_option(&self) -> VictoryOption {
        let idx = self.list_state.selected().unwrap_or(0);
        self.options[idx.min(self.options.len() - 1)]
    }

    fn select_step(&mut self, forward: bool) {
        let count = self.options.len();
        let i = self.list_state.selected().unwrap_or(0);
        let i = if forward {
            (i + 1) % count
        } else {
            (i + count - 1) % count
        };
        self.list_state.select(Some(i));
    }

    #[instrument(skip(self))]
    fn choose(&mut self, option: VictoryOption) -> ScreenTransition {
        info!(option = ?option, "Victory option selected");
        match option {
            VictoryOption::PlayAgain => {
                self.session.restart();
                ScreenTransition::Play(self.session.clone())
            }
            VictoryOption::NextLevel => match self.session.next_level() {
                Some(next) => ScreenTransition::Play(next),
                None => {
                    warn!("Next level chosen without an offer");
                    ScreenTransition::Stay
                }
            },
            VictoryOption::Menu => ScreenTransition::GoToMenu,
        }
    }
}

impl Screen for VictoryScreen {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(7),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new(format!("You Win! Great job, {}!", self.session.player()))
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let saved = if *self.completion.saved() {
            "Score saved to the leaderboard"
        } else {
            "Score could not be saved"
        };
        let summary = Paragraph::new(format!(
            "Difficulty: {}\nMoves: {}\nMin Moves: {}\nScore: {:.1}\n{}",
            self.session.difficulty(),
            self.completion.moves(),
            self.completion.min_moves(),
            self.completion.score(),
            saved
        ))
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Result"));
        frame.render_widget(summary, chunks[1]);

        let items: Vec<ListItem> = self
            .options
            .iter()
            .map(|option| ListItem::new(option.label()))
            .collect();
        let menu = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("What next?"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut list_state = self.list_state;
        frame.render_stateful_widget(menu, chunks[2], &mut list_state);

        let help = Paragraph::new("↑↓: Navigate | Enter: Select | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, _leaderboard))]
    fn handle_key<S: ScoreStore>(
        &mut self,
        key: KeyEvent,
        _leaderboard: &Leaderboard<S>,
    ) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.select_step(false);
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.select_step(true);
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                let option = self.selected_option();
                self.choose(option)
            }
            KeyCode::Esc => ScreenTransition::GoToMenu,
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
