//! Menu screen: player name, difficulty selection, and the leaderboard.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table},
};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

use crate::ScoreStore;
use crate::games::hanoi::Difficulty;
use crate::lobby::screen::{Screen, ScreenTransition};
use crate::session::{Leaderboard, MenuSnapshot};

/// Which widget receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Name,
    Difficulty,
}

/// State for the menu screen.
#[derive(Debug)]
pub struct MenuScreen {
    snapshot: MenuSnapshot,
    name_input: String,
    focus: Focus,
    list_state: ListState,
    error_message: Option<String>,
}

impl MenuScreen {
    /// Creates a menu, loading unlocks and top scores from the leaderboard.
    ///
    /// `player` pre-fills the name field, e.g. when returning from a game.
    #[instrument(skip(leaderboard))]
    pub fn new<S: ScoreStore>(leaderboard: &Leaderboard<S>, player: &str) -> Self {
        debug!("Initializing MenuScreen");
        let snapshot = leaderboard.snapshot();
        info!(
            open = snapshot.unlocked().len(),
            scores = snapshot.top_scores().len(),
            "MenuScreen initialized"
        );
        let mut state = ListState::default();
        state.select(Some(0));
        Self {
            snapshot,
            name_input: player.to_string(),
            focus: if player.is_empty() {
                Focus::Name
            } else {
                Focus::Difficulty
            },
            list_state: state,
            error_message: None,
        }
    }

    /// Current contents of the name field.
    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    /// What was loaded from the leaderboard.
    pub fn snapshot(&self) -> &MenuSnapshot {
        &self.snapshot
    }

    /// Validation message from the last start attempt.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Difficulty under the list cursor.
    pub fn selected_difficulty(&self) -> Difficulty {
        let all: Vec<Difficulty> = Difficulty::iter().collect();
        let idx = self.list_state.selected().unwrap_or(0);
        all[idx.min(all.len() - 1)]
    }

    fn select_previous(&mut self) {
        let count = Difficulty::iter().count();
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.list_state.select(Some(i));
    }

    fn select_next(&mut self) {
        let count = Difficulty::iter().count();
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Tries to start a game with the current name and difficulty.
    #[instrument(skip(self, leaderboard))]
    fn start<S: ScoreStore>(&mut self, leaderboard: &Leaderboard<S>) -> ScreenTransition {
        let difficulty = self.selected_difficulty();
        match leaderboard.start(&self.name_input, difficulty) {
            Ok(session) => {
                info!(%difficulty, "Starting game from menu");
                self.error_message = None;
                ScreenTransition::Play(session)
            }
            Err(e) => {
                debug!(error = %e, "Start refused");
                self.error_message = Some(e.to_string());
                ScreenTransition::Stay
            }
        }
    }

    fn difficulty_items(&self) -> Vec<ListItem<'static>> {
        Difficulty::iter()
            .map(|difficulty| {
                if self.snapshot.unlocked().contains(difficulty) {
                    ListItem::new(format!(
                        "{} ({} disks)",
                        difficulty,
                        difficulty.disk_count()
                    ))
                } else {
                    ListItem::new(format!("{} (Locked)", difficulty))
                        .style(Style::default().fg(Color::DarkGray))
                }
            })
            .collect()
    }
}

impl Screen for MenuScreen {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Tower of Hanoi")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5)])
            .split(body[0]);

        let focused = Style::default().fg(Color::Yellow);
        let name_block = Block::default()
            .borders(Borders::ALL)
            .title("Player Name");
        let name_block = if self.focus == Focus::Name {
            name_block.border_style(focused)
        } else {
            name_block
        };
        let name = Paragraph::new(format!("{}_", self.name_input)).block(name_block);
        frame.render_widget(name, left[0]);

        let list_block = Block::default()
            .borders(Borders::ALL)
            .title("Select Difficulty");
        let list_block = if self.focus == Focus::Difficulty {
            list_block.border_style(focused)
        } else {
            list_block
        };
        let list = List::new(self.difficulty_items())
            .block(list_block)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut list_state = self.list_state;
        frame.render_stateful_widget(list, left[1], &mut list_state);

        let header = Row::new(vec![
            Cell::from("Name").style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from("Difficulty").style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from("Moves").style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from("Score").style(Style::default().add_modifier(Modifier::BOLD)),
        ])
        .style(Style::default().fg(Color::Yellow));
        let rows: Vec<Row> = self
            .snapshot
            .top_scores()
            .iter()
            .map(|record| {
                Row::new(vec![
                    Cell::from(record.name().as_str()),
                    Cell::from(record.difficulty().as_str()),
                    Cell::from(record.moves().to_string()),
                    Cell::from(format!("{:.1} pts", record.score())),
                ])
            })
            .collect();
        let scores_title = if rows.is_empty() {
            "High Scores (none yet)".to_string()
        } else {
            format!("Top {} High Scores", rows.len())
        };
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(35),
                Constraint::Percentage(25),
                Constraint::Percentage(15),
                Constraint::Percentage(25),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(scores_title));
        frame.render_widget(table, body[1]);

        let (status, color) = match (&self.error_message, self.snapshot.notice()) {
            (Some(error), _) => (error.clone(), Color::Red),
            (None, Some(notice)) => (notice.clone(), Color::Yellow),
            (None, None) => (
                "Score 50 or more on EASY to unlock MEDIUM and HARD".to_string(),
                Color::Green,
            ),
        };
        let status = Paragraph::new(status)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, chunks[2]);

        let help = Paragraph::new("Tab: Switch field | ↑↓: Difficulty | Enter: Start | Esc: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, leaderboard))]
    fn handle_key<S: ScoreStore>(
        &mut self,
        key: KeyEvent,
        leaderboard: &Leaderboard<S>,
    ) -> ScreenTransition {
        match (self.focus, key.code) {
            (_, KeyCode::Esc) => ScreenTransition::Quit,
            (_, KeyCode::Enter) => self.start(leaderboard),
            (_, KeyCode::Tab) | (_, KeyCode::BackTab) => {
                self.focus = match self.focus {
                    Focus::Name => Focus::Difficulty,
                    Focus::Difficulty => Focus::Name,
                };
                ScreenTransition::Stay
            }
            (_, KeyCode::Up) => {
                self.select_previous();
                ScreenTransition::Stay
            }
            (_, KeyCode::Down) => {
                self.select_next();
                ScreenTransition::Stay
            }
            (Focus::Name, KeyCode::Char(c)) => {
                self.name_input.push(c);
                ScreenTransition::Stay
            }
            (Focus::Name, KeyCode::Backspace) => {
                self.name_input.pop();
                ScreenTransition::Stay
            }
            (Focus::Difficulty, KeyCode::Char('q') | KeyCode::Char('Q')) => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
