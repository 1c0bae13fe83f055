//! Board screen where the puzzle is played.
//!
//! Picking a peg twice (source, then target) issues a move; the source pick
//! is refused for an empty peg and the target pick only moves when the
//! puzzle allows it.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, info, instrument};

use crate::ScoreStore;
use crate::games::hanoi::PegId;
use crate::lobby::board_view::peg_lines;
use crate::lobby::screen::{Screen, ScreenTransition};
use crate::session::{GameSession, Leaderboard, MoveOutcome};

/// State for the board screen.
#[derive(Debug)]
pub struct BoardScreen {
    session: GameSession,
    cursor: PegId,
    selected: Option<PegId>,
    message: Option<String>,
}

impl BoardScreen {
    /// Creates a board screen for the given session.
    #[instrument(skip(session), fields(player = %session.player(), difficulty = %session.difficulty()))]
    pub fn new(session: GameSession) -> Self {
        debug!("Initializing BoardScreen");
        Self {
            session,
            cursor: PegId::Left,
            selected: None,
            message: None,
        }
    }

    /// The session being played.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// The peg picked as the source of the next move, if any.
    pub fn selected(&self) -> Option<PegId> {
        self.selected
    }

    /// Hands the session over, e.g. to the victory screen.
    pub fn into_session(self) -> GameSession {
        self.session
    }

    fn move_cursor(&mut self, step: isize) {
        let index = (self.cursor.index() as isize + step).rem_euclid(3) as usize;
        self.cursor = PegId::ALL[index];
    }

    /// Picks a peg as source or target.
    #[instrument(skip(self, leaderboard))]
    fn pick<S: ScoreStore>(&mut self, peg: PegId, leaderboard: &Leaderboard<S>) -> ScreenTransition {
        self.cursor = peg;
        let Some(from) = self.selected.take() else {
            if self.session.puzzle().peg(peg).is_empty() {
                self.message = Some(format!("Peg {} is empty", peg.label()));
            } else {
                self.selected = Some(peg);
                self.message = None;
            }
            return ScreenTransition::Stay;
        };

        if from == peg {
            self.message = None;
            return ScreenTransition::Stay;
        }

        if !self.session.can_move(from, peg) {
            self.message = Some("A disk cannot rest on a smaller one".to_string());
            return ScreenTransition::Stay;
        }

        self.message = None;
        match self.session.request_move(leaderboard, from, peg) {
            MoveOutcome::Solved(completion) => {
                info!(moves = completion.moves(), "Board solved");
                ScreenTransition::GoToVictory(completion)
            }
            MoveOutcome::Applied | MoveOutcome::Rejected => ScreenTransition::Stay,
        }
    }

    #[instrument(skip(self))]
    fn show_hint(&mut self) {
        self.message = Some(match self.session.puzzle().hint() {
            Some(hint) => format!("Hint: {}", hint),
            None => "No hint, reset (r) to follow the optimal line".to_string(),
        });
    }
}

impl Screen for BoardScreen {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame) {
        let puzzle = self.session.puzzle();
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let header = Paragraph::new(format!(
            "Player: {}   Difficulty: {}   Moves: {}   Min Moves: {}",
            self.session.player(),
            self.session.difficulty(),
            puzzle.moves(),
            puzzle.min_moves()
        ))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(chunks[1]);

        let height = usize::from(puzzle.disk_count()) + 1;
        for peg_id in PegId::ALL {
            let mut lines = vec![Line::from("")];
            lines.extend(peg_lines(puzzle.peg(peg_id), height, puzzle.disk_count()));

            let mut border = Style::default();
            if self.selected == Some(peg_id) {
                border = border.fg(Color::Green).add_modifier(Modifier::BOLD);
            } else if self.cursor == peg_id {
                border = border.fg(Color::Yellow);
            }

            let peg = Paragraph::new(lines).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(format!(" {} ", peg_id.label())),
            );
            frame.render_widget(peg, columns[peg_id.index()]);
        }

        let status = match (&self.message, self.selected) {
            (Some(message), _) => message.clone(),
            (None, Some(from)) => format!("Moving from {}, pick a target", from.label()),
            (None, None) => "Pick a peg to move from".to_string(),
        };
        let status = Paragraph::new(status)
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, chunks[2]);

        let help = Paragraph::new(
            "1/2/3 or ←→ + Enter: Pick peg | r: Reset | h: Hint | Esc: Menu | q: Quit",
        )
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
        match key.code {
            KeyCode::Char('1') => self.pick(PegId::Left, leaderboard),
            KeyCode::Char('2') => self.pick(PegId::Middle, leaderboard),
            KeyCode::Char('3') => self.pick(PegId::Right, leaderboard),
            KeyCode::Left => {
                self.move_cursor(-1);
                ScreenTransition::Stay
            }
            KeyCode::Right => {
                self.move_cursor(1);
                ScreenTransition::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.pick(self.cursor, leaderboard),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                info!("Board reset requested");
                self.session.restart();
                self.selected = None;
                self.message = None;
                ScreenTransition::Stay
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                self.show_hint();
                ScreenTransition::Stay
            }
            KeyCode::Esc => {
                info!("Returning to menu from board");
                ScreenTransition::GoToMenu
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryScoreStore;
    use crate::games::hanoi::Difficulty;
    use crossterm::event::KeyModifiers;

    fn press(
        screen: &mut BoardScreen,
        leaderboard: &Leaderboard<MemoryScoreStore>,
        c: char,
    ) -> ScreenTransition {
        screen.handle_key(
            KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE),
            leaderboard,
        )
    }

    #[test]
    fn test_empty_source_refused() {
        let leaderboard = Leaderboard::new(MemoryScoreStore::new(), 5);
        let mut screen = BoardScreen::new(GameSession::new("Ada".to_string(), Difficulty::Easy));
        press(&mut screen, &leaderboard, '2');
        assert_eq!(screen.selected(), None);
        assert_eq!(screen.session().puzzle().moves(), 0);
    }

    #[test]
    fn test_illegal_target_keeps_state() {
        let leaderboard = Leaderboard::new(MemoryScoreStore::new(), 5);
        let mut screen = BoardScreen::new(GameSession::new("Ada".to_string(), Difficulty::Easy));
        press(&mut screen, &leaderboard, '1');
        press(&mut screen, &leaderboard, '3');
        // Disk 2 onto disk 1 must be refused.
        press(&mut screen, &leaderboard, '1');
        press(&mut screen, &leaderboard, '3');
        assert_eq!(screen.session().puzzle().moves(), 1);
        assert_eq!(screen.selected(), None);
    }

    #[test]
    fn test_optimal_keys_reach_victory() {
        let leaderboard = Leaderboard::new(MemoryScoreStore::new(), 5);
        let mut screen = BoardScreen::new(GameSession::new("Ada".to_string(), Difficulty::Easy));
        let keys = ['1', '3', '1', '2', '3', '2', '1', '3', '2', '1', '2', '3', '1'];
        for key in keys {
            assert!(matches!(press(&mut screen, &leaderboard, key), ScreenTransition::Stay));
        }
        match press(&mut screen, &leaderboard, '3') {
            ScreenTransition::GoToVictory(completion) => {
                assert_eq!(*completion.moves(), 7);
                assert!(*completion.saved());
            }
            other => panic!("Expected victory, got {:?}", other),
        }
        assert_eq!(leaderboard.store().map(MemoryScoreStore::len), Some(1));
    }

    #[test]
    fn test_reset_key_restores_start() {
        let leaderboard = Leaderboard::new(MemoryScoreStore::new(), 5);
        let mut screen = BoardScreen::new(GameSession::new("Ada".to_string(), Difficulty::Easy));
        press(&mut screen, &leaderboard, '1');
        press(&mut screen, &leaderboard, '2');
        press(&mut screen, &leaderboard, 'r');
        assert_eq!(screen.session().puzzle().moves(), 0);
        assert_eq!(screen.session().puzzle().peg(PegId::Left).len(), 3);
    }
}
