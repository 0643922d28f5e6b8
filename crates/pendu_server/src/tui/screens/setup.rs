//! Game setup screen: difficulty and language.

use crossterm::event::{KeyCode, KeyEvent};
use pendu_core::Difficulty;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::{debug, error, instrument};

use crate::Services;
use crate::tui::screen::{Screen, ScreenTransition};

/// State for the setup screen.
#[derive(Debug)]
pub struct SetupScreen {
    player: String,
    difficulties: Vec<Difficulty>,
    list_state: ListState,
    languages: Vec<String>,
    language: usize,
    error_message: Option<String>,
}

impl SetupScreen {
    /// Creates the setup screen for `player`.
    #[instrument(skip(services))]
    pub fn new(player: String, services: &Services) -> Self {
        let words = services.game.words();
        let languages = words.languages();
        let language = languages
            .iter()
            .position(|tag| tag == words.default_language())
            .unwrap_or(0);
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        debug!(languages = languages.len(), "SetupScreen initialized");
        Self {
            player,
            difficulties: Difficulty::all().collect(),
            list_state,
            languages,
            language,
            error_message: None,
        }
    }

    fn move_selection(&mut self, forward: bool) {
        let len = self.difficulties.len();
        let current = self.list_state.selected().unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.list_state.select(Some(next));
    }

    fn cycle_language(&mut self, forward: bool) {
        let len = self.languages.len();
        if len == 0 {
            return;
        }
        self.language = if forward {
            (self.language + 1) % len
        } else {
            (self.language + len - 1) % len
        };
    }

    fn selected_difficulty(&self) -> Difficulty {
        self.list_state
            .selected()
            .and_then(|i| self.difficulties.get(i).copied())
            .unwrap_or(Difficulty::Easy)
    }

    #[instrument(skip(self, services), fields(player = %self.player))]
    fn start(&mut self, services: &Services) -> ScreenTransition {
        let difficulty = self.selected_difficulty();
        let language = self
            .languages
            .get(self.language)
            .cloned()
            .unwrap_or_else(|| services.game.words().default_language().to_string());
        match services
            .game
            .start_session(&self.player, &difficulty.to_string(), &language)
        {
            Ok(session) => ScreenTransition::GoToInGame {
                session: Box::new(session),
            },
            Err(e) => {
                error!(error = %e, "Failed to start game");
                self.error_message = Some(e.to_string());
                ScreenTransition::Stay
            }
        }
    }
}

impl Screen for SetupScreen {
    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(7),
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new(format!("Welcome, {}", self.player))
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = self
            .difficulties
            .iter()
            .map(|d| ListItem::new(format!("{:<8} {} lives", d.to_string(), d.max_lives())))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Difficulty"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut list_state = self.list_state.clone();
        frame.render_stateful_widget(list, chunks[1], &mut list_state);

        let language = self
            .languages
            .get(self.language)
            .map_or("-", String::as_str);
        let language = Paragraph::new(format!("< {} >", language))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Language"));
        frame.render_widget(language, chunks[2]);

        if let Some(message) = &self.error_message {
            let error = Paragraph::new(message.as_str()).style(Style::default().fg(Color::Red));
            frame.render_widget(error, chunks[3]);
        }

        let help = Paragraph::new(
            "↑/↓: difficulty | ←/→: language | Enter: play | s: stats | l: leaderboard | q: quit",
        )
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[4]);
    }

    fn handle_key(&mut self, key: KeyEvent, services: &Services) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.move_selection(false);
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.move_selection(true);
                ScreenTransition::Stay
            }
            KeyCode::Left => {
                self.cycle_language(false);
                ScreenTransition::Stay
            }
            KeyCode::Right => {
                self.cycle_language(true);
                ScreenTransition::Stay
            }
            KeyCode::Enter => self.start(services),
            KeyCode::Char('s') | KeyCode::Char('S') => ScreenTransition::GoToStats,
            KeyCode::Char('l') | KeyCode::Char('L') => ScreenTransition::GoToLeaderboard,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
