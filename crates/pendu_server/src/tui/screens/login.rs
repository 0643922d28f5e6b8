//! Login screen: name and password, registering on first use.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{info, instrument, warn};

use crate::Services;
use crate::tui::screen::{Screen, ScreenTransition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Password,
}

/// State for the login screen.
#[derive(Debug)]
pub struct LoginScreen {
    name: String,
    password: String,
    focus: Field,
    error_message: Option<String>,
}

impl LoginScreen {
    /// Creates an empty login form.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            password: String::new(),
            focus: Field::Name,
            error_message: None,
        }
    }

    fn focused(&mut self) -> &mut String {
        match self.focus {
            Field::Name => &mut self.name,
            Field::Password => &mut self.password,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::Name => Field::Password,
            Field::Password => Field::Name,
        };
    }

    #[instrument(skip(self, services), fields(name = %self.name))]
    fn submit(&mut self, services: &Services) -> ScreenTransition {
        match services.auth.login(&self.name, &self.password) {
            Ok(outcome) => {
                info!(status = %outcome.status, "Login accepted");
                ScreenTransition::LoggedIn {
                    player: self.name.trim().to_string(),
                }
            }
            Err(e) => {
                warn!(error = %e, "Login refused");
                self.password.clear();
                self.error_message = Some(e.to_string());
                ScreenTransition::Stay
            }
        }
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for LoginScreen {
    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new("PENDU - Hangman")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let field_style = |field: Field| {
            if self.focus == field {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            }
        };

        let name = Paragraph::new(self.name.as_str())
            .style(field_style(Field::Name))
            .block(Block::default().borders(Borders::ALL).title("Name"));
        frame.render_widget(name, chunks[1]);

        let masked = "*".repeat(self.password.chars().count());
        let password = Paragraph::new(masked)
            .style(field_style(Field::Password))
            .block(Block::default().borders(Borders::ALL).title("Password"));
        frame.render_widget(password, chunks[2]);

        let status = match &self.error_message {
            Some(message) => Paragraph::new(message.as_str()).style(Style::default().fg(Color::Red)),
            None => Paragraph::new("New names are registered automatically.")
                .style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(status.alignment(Alignment::Center), chunks[3]);

        let help = Paragraph::new("Tab: switch field | Enter: log in | Esc: quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[4]);
    }

    fn handle_key(&mut self, key: KeyEvent, services: &Services) -> ScreenTransition {
        match key.code {
            KeyCode::Esc => ScreenTransition::Quit,
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                self.toggle_focus();
                ScreenTransition::Stay
            }
            KeyCode::Enter => match self.focus {
                Field::Name => {
                    self.focus = Field::Password;
                    ScreenTransition::Stay
                }
                Field::Password => self.submit(services),
            },
            KeyCode::Backspace => {
                self.focused().pop();
                ScreenTransition::Stay
            }
            KeyCode::Char(c) => {
                self.focused().push(c);
                self.error_message = None;
                ScreenTransition::Stay
            }
            _ => ScreenTransition::Stay,
        }
    }
}
