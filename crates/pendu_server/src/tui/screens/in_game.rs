//! In-game screen: masked word, tried letters and the lives gauge.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use pendu_core::{Session, StatsUpdate};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tracing::{error, info, instrument, warn};

use crate::tui::screen::{Screen, ScreenTransition};
use crate::{Services, guess_message, hint_message, start_message};

/// State for a game in progress.
#[derive(Debug, Getters)]
pub struct InGameScreen {
    session: Session,
    input: String,
    message: String,
}

impl InGameScreen {
    /// Creates the screen for a freshly started session.
    pub fn new(session: Session) -> Self {
        let message = start_message(&session);
        Self {
            session,
            input: String::new(),
            message,
        }
    }

    fn finish(&self, update: Option<StatsUpdate>, services: &Services) -> ScreenTransition {
        match update {
            Some(update) => {
                self.leave(services);
                ScreenTransition::GoToSummary {
                    session: Box::new(self.session.clone()),
                    update: Box::new(update),
                }
            }
            None => ScreenTransition::Stay,
        }
    }

    /// Drops the session from the store once the screen no longer needs it.
    fn leave(&self, services: &Services) {
        if let Err(e) = services.game.discard_session(self.session.id()) {
            warn!(session_id = %self.session.id(), error = %e, "Failed to discard session");
        }
    }

    #[instrument(skip(self, services), fields(session_id = %self.session.id()))]
    fn submit_guess(&mut self, services: &Services) -> ScreenTransition {
        let guess = std::mem::take(&mut self.input);
        match services.game.guess(self.session.id(), &guess) {
            Ok(turn) => {
                self.message = guess_message(&turn.session, &turn.outcome, &guess);
                self.session = turn.session;
                self.finish(turn.stats, services)
            }
            Err(e) => {
                error!(error = %e, "Guess failed");
                self.message = e.to_string();
                ScreenTransition::Stay
            }
        }
    }

    #[instrument(skip(self, services), fields(session_id = %self.session.id()))]
    fn submit_hint(&mut self, services: &Services) -> ScreenTransition {
        match services.game.request_hint(self.session.id()) {
            Ok(turn) => {
                info!(verdict = ?turn.outcome.verdict, "Hint requested");
                self.message = hint_message(&turn.session, &turn.outcome);
                self.session = turn.session;
                self.finish(turn.stats, services)
            }
            Err(e) => {
                error!(error = %e, "Hint failed");
                self.message = e.to_string();
                ScreenTransition::Stay
            }
        }
    }
}

impl Screen for InGameScreen {
    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new(format!(
            "{} | {} | {}",
            self.session.player_id(),
            self.session.difficulty(),
            self.session.language()
        ))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let spaced: Vec<String> = self
            .session
            .word_display()
            .chars()
            .map(|c| c.to_string())
            .collect();
        let word = Paragraph::new(spaced.join(" "))
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Word"));
        frame.render_widget(word, chunks[1]);

        let wrong: Vec<String> = self
            .session
            .wrong_letters()
            .iter()
            .map(|c| c.to_string())
            .collect();
        let wrong = Paragraph::new(wrong.join(", "))
            .style(Style::default().fg(Color::Red))
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Wrong letters | Lives {}/{} | Hints {}",
                self.session.lives(),
                self.session.max_lives(),
                self.session.hints_used()
            )));
        frame.render_widget(wrong, chunks[2]);

        let gauge = Paragraph::new(self.session.gauge().render())
            .style(Style::default().fg(Color::Magenta))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Progress"));
        frame.render_widget(gauge, chunks[3]);

        let message = Paragraph::new(self.message.as_str())
            .style(Style::default().fg(Color::Green))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(message, chunks[4]);

        let input = Paragraph::new(self.input.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title("Letter or word"));
        frame.render_widget(input, chunks[5]);

        let help = Paragraph::new("Enter: guess | ?: hint (1 life) | Esc: abandon")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[6]);
    }

    fn handle_key(&mut self, key: KeyEvent, services: &Services) -> ScreenTransition {
        match key.code {
            KeyCode::Esc => {
                info!(session_id = %self.session.id(), "Game abandoned");
                self.leave(services);
                ScreenTransition::GoToSetup
            }
            KeyCode::Char('?') if self.input.is_empty() => self.submit_hint(services),
            KeyCode::Enter => self.submit_guess(services),
            KeyCode::Backspace => {
                self.input.pop();
                ScreenTransition::Stay
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                ScreenTransition::Stay
            }
            _ => ScreenTransition::Stay,
        }
    }
}
