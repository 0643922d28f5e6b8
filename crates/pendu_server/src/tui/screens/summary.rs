//! End of game screen.

use crossterm::event::{KeyCode, KeyEvent};
use pendu_core::{Session, SessionStatus, StatsUpdate};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::Services;
use crate::tui::screen::{Screen, ScreenTransition};

/// Result of the game that just ended.
#[derive(Debug)]
pub struct SummaryScreen {
    session: Session,
    update: StatsUpdate,
}

impl SummaryScreen {
    /// Creates the summary for a finished session.
    pub fn new(session: Session, update: StatsUpdate) -> Self {
        Self { session, update }
    }
}

impl Screen for SummaryScreen {
    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let (headline, color) = match self.session.status() {
            SessionStatus::Won => ("🎉 BRAVO!", Color::Green),
            _ => ("💀 LOST!", Color::Red),
        };
        let title = Paragraph::new(headline)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let stats = &self.update.stats;
        let mut lines = vec![
            Line::from(format!("The word was: {}", self.session.secret_word())),
            Line::from(format!(
                "Time: {:.1}s | Wrong letters: {} | Hints: {}",
                self.session.elapsed().unwrap_or_default(),
                self.session.wrong_letters().len(),
                self.session.hints_used()
            )),
            Line::from(format!(
                "Games: {} | Wins: {} | Streak: {} (best {})",
                stats.games_played, stats.games_won, stats.current_streak, stats.best_streak
            )),
        ];
        if self.session.status() == &SessionStatus::Lost {
            lines.push(Line::from(""));
            lines.extend(self.session.gauge().render().lines().map(|l| Line::from(l.to_string())));
        }
        if !self.update.new_achievements.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from("🏆 New achievements:"));
            lines.extend(
                self.update
                    .new_achievements
                    .iter()
                    .map(|a| Line::from(format!("  {}", a.title()))),
            );
        }
        let body = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Summary"));
        frame.render_widget(body, chunks[1]);

        let help = Paragraph::new("Enter: play again | s: stats | l: leaderboard | q: quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }

    fn handle_key(&mut self, key: KeyEvent, _services: &Services) -> ScreenTransition {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => ScreenTransition::GoToSetup,
            KeyCode::Char('s') | KeyCode::Char('S') => ScreenTransition::GoToStats,
            KeyCode::Char('l') | KeyCode::Char('L') => ScreenTransition::GoToLeaderboard,
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
