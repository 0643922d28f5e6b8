//! Leaderboard screen: top players by wins, win rate and speed.

use crossterm::event::{KeyCode, KeyEvent};
use pendu_core::{Leaderboard, PlayerStats};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use tracing::{error, instrument};

use crate::Services;
use crate::tui::screen::{Screen, ScreenTransition};

/// State for the leaderboard screen.
#[derive(Debug)]
pub struct LeaderboardScreen {
    leaderboard: Leaderboard,
}

impl LeaderboardScreen {
    /// Loads the current rankings.
    #[instrument(skip(services))]
    pub fn new(services: &Services) -> Self {
        let leaderboard = services.game.leaderboard().unwrap_or_else(|e| {
            error!(error = %e, "Failed to load leaderboard");
            Leaderboard::default()
        });
        Self { leaderboard }
    }
}

fn ranking(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    players: &[PlayerStats],
    value: fn(&PlayerStats) -> String,
) {
    let rows: Vec<Row> = players
        .iter()
        .enumerate()
        .map(|(rank, stats)| {
            Row::new(vec![
                Cell::from((rank + 1).to_string()),
                Cell::from(stats.player_id.as_str()),
                Cell::from(value(stats)),
            ])
        })
        .collect();
    let widths = [
        Constraint::Length(4),
        Constraint::Percentage(60),
        Constraint::Percentage(30),
    ];
    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "Player", ""])
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    frame.render_widget(table, area);
}

impl Screen for LeaderboardScreen {
    fn render(&self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new("🏆 Leaderboard")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, rows[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(rows[1]);

        ranking(frame, columns[0], "Wins", &self.leaderboard.by_wins, |s| {
            s.games_won.to_string()
        });
        ranking(
            frame,
            columns[1],
            "Win rate",
            &self.leaderboard.by_winrate,
            |s| format!("{:.1}%", s.win_rate()),
        );
        ranking(frame, columns[2], "Fastest", &self.leaderboard.by_speed, |s| {
            s.best_time
                .map_or_else(|| "-".to_string(), |t| format!("{:.1}s", t))
        });

        let help = Paragraph::new("Esc / b: Back | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, rows[2]);
    }

    fn handle_key(&mut self, key: KeyEvent, _services: &Services) -> ScreenTransition {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => ScreenTransition::GoToSetup,
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
