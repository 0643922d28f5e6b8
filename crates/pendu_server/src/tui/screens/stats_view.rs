//! Statistics view screen: totals, streaks and recent words for a player.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use pendu_core::{Difficulty, PlayerStats};
use pendu_core::stats::HistoryEntry;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use tracing::{debug, info, instrument};

use crate::Services;
use crate::tui::screen::{Screen, ScreenTransition};

const RECENT_WORDS: usize = 20;

/// State for the statistics view screen.
#[derive(Debug, Getters)]
pub struct StatsViewScreen {
    player: String,
    stats: Option<PlayerStats>,
}

impl StatsViewScreen {
    /// Creates the stats view for `player`, loading data immediately.
    #[instrument(skip(services))]
    pub fn new(player: String, services: &Services) -> Self {
        let stats = services.game.get_stats(&player).ok();
        debug!(found = stats.is_some(), "StatsViewScreen initialized");
        Self { player, stats }
    }

    fn recent_words(stats: &PlayerStats) -> Vec<(bool, &HistoryEntry)> {
        let mut entries: Vec<(bool, &HistoryEntry)> = stats
            .words_history
            .won
            .iter()
            .map(|e| (true, e))
            .chain(stats.words_history.lost.iter().map(|e| (false, e)))
            .collect();
        entries.sort_by(|a, b| b.1.timestamp.cmp(&a.1.timestamp));
        entries.truncate(RECENT_WORDS);
        entries
    }
}

fn summary_lines(stats: &PlayerStats) -> String {
    let per_difficulty: Vec<String> = Difficulty::all()
        .map(|d| {
            format!(
                "{}: {} games, streak {} (best {})",
                d,
                stats.difficulty_games.get(d),
                stats.difficulty_streaks.get(d),
                stats.best_difficulty_streaks.get(d)
            )
        })
        .collect();
    let best_time = stats
        .best_time
        .map_or_else(|| "-".to_string(), |t| format!("{:.1}s", t));
    format!(
        "Games: {}   Wins: {}   Losses: {}   Win Rate: {:.1}%\n\
         Streak: {} (best {})   Best time: {}   Longest word: {}\n\
         Avg time: {:.1}s   Avg wrong letters: {:.1}   Avg hints: {:.1}\n\
         {}\n\
         Achievements: {}",
        stats.games_played,
        stats.games_won,
        stats.games_lost(),
        stats.win_rate(),
        stats.current_streak,
        stats.best_streak,
        best_time,
        stats.longest_word,
        stats.average_time(),
        stats.average_wrong_letters(),
        stats.average_hints(),
        per_difficulty.join(" | "),
        stats.achievements.len()
    )
}

impl Screen for StatsViewScreen {
    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(7),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new(format!("Statistics - {}", self.player))
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let summary_text = match &self.stats {
            Some(stats) => summary_lines(stats),
            None => "No statistics available".to_string(),
        };
        let summary = Paragraph::new(summary_text)
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Summary"));
        frame.render_widget(summary, chunks[1]);

        let header = Row::new(vec![
            Cell::from("Word").style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from("Outcome").style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from("Difficulty").style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from("Time").style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from("Hints").style(Style::default().add_modifier(Modifier::BOLD)),
        ])
        .style(Style::default().fg(Color::Yellow));

        let rows: Vec<Row> = self
            .stats
            .as_ref()
            .map(Self::recent_words)
            .unwrap_or_default()
            .into_iter()
            .map(|(won, entry)| {
                let (outcome, color) = if won {
                    ("won", Color::Green)
                } else {
                    ("lost", Color::Red)
                };
                Row::new(vec![
                    Cell::from(entry.word.as_str()),
                    Cell::from(outcome).style(Style::default().fg(color)),
                    Cell::from(entry.difficulty.to_string()),
                    Cell::from(format!("{:.1}s", entry.time)),
                    Cell::from(entry.hints_used.to_string()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Percentage(30),
            Constraint::Percentage(15),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(15),
        ];

        let table = Table::new(rows, widths).header(header).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Recent Words (20 most recent)"),
        );
        frame.render_widget(table, chunks[2]);

        let help = Paragraph::new("Esc / b: Back | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    fn handle_key(&mut self, key: KeyEvent, _services: &Services) -> ScreenTransition {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => {
                info!("Returning to setup from stats");
                ScreenTransition::GoToSetup
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
