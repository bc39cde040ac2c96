use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use typestrike::{share, SessionPhase};

use crate::{
    ui::{render_playfield, render_stars},
    App,
};

/// A UI Screen boundary: responsible for rendering one session phase
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

fn centered_lines(lines: Vec<Line<'static>>, area: Rect, buf: &mut Buffer) {
    let height = lines.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
}

pub struct TitleScreen;

impl Screen for TitleScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_stars(app, area, buf);

        let bold = Style::default().add_modifier(Modifier::BOLD);
        centered_lines(
            vec![
                Line::from(Span::styled("T Y P E S T R I K E", bold.fg(Color::Green))),
                Line::from(""),
                Line::from("type the word on a target to destroy it"),
                Line::from("three targets reaching your base end the game"),
                Line::from(""),
                Line::from(Span::styled(
                    format!("words from {}", app.provider.describe()),
                    Style::default().add_modifier(Modifier::DIM),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "(enter) start / (esc)ape",
                    Style::default().add_modifier(Modifier::ITALIC),
                )),
            ],
            area,
            buf,
        );
    }
}

pub struct LoadingScreen;

impl Screen for LoadingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_stars(app, area, buf);
        centered_lines(
            vec![Line::from(Span::styled(
                "fetching words...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::ITALIC),
            ))],
            area,
            buf,
        );
    }
}

pub struct PlayfieldScreen;

impl Screen for PlayfieldScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_playfield(app, area, buf);
    }
}

pub struct SummaryScreen;

impl Screen for SummaryScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_stars(app, area, buf);

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::from(Span::styled("GAME OVER", bold.fg(Color::Red))),
            Line::from(""),
        ];

        if let Some(stats) = app.summary {
            lines.push(Line::from(Span::styled(
                format!("score {}", stats.score),
                bold.fg(Color::Yellow),
            )));
            lines.push(Line::from(Span::styled(
                format!(
                    "{} words   {} wpm   {}% acc",
                    stats.words_completed, stats.wpm, stats.accuracy
                ),
                bold,
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            if share::can_share() {
                "(r)estart / (t)weet / (esc)ape"
            } else {
                "(r)estart / (esc)ape"
            },
            Style::default().add_modifier(Modifier::ITALIC),
        )));

        centered_lines(lines, area, buf);
    }
}

/// Helper to construct the appropriate screen for the current phase
pub fn current_screen(phase: SessionPhase) -> Box<dyn Screen> {
    match phase {
        SessionPhase::NotStarted => Box::new(TitleScreen),
        SessionPhase::Loading => Box::new(LoadingScreen),
        SessionPhase::Running => Box::new(PlayfieldScreen),
        SessionPhase::Ended => Box::new(SummaryScreen),
    }
}
