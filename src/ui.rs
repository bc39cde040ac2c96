pub mod projection;
pub mod screen;
pub mod starfield;

use glam::DVec2;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};
use typestrike::{difficulty, target::Target};

use crate::{
    ui::projection::{centered_label_x, to_cell},
    App,
};

const TARGET_GLYPH: &str = "◆";
const BASE_GLYPH: &str = "▲";
const LIFE_GLYPH: &str = "♥";

const HUES: [Color; 6] = [
    Color::Magenta,
    Color::Cyan,
    Color::Yellow,
    Color::LightRed,
    Color::LightBlue,
    Color::LightGreen,
];

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(self.game.phase()).render(self, area, buf);
    }
}

fn hue(target: &Target) -> Color {
    HUES[target.hue % HUES.len()]
}

fn format_clock(elapsed_ms: f64) -> String {
    let secs = (elapsed_ms.max(0.0) / 1000.0) as u64;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub(crate) fn render_stars(app: &App, area: Rect, buf: &mut Buffer) {
    let style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::DIM);

    for star in &app.starfield.stars {
        if let Some((x, y)) = to_cell(DVec2::new(star.x, star.y), app.game.arena(), area) {
            buf.set_string(x, y, star.glyph(), style);
        }
    }
}

fn render_hud(app: &App, area: Rect, buf: &mut Buffer) {
    let session = app.game.session();
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled(
            LIFE_GLYPH.repeat(session.life_points as usize),
            bold.fg(Color::Red),
        ),
        Span::raw("   "),
        Span::styled(format!("score {}", session.score), bold.fg(Color::Yellow)),
        Span::raw("   "),
        Span::styled(format_clock(session.elapsed_ms), bold),
        Span::raw("   "),
        Span::styled(
            format!(
                "targets {}/{}",
                app.game.targets().len(),
                difficulty::spawn_cap(session.elapsed_ms)
            ),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);

    Paragraph::new(line)
        .alignment(Alignment::Center)
        .render(area, buf);
}

fn render_target(
    target: &Target,
    typed: Option<&str>,
    app: &App,
    field: Rect,
    buf: &mut Buffer,
) {
    let Some((col, row)) = to_cell(target.position, app.game.arena(), field) else {
        return;
    };
    let color = hue(target);
    buf.set_string(col, row, TARGET_GLYPH, Style::default().fg(color));

    // label sits under the glyph unless that would leave the field
    let label_row = if row + 1 < field.bottom() { row + 1 } else { row.saturating_sub(1) };
    if label_row < field.y {
        return;
    }

    let text = target.text();
    let x = centered_label_x(text, col, field);
    let rest_style = Style::default().fg(color).add_modifier(Modifier::BOLD);

    match typed {
        Some(prefix) if !prefix.is_empty() => {
            let split = text
                .char_indices()
                .nth(prefix.chars().count())
                .map_or(text.len(), |(idx, _)| idx);
            let (done, rest) = text.split_at(split);
            let (next_x, _) = buf.set_stringn(
                x,
                label_row,
                done,
                usize::MAX,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            );
            buf.set_string(next_x, label_row, rest, rest_style);
        }
        _ => {
            buf.set_string(x, label_row, text, rest_style);
        }
    }
}

fn render_input(app: &App, area: Rect, buf: &mut Buffer) {
    let color = if app.game.input_is_valid() {
        Color::Green
    } else {
        Color::Red
    };

    Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().add_modifier(Modifier::DIM)),
        Span::styled(
            app.game.input().as_str().to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .render(area, buf);
}

pub(crate) fn render_playfield(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    let field = chunks[1];

    render_hud(app, chunks[0], buf);
    render_stars(app, field, buf);

    let focus = app.game.focus();
    for (idx, target) in app.game.targets().iter().enumerate() {
        let typed = (focus == Some(idx)).then(|| app.game.input().as_str());
        render_target(target, typed, app, field, buf);
    }

    if field.height > 0 && field.width > 0 {
        buf.set_string(
            field.x + field.width / 2,
            field.bottom() - 1,
            BASE_GLYPH,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        );
    }

    render_input(app, chunks[2], buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use typestrike::{
        config::Config,
        words::{StaticWordProvider, WordPool, WordProvider},
        KeyInput, SessionPhase,
    };

    fn create_test_app() -> App {
        let provider: Arc<dyn WordProvider> =
            Arc::new(StaticWordProvider(vec!["alien".to_string()]));
        App::new(Config::default(), provider, Some(11))
    }

    fn running_app() -> App {
        let mut app = create_test_app();
        app.game.start(WordPool::fallback(), 0.0);
        app.game
            .push_target(Target::at(1, "alien", DVec2::new(400.0, 300.0)));
        app
    }

    fn render(app: &App, area: Rect) -> Buffer {
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
    }

    fn rendered_text(buffer: &Buffer) -> String {
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_screen() {
        let app = create_test_app();
        let rendered = rendered_text(&render(&app, Rect::new(0, 0, 80, 24)));

        assert!(rendered.contains("T Y P E S T R I K E"));
        assert!(rendered.contains("(enter) start / (esc)ape"));
        assert!(rendered.contains("static:1 words"));
    }

    #[test]
    fn test_loading_screen() {
        let mut app = create_test_app();
        app.game.begin_loading();
        assert_eq!(app.game.phase(), SessionPhase::Loading);

        let rendered = rendered_text(&render(&app, Rect::new(0, 0, 80, 24)));
        assert!(rendered.contains("fetching words..."));
    }

    #[test]
    fn test_playfield_shows_hud_and_targets() {
        let app = running_app();
        let rendered = rendered_text(&render(&app, Rect::new(0, 0, 80, 24)));

        assert!(rendered.contains("♥♥♥"));
        assert!(rendered.contains("score 0"));
        assert!(rendered.contains("00:00"));
        assert!(rendered.contains("alien"));
        assert!(rendered.contains(TARGET_GLYPH));
        assert!(rendered.contains(BASE_GLYPH));
    }

    #[test]
    fn test_playfield_highlights_typed_prefix() {
        let mut app = running_app();
        app.game.key(KeyInput::Char('a'));
        app.game.key(KeyInput::Char('l'));

        let buffer = render(&app, Rect::new(0, 0, 80, 24));

        // field spans rows 1..23, so (400, 300) lands on col 40 row 12
        assert_eq!(buffer[(40, 12)].symbol(), TARGET_GLYPH);
        assert_eq!(buffer[(38, 13)].symbol(), "a");
        assert_eq!(buffer[(38, 13)].fg, Color::Green);
        assert_eq!(buffer[(39, 13)].fg, Color::Green);
        assert_eq!(buffer[(40, 13)].symbol(), "i");
        assert_ne!(buffer[(40, 13)].fg, Color::Green);
        assert!(rendered_text(&buffer).contains("> al"));
    }

    #[test]
    fn test_invalid_input_is_red() {
        let mut app = running_app();
        app.game.key(KeyInput::Char('z'));
        assert!(!app.game.input_is_valid());

        let buffer = render(&app, Rect::new(0, 0, 80, 24));
        let z = buffer
            .content()
            .iter()
            .rev()
            .find(|c| c.symbol() == "z")
            .map(|c| c.fg);
        assert_eq!(z, Some(Color::Red));
    }

    #[test]
    fn test_summary_screen() {
        let mut app = create_test_app();
        let now = app.now_ms();
        app.game.start(WordPool::fallback(), now);
        let base = app.game.arena().base();
        for id in 0..3 {
            app.game.push_target(Target::at(id, "ufo", base));
        }
        app.on_tick();
        assert_eq!(app.game.phase(), SessionPhase::Ended);

        let rendered = rendered_text(&render(&app, Rect::new(0, 0, 80, 24)));
        assert!(rendered.contains("GAME OVER"));
        assert!(rendered.contains("score 0"));
        assert!(rendered.contains("0 words"));
        assert!(rendered.contains("(r)estart"));
        assert!(rendered.contains("(esc)ape"));
    }

    #[test]
    fn test_extreme_sizes() {
        let app = running_app();
        for area in [
            Rect::new(0, 0, 0, 0),
            Rect::new(0, 0, 10, 2),
            Rect::new(0, 0, 20, 5),
            Rect::new(0, 0, 300, 120),
        ] {
            let buffer = render(&app, area);
            assert_eq!(*buffer.area(), area);
        }
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "00:00");
        assert_eq!(format_clock(61_500.0), "01:01");
        assert_eq!(format_clock(-5.0), "00:00");
    }
}
