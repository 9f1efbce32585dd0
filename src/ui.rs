use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};
use steadykeys::{feedback::Flash, stability::Stability, travel::format_distance, util::lerp};
use unicode_width::UnicodeWidthStr;

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;

/// Terminal cells per unit of shake or tremble offset.
const OFFSET_PER_CELL: f64 = 5.0;
const TREMBLE_SPEED: f64 = 8.0;

const LOW: (u8, u8, u8) = (0x33, 0x00, 0x00);
const MEDIUM: (u8, u8, u8) = (0x33, 0x33, 0x33);
const HIGH: (u8, u8, u8) = (0x96, 0xBC, 0xDE);

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        let stability = session.stability();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);

        let background = match session.timers().flash() {
            Some(flash) => blend(stability_color(stability), flash),
            None => stability_color(stability),
        };
        Block::default()
            .style(Style::default().bg(to_color(background)))
            .render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let stats = session.statistics();
        let stats_line = [
            format!("WPM: {:.0}", stats.words_per_minute()),
            format!("Mistakes: {}", stats.total_mistakes),
            format!("Accuracy: {:.0}%", stats.accuracy()),
            format!("Completed: {}", stats.words_completed),
        ]
        .iter()
        .join("   ");
        Paragraph::new(Span::styled(stats_line, dim_style))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let word = session.current_word();
        let remaining = session.current_word_remaining();
        let typed = &word[..word.len() - remaining.len()];
        let offset = word_offset(self);
        let word_line = Line::from(vec![
            Span::raw(padding(offset.max(0) as usize * 2)),
            Span::styled(
                typed.to_string(),
                Style::default().fg(Color::Green).add_modifier(Modifier::DIM),
            ),
            Span::styled(remaining.to_string(), bold_style),
            Span::raw(padding(offset.min(0).unsigned_abs() as usize * 2)),
        ]);
        if word.width() + offset.unsigned_abs() as usize * 2 <= chunks[2].width as usize {
            Paragraph::new(word_line)
                .alignment(Alignment::Center)
                .render(chunks[2], buf);
        } else {
            Paragraph::new(Span::styled(remaining.to_string(), bold_style))
                .render(chunks[2], buf);
        }

        if let Some(text) = session.timers().ability_text() {
            let style = if text.alpha() > 0.5 {
                bold_style.fg(Color::Cyan)
            } else {
                dim_style.fg(Color::Cyan)
            };
            Paragraph::new(Span::styled(text.message, style))
                .alignment(Alignment::Center)
                .render(chunks[3], buf);
        }

        let combo = session.combo();
        let title = if combo.in_low_zone() && combo.streak() > 0 {
            format!(" Stability · streak {} ", combo.streak())
        } else {
            " Stability ".to_string()
        };
        Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(title))
            .gauge_style(Style::default().fg(to_color(gauge_color(stability))))
            .ratio(stability.fraction())
            .label(format!("{:.0}", stability.current()))
            .render(chunks[5], buf);

        let mut travel = format!(
            "Distance: {}",
            format_distance(session.travel().distance_km())
        );
        if let Some(best) = &self.best {
            travel.push_str(&format!("   Best: {}", format_distance(best.distance_km)));
        }
        Paragraph::new(Span::styled(travel, bold_style))
            .alignment(Alignment::Center)
            .render(chunks[6], buf);

        Paragraph::new(Span::styled("(esc)ape to end the session", dim_style))
            .alignment(Alignment::Center)
            .render(chunks[7], buf);
    }
}

/// Horizontal displacement of the word in cells: the mistake shake when one
/// is running, otherwise a slow tremble that grows as stability falls.
fn word_offset(app: &App) -> i32 {
    let session = &app.session;
    let raw = match session.timers().shake() {
        Some(shake) => shake.offset(),
        None => (session.now() * TREMBLE_SPEED).sin() * session.stability().tremble_strength(),
    };
    (raw / OFFSET_PER_CELL).round() as i32
}

fn padding(width: usize) -> String {
    " ".repeat(width)
}

/// Background ramp: dark red when empty, grey at half, calm blue when full.
fn stability_color(stability: &Stability) -> (u8, u8, u8) {
    let t = stability.fraction();
    if t > 0.5 {
        mix(MEDIUM, HIGH, (t - 0.5) / 0.5)
    } else {
        mix(LOW, MEDIUM, t / 0.5)
    }
}

fn gauge_color(stability: &Stability) -> (u8, u8, u8) {
    mix((255, 64, 64), (255, 255, 255), stability.fraction())
}

fn blend(base: (u8, u8, u8), flash: &Flash) -> (u8, u8, u8) {
    mix(base, flash.tint.rgb(), flash.alpha())
}

fn mix(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let channel = |x: u8, y: u8| lerp(x as f64, y as f64, t).round() as u8;
    (channel(a.0, b.0), channel(a.1, b.1), channel(a.2, b.2))
}

fn to_color((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_endpoints() {
        assert_eq!(stability_color(&Stability::with_bounds(0.0, 100.0, 0.0)), LOW);
        assert_eq!(stability_color(&Stability::with_bounds(0.0, 100.0, 50.0)), MEDIUM);
        assert_eq!(stability_color(&Stability::with_bounds(0.0, 100.0, 100.0)), HIGH);
    }

    #[test]
    fn mix_halfway() {
        assert_eq!(mix((0, 0, 0), (200, 100, 50), 0.5), (100, 50, 25));
    }
}
