use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use std::time::SystemTime;

use crate::{app::App, session::FinishReason};

use super::{bold, HORIZONTAL_MARGIN, VERTICAL_MARGIN};

/// One figure with its label, boxed
fn card(value: String, label: &str, accent: Color) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::from(Span::styled(value, bold().fg(accent))),
        Line::from(Span::styled(
            label.to_string(),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL))
}

fn reason_text(reason: Option<FinishReason>) -> &'static str {
    match reason {
        Some(FinishReason::TimeExpired) => "time is up",
        Some(FinishReason::WordsExhausted) => "all words typed",
        Some(FinishReason::Manual) => "finished early",
        None => "",
    }
}

pub fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let results = app.session.results(SystemTime::now());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(4), // wpm, accuracy
            Constraint::Length(4), // net wpm, word counts
            Constraint::Length(3), // details
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled(
        format!("Results - {}", reason_text(results.reason)),
        bold(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(chunks[1]);
    card(results.stats.wpm.to_string(), "Words Per Minute", Color::Yellow).render(top[0], buf);
    card(
        format!("{}%", results.stats.accuracy),
        "Accuracy",
        Color::Cyan,
    )
    .render(top[1], buf);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(chunks[2]);
    card(results.stats.net_wpm.to_string(), "Net WPM", Color::Magenta).render(bottom[0], buf);
    card(results.correct_words.to_string(), "Correct Words", Color::Green).render(bottom[1], buf);
    card(results.wrong_words.to_string(), "Incorrect Words", Color::Red).render(bottom[2], buf);

    let details = [
        format!(
            "Keystrokes: {} correct, {} errors",
            results.correct_keystrokes, results.error_keystrokes
        ),
        format!("Characters Typed: {}", results.total_chars),
        format!("Time Elapsed: {} seconds", results.elapsed_secs),
    ]
    .iter()
    .join("   ");
    Paragraph::new(Span::styled(details, Style::default().fg(Color::Blue)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .render(chunks[3], buf);

    Paragraph::new(Span::styled(
        "(n)ew test / (tab) new test / (esc)ape",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[5], buf);
}
