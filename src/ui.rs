pub mod results;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    word_view::{active_segments, visible_words, SegmentState, WordState, WORDS_PER_LINE},
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub(crate) fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.session.has_finished() {
            results::render_results(self, area, buf);
        } else {
            render_typing(self, area, buf);
        }
    }
}

fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let started = session.has_started();

    let green_style = Style::default().fg(Color::Green);
    let red_style = Style::default().fg(Color::Red);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Length(1), // title and timer
                Constraint::Length(1), // live stats
                Constraint::Length(1), // padding
                Constraint::Length(5), // words
                Constraint::Length(3), // input
                Constraint::Length(1), // progress
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ]
            .as_ref(),
        )
        .split(area);

    // title line: time left, plus a wpm badge while running
    let mut header = vec![
        Span::styled("Typing Speed Test", bold()),
        Span::raw("   "),
        Span::styled(format!("{}s", session.time_left_secs()), bold()),
    ];
    if session.is_running() {
        header.push(Span::raw("   "));
        header.push(Span::styled(
            format!(" {} WPM ", session.stats().wpm),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));
    }
    Paragraph::new(Line::from(header))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    // live figures read 0 until the first keystroke
    let stats = session.stats();
    let (wpm, accuracy, net_wpm) = if started {
        (stats.wpm, stats.accuracy, stats.net_wpm)
    } else {
        (0, 0, 0)
    };
    Paragraph::new(Span::styled(
        format!("WPM: {wpm}   Accuracy: {accuracy}%   Net WPM: {net_wpm}"),
        dim_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    let window = visible_words(session);
    let lines = window
        .chunks(WORDS_PER_LINE)
        .map(|line| {
            let spans = line
                .iter()
                .flat_map(|view| {
                    let mut spans = match view.state {
                        WordState::CompletedCorrect => vec![Span::styled(view.word, green_style)],
                        WordState::CompletedIncorrect => vec![Span::styled(view.word, red_style)],
                        WordState::Untouched => vec![Span::raw(view.word)],
                        WordState::Active => active_segments(view.word, session.input())
                            .into_iter()
                            .map(|(text, state)| {
                                let style = match state {
                                    SegmentState::TypedCorrect => green_style,
                                    SegmentState::TypedIncorrect => red_style,
                                    SegmentState::Untouched => Style::default(),
                                };
                                Span::styled(text, style.add_modifier(Modifier::UNDERLINED))
                            })
                            .collect(),
                    };
                    spans.push(Span::raw("  "));
                    spans
                })
                .collect::<Vec<Span>>();
            Line::from(spans)
        })
        .collect::<Vec<Line>>();

    let words_width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .alignment(if words_width + 2 <= chunks[3].width {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[3], buf);

    let border_style = match (session.input().is_empty(), session.is_current_input_correct()) {
        (_, false) => red_style,
        (false, true) => green_style,
        (true, true) => dim_style,
    };
    let placeholder = session.input().is_empty();
    Paragraph::new(Span::styled(
        if placeholder {
            "Type here...".to_string()
        } else {
            session.input().to_string()
        },
        if placeholder { dim_style } else { bold() },
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    )
    .render(chunks[4], buf);

    let progress = format!(
        "Progress: {}%   Correct: {}   Incorrect: {}",
        session.progress_percent(),
        session.correct_words(),
        session.wrong_words()
    );
    Paragraph::new(Span::styled(progress, dim_style))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

    let legend = if session.is_running() {
        "(space/enter) next word / (ctrl+f) finish / (tab) new test / (esc)ape"
    } else {
        "start typing to begin / (tab) new test / (esc)ape"
    };
    if legend.width() as u16 <= chunks[7].width {
        Paragraph::new(Span::styled(legend, italic_style)).render(chunks[7], buf);
    }
}
