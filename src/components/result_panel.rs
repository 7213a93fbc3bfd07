use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::Paragraph,
};
use tui_dispatch::DataResource;

use super::Component;
use crate::action::Action;
use crate::state::{SPINNER_DOTS, WeatherReading};

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

pub struct ResultPanel;

pub struct ResultPanelProps<'a> {
    pub display: &'a DataResource<WeatherReading>,
    pub spinner_head: u32,
}

impl Component<Action> for ResultPanel {
    type Props<'a> = ResultPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        match props.display {
            DataResource::Empty => render_hint(frame, area),
            DataResource::Loading => render_spinner(frame, area, props.spinner_head),
            DataResource::Loaded(reading) => render_reading(frame, area, reading),
            DataResource::Failed(error) => render_error(frame, area, error),
        }
    }
}

fn render_hint(frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);

    let hint = Line::from(vec![
        Span::styled("Escribe ciudad y país y pulsa ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Cyan).bold()),
    ])
    .centered();
    frame.render_widget(Paragraph::new(hint), chunks[0]);
}

fn render_reading(frame: &mut Frame, area: Rect, reading: &WeatherReading) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // city
        Constraint::Length(1), // blank
        Constraint::Length(1), // current
        Constraint::Length(1), // blank
        Constraint::Length(1), // max
        Constraint::Length(1), // min
    ])
    .flex(Flex::Center)
    .split(area);

    let city = Line::from(Span::styled(
        format!("Clima en: {}", reading.city_name),
        Style::default().fg(Color::White).bold(),
    ))
    .centered();
    frame.render_widget(Paragraph::new(city), chunks[0]);

    let current = Line::from(Span::styled(
        reading.current_label(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
    .centered();
    frame.render_widget(Paragraph::new(current), chunks[2]);

    // Rows are bound crosswise: "Max" shows temp_min, "Min" shows temp_max.
    let max = Line::from(format!("Max: {}", reading.min_label())).centered();
    let min = Line::from(format!("Min: {}", reading.max_label())).centered();
    frame.render_widget(Paragraph::new(max), chunks[4]);
    frame.render_widget(Paragraph::new(min), chunks[5]);
}

// ============================================================================
// Spinner
// ============================================================================

const SPINNER_ROWS: usize = 5;
const SPINNER_COLS: usize = 9;

/// Dot positions (row, col), clockwise from twelve o'clock.
const SPINNER_POINTS: [(usize, usize); SPINNER_DOTS as usize] = [
    (0, 4),
    (0, 6),
    (1, 8),
    (2, 8),
    (3, 8),
    (4, 6),
    (4, 4),
    (4, 2),
    (3, 0),
    (2, 0),
    (1, 0),
    (0, 2),
];

fn dot_color(age: u32) -> Color {
    // age 0 is the head; older dots fade toward the background
    let level = 255u32.saturating_sub(age * 18).max(40) as u8;
    Color::Rgb(level, level, level)
}

/// One frame of the fading-circle spinner with dot `head` brightest.
pub fn spinner_text(head: u32) -> Text<'static> {
    let head = head % SPINNER_DOTS;
    let mut grid = [[None::<u32>; SPINNER_COLS]; SPINNER_ROWS];
    for (index, &(row, col)) in SPINNER_POINTS.iter().enumerate() {
        let age = (head + SPINNER_DOTS - index as u32) % SPINNER_DOTS;
        grid[row][col] = Some(age);
    }

    let lines: Vec<Line<'static>> = grid
        .iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .iter()
                .map(|cell| match cell {
                    Some(age) => Span::styled("●", Style::default().fg(dot_color(*age))),
                    None => Span::raw(" "),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    Text::from(lines)
}

fn render_spinner(frame: &mut Frame, area: Rect, head: u32) {
    let chunks = Layout::vertical([Constraint::Length(SPINNER_ROWS as u16)])
        .flex(Flex::Center)
        .split(area);

    frame.render_widget(
        Paragraph::new(spinner_text(head)).alignment(Alignment::Center),
        chunks[0],
    );
}

fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // icon
        Constraint::Length(1), // "Error"
        Constraint::Length(1), // message
        Constraint::Length(1), // blank
        Constraint::Length(1), // hint
    ])
    .flex(Flex::Center)
    .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(ERROR_ICON).centered()),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                "Error",
                Style::default().fg(Color::Red).bold(),
            )])
            .centered(),
        ),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                error.to_string(),
                Style::default().fg(Color::Rgb(200, 100, 100)),
            )])
            .centered(),
        ),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::styled("Pulsa ", Style::default().fg(Color::DarkGray)),
                Span::styled("Enter", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" para reintentar", Style::default().fg(Color::DarkGray)),
            ])
            .centered(),
        ),
        chunks[4],
    );
}
