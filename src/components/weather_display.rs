use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::error_banner::BANNER_HEIGHT;
use super::weather_form::FORM_HEIGHT;
use super::{
    Component, ErrorBanner, ErrorBannerProps, ResultPanel, ResultPanelProps, WeatherForm,
    WeatherFormProps,
};
use crate::action::Action;
use crate::state::AppState;

const TITLE: &str = "Buscador de clima";
const CONTENT_MAX_WIDTH: u16 = 48;

/// Props for WeatherDisplay - read-only view of state
pub struct WeatherDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The main screen: title, form, result panel, banner, key hints
#[derive(Default)]
pub struct WeatherDisplay {
    form: WeatherForm,
}

impl WeatherDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for WeatherDisplay {
    type Props<'a> = WeatherDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let form_props = WeatherFormProps {
            form: &props.state.form,
            is_focused: props.is_focused,
        };
        self.form
            .handle_event(event, form_props)
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherDisplayProps<'_>) {
        let state = props.state;
        let rows = Layout::vertical([
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let columns = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Max(CONTENT_MAX_WIDTH),
            Constraint::Fill(1),
        ])
        .split(rows[0]);

        let banner_height = if state.banner.is_some() {
            BANNER_HEIGHT
        } else {
            0
        };
        let chunks = Layout::vertical([
            Constraint::Length(1),             // Title
            Constraint::Length(1),             // Spacer
            Constraint::Length(FORM_HEIGHT),   // Form
            Constraint::Length(1),             // Spacer
            Constraint::Min(1),                // Result panel
            Constraint::Length(banner_height), // Banner
        ])
        .split(columns[1]);

        let title = Line::from(TITLE)
            .style(Style::default().fg(Color::White).bold())
            .centered();
        frame.render_widget(Paragraph::new(title), chunks[0]);

        self.form.render(
            frame,
            chunks[2],
            WeatherFormProps {
                form: &state.form,
                is_focused: props.is_focused,
            },
        );

        let mut panel = ResultPanel;
        panel.render(
            frame,
            chunks[4],
            ResultPanelProps {
                display: &state.display,
                spinner_head: state.spinner_head(),
            },
        );

        let mut banner = ErrorBanner;
        banner.render(
            frame,
            chunks[5],
            ErrorBannerProps {
                banner: state.banner.as_ref(),
            },
        );

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            rows[1],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("Enter", "buscar"),
                    StatusBarHint::new("Tab", "cambiar campo"),
                    StatusBarHint::new("Esc", "salir"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
