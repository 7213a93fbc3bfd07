use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;
use crate::state::{FormField, FormState};

const INPUT_BG: Color = Color::Rgb(50, 50, 60);
const CITY_PLACEHOLDER: &str = "Ej. London";
const COUNTRY_PLACEHOLDER: &str = "Ej. GB";

/// Rows the form occupies: label + input for each field, one spacer between.
pub const FORM_HEIGHT: u16 = 5;

/// City and country inputs
pub struct WeatherForm {
    city_input: TextInput,
    country_input: TextInput,
}

pub struct WeatherFormProps<'a> {
    pub form: &'a FormState,
    pub is_focused: bool,
}

impl Default for WeatherForm {
    fn default() -> Self {
        Self {
            city_input: TextInput::new(),
            country_input: TextInput::new(),
        }
    }
}

impl WeatherForm {
    pub fn new() -> Self {
        Self::default()
    }
}

fn ui_render(_: usize) -> Action {
    Action::UiRender
}

fn submit_form(_: String) -> Action {
    Action::FormSubmit
}

fn input_style() -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: Some(INPUT_BG),
            fg: None,
        },
        placeholder_style: Some(Style::default().fg(Color::DarkGray)),
        cursor_style: None,
    }
}

fn label(text: &str, is_active: bool) -> Paragraph<'_> {
    let style = if is_active {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Gray)
    };
    Paragraph::new(Line::styled(text, style))
}

impl Component<Action> for WeatherForm {
    type Props<'a> = WeatherFormProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }

        // Form-level keys first, the rest goes to the focused input
        match key.code {
            KeyCode::Esc => return vec![Action::Quit],
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![Action::Quit];
            }
            KeyCode::Tab | KeyCode::BackTab => return vec![Action::FormFocusNext],
            KeyCode::Enter => return vec![Action::FormSubmit],
            _ => {}
        }

        let form = props.form;
        match form.focus {
            FormField::City => {
                let input_props = TextInputProps {
                    value: &form.city,
                    placeholder: CITY_PLACEHOLDER,
                    is_focused: true,
                    style: input_style(),
                    on_change: Action::FormCityChange,
                    on_submit: submit_form,
                    on_cursor_move: Some(ui_render),
                };
                self.city_input
                    .handle_event(event, input_props)
                    .into_iter()
                    .collect()
            }
            FormField::Country => {
                let input_props = TextInputProps {
                    value: &form.country,
                    placeholder: COUNTRY_PLACEHOLDER,
                    is_focused: true,
                    style: input_style(),
                    on_change: Action::FormCountryChange,
                    on_submit: submit_form,
                    on_cursor_move: Some(ui_render),
                };
                self.country_input
                    .handle_event(event, input_props)
                    .into_iter()
                    .collect()
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // city label
            Constraint::Length(1), // city input
            Constraint::Length(1), // spacer
            Constraint::Length(1), // country label
            Constraint::Length(1), // country input
        ])
        .split(area);

        let form = props.form;
        let city_active = props.is_focused && form.focus == FormField::City;
        let country_active = props.is_focused && form.focus == FormField::Country;

        frame.render_widget(label("Ciudad", city_active), chunks[0]);
        let city_props = TextInputProps {
            value: &form.city,
            placeholder: CITY_PLACEHOLDER,
            is_focused: city_active,
            style: input_style(),
            on_change: Action::FormCityChange,
            on_submit: submit_form,
            on_cursor_move: Some(ui_render),
        };
        self.city_input.render(frame, chunks[1], city_props);

        frame.render_widget(label("País", country_active), chunks[3]);
        let country_props = TextInputProps {
            value: &form.country,
            placeholder: COUNTRY_PLACEHOLDER,
            is_focused: country_active,
            style: input_style(),
            on_change: Action::FormCountryChange,
            on_submit: submit_form,
            on_cursor_move: Some(ui_render),
        };
        self.country_input.render(frame, chunks[4], country_props);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use tui_dispatch::testing::*;

    fn press(code: KeyCode) -> EventKind {
        EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn handle(form: &mut WeatherForm, state: &FormState, event: EventKind) -> Vec<Action> {
        form.handle_event(
            &event,
            WeatherFormProps {
                form: state,
                is_focused: true,
            },
        )
        .into_iter()
        .collect()
    }

    #[test]
    fn test_enter_submits() {
        let mut form = WeatherForm::new();
        let actions = handle(&mut form, &FormState::default(), press(KeyCode::Enter));
        actions.assert_count(1);
        actions.assert_first(Action::FormSubmit);
    }

    #[test]
    fn test_tab_switches_field() {
        let mut form = WeatherForm::new();
        let state = FormState::default();
        handle(&mut form, &state, press(KeyCode::Tab)).assert_first(Action::FormFocusNext);
        handle(&mut form, &state, press(KeyCode::BackTab)).assert_first(Action::FormFocusNext);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = WeatherForm::new();

        let state = FormState::default();
        let actions = handle(&mut form, &state, press(KeyCode::Char('L')));
        actions.assert_first(Action::FormCityChange("L".into()));

        let state = FormState {
            focus: FormField::Country,
            ..Default::default()
        };
        let actions = handle(&mut form, &state, press(KeyCode::Char('G')));
        actions.assert_first(Action::FormCountryChange("G".into()));
    }

    #[test]
    fn test_escape_quits() {
        let mut form = WeatherForm::new();
        handle(&mut form, &FormState::default(), press(KeyCode::Esc)).assert_first(Action::Quit);
    }

    #[test]
    fn test_unfocused_ignores() {
        let mut form = WeatherForm::new();
        let state = FormState::default();
        let actions: Vec<_> = form
            .handle_event(
                &press(KeyCode::Enter),
                WeatherFormProps {
                    form: &state,
                    is_focused: false,
                },
            )
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_labels_and_values() {
        let mut render = RenderHarness::new(40, FORM_HEIGHT);
        let mut form = WeatherForm::new();
        let state = FormState {
            city: "Madrid".into(),
            country: "ES".into(),
            focus: FormField::City,
        };

        let output = render.render_to_string_plain(|frame| {
            form.render(
                frame,
                frame.area(),
                WeatherFormProps {
                    form: &state,
                    is_focused: true,
                },
            );
        });

        assert!(output.contains("Ciudad"));
        assert!(output.contains("Madrid"));
        assert!(output.contains("País"));
        assert!(output.contains("ES"));
    }
}
