use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::state::Banner;

const BANNER_BG: Color = Color::Rgb(254, 226, 226);
const BANNER_FG: Color = Color::Rgb(185, 28, 28);
const BANNER_BORDER: Color = Color::Rgb(248, 113, 113);

/// Rows needed to draw the banner, borders included.
pub const BANNER_HEIGHT: u16 = 3;

pub struct ErrorBanner;

pub struct ErrorBannerProps<'a> {
    pub banner: Option<&'a Banner>,
}

impl Component<Action> for ErrorBanner {
    type Props<'a> = ErrorBannerProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let Some(banner) = props.banner else {
            return;
        };

        let style = Style::default().bg(BANNER_BG).fg(BANNER_FG);
        let line = Line::from(vec![
            Span::styled("Error! ", style.add_modifier(Modifier::BOLD)),
            Span::styled(banner.message.clone(), style),
        ])
        .centered();

        let block = Block::bordered()
            .border_style(Style::default().fg(BANNER_BORDER))
            .style(style);
        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}
