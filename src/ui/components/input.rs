use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Single-line text box used for the city search
pub struct InputWidget<'a> {
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    focused: bool,
    accent: Color,
}

impl<'a> InputWidget<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            placeholder: "",
            focused: false,
            accent: Theme::ACCENT,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Theme::border_focused(self.accent)
        } else {
            Theme::border()
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.focused {
            // Cursor sits after the last character
            Line::from(vec![
                Span::raw(self.value),
                Span::styled(" ", Theme::selected()),
            ])
        } else if self.value.is_empty() {
            Line::from(Span::styled(self.placeholder, Theme::dim()))
        } else {
            Line::from(Span::styled(self.value, Theme::normal()))
        };

        Paragraph::new(line).render(inner, buf);
    }
}
