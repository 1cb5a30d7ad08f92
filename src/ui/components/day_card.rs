use crate::models::{theme_for, DailySummary};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// One column of the 5-day outlook
pub struct DayCard<'a> {
    day: &'a DailySummary,
    accent: Color,
}

impl<'a> DayCard<'a> {
    pub fn new(day: &'a DailySummary) -> Self {
        Self {
            day,
            accent: Theme::ACCENT,
        }
    }

    pub fn accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }
}

impl Widget for DayCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(self.day.day_label.as_str(), Theme::title(self.accent)))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let temp_color = self
            .day
            .temp_max
            .map(|t| Theme::temp_color(f64::from(t)))
            .unwrap_or(Theme::DIM);

        // Wet days draw their rain total in the card's accent
        let rain_style = if theme_for(self.day.condition_id).category.has_precipitation() {
            Style::default().fg(self.accent)
        } else {
            Theme::dim()
        };

        let lines = vec![
            Line::from(self.day.icon.as_str()),
            Line::from(Span::styled(
                self.day.temp_range_label(),
                Style::default().fg(temp_color),
            )),
            Line::from(Span::styled(
                format!("Rain: {} mm", self.day.precipitation_mm),
                rain_style,
            )),
            Line::from(Span::styled(
                format!("Wind: {} km/h", self.day.wind_kmh),
                Theme::dim(),
            )),
            Line::from(Span::styled(self.day.condition_text.as_str(), Theme::normal())),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
