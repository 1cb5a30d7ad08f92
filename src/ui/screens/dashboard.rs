use crate::app::{Status, StatusKind};
use crate::logic::format::local_time_label;
use crate::models::{VisualCategory, WeatherReport};
use crate::ui::components::{cloud_gauge, humidity_gauge, temperature_gauge, DayCard, InputWidget};
use crate::ui::Theme;
use chrono::{DateTime, Utc};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct DashboardScreen<'a> {
    pub report: Option<&'a WeatherReport>,
    pub status: Option<&'a Status>,
    pub search_buffer: &'a str,
    pub searching: bool,
    pub now: DateTime<Utc>,
}

impl<'a> DashboardScreen<'a> {
    pub fn new(report: Option<&'a WeatherReport>, now: DateTime<Utc>) -> Self {
        Self {
            report,
            status: None,
            search_buffer: "",
            searching: false,
            now,
        }
    }

    pub fn with_status(mut self, status: Option<&'a Status>) -> Self {
        self.status = status;
        self
    }

    pub fn with_search(mut self, buffer: &'a str, searching: bool) -> Self {
        self.search_buffer = buffer;
        self.searching = searching;
        self
    }

    fn category(&self) -> VisualCategory {
        self.report
            .map(|r| r.theme().category)
            .unwrap_or_default()
    }

    fn accent(&self) -> Color {
        Theme::accent_for(self.category())
    }
}

impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Search box
                Constraint::Min(9),    // Current conditions
                Constraint::Length(9), // 5-day forecast
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);

        InputWidget::new("Search city", self.search_buffer)
            .placeholder("Press / to search for a city")
            .focused(self.searching)
            .accent(self.accent())
            .render(chunks[1], buf);

        match self.report {
            Some(report) => {
                self.render_current(report, chunks[2], buf);
                self.render_forecast(report, chunks[3], buf);
            }
            None => {
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::border());
                let inner = block.inner(chunks[2]);
                block.render(chunks[2], buf);
                Paragraph::new(Span::styled("No weather loaded yet", Theme::dim()))
                    .render(inner, buf);
            }
        }

        self.render_status_message(chunks[4], buf);
        self.render_nav(chunks[5], buf);
    }
}

impl DashboardScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let accent = self.accent();
        let title = match self.report {
            Some(r) => format!("skyglance - {}", r.place_label),
            None => "skyglance".to_string(),
        };

        let block = Block::default()
            .title(Span::styled(title, Theme::title(accent)))
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(accent));

        let info = match self.report {
            Some(r) => format!(
                "{} • updated {}",
                local_time_label(self.now, r.current.timezone_offset),
                r.fetched_at.format("%H:%M UTC")
            ),
            None => "Waiting for data".to_string(),
        };
        Paragraph::new(Span::styled(info, Theme::dim()))
            .block(block)
            .render(area, buf);
    }

    fn render_current(&self, report: &WeatherReport, area: Rect, buf: &mut Buffer) {
        let accent = self.accent();
        let block = Block::default()
            .title(Span::styled("Now", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent));
        let inner = block.inner(area);
        block.render(area, buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(inner);

        let current = &report.current;
        let theme = current.theme();
        let temp_color = current
            .temperature
            .map(Theme::temp_color)
            .unwrap_or(Theme::DIM);

        let mut lines = vec![
            Line::from(vec![
                Span::raw(format!("{} ", theme.icon)),
                Span::styled(
                    current.temperature_label(),
                    Style::default().fg(temp_color).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(current.summary_text(), Theme::highlight())),
            Line::from(""),
        ];

        let mut chips = Vec::new();
        for (key, value) in current.chips(report.uv_max) {
            chips.push(Span::styled(format!("{}: ", key), Theme::dim()));
            chips.push(Span::styled(format!("{}  ", value), Theme::normal()));
        }
        lines.push(Line::from(chips));
        lines.push(Line::from(""));

        for (key, value) in current.facts() {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<14}", key), Theme::dim()),
                Span::styled(value, Theme::normal()),
            ]));
        }
        Paragraph::new(lines).render(columns[1], buf);

        let gauges = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(4),
            ])
            .split(columns[0]);
        temperature_gauge("Temperature", current.temperature).render(gauges[0], buf);
        humidity_gauge("Humidity", current.humidity_percent).render(gauges[1], buf);
        cloud_gauge("Cloud cover", current.cloud_cover_percent).render(gauges[2], buf);
    }

    fn render_forecast(&self, report: &WeatherReport, area: Rect, buf: &mut Buffer) {
        if report.days.is_empty() {
            let block = Block::default()
                .title("Forecast")
                .borders(Borders::ALL)
                .border_style(Theme::border());
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new(Span::styled("No forecast available", Theme::dim())).render(inner, buf);
            return;
        }

        let constraints: Vec<Constraint> = report
            .days
            .iter()
            .map(|_| Constraint::Ratio(1, report.days.len() as u32))
            .collect();
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (day, card_area) in report.days.iter().zip(cards.iter()) {
            DayCard::new(day)
                .accent(self.accent())
                .render(*card_area, buf);
        }
    }

    fn render_status_message(&self, area: Rect, buf: &mut Buffer) {
        if let Some(status) = self.status {
            let style = match status.kind {
                StatusKind::Subtle => Theme::dim(),
                StatusKind::Error => Theme::error(),
            };
            Paragraph::new(Span::styled(status.message.as_str(), style)).render(area, buf);
        }
    }

    fn render_nav(&self, area: Rect, buf: &mut Buffer) {
        let key = Theme::nav_key(self.accent());
        let nav = if self.searching {
            Line::from(vec![
                Span::styled("[Enter]", key),
                Span::styled("Search ", Theme::nav_label()),
                Span::styled("[Esc]", key),
                Span::styled("Cancel", Theme::nav_label()),
            ])
        } else {
            Line::from(vec![
                Span::styled("[/]", key),
                Span::styled("Search ", Theme::nav_label()),
                Span::styled("[l]", key),
                Span::styled("Location ", Theme::nav_label()),
                Span::styled("[r]", key),
                Span::styled("Refresh ", Theme::nav_label()),
                Span::styled("[q]", key),
                Span::styled("Quit", Theme::nav_label()),
            ])
        };

        Paragraph::new(nav).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::sample_report;

    fn text(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn renders_report() {
        let report = sample_report();
        let status = Status::error("Forecast failed");
        let area = Rect::new(0, 0, 100, 36);
        let mut buf = Buffer::empty(area);
        DashboardScreen::new(Some(&report), report.fetched_at)
            .with_status(Some(&status))
            .render(area, &mut buf);

        let rendered = text(&buf);
        assert!(rendered.contains("skyglance - Ranchi, Jharkhand, IN"));
        assert!(rendered.contains("12:00 • GMT+05:30"));
        assert!(rendered.contains("light rain"));
        assert!(rendered.contains("UV max: 6"));
        assert!(rendered.contains("Pressure"));
        assert!(rendered.contains("Mon 14 Jul"));
        assert!(rendered.contains("Fri 18 Jul"));
        assert!(rendered.contains("Forecast failed"));
        assert!(rendered.contains("[/]Search"));
    }

    #[test]
    fn renders_empty_state() {
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        DashboardScreen::new(None, Utc::now())
            .with_search("Osl", true)
            .render(area, &mut buf);

        let rendered = text(&buf);
        assert!(rendered.contains("No weather loaded yet"));
        assert!(rendered.contains("Osl"));
        assert!(rendered.contains("[Esc]Cancel"));
    }
}
