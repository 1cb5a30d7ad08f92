use crate::logic::format::round_half_up;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct GaugeWidget<'a> {
    title: &'a str,
    value: Option<f64>,
    unit: &'a str,
    min: f64,
    max: f64,
    thresholds: Vec<(f64, Color)>,
}

impl<'a> GaugeWidget<'a> {
    pub fn new(title: &'a str, value: Option<f64>, unit: &'a str) -> Self {
        Self {
            title,
            value,
            unit,
            min: 0.0,
            max: 100.0,
            thresholds: Vec::new(),
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn thresholds(mut self, thresholds: Vec<(f64, Color)>) -> Self {
        self.thresholds = thresholds;
        self
    }

    fn get_color(&self, value: f64) -> Color {
        for (threshold, color) in self.thresholds.iter().rev() {
            if value >= *threshold {
                return *color;
            }
        }
        Theme::FG
    }

    fn fill_ratio(&self, value: f64) -> f64 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

impl Widget for GaugeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 8 {
            return;
        }

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let Some(value) = self.value.filter(|v| !v.is_nan()) else {
            Paragraph::new(Span::styled("—", Theme::dim())).render(inner, buf);
            return;
        };

        let color = self.get_color(value);
        let value_str = format!("{}{}", round_half_up(value), self.unit);
        Paragraph::new(Line::from(Span::styled(value_str, Style::default().fg(color))))
            .render(inner, buf);

        if inner.height >= 2 {
            let bar_y = inner.y + 1;
            let filled = (inner.width as f64 * self.fill_ratio(value)) as u16;

            for x in inner.x..inner.x + inner.width {
                let ch = if x < inner.x + filled { '█' } else { '░' };
                buf[(x, bar_y)].set_char(ch).set_fg(color);
            }
        }
    }
}

pub fn temperature_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "°C")
        .range(-20.0, 45.0)
        .thresholds(vec![
            (f64::MIN, Theme::TEMP_FREEZING),
            (0.0, Theme::TEMP_COOL),
            (10.0, Theme::TEMP_MILD),
            (20.0, Theme::TEMP_WARM),
            (30.0, Theme::TEMP_HOT),
        ])
}

pub fn humidity_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "%")
        .range(0.0, 100.0)
        .thresholds(vec![
            (0.0, Theme::SUCCESS),
            (80.0, Theme::WARNING),
            (90.0, Theme::ERROR),
        ])
}

pub fn cloud_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "%")
        .range(0.0, 100.0)
        .thresholds(vec![
            (0.0, Theme::CLEAR),
            (30.0, Theme::CLOUDS),
            (80.0, Theme::DIM),
        ])
}
