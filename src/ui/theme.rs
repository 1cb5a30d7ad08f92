use crate::models::VisualCategory;
use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    // Base colors
    pub const FG: Color = Color::White;
    pub const DIM: Color = Color::DarkGray;
    pub const ACCENT: Color = Color::Cyan;
    pub const HIGHLIGHT: Color = Color::LightCyan;

    // Status colors
    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;

    // Temperature colors (°C)
    pub const TEMP_FREEZING: Color = Color::LightBlue;
    pub const TEMP_COOL: Color = Color::Cyan;
    pub const TEMP_MILD: Color = Color::Green;
    pub const TEMP_WARM: Color = Color::Yellow;
    pub const TEMP_HOT: Color = Color::Red;

    // Condition palettes
    pub const CLEAR: Color = Color::Yellow;
    pub const CLOUDS: Color = Color::Gray;
    pub const RAIN: Color = Color::Blue;
    pub const THUNDER: Color = Color::Magenta;
    pub const SNOW: Color = Color::White;
    pub const FOG: Color = Color::DarkGray;

    /// Accent color for the whole screen, chosen by the current condition
    pub fn accent_for(category: VisualCategory) -> Color {
        match category {
            VisualCategory::Clear => Self::CLEAR,
            VisualCategory::Clouds => Self::CLOUDS,
            VisualCategory::Rain => Self::RAIN,
            VisualCategory::Thunder => Self::THUNDER,
            VisualCategory::Snow => Self::SNOW,
            VisualCategory::Fog => Self::FOG,
        }
    }

    // Styles
    pub fn title(accent: Color) -> Style {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn highlight() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Self::FG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR)
    }

    pub fn temp_color(temp_c: f64) -> Color {
        if temp_c < 0.0 {
            Self::TEMP_FREEZING
        } else if temp_c < 10.0 {
            Self::TEMP_COOL
        } else if temp_c < 20.0 {
            Self::TEMP_MILD
        } else if temp_c < 30.0 {
            Self::TEMP_WARM
        } else {
            Self::TEMP_HOT
        }
    }

    pub fn nav_key(accent: Color) -> Style {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    }

    pub fn nav_label() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border_focused(accent: Color) -> Style {
        Style::default().fg(accent)
    }
}
