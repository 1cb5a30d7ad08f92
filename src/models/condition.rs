use serde::{Deserialize, Serialize};

/// Condition id used when a response carries no weather entry (few clouds)
pub const FALLBACK_CONDITION_ID: u32 = 801;

/// Whole-screen theme family derived from an OpenWeatherMap condition id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VisualCategory {
    Clear,
    #[default]
    Clouds,
    Rain,
    Thunder,
    Snow,
    Fog,
}

impl VisualCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualCategory::Clear => "clear",
            VisualCategory::Clouds => "clouds",
            VisualCategory::Rain => "rain",
            VisualCategory::Thunder => "thunder",
            VisualCategory::Snow => "snow",
            VisualCategory::Fog => "fog",
        }
    }

    /// Whether this category involves precipitation
    pub fn has_precipitation(&self) -> bool {
        matches!(
            self,
            VisualCategory::Rain | VisualCategory::Thunder | VisualCategory::Snow
        )
    }
}

impl std::fmt::Display for VisualCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionTheme {
    pub icon: &'static str,
    pub text: &'static str,
    pub category: VisualCategory,
}

impl ConditionTheme {
    const fn new(category: VisualCategory, icon: &'static str, text: &'static str) -> Self {
        Self {
            icon,
            text,
            category,
        }
    }
}

/// Map an OpenWeatherMap condition id to its icon, text and visual category.
///
/// 800 is the only exact match; everything else is grouped by the hundreds
/// digit. Unknown groups render as clouds.
pub fn theme_for(id: u32) -> ConditionTheme {
    if id == 800 {
        return ConditionTheme::new(VisualCategory::Clear, "☀️", "Clear sky");
    }

    match id / 100 {
        2 => ConditionTheme::new(VisualCategory::Thunder, "⛈️", "Thunderstorm"),
        3 => ConditionTheme::new(VisualCategory::Rain, "🌦️", "Drizzle"),
        5 => ConditionTheme::new(VisualCategory::Rain, "🌧️", "Rain"),
        6 => ConditionTheme::new(VisualCategory::Snow, "🌨️", "Snow"),
        7 => ConditionTheme::new(VisualCategory::Fog, "🌫️", "Atmosphere"),
        _ => ConditionTheme::new(VisualCategory::Clouds, "⛅", "Clouds"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_is_exact_match() {
        let theme = theme_for(800);
        assert_eq!(theme.category, VisualCategory::Clear);
        assert_eq!(theme.text, "Clear sky");
    }

    #[test]
    fn grouped_ranges() {
        assert_eq!(theme_for(211).category, VisualCategory::Thunder);
        assert_eq!(theme_for(301).text, "Drizzle");
        assert_eq!(theme_for(301).category, VisualCategory::Rain);
        assert_eq!(theme_for(502).text, "Rain");
        assert_eq!(theme_for(601).category, VisualCategory::Snow);
        assert_eq!(theme_for(741).category, VisualCategory::Fog);
        assert_eq!(theme_for(804).category, VisualCategory::Clouds);
    }

    #[test]
    fn unknown_ids_fall_back_to_clouds() {
        assert_eq!(theme_for(0).category, VisualCategory::Clouds);
        assert_eq!(theme_for(999).text, "Clouds");
        assert_eq!(theme_for(FALLBACK_CONDITION_ID).icon, "⛅");
    }

    #[test]
    fn category_has_precipitation() {
        assert!(VisualCategory::Rain.has_precipitation());
        assert!(VisualCategory::Snow.has_precipitation());
        assert!(!VisualCategory::Clear.has_precipitation());
        assert!(!VisualCategory::Fog.has_precipitation());
    }
}
