use ratatui::style::Color;

use crate::preferences::PreferenceStore;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Colors used by the renderer for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub dim: Color,
    pub win: Color,
    pub lose: Color,
    pub danger: Color,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// Reads the stored theme; unknown or missing values fall back to light
    pub fn load(store: &dyn PreferenceStore) -> Self {
        store
            .get(THEME_KEY)
            .and_then(|value| Theme::parse(&value))
            .unwrap_or_default()
    }

    pub fn save(self, store: &dyn PreferenceStore) -> std::io::Result<()> {
        store.set(THEME_KEY, &self.to_string())
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Indicator for the toggle: the theme you would switch to
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                fg: Color::Black,
                bg: Color::White,
                accent: Color::Blue,
                dim: Color::DarkGray,
                win: Color::Green,
                lose: Color::Red,
                danger: Color::Red,
            },
            Theme::Dark => Palette {
                fg: Color::White,
                bg: Color::Black,
                accent: Color::Cyan,
                dim: Color::Gray,
                win: Color::LightGreen,
                lose: Color::LightRed,
                danger: Color::LightRed,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::MemoryPreferenceStore;

    #[test]
    fn test_default_is_light() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(Theme::load(&store), Theme::Light);
    }

    #[test]
    fn test_load_stored_value() {
        let store = MemoryPreferenceStore::new();
        store.set(THEME_KEY, "dark").unwrap();
        assert_eq!(Theme::load(&store), Theme::Dark);
    }

    #[test]
    fn test_unknown_value_falls_back_to_light() {
        let store = MemoryPreferenceStore::new();
        store.set(THEME_KEY, "solarized").unwrap();
        assert_eq!(Theme::load(&store), Theme::Light);
    }

    #[test]
    fn test_save_writes_lowercase_name() {
        let store = MemoryPreferenceStore::new();
        Theme::Dark.save(&store).unwrap();
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
        Theme::Light.save(&store).unwrap();
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn test_toggle_flips() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(Theme::Light.palette(), Theme::Dark.palette());
        assert_eq!(Theme::Light.palette().bg, Color::White);
        assert_eq!(Theme::Dark.palette().bg, Color::Black);
    }

    #[test]
    fn test_toggle_icon() {
        assert_eq!(Theme::Light.toggle_icon(), "🌙");
        assert_eq!(Theme::Dark.toggle_icon(), "☀️");
    }
}
