use serde::{Deserialize, Serialize};
use std::fmt;

/// Light/dark presentation preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// The stored preference wins; otherwise follow the environment.
    pub fn resolve(stored: Option<Theme>, system: Theme) -> Theme {
        stored.unwrap_or(system)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The environment's light/dark signal.
///
/// Terminals export `COLORFGBG` as `"<fg>;<bg>"` (sometimes with a middle
/// field). A background of 7 (white) or 15 (bright white) means a light
/// terminal; anything else, or no signal at all, is treated as dark.
pub fn detect_system_theme() -> Theme {
    theme_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn theme_from_colorfgbg(value: Option<&str>) -> Theme {
    let background = value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());

    match background {
        Some(7) | Some(15) => Theme::Light,
        _ => Theme::Dark,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_is_identity() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.toggled().toggled(), theme);
            assert_ne!(theme.toggled(), theme);
        }
    }

    #[test]
    fn stored_preference_overrides_system() {
        assert_eq!(Theme::resolve(Some(Theme::Light), Theme::Dark), Theme::Light);
        assert_eq!(Theme::resolve(None, Theme::Light), Theme::Light);
        assert_eq!(Theme::resolve(None, Theme::Dark), Theme::Dark);
    }

    #[test]
    fn colorfgbg_background_decides() {
        assert_eq!(theme_from_colorfgbg(Some("0;15")), Theme::Light);
        assert_eq!(theme_from_colorfgbg(Some("0;default;7")), Theme::Light);
        assert_eq!(theme_from_colorfgbg(Some("15;0")), Theme::Dark);
        assert_eq!(theme_from_colorfgbg(Some("garbage")), Theme::Dark);
        assert_eq!(theme_from_colorfgbg(None), Theme::Dark);
    }

    #[test]
    fn serializes_as_lowercase_string() {
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
        let parsed: Theme = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(parsed, Theme::Dark);
    }
}
