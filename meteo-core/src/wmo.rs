//! WMO weather code lookup.
//!
//! The table is plain data; the formatting functions in [`crate::render`]
//! take it as a parameter instead of embedding the mapping.

use std::collections::HashMap;

pub const NIGHT_SYMBOL: &str = "🌙";
pub const DAY_FALLBACK_SYMBOL: &str = "🌤️";
pub const UNKNOWN_TEXT: &str = "—";

/// Codes whose day symbol is replaced by [`NIGHT_SYMBOL`] at night.
const CLEAR_CODES: &[i32] = &[0, 1];

const STANDARD: &[(i32, &str, &str)] = &[
    (0, "☀️", "Clear sky"),
    (1, "🌤️", "Mainly clear"),
    (2, "⛅", "Partly cloudy"),
    (3, "☁️", "Overcast"),
    (45, "🌫️", "Fog"),
    (48, "🌫️", "Depositing rime fog"),
    (51, "🌦️", "Light drizzle"),
    (53, "🌦️", "Moderate drizzle"),
    (55, "🌦️", "Dense drizzle"),
    (56, "🌧️", "Freezing drizzle"),
    (57, "🌧️", "Dense freezing drizzle"),
    (61, "🌧️", "Slight rain"),
    (63, "🌧️", "Moderate rain"),
    (65, "🌧️", "Heavy rain"),
    (66, "🌧️", "Freezing rain"),
    (67, "🌧️", "Heavy freezing rain"),
    (71, "🌨️", "Slight snow"),
    (73, "🌨️", "Moderate snow"),
    (75, "❄️", "Heavy snow"),
    (77, "❄️", "Snow grains"),
    (80, "🌧️", "Slight rain showers"),
    (81, "🌧️", "Moderate rain showers"),
    (82, "🌧️", "Violent rain showers"),
    (85, "🌨️", "Slight snow showers"),
    (86, "🌨️", "Heavy snow showers"),
    (95, "⛈️", "Thunderstorm"),
    (96, "⛈️", "Thunderstorm w/ hail"),
    (99, "⛈️", "Severe thunderstorm w/ hail"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WmoEntry {
    pub symbol: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct WmoTable {
    entries: HashMap<i32, WmoEntry>,
}

impl WmoTable {
    /// The table for the codes the forecast API emits.
    pub fn standard() -> Self {
        Self::from_entries(STANDARD.iter().copied())
    }

    pub fn from_entries(
        entries: impl IntoIterator<Item = (i32, &'static str, &'static str)>,
    ) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(code, symbol, text)| (code, WmoEntry { symbol, text }))
                .collect(),
        }
    }

    pub fn get(&self, code: i32) -> Option<WmoEntry> {
        self.entries.get(&code).copied()
    }

    /// Symbol for `code`, falling back on the day flag for unknown codes.
    pub fn symbol(&self, code: i32, is_day: bool) -> &'static str {
        if !is_day && CLEAR_CODES.contains(&code) {
            return NIGHT_SYMBOL;
        }

        match self.get(code) {
            Some(entry) => entry.symbol,
            None if is_day => DAY_FALLBACK_SYMBOL,
            None => NIGHT_SYMBOL,
        }
    }

    pub fn text(&self, code: i32) -> &'static str {
        self.get(code).map_or(UNKNOWN_TEXT, |entry| entry.text)
    }
}
