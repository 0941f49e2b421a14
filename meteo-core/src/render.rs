//! Pure formatting of places and weather snapshots.
//!
//! The functions here build small view structs holding display-ready
//! strings. [`text`] and [`html`] serialize those views; neither does any
//! formatting of raw numbers itself.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    model::{CurrentConditions, DailyForecast, HourlyReading, Place, WeatherSnapshot},
    wmo::WmoTable,
};

pub mod html;
pub mod text;

/// Number of daily entries shown as forecast tiles.
pub const FORECAST_DAYS: usize = 5;

const ARROWS: [&str; 8] = ["↑", "↗", "→", "↘", "↓", "↙", "←", "↖"];

/// Shown in place of a reading the forecast left out.
pub const MISSING: &str = "—";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentCard {
    pub location: String,
    pub temperature: String,
    pub symbol: &'static str,
    pub description: &'static str,
    pub coordinates: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Details {
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub precipitation: String,
    pub daylight: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastTile {
    pub date: String,
    pub symbol: &'static str,
    pub high: String,
    pub low: String,
    pub rain: String,
    pub wind_max: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourRow {
    pub time: String,
    pub temperature: String,
    pub precipitation_chance: Option<String>,
    pub wind: Option<String>,
}

/// Everything shown for one lookup, ready to serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub title: String,
    pub current: CurrentCard,
    pub details: Details,
    pub forecast: Vec<ForecastTile>,
    pub hours: Vec<HourRow>,
}

impl Report {
    /// `hours` is how many upcoming hourly rows to include; zero leaves them out.
    pub fn build(
        place: &Place,
        snapshot: &WeatherSnapshot,
        table: &WmoTable,
        hours: usize,
    ) -> Self {
        let observed_at = snapshot.current.observed_at.as_deref();
        Self {
            title: format!("Weather for {}", place.name),
            current: current_card(place, &snapshot.current, table),
            details: details(&snapshot.current),
            forecast: forecast_tiles(&snapshot.daily, table),
            hours: upcoming_hours(&snapshot.hourly, observed_at, hours),
        }
    }
}

/// Compass arrow for a wind direction, by nearest 45° sector.
pub fn arrow_for_direction(degrees: f64) -> &'static str {
    let sector = round_half_up(degrees / 45.0).rem_euclid(ARROWS.len() as i64);
    ARROWS[sector as usize]
}

/// Round halves toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// The leading entries of the daily series that become tiles.
pub fn forecast_days(daily: &[DailyForecast]) -> &[DailyForecast] {
    &daily[..daily.len().min(FORECAST_DAYS)]
}

/// e.g. `Mon, Jan 15`
pub fn pretty_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// One line describing a geocoding candidate. The region segment is left
/// out when the place has neither a region nor a country.
pub fn candidate_label(place: &Place) -> String {
    let coordinates = format!("lat {:.2}, lon {:.2}", place.latitude, place.longitude);
    match place.region_label() {
        region if region.is_empty() => format!("{} — {coordinates}", place.name),
        region => format!("{} — {region} — {coordinates}", place.name),
    }
}

/// Rounded reading followed by `unit`, or [`MISSING`] when there is none.
fn rounded(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(value) => format!("{}{unit}", round_half_up(value)),
        None => MISSING.to_string(),
    }
}

pub fn current_card(place: &Place, current: &CurrentConditions, table: &WmoTable) -> CurrentCard {
    let location = match place.country.as_deref().filter(|c| !c.is_empty()) {
        Some(country) => format!("{}, {country}", place.name),
        None => place.name.clone(),
    };

    CurrentCard {
        location,
        temperature: format!("{}°C", round_half_up(current.temperature_c)),
        symbol: table.symbol(current.weather_code, current.is_day),
        description: table.text(current.weather_code),
        coordinates: format!("Lat {:.2} • Lon {:.2}", place.latitude, place.longitude),
    }
}

pub fn details(current: &CurrentConditions) -> Details {
    Details {
        feels_like: format!("{}°", round_half_up(current.apparent_temperature_c)),
        humidity: format!("{}%", current.relative_humidity_pct),
        wind: format!(
            "{} km/h {}",
            round_half_up(current.wind_speed_kmh),
            arrow_for_direction(current.wind_direction_deg)
        ),
        precipitation: format!("{} mm", current.precipitation_mm.unwrap_or(0.0)),
        daylight: if current.is_day { "Day" } else { "Night" },
    }
}

/// Tiles for the first [`FORECAST_DAYS`] days. Tiles always use day symbols.
pub fn forecast_tiles(daily: &[DailyForecast], table: &WmoTable) -> Vec<ForecastTile> {
    forecast_days(daily)
        .iter()
        .map(|day| ForecastTile {
            date: pretty_date(day.date),
            symbol: table.symbol(day.weather_code, true),
            high: rounded(day.temperature_max_c, "°"),
            low: rounded(day.temperature_min_c, "°C"),
            rain: format!("{} mm", round_half_up(day.precipitation_sum_mm.unwrap_or(0.0))),
            wind_max: day
                .wind_speed_max_kmh
                .map(|wind| format!("{} km/h", round_half_up(wind))),
        })
        .collect()
}

/// Up to `count` hourly rows starting at the hour of `observed_at`, or at the
/// start of the series when the observation time is unknown.
pub fn upcoming_hours(
    hourly: &[HourlyReading],
    observed_at: Option<&str>,
    count: usize,
) -> Vec<HourRow> {
    let from = observed_at.map(hour_key).unwrap_or_default();

    hourly
        .iter()
        .filter(|reading| hour_key(&reading.time) >= from)
        .take(count)
        .map(|reading| HourRow {
            time: reading.time.get(11..16).unwrap_or(&reading.time).to_string(),
            temperature: rounded(reading.temperature_c, "°"),
            precipitation_chance: reading
                .precipitation_probability_pct
                .map(|p| format!("{}%", round_half_up(p))),
            wind: reading
                .wind_speed_kmh
                .map(|w| format!("{} km/h", round_half_up(w))),
        })
        .collect()
}

/// `2024-01-15T13:45` -> `2024-01-15T13`
fn hour_key(time: &str) -> &str {
    time.get(..13).unwrap_or(time)
}
