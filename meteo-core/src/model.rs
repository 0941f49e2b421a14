use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A geocoding match the user can pick from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub admin1: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Place {
    /// Region and country joined with ", ", skipping missing or empty parts.
    pub fn region_label(&self) -> String {
        [self.admin1.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    /// Local observation time as reported by the API, e.g. `2024-01-15T12:15`.
    pub observed_at: Option<String>,
    pub temperature_c: f64,
    pub relative_humidity_pct: f64,
    pub apparent_temperature_c: f64,
    pub precipitation_mm: Option<f64>,
    pub is_day: bool,
    pub wind_speed_kmh: f64,
    pub wind_direction_deg: f64,
    pub weather_code: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub weather_code: i32,
    pub temperature_max_c: Option<f64>,
    pub temperature_min_c: Option<f64>,
    pub precipitation_sum_mm: Option<f64>,
    pub wind_speed_max_kmh: Option<f64>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyReading {
    /// Local time as reported by the API, e.g. `2024-01-15T13:00`.
    pub time: String,
    pub temperature_c: Option<f64>,
    pub precipitation_probability_pct: Option<f64>,
    pub relative_humidity_pct: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
}

/// Everything one forecast call returns, already mapped out of the wire format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSnapshot {
    pub timezone: Option<String>,
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecast>,
    pub hourly: Vec<HourlyReading>,
}
