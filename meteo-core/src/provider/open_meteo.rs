use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    error::LookupResult,
    model::{CurrentConditions, DailyForecast, HourlyReading, Place, WeatherSnapshot},
};

use super::{ForecastSource, Geocoder, get_json};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Maximum number of candidates requested from the geocoder.
pub const MAX_CANDIDATES: usize = 5;

const CURRENT_FIELDS: &[&str] = &[
    "temperature_2m",
    "relative_humidity_2m",
    "apparent_temperature",
    "is_day",
    "precipitation",
    "weather_code",
    "wind_speed_10m",
    "wind_direction_10m",
];

const HOURLY_FIELDS: &[&str] = &[
    "temperature_2m",
    "precipitation_probability",
    "relative_humidity_2m",
    "wind_speed_10m",
];

const DAILY_FIELDS: &[&str] = &[
    "weather_code",
    "temperature_2m_max",
    "temperature_2m_min",
    "precipitation_sum",
    "sunrise",
    "sunset",
    "wind_speed_10m_max",
];

#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    http: Client,
    url: String,
}

impl OpenMeteoGeocoder {
    pub fn new(http: Client, url: String) -> Self {
        Self { http, url }
    }
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> LookupResult<Vec<Place>> {
        let parsed: OmSearchResponse = get_json(
            &self.http,
            "geocoding",
            &self.url,
            &geocoding_query(query),
        )
        .await?;

        Ok(parsed.results.unwrap_or_default())
    }
}

#[derive(Debug, Clone)]
pub struct OpenMeteoForecast {
    http: Client,
    url: String,
}

impl OpenMeteoForecast {
    pub fn new(http: Client, url: String) -> Self {
        Self { http, url }
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoForecast {
    #[instrument(
        skip(self, place),
        fields(name = %place.name, lat = place.latitude, lon = place.longitude)
    )]
    async fn forecast(&self, place: &Place) -> LookupResult<WeatherSnapshot> {
        let parsed: OmForecastResponse =
            get_json(&self.http, "forecast", &self.url, &forecast_query(place)).await?;

        Ok(parsed.into_snapshot())
    }
}

fn geocoding_query(name: &str) -> Vec<(&'static str, String)> {
    vec![
        ("name", name.to_string()),
        ("count", MAX_CANDIDATES.to_string()),
        ("language", "en".to_string()),
        ("format", "json".to_string()),
    ]
}

fn forecast_query(place: &Place) -> Vec<(&'static str, String)> {
    vec![
        ("latitude", place.latitude.to_string()),
        ("longitude", place.longitude.to_string()),
        ("timezone", "auto".to_string()),
        ("current", CURRENT_FIELDS.join(",")),
        ("hourly", HOURLY_FIELDS.join(",")),
        ("daily", DAILY_FIELDS.join(",")),
    ]
}

#[derive(Debug, Deserialize)]
struct OmSearchResponse {
    #[serde(default)]
    results: Option<Vec<Place>>,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    #[serde(default)]
    time: Option<String>,
    temperature_2m: f64,
    relative_humidity_2m: f64,
    apparent_temperature: f64,
    is_day: u8,
    #[serde(default)]
    precipitation: Option<f64>,
    weather_code: i32,
    wind_speed_10m: f64,
    wind_direction_10m: f64,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<NaiveDate>,
    weather_code: Vec<i32>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    wind_speed_10m_max: Vec<Option<f64>>,
    #[serde(default)]
    sunrise: Vec<Option<String>>,
    #[serde(default)]
    sunset: Vec<Option<String>>,
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    time: Vec<String>,
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability: Vec<Option<f64>>,
    #[serde(default)]
    relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    wind_speed_10m: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    #[serde(default)]
    timezone: Option<String>,
    current: OmCurrent,
    daily: OmDaily,
    #[serde(default)]
    hourly: Option<OmHourly>,
}

impl OmForecastResponse {
    fn into_snapshot(self) -> WeatherSnapshot {
        let c = self.current;

        WeatherSnapshot {
            timezone: self.timezone,
            current: CurrentConditions {
                observed_at: c.time,
                temperature_c: c.temperature_2m,
                relative_humidity_pct: c.relative_humidity_2m,
                apparent_temperature_c: c.apparent_temperature,
                precipitation_mm: c.precipitation,
                is_day: c.is_day != 0,
                wind_speed_kmh: c.wind_speed_10m,
                wind_direction_deg: c.wind_direction_10m,
                weather_code: c.weather_code,
            },
            daily: daily_rows(self.daily),
            hourly: self.hourly.map(hourly_rows).unwrap_or_default(),
        }
    }
}

/// Zip the parallel daily arrays. Rows stop at the shortest of `time` and
/// `weather_code`; gaps in the other arrays become `None`.
fn daily_rows(d: OmDaily) -> Vec<DailyForecast> {
    let rows = d.time.len().min(d.weather_code.len());

    (0..rows)
        .map(|i| DailyForecast {
            date: d.time[i],
            weather_code: d.weather_code[i],
            temperature_max_c: nth(&d.temperature_2m_max, i),
            temperature_min_c: nth(&d.temperature_2m_min, i),
            precipitation_sum_mm: nth(&d.precipitation_sum, i),
            wind_speed_max_kmh: nth(&d.wind_speed_10m_max, i),
            sunrise: nth(&d.sunrise, i),
            sunset: nth(&d.sunset, i),
        })
        .collect()
}

fn hourly_rows(h: OmHourly) -> Vec<HourlyReading> {
    h.time
        .iter()
        .enumerate()
        .map(|(i, time)| HourlyReading {
            time: time.clone(),
            temperature_c: nth(&h.temperature_2m, i),
            precipitation_probability_pct: nth(&h.precipitation_probability, i),
            relative_humidity_pct: nth(&h.relative_humidity_2m, i),
            wind_speed_kmh: nth(&h.wind_speed_10m, i),
        })
        .collect()
}

fn nth<T: Clone>(values: &[Option<T>], i: usize) -> Option<T> {
    values.get(i).cloned().flatten()
}
