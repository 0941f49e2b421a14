use crate::{
    Config,
    error::{LookupError, LookupResult},
    model::{Place, WeatherSnapshot},
    provider::{
        ipapi::IpApiLocator,
        open_meteo::{OpenMeteoForecast, OpenMeteoGeocoder},
    },
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::{fmt::Debug, time::Duration};
use tracing::debug;

pub mod ipapi;
pub mod open_meteo;

/// Resolves free text to a ranked list of place candidates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// An empty list means the service answered but knew no such place.
    async fn search(&self, query: &str) -> LookupResult<Vec<Place>>;
}

/// Fetches current conditions plus hourly and daily series for a place.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn forecast(&self, place: &Place) -> LookupResult<WeatherSnapshot>;
}

/// Best-effort guess of the caller's city. Failures are swallowed.
#[async_trait]
pub trait IpLocator: Send + Sync + Debug {
    async fn locate_city(&self) -> Option<String>;
}

/// The set of outbound clients one session needs.
#[derive(Debug)]
pub struct Providers {
    pub geocoder: Box<dyn Geocoder>,
    pub forecast: Box<dyn ForecastSource>,
    pub ip_locator: Box<dyn IpLocator>,
}

/// Construct all providers from config, sharing one HTTP client.
pub fn providers_from_config(config: &Config) -> anyhow::Result<Providers> {
    let http = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(concat!("meteo/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    Ok(Providers {
        geocoder: Box::new(OpenMeteoGeocoder::new(http.clone(), config.geocoding_url.clone())),
        forecast: Box::new(OpenMeteoForecast::new(http.clone(), config.forecast_url.clone())),
        ip_locator: Box::new(IpApiLocator::new(http, config.ip_lookup_url.clone())),
    })
}

/// GET `url` with `query`, require a success status and decode the JSON body.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &Client,
    service: &'static str,
    url: &str,
    query: &[(&str, String)],
) -> LookupResult<T> {
    debug!(service, url, ?query, "sending request");

    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|source| LookupError::Transport { service, source })?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|source| LookupError::Transport { service, source })?;

    if !status.is_success() {
        return Err(LookupError::Status {
            service,
            status,
            body: truncate_body(&body),
        });
    }

    serde_json::from_str(&body).map_err(|source| LookupError::Decode { service, source })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
