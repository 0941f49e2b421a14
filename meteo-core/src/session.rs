//! The search → pick → forecast flow, with a status message at every step.
//!
//! A [`Session`] never fails: lookup errors are logged and turned into a
//! [`Status`] for the user, who can simply search again.

use std::fmt;

use tracing::error;

use crate::{
    model::{Place, WeatherSnapshot},
    provider::Providers,
};

/// User-facing status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Searching,
    NoMatch,
    SelectLocation,
    Loading { name: String },
    NetworkError,
    WeatherUnavailable,
    /// Shown after a successful render; the status line is empty.
    Idle,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Searching => f.write_str("Searching…"),
            Status::NoMatch => f.write_str("No matching city found. Try another name."),
            Status::SelectLocation => f.write_str("Select a location:"),
            Status::Loading { name } => write!(f, "Loading weather for {name}…"),
            Status::NetworkError => f.write_str("Network error. Please try again."),
            Status::WeatherUnavailable => f.write_str("Could not load weather. Please try again."),
            Status::Idle => Ok(()),
        }
    }
}

/// Where status updates go.
pub trait StatusReporter {
    fn report(&self, status: &Status);
}

/// A trimmed, non-empty search string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// `None` for blank input, which should not trigger a search.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Candidates(Vec<Place>),
    NoMatch,
    Failed,
}

#[derive(Debug)]
pub struct Session<R> {
    providers: Providers,
    reporter: R,
}

impl<R: StatusReporter> Session<R> {
    pub fn new(providers: Providers, reporter: R) -> Self {
        Self { providers, reporter }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub async fn search(&self, query: &Query) -> SearchOutcome {
        self.reporter.report(&Status::Searching);

        match self.providers.geocoder.search(query.as_str()).await {
            Ok(places) if places.is_empty() => {
                self.reporter.report(&Status::NoMatch);
                SearchOutcome::NoMatch
            }
            Ok(places) => {
                self.reporter.report(&Status::SelectLocation);
                SearchOutcome::Candidates(places)
            }
            Err(err) => {
                error!(query = query.as_str(), "geocoding failed: {err}");
                self.reporter.report(&Status::NetworkError);
                SearchOutcome::Failed
            }
        }
    }

    /// Fetch weather for the chosen place. `None` means nothing should be rendered.
    pub async fn load(&self, place: &Place) -> Option<WeatherSnapshot> {
        self.reporter.report(&Status::Loading { name: place.name.clone() });

        match self.providers.forecast.forecast(place).await {
            Ok(snapshot) => {
                self.reporter.report(&Status::Idle);
                Some(snapshot)
            }
            Err(err) => {
                error!(place = %place.name, "forecast failed: {err}");
                self.reporter.report(&Status::WeatherUnavailable);
                None
            }
        }
    }

    /// A query for the caller's own city, if their IP can be placed.
    pub async fn quick_start(&self) -> Option<Query> {
        let city = self.providers.ip_locator.locate_city().await?;
        Query::parse(&city)
    }
}
