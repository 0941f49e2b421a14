//! Core library for the `meteo` CLI.
//!
//! This crate defines:
//! - Geocoding and forecast clients for the Open-Meteo APIs
//! - The search → pick → forecast session and its status messages
//! - Rendering of weather snapshots to text and to HTML templates
//! - Configuration, including the persisted light/dark theme
//!
//! It is used by `meteo-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;
pub mod session;
pub mod theme;
pub mod wmo;

pub use config::Config;
pub use error::{LookupError, RenderError};
pub use model::{CurrentConditions, DailyForecast, HourlyReading, Place, WeatherSnapshot};
pub use provider::{ForecastSource, Geocoder, IpLocator, Providers, providers_from_config};
pub use session::{Query, SearchOutcome, Session, Status, StatusReporter};
pub use theme::Theme;
pub use wmo::WmoTable;
