use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{IpLocator, get_json};

pub const DEFAULT_IP_LOOKUP_URL: &str = "https://ipapi.co/json/";

/// Looks up the caller's city from their public IP. No API key needed.
#[derive(Debug, Clone)]
pub struct IpApiLocator {
    http: Client,
    url: String,
}

impl IpApiLocator {
    pub fn new(http: Client, url: String) -> Self {
        Self { http, url }
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    #[serde(default)]
    city: Option<String>,
}

#[async_trait]
impl IpLocator for IpApiLocator {
    async fn locate_city(&self) -> Option<String> {
        match get_json::<IpApiResponse>(&self.http, "ip lookup", &self.url, &[]).await {
            Ok(parsed) => parsed.city.filter(|city| !city.trim().is_empty()),
            Err(err) => {
                debug!("ignoring failed IP lookup: {err}");
                None
            }
        }
    }
}
