use async_trait::async_trait;
use reqwest::{Client, Url};
use std::fmt;
use tracing::{debug, warn};

use crate::model::{ErrorEnvelope, WeatherData};

use super::{FetchError, WeatherSource};

/// WeatherAPI.com style `current.json` client: `GET {base_url}?key=..&q=..`.
#[derive(Clone)]
pub struct WeatherApiClient {
    api_key: String,
    base_url: Url,
    http: Client,
}

impl WeatherApiClient {
    pub fn new(api_key: String, base_url: Url) -> Self {
        Self::with_http(api_key, base_url, Client::new())
    }

    pub fn with_http(api_key: String, base_url: Url, http: Client) -> Self {
        Self { api_key, base_url, http }
    }

    async fn fetch_current(&self, query: &str) -> Result<WeatherData, FetchError> {
        debug!(base_url = %self.base_url, query, "requesting current conditions");

        let res = self
            .http
            .get(self.base_url.clone())
            .query(&[("key", self.api_key.as_str()), ("q", query)])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let message = ErrorEnvelope::message_from_body(&body);
            debug!(%status, body = %truncate_body(&body), "weather provider returned an error");
            return Err(FetchError::Status { status, message });
        }

        let parsed: WeatherData = serde_json::from_str(&body)?;
        debug!(
            query,
            has_location = parsed.location.is_some(),
            has_current = parsed.current.is_some(),
            "current conditions received"
        );

        Ok(parsed)
    }
}

impl fmt::Debug for WeatherApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherApiClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[async_trait]
impl WeatherSource for WeatherApiClient {
    async fn current(&self, query: &str) -> Result<WeatherData, FetchError> {
        let result = self.fetch_current(query).await;
        if let Err(err) = &result {
            warn!(query, error = %err, "current conditions lookup failed");
        }
        result
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
