use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;

use crate::{ClientSettings, model::WeatherData, provider::weatherapi::WeatherApiClient};

pub mod weatherapi;

/// Text shown when a failed call carries no usable provider message.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// A failed current-conditions lookup.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to weather provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather provider answered with status {status}")]
    Status { status: StatusCode, message: Option<String> },

    #[error("could not decode weather provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Message to show the user: the provider's own error text when it sent
    /// one, otherwise [`GENERIC_ERROR_MESSAGE`].
    pub fn display_message(&self) -> String {
        match self {
            FetchError::Status { message: Some(message), .. } => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Where current conditions come from.
///
/// `query` is already trimmed and non-empty.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current(&self, query: &str) -> Result<WeatherData, FetchError>;
}

/// Construct the HTTP-backed source from resolved settings.
pub fn source_from_settings(settings: &ClientSettings) -> Box<dyn WeatherSource> {
    Box::new(WeatherApiClient::new(settings.api_key.clone(), settings.base_url.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_with_message_is_shown_verbatim() {
        let err = FetchError::Status {
            status: StatusCode::BAD_REQUEST,
            message: Some("No matching location found.".into()),
        };
        assert_eq!(err.display_message(), "No matching location found.");
    }

    #[test]
    fn errors_without_provider_message_fall_back() {
        let status = FetchError::Status { status: StatusCode::BAD_GATEWAY, message: None };
        assert_eq!(status.display_message(), GENERIC_ERROR_MESSAGE);

        let decode = FetchError::from(serde_json::from_str::<WeatherData>("not json").unwrap_err());
        assert_eq!(decode.display_message(), GENERIC_ERROR_MESSAGE);
        assert!(decode.to_string().contains("could not decode"));
    }

    #[test]
    fn source_from_settings_builds_client() {
        let settings = ClientSettings {
            api_key: "KEY".into(),
            base_url: crate::config::DEFAULT_BASE_URL.parse().expect("default url parses"),
        };
        let source = source_from_settings(&settings);
        assert!(format!("{source:?}").contains("WeatherApiClient"));
    }
}
