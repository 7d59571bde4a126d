//! Query input and fetch controller state.
//!
//! A [`WeatherApp`] holds exactly three pieces of lookup state (`loading`,
//! `error`, `weather_data`) plus the query text. Submitting is split in two
//! halves so a host can keep accepting input while a request is in flight:
//! [`WeatherApp::submit`] performs the synchronous reset and hands back a
//! [`Submission`], and [`WeatherApp::complete`] applies whatever that request
//! produced. Overlapping submissions are neither cancelled nor ordered; the
//! last completion applied is what the renderer sees.

use tracing::debug;

use crate::{
    model::WeatherData,
    provider::{FetchError, WeatherSource},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherApp {
    query: String,
    loading: bool,
    error: Option<String>,
    weather_data: Option<WeatherData>,
}

/// A request the host must carry out for one accepted submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Trimmed, non-empty query text.
    pub query: String,
}

impl WeatherApp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the query text verbatim.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn weather_data(&self) -> Option<&WeatherData> {
        self.weather_data.as_ref()
    }

    /// Start a lookup for the current query.
    ///
    /// Blank queries are ignored: `None`, and nothing changes. Otherwise the
    /// previous error and result are dropped and `loading` is set before the
    /// request is handed back.
    pub fn submit(&mut self) -> Option<Submission> {
        let query = self.query.trim();
        if query.is_empty() {
            return None;
        }

        let submission = Submission { query: query.to_string() };
        self.loading = true;
        self.error = None;
        self.weather_data = None;

        debug!(query = %submission.query, "submission accepted");
        Some(submission)
    }

    /// Apply the outcome of a previously submitted request.
    pub fn complete(&mut self, outcome: Result<WeatherData, FetchError>) {
        match outcome {
            Ok(data) => self.weather_data = Some(data),
            Err(err) => self.error = Some(err.display_message()),
        }
        self.loading = false;
    }

    /// Submit and wait for the answer in one step.
    ///
    /// Returns `false` when the query was blank and nothing was requested.
    pub async fn fetch_with(&mut self, source: &dyn WeatherSource) -> bool {
        let Some(submission) = self.submit() else {
            return false;
        };

        let outcome = source.current(&submission.query).await;
        self.complete(outcome);
        true
    }
}
