//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather source abstraction and its WeatherAPI.com client
//! - Lookup state (query, loading, error, result) and its view mapping
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod app;
pub mod config;
pub mod model;
pub mod provider;
pub mod view;

#[cfg(test)]
mod test_support;

pub use app::{Submission, WeatherApp};
pub use config::{ClientSettings, Config, Overrides};
pub use model::WeatherData;
pub use provider::{FetchError, WeatherSource};
pub use view::{ViewState, view_state};
