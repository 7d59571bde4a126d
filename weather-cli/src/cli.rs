use std::{io::Write, process::ExitCode, sync::Arc};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use inquire::{CustomUserError, Password, PasswordDisplayMode, Text, validator::Validation};
use tracing::debug;
use weather_core::{
    ClientSettings, Config, Overrides, ViewState, WeatherApp, WeatherSource,
    config::DEFAULT_BASE_URL, provider::source_from_settings, view_state,
};

use crate::session;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather conditions for a location")]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Defaults to `run` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Provider settings that take precedence over the config file.
#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// Provider API key.
    #[arg(long, env = "WEATHER_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Provider endpoint, e.g. https://api.weatherapi.com/v1/current.json
    #[arg(long, env = "WEATHER_BASE_URL", global = true)]
    pub base_url: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive session: type a location per line, Ctrl-D to quit.
    Run,

    /// Look up one location and print the result.
    Show {
        /// Location name, postcode, IATA code or "lat,lon".
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Store the API key and endpoint in the config file.
    Configure,

    /// Print where the config file lives.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command.unwrap_or(Command::Run) {
            Command::Run => {
                let source = build_source(&self.connection)?;
                let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                session::run(Arc::from(source), stdin, &mut std::io::stdout()).await?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { query } => {
                let source = build_source(&self.connection)?;
                let ok = show(source.as_ref(), &query.join(" "), &mut std::io::stdout()).await?;
                Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
            }
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn settings(connection: &ConnectionArgs) -> anyhow::Result<ClientSettings> {
    let config = Config::load()?;
    let overrides =
        Overrides { api_key: connection.api_key.clone(), base_url: connection.base_url.clone() };
    config.resolve(&overrides)
}

fn build_source(connection: &ConnectionArgs) -> anyhow::Result<Box<dyn WeatherSource>> {
    let settings = settings(connection)?;
    debug!(?settings, "resolved provider settings");
    Ok(source_from_settings(&settings))
}

/// One-shot lookup. A blank query requests nothing and prints the idle view.
///
/// Returns `false` when the error view was shown.
async fn show(
    source: &dyn WeatherSource,
    query: &str,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let mut app = WeatherApp::new();
    app.set_query(query);
    app.fetch_with(source).await;

    let view = view_state(&app);
    write!(out, "{view}").context("Failed to write output")?;

    Ok(!matches!(view, ViewState::Error(_)))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let mut key_prompt = Password::new("API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked);
    if config.has_api_key() {
        key_prompt = key_prompt.with_help_message("Leave empty to keep the current key");
    }
    let api_key = key_prompt.prompt()?;

    if !api_key.trim().is_empty() {
        config.set_api_key(api_key);
    } else if !config.has_api_key() {
        bail!("An API key is required.");
    }

    let current_url = config.base_url.clone().unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let base_url = Text::new("Base URL:")
        .with_default(&current_url)
        .with_validator(|input: &str| -> Result<Validation, CustomUserError> {
            let mut probe = Config::default();
            Ok(match probe.set_base_url(input) {
                Ok(()) => Validation::Valid,
                Err(err) => Validation::Invalid(err.to_string().into()),
            })
        })
        .prompt()?;
    config.set_base_url(&base_url)?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}
