//! Result renderer: maps controller state to exactly one view.

use std::fmt;

use crate::{
    app::WeatherApp,
    model::{Current, Location},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewState<'a> {
    Loading,
    Error(&'a str),
    NotFound,
    Success { location: &'a Location, current: &'a Current },
}

/// Pick the view for the current state. Loading beats error, error beats data.
pub fn view_state(app: &WeatherApp) -> ViewState<'_> {
    if app.is_loading() {
        return ViewState::Loading;
    }
    if let Some(message) = app.error() {
        return ViewState::Error(message);
    }

    match app.weather_data() {
        Some(data) => match (&data.location, &data.current) {
            (Some(location), Some(current)) => ViewState::Success { location, current },
            _ => ViewState::NotFound,
        },
        None => ViewState::NotFound,
    }
}

const SKELETON: [&str; 6] = [
    "░░░░░░░░░░░░░░░░░░░░░░",
    "░░░░░░░░░░░░░░",
    "    ░░░░░░",
    "░░░░░░░░░░░░░░░░░░░░░░",
    "░░░░░░░░░░░░░░",
    "░░░░░░░░░░  ░░░░░░░░░░",
];

impl fmt::Display for ViewState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::Loading => {
                for line in SKELETON {
                    writeln!(f, "{line}")?;
                }
                Ok(())
            }
            ViewState::Error(message) => writeln!(f, "❌ {message}"),
            ViewState::NotFound => writeln!(f, "🔍 Location Not Found"),
            ViewState::Success { location, current } => {
                writeln!(f, "{}, {}", location.name, location.country)?;
                writeln!(f, "📍 {}", location.region)?;
                writeln!(f, "🕒 Local Time: {}", location.localtime)?;
                writeln!(f, "Icon: {}", current.condition.icon_url())?;
                writeln!(f, "{}", current.condition.text)?;
                writeln!(f, "🌡️ {}°C / {}°F", current.temp_c, current.temp_f)?;
                writeln!(f, "Feels like: {}°C", current.feelslike_c)?;
                writeln!(f, "💨 Wind: {} kph ({})", current.wind_kph, current.wind_dir)?;
                writeln!(f, "💧 Humidity: {}%", current.humidity)?;
                writeln!(f, "☁️ Cloud Cover: {}%", current.cloud)?;
                writeln!(f, "🌞 UV Index: {}", current.uv)
            }
        }
    }
}
