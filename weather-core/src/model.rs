use serde::{Deserialize, Serialize};

/// Body of a successful `current.json` call.
///
/// Both sections are optional: the renderer decides between the "not found"
/// and the full result view based on which of them are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub current: Option<Current>,
}

/// Leaf fields the provider leaves out fall back to empty values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub region: String,
    /// Provider-formatted local time, e.g. "2024-05-01 14:05". Shown as-is.
    pub localtime: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Current {
    pub temp_c: f64,
    pub temp_f: f64,
    pub feelslike_c: f64,
    pub humidity: f64,
    pub cloud: f64,
    pub uv: f64,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub condition: Condition,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub text: String,
    /// Usually scheme-relative, e.g. "//cdn.weatherapi.com/weather/64x64/day/113.png".
    pub icon: String,
}

impl Condition {
    /// Icon URL with a scheme-relative prefix turned into `https://`.
    pub fn icon_url(&self) -> String {
        match self.icon.strip_prefix("//") {
            Some(rest) => format!("https://{rest}"),
            None => self.icon.clone(),
        }
    }
}

/// Error body returned by the provider on failed calls:
/// `{"error": {"code": 1006, "message": "No matching location found."}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}

impl ErrorEnvelope {
    /// Extract a non-empty provider message from a raw body, if it has the envelope shape.
    pub fn message_from_body(body: &str) -> Option<String> {
        let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
        let message = envelope.error.message;
        if message.trim().is_empty() { None } else { Some(message) }
    }
}
