//! Shared fixtures for unit tests.

use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    sync::oneshot,
    task::JoinHandle,
};

use crate::{
    model::{Condition, Current, Location, WeatherData},
    provider::{FetchError, WeatherSource},
};

/// Trimmed-down `current.json` body for London.
pub const LONDON: &str = r#"{
    "location": {
        "name": "London", "region": "City of London, Greater London",
        "country": "United Kingdom", "lat": 51.52, "lon": -0.11,
        "tz_id": "Europe/London", "localtime_epoch": 1714568700,
        "localtime": "2024-05-01 14:05"
    },
    "current": {
        "last_updated": "2024-05-01 14:00",
        "temp_c": 18.0, "temp_f": 64.4, "is_day": 1,
        "condition": {
            "text": "Partly cloudy",
            "icon": "//cdn.weatherapi.com/weather/64x64/day/116.png",
            "code": 1003
        },
        "wind_kph": 15.1, "wind_dir": "WSW", "humidity": 59, "cloud": 50,
        "feelslike_c": 17.2, "uv": 4.0
    }
}"#;

pub fn london() -> WeatherData {
    serde_json::from_str(LONDON).expect("fixture parses")
}

pub fn city(name: &str, country: &str, temp_c: f64, temp_f: f64) -> WeatherData {
    WeatherData {
        location: Some(Location {
            name: name.into(),
            country: country.into(),
            region: String::new(),
            localtime: "2024-05-01 15:05".into(),
        }),
        current: Some(Current {
            temp_c,
            temp_f,
            feelslike_c: temp_c,
            humidity: 70.0,
            cloud: 25.0,
            uv: 3.0,
            wind_kph: 9.0,
            wind_dir: "N".into(),
            condition: Condition {
                text: "Clear".into(),
                icon: "//cdn.weatherapi.com/weather/64x64/day/113.png".into(),
            },
        }),
    }
}

pub fn not_found_error() -> FetchError {
    FetchError::Status {
        status: reqwest::StatusCode::BAD_REQUEST,
        message: Some("No matching location found.".into()),
    }
}

/// Answers from a fixed table keyed by query and counts calls.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    replies: Mutex<HashMap<String, Result<WeatherData, FetchError>>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn reply(self, query: &str, reply: Result<WeatherData, FetchError>) -> Self {
        self.replies.lock().expect("replies lock").insert(query.to_string(), reply);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherSource for ScriptedSource {
    async fn current(&self, query: &str) -> Result<WeatherData, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .expect("replies lock")
            .remove(query)
            .unwrap_or_else(|| panic!("no scripted reply for {query:?}"))
    }
}

/// Serve one canned HTTP response on a loopback port.
///
/// Returns a `current.json` URL on that port and a handle resolving to the
/// request line the client sent.
pub async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    let response = format!(
        concat!(
            "HTTP/1.1 {}\r\n",
            "content-type: application/json\r\n",
            "content-length: {}\r\n",
            "connection: close\r\n",
            "\r\n",
            "{}",
        ),
        status,
        body.len(),
        body
    );

    let (ready_tx, ready_rx) = oneshot::channel();
    let handle = tokio::spawn(async move {
        let _ = ready_tx.send(());
        let (mut socket, _) = listener.accept().await.expect("accept");

        let mut received = Vec::new();
        let mut buf = [0u8; 1024];
        while !received.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.expect("read request");
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);
        }

        socket.write_all(response.as_bytes()).await.expect("write response");
        socket.shutdown().await.ok();

        String::from_utf8_lossy(&received).lines().next().unwrap_or_default().to_string()
    });
    ready_rx.await.expect("server task started");

    (format!("http://{addr}/v1/current.json"), handle)
}
