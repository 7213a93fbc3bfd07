//! OpenWeatherMap current-weather client

use serde_json::Value;

use crate::state::{Query, WeatherReading};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const WEATHER_PATH: &str = "/data/2.5/weather";
const REDACTED: &str = "<redacted>";

/// Where and how to reach the weather API
#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    /// Scheme and host, without a trailing path
    pub base_url: String,
    /// Sent as the `appid` query parameter
    pub api_key: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
        }
    }
}

impl ApiConfig {
    /// Request URL for `query`.
    pub fn weather_url(&self, query: &Query) -> String {
        build_url(&self.base_url, query, &self.api_key)
    }

    /// Same as [`weather_url`](Self::weather_url) with the key masked, for logs.
    pub fn redacted_weather_url(&self, query: &Query) -> String {
        build_url(&self.base_url, query, REDACTED)
    }
}

fn build_url(base_url: &str, query: &Query, api_key: &str) -> String {
    format!(
        "{}{}?q={},{}&appid={}",
        base_url.trim_end_matches('/'),
        WEATHER_PATH,
        urlencoding::encode(&query.city),
        urlencoding::encode(&query.country),
        urlencoding::encode(api_key)
    )
}

/// Weather client errors
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// What a lookup produced
#[derive(Clone, Debug, PartialEq)]
pub enum Lookup {
    Found(WeatherReading),
    NotFound,
}

// ============================================================================
// Wire format
// ============================================================================

/// Status code the API uses for unknown locations; sent as a string.
const NOT_FOUND_CODE: &str = "404";

/// Decode a response body.
///
/// Only a string `cod` of `"404"` counts as not found. Every other payload
/// that parses is read as a reading. Fields are coerced loosely: absent
/// fields become empty or NaN, `null` temperatures read as 0 K, numeric
/// strings are parsed, and a non-string name is shown as its JSON text.
pub fn parse_lookup(body: &str) -> Result<Lookup, ApiError> {
    let response: Value = serde_json::from_str(body)?;

    if response.get("cod").and_then(Value::as_str) == Some(NOT_FOUND_CODE) {
        return Ok(Lookup::NotFound);
    }

    let main = response.get("main");
    let temp = |field: &str| loose_number(main.and_then(|m| m.get(field)));
    Ok(Lookup::Found(WeatherReading {
        city_name: loose_text(response.get("name")),
        current_temp_k: temp("temp"),
        max_temp_k: temp("temp_max"),
        min_temp_k: temp("temp_min"),
    }))
}

fn loose_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse().unwrap_or(f64::NAN)
            }
        }
        Some(Value::Array(_) | Value::Object(_)) => f64::NAN,
    }
}

fn loose_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Fetch current weather for `query`. One GET, no retry, no timeout.
pub async fn fetch_weather(
    client: &reqwest::Client,
    config: &ApiConfig,
    query: &Query,
) -> Result<Lookup, ApiError> {
    log::info!("GET {}", config.redacted_weather_url(query));

    let response = client.get(config.weather_url(query)).send().await?;
    let status = response.status();
    let body = response.text().await?;
    log::debug!("weather API answered {status} ({} bytes)", body.len());

    parse_lookup(&body)
}
