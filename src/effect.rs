//! Effects - side effects declared by the reducer, and the tasks that run them

use std::time::Duration;

use crate::action::Action;
use crate::api::{self, ApiConfig, Lookup};
use crate::state::Query;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Look up current weather; the completion carries `generation` back
    FetchWeather { query: Query, generation: u64 },
    /// Remove banner `id` once `after_ms` has elapsed
    ExpireBanner { id: u64, after_ms: u64 },
}

/// Body of the weather task: one lookup, folded into the completion action.
pub async fn fetch_weather(
    client: reqwest::Client,
    config: &ApiConfig,
    query: Query,
    generation: u64,
) -> Action {
    match api::fetch_weather(&client, config, &query).await {
        Ok(Lookup::Found(reading)) => Action::WeatherDidLoad { generation, reading },
        Ok(Lookup::NotFound) => {
            log::info!("no such location: {}, {}", query.city, query.country);
            Action::WeatherDidNotFind { generation }
        }
        Err(e) => {
            log::error!("weather lookup #{generation} failed: {e}");
            Action::WeatherDidError {
                generation,
                message: e.to_string(),
            }
        }
    }
}

/// Body of the banner timer task.
pub async fn expire_banner(id: u64, after_ms: u64) -> Action {
    tokio::time::sleep(Duration::from_millis(after_ms)).await;
    Action::BannerDidExpire(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_expire_banner_waits_then_fires() {
        let started = tokio::time::Instant::now();
        let action = expire_banner(4, 3000).await;
        assert_eq!(action, Action::BannerDidExpire(4));
        assert!(started.elapsed() >= Duration::from_millis(3000));
    }

    #[tokio::test]
    async fn test_fetch_weather_unreachable_host() {
        let config = ApiConfig {
            // Port 9 (discard) on localhost is closed in test environments
            base_url: "http://127.0.0.1:9".into(),
            api_key: "KEY".into(),
        };
        let query = Query {
            city: "London".into(),
            country: "GB".into(),
        };

        let action = fetch_weather(reqwest::Client::new(), &config, query, 5).await;

        assert!(
            matches!(action, Action::WeatherDidError { generation: 5, .. }),
            "{action:?}"
        );
    }
}
