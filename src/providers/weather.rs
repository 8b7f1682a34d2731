use crate::domain::Weather;
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// City used for weather lookups when none is configured
pub const DEFAULT_CITY: &str = "London";

/// Errors returned by weather provider implementations
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather lookup unavailable: {0}")]
    Unavailable(String),
}

/// Current-conditions lookup contract
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(&self, city: &str) -> Result<Weather, WeatherError>;
}

#[derive(Deserialize)]
struct ApiResponse {
    current: ApiCurrent,
}

#[derive(Deserialize)]
struct ApiCurrent {
    temp_c: f64,
    condition: ApiCondition,
}

#[derive(Deserialize)]
struct ApiCondition {
    text: String,
}

/// Weather provider backed by the weatherapi.com current-conditions
/// endpoint. The API key comes from the `WEATHER_API_KEY` environment
/// variable; a missing key is reported as unavailable like any other
/// lookup failure.
pub struct HttpWeatherProvider {
    client: reqwest::Client,
}

impl HttpWeatherProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpWeatherProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for HttpWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<Weather, WeatherError> {
        let key = std::env::var("WEATHER_API_KEY")
            .map_err(|_| WeatherError::Unavailable("WEATHER_API_KEY not set".to_string()))?;

        let url = format!(
            "https://api.weatherapi.com/v1/current.json?key={}&q={}&aqi=no",
            key, city
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WeatherError::Unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| WeatherError::Unavailable(e.to_string()))?;

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Unavailable(e.to_string()))?;

        Ok(Weather {
            temp: body.current.temp_c,
            condition: body.current.condition.text,
        })
    }
}
