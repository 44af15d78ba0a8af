use crate::{
    Config,
    error::FetchError,
    model::{Coordinate, WeatherReading},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

pub mod openweather;

/// Source of current weather for a coordinate.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_reading(&self, at: Coordinate) -> Result<WeatherReading, FetchError>;
}

/// Construct the OpenWeather provider described by `config`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `weathermap configure` or set OPENWEATHER_API_KEY."
        )
    })?;

    let provider = OpenWeatherProvider::with_base_url(api_key.to_owned(), &config.openweather.base_url)
        .with_timeout(Duration::from_secs(config.openweather.timeout_secs))?;

    Ok(Box::new(provider))
}
