//! Concurrent weather lookup for a whole city list.

use futures::future::join_all;
use tracing::{info, warn};

use crate::{
    model::{City, WeatherMap},
    provider::WeatherProvider,
};

/// Result of one fan-out: the readings that arrived plus the names of the
/// cities that did not get one.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub weather: WeatherMap,
    pub failed: Vec<String>,
}

impl FetchReport {
    pub fn requested(&self) -> usize {
        self.weather.len() + self.failed.len()
    }
}

/// Fetch every city's reading concurrently and join the results.
///
/// Failed cities are logged and left out of the mapping. Nothing is retried.
pub async fn fetch_report(provider: &dyn WeatherProvider, cities: &[City]) -> FetchReport {
    let lookups = cities.iter().map(|city| async move {
        let at = city.coordinate();
        (city, provider.get_reading(at).await)
    });

    let mut report = FetchReport::default();

    for (city, result) in join_all(lookups).await {
        match result {
            Ok(reading) => {
                report.weather.insert(city.name.clone(), reading);
            }
            Err(err) => {
                warn!(city = %city.name, error = %err, "weather lookup failed");
                report.failed.push(city.name.clone());
            }
        }
    }

    info!(
        requested = report.requested(),
        succeeded = report.weather.len(),
        failed = report.failed.len(),
        "weather fan-out finished"
    );

    report
}

/// Mapping from city name to reading, for every city whose lookup succeeded.
pub async fn fetch_weather(provider: &dyn WeatherProvider, cities: &[City]) -> WeatherMap {
    fetch_report(provider, cities).await.weather
}
