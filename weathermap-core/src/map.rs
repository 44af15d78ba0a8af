use crate::{
    cluster::{Cluster, cluster_markers},
    fetch::fetch_report,
    marker::Marker,
    model::{City, WeatherMap},
    provider::WeatherProvider,
    render::{RenderOptions, render_html},
};

/// Owned state of the world map view: the cities, the weather mapping, and
/// whether the fetch has completed.
///
/// The cycle is fetch -> update -> render. No markers are produced before
/// the first fetch completes.
#[derive(Debug, Clone, Default)]
pub struct WorldMap {
    cities: Vec<City>,
    weather: WeatherMap,
    fetch_completed: bool,
}

impl WorldMap {
    pub fn new(cities: Vec<City>) -> Self {
        Self { cities, weather: WeatherMap::new(), fetch_completed: false }
    }

    /// Fetch every city's reading and install the result. Returns the names of
    /// the cities that got no reading.
    pub async fn load(&mut self, provider: &dyn WeatherProvider) -> Vec<String> {
        let report = fetch_report(provider, &self.cities).await;
        self.replace_weather(report.weather);
        report.failed
    }

    /// Swap in a new mapping wholesale and mark the fetch as completed.
    pub fn replace_weather(&mut self, weather: WeatherMap) {
        self.weather = weather;
        self.fetch_completed = true;
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn weather(&self) -> &WeatherMap {
        &self.weather
    }

    pub fn fetch_completed(&self) -> bool {
        self.fetch_completed
    }

    /// One marker per city, in city-list order.
    pub fn markers(&self) -> Vec<Marker> {
        if !self.fetch_completed {
            return Vec::new();
        }

        self.cities
            .iter()
            .map(|city| Marker::for_city(city, self.weather.get(&city.name)))
            .collect()
    }

    pub fn clusters(&self, zoom: u8) -> Vec<Cluster> {
        cluster_markers(&self.markers(), zoom)
    }

    pub fn render_html(&self, options: &RenderOptions) -> anyhow::Result<String> {
        render_html(&self.markers(), options)
    }
}
