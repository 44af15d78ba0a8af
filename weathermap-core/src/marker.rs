use serde::Serialize;

use crate::{
    color::{NO_READING_COLOR, TemperatureBucket},
    model::{City, Coordinate, WeatherReading},
};

/// Popup text for a city whose reading has not arrived.
pub const LOADING_TEXT: &str = "Loading Weather...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Popup {
    pub heading: String,
    pub lines: Vec<String>,
}

impl Popup {
    fn for_city(city: &City, reading: Option<&WeatherReading>) -> Self {
        let heading = format!("{}, {}", city.name, city.country);

        // A reading without a `weather` array is shown as still loading.
        let described = reading.and_then(|r| r.description.as_deref().map(|d| (r, d)));

        let lines = match described {
            Some((r, description)) => vec![
                format!("Temp: {}°C", r.temperature_c()),
                format!("Description: {description}"),
            ],
            None => vec![LOADING_TEXT.to_string()],
        };

        Self { heading, lines }
    }

    pub fn is_loading(&self) -> bool {
        self.lines.len() == 1 && self.lines[0] == LOADING_TEXT
    }
}

impl std::fmt::Display for Popup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.heading)?;
        for line in &self.lines {
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}

/// Everything needed to draw one city on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub name: String,
    pub country: String,
    pub position: Coordinate,
    pub temperature_c: Option<i64>,
    pub bucket: Option<TemperatureBucket>,
    pub color: &'static str,
    pub popup: Popup,
}

impl Marker {
    pub fn for_city(city: &City, reading: Option<&WeatherReading>) -> Self {
        let temperature_c = reading.map(WeatherReading::temperature_c);
        let bucket = temperature_c.map(|t| TemperatureBucket::from_celsius(t as f64));

        Self {
            name: city.name.clone(),
            country: city.country.clone(),
            position: city.coordinate(),
            temperature_c,
            bucket,
            color: bucket.map_or(NO_READING_COLOR, |b| b.hex()),
            popup: Popup::for_city(city, reading),
        }
    }

    /// Temperature label drawn above the city name; empty while loading.
    pub fn label(&self) -> String {
        self.temperature_c.map(|t| t.to_string()).unwrap_or_default()
    }
}
