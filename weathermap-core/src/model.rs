use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::units::{kelvin_to_celsius, truncate_decimals};

/// A city from the bundled (or user-supplied) city list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub country: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl City {
    pub fn new(name: impl Into<String>, country: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self { name: name.into(), country: country.into(), latitude, longitude }
    }

    /// Coordinate truncated to two decimal places, as sent to the provider
    /// and used for marker placement.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::truncated(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn truncated(lat: f64, lon: f64) -> Self {
        Self { lat: truncate_decimals(lat, 2), lon: truncate_decimals(lon, 2) }
    }
}

/// One provider answer for a city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_k: f64,
    /// `None` when the payload had no `weather` array at all.
    pub description: Option<String>,
    /// Untouched provider JSON, kept for the nested fields we do not model.
    pub raw: Value,
}

impl WeatherReading {
    pub fn temperature_c(&self) -> i64 {
        kelvin_to_celsius(self.temperature_k)
    }
}

/// City name -> last successful reading.
pub type WeatherMap = HashMap<String, WeatherReading>;
