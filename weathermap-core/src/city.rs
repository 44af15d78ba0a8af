use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::model::City;

const BUNDLED_CITIES: &str = include_str!("../data/cities.json");

/// The city list compiled into the binary.
pub fn bundled_cities() -> Result<Vec<City>> {
    serde_json::from_str(BUNDLED_CITIES).context("Failed to parse bundled city list")
}

/// Load a city list from a JSON file with the same shape as the bundled one:
/// `[{"name": "...", "country": "..", "lat": 0.0, "lon": 0.0}, ...]`.
pub fn load_cities(path: &Path) -> Result<Vec<City>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read city list: {}", path.display()))?;

    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse city list: {}", path.display()))
}

/// `load_cities(path)` when a path is given, the bundled list otherwise.
pub fn resolve_cities(path: Option<&Path>) -> Result<Vec<City>> {
    match path {
        Some(p) => load_cities(p),
        None => bundled_cities(),
    }
}
