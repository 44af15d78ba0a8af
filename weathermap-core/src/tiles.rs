//! Raster tile layers and slippy-map tile addressing.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const ESRI_LIGHT_GRAY_URL: &str =
    "https://services.arcgisonline.com/ArcGIS/rest/services/Canvas/World_Light_Gray_Base/MapServer/tile/{z}/{y}/{x}";
const OSM_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const TEMPERATURE_OVERLAY_URL: &str = "https://tile.openweathermap.org/map/temp_new/{z}/{x}/{y}.png";

/// Web-mercator latitude limit; tiles do not exist beyond it.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

/// Which base imagery the map uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BaseTiles {
    #[default]
    EsriLightGray,
    Osm,
}

impl BaseTiles {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseTiles::EsriLightGray => "esri-light-gray",
            BaseTiles::Osm => "osm",
        }
    }

    pub const fn all() -> &'static [BaseTiles] {
        &[BaseTiles::EsriLightGray, BaseTiles::Osm]
    }

    pub fn layer(&self) -> TileLayer {
        match self {
            BaseTiles::EsriLightGray => TileLayer::new(ESRI_LIGHT_GRAY_URL, "&copy; Esri"),
            BaseTiles::Osm => TileLayer::new(OSM_URL, "&copy; OpenStreetMap contributors"),
        }
    }
}

impl std::fmt::Display for BaseTiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for BaseTiles {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "esri-light-gray" | "esri" => Ok(BaseTiles::EsriLightGray),
            "osm" | "openstreetmap" => Ok(BaseTiles::Osm),
            _ => Err(anyhow::anyhow!(
                "Unknown base tiles '{value}'. Supported: esri-light-gray, osm."
            )),
        }
    }
}

/// A raster tile service addressed by `{z}`, `{x}` and `{y}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

impl TileLayer {
    pub fn new(url_template: impl Into<String>, attribution: impl Into<String>) -> Self {
        Self { url_template: url_template.into(), attribution: attribution.into() }
    }

    /// OpenWeather's current-temperature overlay, authenticated with `api_key`.
    pub fn temperature_overlay(api_key: &str) -> Self {
        Self::new(
            format!("{TEMPERATURE_OVERLAY_URL}?appid={api_key}"),
            "&copy; OpenWeatherMap",
        )
    }

    pub fn url_for(&self, tile: TileCoord) -> String {
        self.url_template
            .replace("{z}", &tile.z.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TileCoord {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

/// The tile containing `(lat, lon)` at zoom `z`. Latitudes are clamped to the
/// mercator limit and longitudes wrap around the antimeridian.
pub fn tile_for(lat: f64, lon: f64, z: u8) -> TileCoord {
    let n = 2f64.powi(i32::from(z));
    let max = n as u32 - 1;

    let lat = lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    let lon = (lon + 180.0).rem_euclid(360.0);

    let x = (lon / 360.0 * n).floor() as u32;
    let y = ((1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * n).floor() as u32;

    TileCoord { z, x: x.min(max), y: y.min(max) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_tiles_roundtrip_through_str() {
        for tiles in BaseTiles::all() {
            assert_eq!(BaseTiles::try_from(tiles.as_str()).unwrap(), *tiles);
        }
        assert!(BaseTiles::try_from("bing").is_err());
    }

    #[test]
    fn esri_uses_row_before_column() {
        let url = BaseTiles::EsriLightGray.layer().url_for(TileCoord { z: 3, x: 4, y: 2 });
        assert!(url.ends_with("/tile/3/2/4"));
    }

    #[test]
    fn overlay_carries_api_key() {
        let url = TileLayer::temperature_overlay("KEY").url_for(TileCoord { z: 1, x: 0, y: 1 });
        assert_eq!(url, "https://tile.openweathermap.org/map/temp_new/1/0/1.png?appid=KEY");
    }

    #[test]
    fn zoom_zero_is_a_single_tile() {
        assert_eq!(tile_for(51.5, -0.12, 0), TileCoord { z: 0, x: 0, y: 0 });
        assert_eq!(tile_for(-89.0, 179.9, 0), TileCoord { z: 0, x: 0, y: 0 });
    }

    #[test]
    fn known_tiles() {
        // London sits just west of Greenwich.
        assert_eq!(tile_for(51.5, -0.12, 2), TileCoord { z: 2, x: 1, y: 1 });
        assert_eq!(tile_for(51.5, 0.12, 2), TileCoord { z: 2, x: 2, y: 1 });
        // Sydney
        assert_eq!(tile_for(-33.86, 151.2, 3), TileCoord { z: 3, x: 7, y: 4 });
    }

    #[test]
    fn edges_stay_in_range() {
        let t = tile_for(90.0, 180.0, 4);
        assert!(t.x < 16 && t.y < 16);

        let t = tile_for(-90.0, -180.0, 4);
        assert_eq!(t, TileCoord { z: 4, x: 0, y: 15 });
    }
}
