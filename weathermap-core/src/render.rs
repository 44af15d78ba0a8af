//! Self-contained HTML page that draws the markers with Leaflet.
//!
//! The page pulls Leaflet and Leaflet.markercluster from a CDN, stacks the
//! base tiles and the optional temperature overlay, and adds one clustered
//! marker per city. Marker icons and popups are prebuilt here so the page
//! script only has to place them.

use html_escape::{encode_double_quoted_attribute, encode_safe};
use serde::Serialize;

use crate::{
    Config,
    marker::Marker,
    tiles::TileLayer,
};

const LEAFLET_VERSION: &str = "1.9.4";
const MARKERCLUSTER_VERSION: &str = "1.5.3";

/// Initial view and panning limits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: f64,
    /// South-west and north-east corners.
    pub max_bounds: [[f64; 2]; 2],
    pub max_bounds_viscosity: f64,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0],
            zoom: 2.5,
            max_bounds: [[-110.0, -200.0], [110.0, 200.0]],
            max_bounds_viscosity: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub title: String,
    pub view: MapView,
    pub base: TileLayer,
    pub overlay: Option<TileLayer>,
}

impl RenderOptions {
    /// Layers as configured. The temperature overlay needs an API key and is
    /// skipped without one.
    pub fn from_config(config: &Config) -> Self {
        let overlay = config
            .map
            .overlay
            .then(|| config.api_key().map(TileLayer::temperature_overlay))
            .flatten();

        Self {
            title: "World Weather Map".to_string(),
            view: MapView::default(),
            base: config.map.base_tiles.layer(),
            overlay,
        }
    }
}

#[derive(Serialize)]
struct PageMarker<'a> {
    lat: f64,
    lon: f64,
    name: &'a str,
    icon: String,
    popup: String,
}

#[derive(Serialize)]
struct PageData<'a> {
    view: &'a MapView,
    layers: Vec<&'a TileLayer>,
    markers: Vec<PageMarker<'a>>,
}

/// Popup body: heading followed by one paragraph per line.
pub fn popup_html(marker: &Marker) -> String {
    let body: String = marker
        .popup
        .lines
        .iter()
        .map(|line| format!("<p>{}</p>", encode_safe(line)))
        .collect();

    if marker.popup.is_loading() {
        format!("<h2>{}</h2>{body}", encode_safe(&marker.popup.heading))
    } else {
        format!("<h2>{}</h2><div>{body}</div>", encode_safe(&marker.popup.heading))
    }
}

/// Marker glyph: a dot, the temperature, and the city name on the bucket color.
pub fn icon_html(marker: &Marker) -> String {
    format!(
        concat!(
            r#"<div class="custom-marker">"#,
            r#"<div class="marker-dot"></div>"#,
            r#"<div class="temperature-city-block">"#,
            r#"<div class="temperature">{temp}</div>"#,
            r#"<div class="city-name" style="background-color: {color};">{name}</div>"#,
            r#"</div></div>"#,
        ),
        temp = encode_safe(&marker.label()),
        color = encode_double_quoted_attribute(marker.color),
        name = encode_safe(&marker.name),
    )
}

/// JSON embedded in a `<script>` element must not close it early.
fn script_safe_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

pub fn render_html(markers: &[Marker], options: &RenderOptions) -> anyhow::Result<String> {
    let mut layers = vec![&options.base];
    layers.extend(options.overlay.as_ref());

    let data = PageData {
        view: &options.view,
        layers,
        markers: markers
            .iter()
            .map(|m| PageMarker {
                lat: m.position.lat,
                lon: m.position.lon,
                name: &m.name,
                icon: icon_html(m),
                popup: popup_html(m),
            })
            .collect(),
    };

    let data = script_safe_json(&data)?;
    let title = encode_safe(&options.title);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.css">
<link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@{MARKERCLUSTER_VERSION}/dist/MarkerCluster.css">
<link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@{MARKERCLUSTER_VERSION}/dist/MarkerCluster.Default.css">
<style>
html, body {{ margin: 0; padding: 0; }}
#map {{ height: 100vh; width: 100%; box-shadow: 0 0 10px rgba(200, 200, 200, 1); }}
.custom-marker {{ display: flex; align-items: flex-start; }}
.marker-dot {{ width: 10px; height: 10px; border-radius: 50%; background: #333; }}
.temperature-city-block {{ margin-left: 4px; font: 12px sans-serif; }}
.temperature {{ font-weight: bold; }}
.city-name {{ padding: 1px 4px; border-radius: 3px; white-space: nowrap; }}
</style>
</head>
<body>
<div id="map"></div>
<script src="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.js"></script>
<script src="https://unpkg.com/leaflet.markercluster@{MARKERCLUSTER_VERSION}/dist/leaflet.markercluster.js"></script>
<script>
const data = {data};
const map = L.map("map", {{
  center: data.view.center,
  zoom: data.view.zoom,
  zoomSnap: 0.5,
  maxBounds: data.view.max_bounds,
  maxBoundsViscosity: data.view.max_bounds_viscosity,
}});
for (const layer of data.layers) {{
  L.tileLayer(layer.url_template, {{ attribution: layer.attribution }}).addTo(map);
}}
const cluster = L.markerClusterGroup();
for (const m of data.markers) {{
  const icon = L.divIcon({{ className: "custom-icon", html: m.icon, iconAnchor: [5, 5], iconSize: [170, 40] }});
  cluster.addLayer(L.marker([m.lat, m.lon], {{ icon, title: m.name }}).bindPopup(m.popup));
}}
map.addLayer(cluster);
</script>
</body>
</html>
"#
    ))
}
