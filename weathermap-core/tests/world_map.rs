//! End-to-end: city list -> mocked OpenWeather -> markers and HTML.

use serde_json::json;
use weathermap_core::{
    City, Config, WorldMap,
    provider::{openweather::OpenWeatherProvider, provider_from_config},
    render::RenderOptions,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_city(server: &MockServer, lat: &str, lon: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", lat))
        .and(query_param("lon", lon))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn london_popup_shows_mocked_weather() {
    let server = MockServer::start().await;
    mount_city(
        &server,
        "51.51",
        "-0.13",
        json!({"main": {"temp": 283.15}, "weather": [{"description": "clear sky"}]}),
    )
    .await;

    let provider = OpenWeatherProvider::with_base_url("KEY".into(), server.uri());
    let mut map = WorldMap::new(vec![City::new("London", "GB", 51.51, -0.13)]);

    let failed = map.load(&provider).await;
    assert!(failed.is_empty());

    let markers = map.markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].popup.lines, vec!["Temp: 10°C", "Description: clear sky"]);

    let html = map.render_html(&RenderOptions::from_config(&Config::default())).unwrap();
    assert!(html.contains("Temp: 10°C"));
    assert!(html.contains("Description: clear sky"));
}

#[tokio::test]
async fn unanswered_cities_keep_loading_and_are_left_out() {
    let server = MockServer::start().await;
    mount_city(
        &server,
        "48.85",
        "2.35",
        json!({"main": {"temp": 295.15}, "weather": [{"description": "few clouds"}]}),
    )
    .await;
    mount_city(&server, "52.52", "13.4", json!({"weather": []})).await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "40.41"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::with_base_url("KEY".into(), server.uri());
    let mut map = WorldMap::new(vec![
        City::new("Paris", "FR", 48.8566, 2.3522),
        City::new("Berlin", "DE", 52.52, 13.405),
        City::new("Madrid", "ES", 40.4168, -3.7038),
    ]);

    let mut failed = map.load(&provider).await;
    failed.sort();

    assert_eq!(failed, vec!["Berlin", "Madrid"]);
    assert_eq!(map.weather().len(), 1);
    assert!(map.weather().contains_key("Paris"));

    let markers = map.markers();
    assert_eq!(markers.len(), 3);
    assert_eq!(markers[0].popup.lines[0], "Temp: 22°C");
    assert!(markers[1].popup.is_loading());
    assert!(markers[2].popup.is_loading());
}

#[tokio::test]
async fn provider_from_config_honours_base_url() {
    let server = MockServer::start().await;
    mount_city(
        &server,
        "0",
        "0",
        json!({"main": {"temp": 303.15}, "weather": [{"description": "haze"}]}),
    )
    .await;

    let mut cfg = Config::default();
    cfg.set_api_key("KEY".into());
    cfg.openweather.base_url = server.uri();

    let provider = provider_from_config(&cfg).unwrap();
    let mut map = WorldMap::new(vec![City::new("Null Island", "XX", 0.0, 0.0)]);
    map.load(provider.as_ref()).await;

    let markers = map.markers();
    assert_eq!(markers[0].temperature_c, Some(30));
    assert_eq!(markers[0].color, "#FF6347");
}
