use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Select, Text};
use std::{fs, path::PathBuf};
use tracing::info;

use weathermap_core::{
    Config, WorldMap,
    city::resolve_cities,
    provider::provider_from_config,
    render::RenderOptions,
    tiles::BaseTiles,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weathermap", version, about = "World map of live city weather")]
pub struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeather API key and map layers.
    Configure,

    /// Fetch weather for every city and write the HTML map.
    Render {
        /// Output file.
        #[arg(long, short, default_value = "weathermap.html")]
        out: PathBuf,

        /// JSON city list to use instead of the bundled one.
        #[arg(long)]
        cities: Option<PathBuf>,

        /// Leave out the temperature overlay tiles.
        #[arg(long)]
        no_overlay: bool,
    },

    /// Fetch weather for every city and print it.
    Show {
        /// JSON city list to use instead of the bundled one.
        #[arg(long)]
        cities: Option<PathBuf>,

        /// Zoom level at which markers are grouped.
        #[arg(long, default_value_t = 2)]
        zoom: u8,
    },

    /// List the cities and the coordinates that will be queried.
    Cities {
        /// JSON city list to use instead of the bundled one.
        #[arg(long)]
        cities: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Render { out, cities, no_overlay } => render(out, cities, no_overlay).await,
            Command::Show { cities, zoom } => show(cities, zoom).await,
            Command::Cities { cities } => list_cities(cities),
        }
    }
}

fn configure() -> Result<()> {
    // The OPENWEATHER_API_KEY override must never be saved to disk.
    let mut cfg = Config::load_stored()?;

    let api_key = Text::new("OpenWeather API key:")
        .with_initial_value(cfg.api_key().unwrap_or_default())
        .prompt()
        .context("API key prompt aborted")?;
    cfg.set_api_key(api_key.trim().to_string());

    let overlay = Confirm::new("Show the temperature overlay tiles?")
        .with_default(cfg.map.overlay)
        .prompt()
        .context("Overlay prompt aborted")?;
    cfg.map.overlay = overlay;

    let options: Vec<&str> = BaseTiles::all().iter().map(BaseTiles::as_str).collect();
    let start = BaseTiles::all().iter().position(|t| *t == cfg.map.base_tiles).unwrap_or(0);
    let choice = Select::new("Base tiles:", options)
        .with_starting_cursor(start)
        .prompt()
        .context("Base tiles prompt aborted")?;
    cfg.map.base_tiles = BaseTiles::try_from(choice)?;

    let path = cfg.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

async fn load_map(cfg: &Config, cities: Option<PathBuf>) -> Result<WorldMap> {
    let provider = provider_from_config(cfg)?;
    let cities = resolve_cities(cities.as_deref())?;

    info!(cities = cities.len(), "fetching weather");

    let mut map = WorldMap::new(cities);
    map.load(provider.as_ref()).await;

    Ok(map)
}

async fn render(out: PathBuf, cities: Option<PathBuf>, no_overlay: bool) -> Result<()> {
    let mut cfg = Config::load()?;
    if no_overlay {
        cfg.map.overlay = false;
    }

    let map = load_map(&cfg, cities).await?;
    let html = map.render_html(&RenderOptions::from_config(&cfg))?;

    fs::write(&out, html).with_context(|| format!("Failed to write map: {}", out.display()))?;

    println!(
        "Wrote {} ({} of {} cities with weather)",
        out.display(),
        map.weather().len(),
        map.cities().len()
    );

    Ok(())
}

async fn show(cities: Option<PathBuf>, zoom: u8) -> Result<()> {
    let cfg = Config::load()?;
    let map = load_map(&cfg, cities).await?;

    for marker in map.markers() {
        let temp = marker
            .temperature_c
            .map(|t| format!("{t:>4}°C"))
            .unwrap_or_else(|| "     -".to_string());
        let bucket = marker.bucket.map(|b| b.as_str()).unwrap_or("-");
        let detail = marker.popup.lines.last().cloned().unwrap_or_default();

        println!("{:<24} {temp}  {bucket:<10}  {detail}", marker.popup.heading);
    }

    let clusters = map.clusters(zoom);
    println!();
    println!("{} cluster(s) at zoom {zoom}:", clusters.len());
    for cluster in clusters.iter().filter(|c| c.len() > 1) {
        println!(
            "  {:>7.2}, {:>7.2}  {}",
            cluster.center.lat,
            cluster.center.lon,
            cluster.members.join(", ")
        );
    }

    Ok(())
}

fn list_cities(cities: Option<PathBuf>) -> Result<()> {
    for city in resolve_cities(cities.as_deref())? {
        let at = city.coordinate();
        println!("{:<16} {}  {:>7}, {:>8}", city.name, city.country, at.lat, at.lon);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn render_defaults() {
        let cli = Cli::parse_from(["weathermap", "render"]);
        match cli.command {
            Command::Render { out, cities, no_overlay } => {
                assert_eq!(out, PathBuf::from("weathermap.html"));
                assert!(cities.is_none());
                assert!(!no_overlay);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_takes_zoom_and_global_verbose() {
        let cli = Cli::parse_from(["weathermap", "show", "--zoom", "5", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Show { zoom: 5, .. }));
    }
}
