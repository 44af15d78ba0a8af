//! Core library for the `weathermap` CLI.
//!
//! This crate defines:
//! - The bundled city list and configuration handling
//! - Abstraction over the weather provider and the concurrent per-city fetch
//! - Temperature styling, marker/popup building, clustering and tile addressing
//! - The HTML rendering surface driven by Leaflet
//!
//! It is used by `weathermap-cli`, but can also be reused by other binaries or services.

pub mod city;
pub mod cluster;
pub mod color;
pub mod config;
pub mod error;
pub mod fetch;
pub mod map;
pub mod marker;
pub mod model;
pub mod provider;
pub mod render;
pub mod tiles;
pub mod units;

pub use config::Config;
pub use error::FetchError;
pub use map::WorldMap;
pub use model::{City, Coordinate, WeatherMap, WeatherReading};
pub use provider::WeatherProvider;
