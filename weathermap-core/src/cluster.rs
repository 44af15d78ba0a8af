//! Grid clustering of markers, grouping those that share a map tile.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::{
    marker::Marker,
    model::Coordinate,
    tiles::{TileCoord, tile_for},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    pub tile: TileCoord,
    /// Mean position of the members.
    pub center: Coordinate,
    pub members: Vec<String>,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Group markers by the tile they fall in at `zoom`. Clusters come back in
/// tile order; members keep their input order.
pub fn cluster_markers(markers: &[Marker], zoom: u8) -> Vec<Cluster> {
    let mut by_tile: BTreeMap<TileCoord, Vec<&Marker>> = BTreeMap::new();

    for marker in markers {
        let tile = tile_for(marker.position.lat, marker.position.lon, zoom);
        by_tile.entry(tile).or_default().push(marker);
    }

    by_tile
        .into_iter()
        .map(|(tile, members)| {
            let n = members.len() as f64;
            let (lat, lon) = members
                .iter()
                .fold((0.0, 0.0), |(lat, lon), m| (lat + m.position.lat, lon + m.position.lon));

            Cluster {
                tile,
                center: Coordinate { lat: lat / n, lon: lon / n },
                members: members.iter().map(|m| m.name.clone()).collect(),
            }
        })
        .collect()
}
