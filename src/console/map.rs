use crate::core::map_sync::{MapProvider, MarkerSpec};
use crate::models::Coordinates;
use geo::Rect;
use std::collections::BTreeMap;

/// Map provider for the terminal: keeps marker state and logs every call.
#[derive(Debug, Default)]
pub struct TracingMap {
    next_id: usize,
    markers: BTreeMap<usize, MarkerSpec>,
    viewport: Option<Rect<f64>>,
    provider_key: Option<String>,
}

impl TracingMap {
    pub fn new(provider_key: Option<String>) -> Self {
        Self {
            provider_key,
            ..Default::default()
        }
    }

    pub fn markers(&self) -> impl Iterator<Item = &MarkerSpec> {
        self.markers.values()
    }

    pub fn viewport(&self) -> Option<Rect<f64>> {
        self.viewport
    }
}

impl MapProvider for TracingMap {
    type Marker = usize;

    fn init_view(&mut self, center: Coordinates, zoom: u8) {
        tracing::info!(
            "Map view at {} (zoom {}, keyed: {})",
            center,
            zoom,
            self.provider_key.is_some()
        );
        self.viewport = None;
    }

    fn place_marker(&mut self, spec: &MarkerSpec) -> usize {
        self.next_id += 1;
        tracing::debug!("Marker #{} {:?} at {}", self.next_id, spec.title, spec.position);
        self.markers.insert(self.next_id, spec.clone());
        self.next_id
    }

    fn remove_marker(&mut self, marker: usize) {
        if self.markers.remove(&marker).is_none() {
            tracing::warn!("Tried to remove unknown marker #{}", marker);
        }
    }

    fn fit_bounds(&mut self, bounds: Rect<f64>, padding: u32) {
        tracing::debug!(
            "Fitting viewport to ({:.4}, {:.4})..({:.4}, {:.4}) with {}px padding",
            bounds.min().y,
            bounds.min().x,
            bounds.max().y,
            bounds.max().x,
            padding
        );
        self.viewport = Some(bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MapSync;
    use crate::models::{RestaurantResult, ResultSet};

    #[test]
    fn test_tracing_map_tracks_live_markers() {
        let mut sync = MapSync::new(TracingMap::new(None), 13, 50);
        let results = ResultSet::new(
            1,
            vec![RestaurantResult {
                name: "Katz's".into(),
                latitude: Some(40.7223),
                longitude: Some(-73.9874),
                ..Default::default()
            }],
        );

        sync.sync(Coordinates::new(40.7223, -73.9874), &results);
        assert_eq!(sync.provider().markers().count(), 1);
        assert!(sync.provider().viewport().is_some());

        sync.sync(Coordinates::new(40.7223, -73.9874), &ResultSet::new(2, vec![]));
        assert_eq!(sync.provider().markers().count(), 0);
    }
}
