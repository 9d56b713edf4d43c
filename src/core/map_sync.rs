use crate::config::MapSettings;
use crate::core::bounds::marker_bounds;
use crate::models::{Coordinates, RestaurantResult, ResultSet};
use geo::Rect;

/// Content shown when a marker is clicked
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPopup {
    pub name: String,
    pub address: String,
    pub rating: Option<f64>,
}

/// Everything a map provider needs to draw one marker
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub key: String,
    pub position: Coordinates,
    pub title: String,
    pub popup: MarkerPopup,
}

impl MarkerSpec {
    /// Build a marker for a result, or `None` when it was never geocoded
    pub fn for_result(restaurant: &RestaurantResult) -> Option<Self> {
        let position = restaurant.coordinates()?;

        Some(Self {
            key: restaurant.key().to_string(),
            position,
            title: restaurant.name.clone(),
            popup: MarkerPopup {
                name: restaurant.name.clone(),
                address: restaurant.address.clone(),
                rating: restaurant.known_rating(),
            },
        })
    }
}

/// The map SDK as seen by the synchronizer.
///
/// Construction, marker lifecycle and viewport fitting are the provider's
/// business; popups are expected to open on marker click.
pub trait MapProvider {
    type Marker;

    /// (Re)create the map view centred on `center`
    fn init_view(&mut self, center: Coordinates, zoom: u8);

    fn place_marker(&mut self, spec: &MarkerSpec) -> Self::Marker;

    fn remove_marker(&mut self, marker: Self::Marker);

    fn fit_bounds(&mut self, bounds: Rect<f64>, padding: u32);
}

/// What a call to [`MapSync::sync`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncReport {
    pub reinitialized: bool,
    /// Markers placed, or `None` when the markers were left alone
    pub placed: Option<usize>,
    /// Results omitted from the map for lack of coordinates
    pub skipped: usize,
}

/// Owns the live map view and its markers.
///
/// The view is rebuilt whenever the focal point changes by value; markers
/// are torn down and recreated whenever the result revision changes.
pub struct MapSync<P: MapProvider> {
    provider: P,
    zoom: u8,
    padding: u32,
    focus: Option<Coordinates>,
    revision: Option<u64>,
    markers: Vec<P::Marker>,
}

impl<P: MapProvider> MapSync<P> {
    pub fn new(provider: P, zoom: u8, padding: u32) -> Self {
        Self {
            provider,
            zoom,
            padding,
            focus: None,
            revision: None,
            markers: Vec::new(),
        }
    }

    pub fn from_settings(provider: P, settings: &MapSettings) -> Self {
        Self::new(provider, settings.zoom, settings.fit_padding)
    }

    /// Reconcile the map with the current focus and result list
    pub fn sync(&mut self, focus: Coordinates, results: &ResultSet) -> SyncReport {
        let mut report = SyncReport::default();

        if self.focus != Some(focus) {
            // Markers belong to the old view
            self.clear_markers();
            tracing::debug!("Initializing map view at {}", focus);
            self.provider.init_view(focus, self.zoom);
            self.focus = Some(focus);
            report.reinitialized = true;
        }

        if report.reinitialized || self.revision != Some(results.revision()) {
            let (placed, skipped) = self.replace_markers(results);
            report.placed = Some(placed);
            report.skipped = skipped;
            self.revision = Some(results.revision());
        }

        report
    }

    fn clear_markers(&mut self) {
        if !self.markers.is_empty() {
            tracing::debug!("Removing {} markers", self.markers.len());
        }
        for marker in self.markers.drain(..) {
            self.provider.remove_marker(marker);
        }
    }

    fn replace_markers(&mut self, results: &ResultSet) -> (usize, usize) {
        self.clear_markers();

        let specs: Vec<MarkerSpec> = results.iter().filter_map(MarkerSpec::for_result).collect();
        let skipped = results.len() - specs.len();

        for spec in &specs {
            let marker = self.provider.place_marker(spec);
            self.markers.push(marker);
        }

        let positions: Vec<Coordinates> = specs.iter().map(|s| s.position).collect();
        if let Some(bounds) = marker_bounds(&positions) {
            self.provider.fit_bounds(bounds, self.padding);
        }

        tracing::debug!(
            "Placed {} markers for revision {} ({} without coordinates)",
            specs.len(),
            results.revision(),
            skipped
        );

        (specs.len(), skipped)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn focus(&self) -> Option<Coordinates> {
        self.focus
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingMap {
        views: usize,
        live: usize,
        fits: usize,
    }

    impl MapProvider for CountingMap {
        type Marker = ();

        fn init_view(&mut self, _center: Coordinates, _zoom: u8) {
            self.views += 1;
        }

        fn place_marker(&mut self, _spec: &MarkerSpec) -> Self::Marker {
            self.live += 1;
        }

        fn remove_marker(&mut self, _marker: ()) {
            self.live -= 1;
        }

        fn fit_bounds(&mut self, _bounds: Rect<f64>, _padding: u32) {
            self.fits += 1;
        }
    }

    fn restaurant(name: &str, coords: Option<(f64, f64)>) -> RestaurantResult {
        RestaurantResult {
            id: Some(name.to_lowercase()),
            name: name.to_string(),
            latitude: coords.map(|c| c.0),
            longitude: coords.map(|c| c.1),
            ..Default::default()
        }
    }

    const NYC: Coordinates = Coordinates::new(40.7128, -74.0060);

    #[test]
    fn test_view_initialized_once_for_equal_focus() {
        let mut map = MapSync::new(CountingMap::default(), 13, 50);
        let results = ResultSet::default();

        assert!(map.sync(NYC, &results).reinitialized);
        // A fresh but equal value must not rebuild the view
        assert!(!map.sync(Coordinates::new(40.7128, -74.0060), &results).reinitialized);
        assert_eq!(map.provider().views, 1);
    }

    #[test]
    fn test_markers_skip_missing_coordinates() {
        let mut map = MapSync::new(CountingMap::default(), 13, 50);
        let results = ResultSet::new(
            1,
            vec![
                restaurant("A", Some((40.72, -74.00))),
                restaurant("B", None),
                restaurant("C", Some((40.70, -73.99))),
            ],
        );

        let report = map.sync(NYC, &results);

        assert_eq!(report.placed, Some(2));
        assert_eq!(report.skipped, 1);
        assert_eq!(map.marker_count(), 2);
        assert_eq!(map.provider().fits, 1);
    }

    #[test]
    fn test_new_revision_replaces_markers() {
        let mut map = MapSync::new(CountingMap::default(), 13, 50);
        map.sync(NYC, &ResultSet::new(1, vec![restaurant("A", Some((40.72, -74.0)))]));

        let report = map.sync(NYC, &ResultSet::new(2, vec![]));

        assert_eq!(report.placed, Some(0));
        assert_eq!(map.provider().live, 0);
        // Nothing to bound, viewport untouched
        assert_eq!(map.provider().fits, 1);
    }

    #[test]
    fn test_same_revision_is_untouched() {
        let mut map = MapSync::new(CountingMap::default(), 13, 50);
        let results = ResultSet::new(1, vec![restaurant("A", Some((40.72, -74.0)))]);
        map.sync(NYC, &results);

        let report = map.sync(NYC, &results);

        assert_eq!(report.placed, None);
        assert_eq!(map.provider().live, 1);
    }
}
