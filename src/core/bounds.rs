use crate::models::Coordinates;
use geo::{BoundingRect, MultiPoint, Point, Rect};

/// Convert to a geo point (x = longitude, y = latitude)
#[inline]
pub fn to_point(coords: Coordinates) -> Point<f64> {
    Point::new(coords.lng, coords.lat)
}

/// Smallest rectangle containing every coordinate.
///
/// Returns `None` for an empty input so callers can leave the viewport alone.
pub fn marker_bounds(coords: &[Coordinates]) -> Option<Rect<f64>> {
    let points: MultiPoint<f64> = coords.iter().copied().map(to_point).collect();
    points.bounding_rect()
}

/// Check if a coordinate lies within (or on the edge of) a rectangle
#[inline]
pub fn is_within_bounds(coords: Coordinates, bounds: &Rect<f64>) -> bool {
    let (min, max) = (bounds.min(), bounds.max());
    coords.lng >= min.x && coords.lng <= max.x && coords.lat >= min.y && coords.lat <= max.y
}
