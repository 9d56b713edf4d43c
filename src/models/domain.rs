use indexmap::IndexSet;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Budget tier tokens accepted by the `budget` category
pub const BUDGET_TIERS: [&str; 4] = ["$", "$$", "$$$", "$$$$"];

/// Errors raised when parsing filter vocabulary from user input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterParseError {
    #[error("Unknown filter category: {0}")]
    UnknownCategory(String),

    #[error("Unsupported minimum rating: {0}")]
    UnknownRating(String),
}

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether the pair can be placed on a map.
    ///
    /// The backend fills missing coordinates with zeros, so exactly (0, 0)
    /// is treated as "not geocoded".
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat.abs() <= 90.0
            && self.lng.abs() <= 180.0
            && !(self.lat == 0.0 && self.lng == 0.0)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// One restaurant record as returned by the search API
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RestaurantResult {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cuisines: Vec<String>,
    #[serde(
        rename = "matchingItems",
        alias = "matching_menu_items",
        default,
        deserialize_with = "null_as_default"
    )]
    pub matching_items: Vec<String>,
    #[serde(rename = "image", alias = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(rename = "menuLink", alias = "menu_url", default)]
    pub menu_link: Option<String>,
    #[serde(rename = "website", alias = "website_url", default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub hours: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub accessibility: Vec<String>,
    #[serde(rename = "serviceTypes", default, deserialize_with = "null_as_default")]
    pub service_types: Vec<String>,
}

impl RestaurantResult {
    /// Map position, if this record was geocoded
    pub fn coordinates(&self) -> Option<Coordinates> {
        let coords = Coordinates::new(self.latitude?, self.longitude?);
        coords.is_valid().then_some(coords)
    }

    /// Identifier used for detail lookups, falling back to the name
    pub fn key(&self) -> &str {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(&self.name)
    }

    /// Rating, treating the backend's zero placeholder as absent
    pub fn known_rating(&self) -> Option<f64> {
        self.rating.filter(|r| *r > 0.0)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An immutable, ordered result list tagged with the revision that produced it.
///
/// The revision changes on every wholesale replacement, which is what
/// downstream consumers key their resets on.
#[derive(Debug, Clone)]
pub struct ResultSet {
    revision: u64,
    restaurants: Arc<[RestaurantResult]>,
}

impl ResultSet {
    pub fn new(revision: u64, restaurants: Vec<RestaurantResult>) -> Self {
        Self {
            revision,
            restaurants: restaurants.into(),
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn as_slice(&self) -> &[RestaurantResult] {
        &self.restaurants
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RestaurantResult> {
        self.restaurants.iter()
    }
}

impl Default for ResultSet {
    fn default() -> Self {
        Self::new(0, Vec::new())
    }
}

/// The six set-valued filter categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterCategory {
    Budget,
    Dietary,
    Cuisines,
    ServiceType,
    Accessibility,
    Operational,
}

impl FilterCategory {
    pub const ALL: [FilterCategory; 6] = [
        FilterCategory::Budget,
        FilterCategory::Dietary,
        FilterCategory::Cuisines,
        FilterCategory::ServiceType,
        FilterCategory::Accessibility,
        FilterCategory::Operational,
    ];

    /// Name used on the wire and in the filter payload
    pub fn wire_name(&self) -> &'static str {
        match self {
            FilterCategory::Budget => "budget",
            FilterCategory::Dietary => "dietary",
            FilterCategory::Cuisines => "cuisines",
            FilterCategory::ServiceType => "serviceType",
            FilterCategory::Accessibility => "accessibility",
            FilterCategory::Operational => "operational",
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for FilterCategory {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterCategory::ALL
            .into_iter()
            .find(|c| c.wire_name() == s)
            .ok_or_else(|| FilterParseError::UnknownCategory(s.to_string()))
    }
}

/// Minimum rating floor; exactly one is always selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum MinRating {
    #[default]
    ThreeAndHalf,
    Four,
    FourAndHalf,
}

impl MinRating {
    pub const ALL: [MinRating; 3] = [MinRating::ThreeAndHalf, MinRating::Four, MinRating::FourAndHalf];

    pub fn value(&self) -> f64 {
        match self {
            MinRating::ThreeAndHalf => 3.5,
            MinRating::Four => 4.0,
            MinRating::FourAndHalf => 4.5,
        }
    }
}

impl From<MinRating> for f64 {
    fn from(rating: MinRating) -> Self {
        rating.value()
    }
}

impl TryFrom<f64> for MinRating {
    type Error = FilterParseError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        MinRating::ALL
            .into_iter()
            .find(|r| (r.value() - value).abs() < f64::EPSILON)
            .ok_or_else(|| FilterParseError::UnknownRating(value.to_string()))
    }
}

impl FromStr for MinRating {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .trim_end_matches('+')
            .parse()
            .map_err(|_| FilterParseError::UnknownRating(s.to_string()))?;
        MinRating::try_from(value)
    }
}

impl fmt::Display for MinRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}+", self.value())
    }
}

/// User-selected constraints sent alongside a location.
///
/// Each set keeps first-selection order and never holds duplicates.
/// State transitions live in `core::filters`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub(crate) budget: IndexSet<String>,
    #[serde(default)]
    pub(crate) dietary: IndexSet<String>,
    #[serde(default)]
    pub(crate) cuisines: IndexSet<String>,
    #[serde(default)]
    pub(crate) service_type: IndexSet<String>,
    #[serde(default)]
    pub(crate) accessibility: IndexSet<String>,
    #[serde(default)]
    pub(crate) operational: IndexSet<String>,
    #[serde(default)]
    pub(crate) min_rating: MinRating,
}

impl FilterCriteria {
    /// Selected values for a category, in selection order
    pub fn values(&self, category: FilterCategory) -> &IndexSet<String> {
        match category {
            FilterCategory::Budget => &self.budget,
            FilterCategory::Dietary => &self.dietary,
            FilterCategory::Cuisines => &self.cuisines,
            FilterCategory::ServiceType => &self.service_type,
            FilterCategory::Accessibility => &self.accessibility,
            FilterCategory::Operational => &self.operational,
        }
    }

    pub(crate) fn values_mut(&mut self, category: FilterCategory) -> &mut IndexSet<String> {
        match category {
            FilterCategory::Budget => &mut self.budget,
            FilterCategory::Dietary => &mut self.dietary,
            FilterCategory::Cuisines => &mut self.cuisines,
            FilterCategory::ServiceType => &mut self.service_type,
            FilterCategory::Accessibility => &mut self.accessibility,
            FilterCategory::Operational => &mut self.operational,
        }
    }

    pub fn min_rating(&self) -> MinRating {
        self.min_rating
    }
}
