// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Coordinates, FilterCategory, FilterCriteria, FilterParseError, MinRating, RestaurantResult,
    ResultSet, BUDGET_TIERS,
};
pub use requests::{SearchRequest, ValidationError};
pub use responses::{ErrorResponse, SearchResponse};
