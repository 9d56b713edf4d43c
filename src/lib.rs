//! Restaurant Finder - search, filter and map client for the restaurant finder API
//!
//! This library holds the coordination core behind the landing page: the
//! filter model, the search client, the search orchestrator with its
//! stale-response guard, map marker synchronization and result paging.

pub mod config;
pub mod console;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{MapProvider, MapSync, Notice, NoticeSink, ResultPager, SearchOrchestrator, SearchPhase};
pub use crate::models::{Coordinates, FilterCategory, FilterCriteria, MinRating, RestaurantResult, ResultSet, SearchRequest};
pub use crate::services::{SearchApi, SearchClient, SearchError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let request = SearchRequest::new("Toronto", FilterCriteria::default()).unwrap();
        assert_eq!(request.filters.min_rating(), MinRating::ThreeAndHalf);
    }
}
