// Service exports
pub mod search_client;

pub use search_client::{SearchApi, SearchClient, SearchError};
