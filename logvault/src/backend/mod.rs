//! Document-search backend access

pub mod elasticsearch;
pub mod response;
pub mod traits;

pub use elasticsearch::ElasticsearchClient;
pub use response::{EsSearchResponse, Hit, HitsResponse, TotalHits};
pub use traits::SearchBackend;
