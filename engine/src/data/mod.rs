// Loading, parsing, reshaping and aggregation of the dashboard datasets.
pub mod aggregate;
pub mod cache;
pub mod datasets;
pub mod loader;
pub mod period;
pub mod reshape;
pub mod summary;

pub use cache::DatasetCache;
pub use loader::{load_table, parse_table, Delimiter};
pub use period::parse_period;
