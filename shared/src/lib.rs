// Data models and locale helpers shared by the engine and its consumers.
pub mod models;
pub mod utils;

pub use utils::brazilian_format;
