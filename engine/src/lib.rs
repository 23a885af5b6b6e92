// Engine library root: the data pipeline behind the dashboard pages and the
// page services that consume it.

pub mod config;
pub mod data;
pub mod error;
pub mod services;

pub use error::EngineError;
