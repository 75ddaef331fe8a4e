pub mod auth;
pub mod config;
pub mod distance;
pub mod error;
pub mod gate;
pub mod history;
pub mod logging;
pub mod models;
pub mod query;

pub use config::HistoryConfig;
pub use distance::{DistanceComputation, DistanceHandle, DistanceOptions};
pub use error::{HistoryError, Result};
pub use gate::AccessGate;
pub use history::{History, QueryService};
pub use models::{Aggregator, QueryRequest, QueryResponse, TimeWindow};
