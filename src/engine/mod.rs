pub mod aggregator;
pub mod cache;
pub mod regime;
pub mod metrics;
pub mod snapshot;
pub mod service;

pub use aggregator::*;
pub use cache::*;
pub use regime::*;
pub use metrics::*;
pub use snapshot::*;
pub use service::*;
