pub mod cache;
pub mod config;
pub mod evaluate;
pub mod feeds;
pub mod fingerprint;
pub mod monitor;
pub mod notify;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use cache::AlertCache;
pub use config::Config;
pub use monitor::{CycleStats, Monitor};
